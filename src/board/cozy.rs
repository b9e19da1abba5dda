use cozy_chess::{BitBoard, Board as CozyBoard, Color, File, Move, Piece, Rank, Square};
use thiserror::Error;

use crate::search::zobrist;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("FEN error: {0}")]
    InvalidFen(String),
    #[error("malformed move: {0}")]
    MalformedMove(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Why a game is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// A move already played on a position, with the mover's colour and piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub color: Color,
    pub piece: Piece,
    pub mv: Move,
}

#[derive(Clone, Debug)]
struct Undo {
    board: CozyBoard,
    mv: Move,
}

// Light squares: b1, d1, ..., a2, c2, ...
const LIGHT_SQUARES: BitBoard = BitBoard(0x55AA_55AA_55AA_55AA);

/// Mutable game state with apply/undo on top of a cozy-chess board.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    history: Vec<Undo>,
    root_plies: u32,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(CozyBoard::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(Self::from_board)
            .map_err(|e| PositionError::InvalidFen(format!("{e:?}")))
    }

    pub fn from_board(board: CozyBoard) -> Self {
        let mut root_plies = (board.fullmove_number().max(1) as u32 - 1) * 2;
        if board.side_to_move() == Color::Black { root_plies += 1; }
        Self { board, history: Vec::new(), root_plies }
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    /// +1 when White is to move, -1 otherwise.
    pub fn perspective(&self) -> i32 {
        if self.side_to_move() == Color::White { 1 } else { -1 }
    }

    /// Legal moves in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn legal_move_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    pub fn is_legal(&self, mv: Move) -> bool { self.board.is_legal(mv) }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            if self.in_check() {
                return Some(Outcome::Checkmate { winner: !self.side_to_move() });
            }
            return Some(Outcome::Stalemate);
        }
        if self.is_insufficient_material() { return Some(Outcome::InsufficientMaterial); }
        if self.board.halfmove_clock() >= 100 { return Some(Outcome::FiftyMoveRule); }
        None
    }

    pub fn is_game_over(&self) -> bool { self.outcome().is_some() }

    pub fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    pub fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_moves() }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let others = b.occupied() ^ b.pieces(Piece::King);
        if others.is_empty() { return true; }
        let minors = b.pieces(Piece::Knight) | b.pieces(Piece::Bishop);
        if others.len() == 1 && !(others & minors).is_empty() { return true; }
        // Only bishops left, all on one square colour.
        others == b.pieces(Piece::Bishop)
            && ((others & LIGHT_SQUARES).is_empty() || (others & !LIGHT_SQUARES).is_empty())
    }

    /// Plays a move assumed legal. Use `try_play` for untrusted input.
    pub fn play(&mut self, mv: Move) {
        let prev = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push(Undo { board: prev, mv });
    }

    pub fn try_play(&mut self, mv: Move) -> Result<(), PositionError> {
        if !self.board.is_legal(mv) {
            return Err(PositionError::IllegalMove(self.move_to_uci(mv)));
        }
        self.play(mv);
        Ok(())
    }

    pub fn play_uci(&mut self, mv_uci: &str) -> Result<Move, PositionError> {
        let mv = self.parse_uci(mv_uci)?;
        self.try_play(mv)?;
        Ok(mv)
    }

    pub fn undo(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.board = undo.board;
        Some(undo.mv)
    }

    /// Runs `f` with `mv` applied and restores the position afterwards.
    pub fn with_move<R>(&mut self, mv: Move, f: impl FnOnce(&mut Position) -> R) -> R {
        self.play(mv);
        let r = f(self);
        self.undo();
        r
    }

    pub fn last_move(&self) -> Option<Move> { self.history.last().map(|u| u.mv) }

    /// The last move in standard UCI, read against the board it was played on.
    pub fn last_move_uci(&self) -> Option<String> {
        self.history.last().map(|u| uci_on(&u.board, u.mv))
    }

    pub fn plies_played(&self) -> u32 { self.root_plies + self.history.len() as u32 }

    pub fn moves_played(&self) -> impl Iterator<Item = PlayedMove> + '_ {
        self.history.iter().filter_map(|u| {
            let piece = u.board.piece_on(u.mv.from)?;
            Some(PlayedMove { color: u.board.side_to_move(), piece, mv: u.mv })
        })
    }

    /// Transposition key over pieces, side to move, castling rights and en passant.
    pub fn key(&self) -> u64 { zobrist::compute(&self.board) }

    /// Canonical serialization: the first four FEN fields.
    pub fn serialize(&self) -> String {
        self.fen().split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// Standard UCI text; castling is written as the king's two-square move.
    pub fn move_to_uci(&self, mv: Move) -> String { uci_on(&self.board, mv) }

    /// Parses standard UCI text into the board's move encoding.
    pub fn parse_uci(&self, mv_uci: &str) -> Result<Move, PositionError> {
        let mut mv: Move = mv_uci
            .trim()
            .parse()
            .map_err(|_| PositionError::MalformedMove(mv_uci.to_string()))?;
        let stm = self.side_to_move();
        let back = if stm == Color::White { Rank::First } else { Rank::Eighth };
        let king_move = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.from) == Some(stm);
        let two_files = (mv.from.file() as i32 - mv.to.file() as i32).abs() == 2;
        if king_move && two_files && mv.from.rank() == back && mv.to.rank() == back {
            let rights = self.board.castle_rights(stm);
            let rook_file = if mv.to.file() as usize > mv.from.file() as usize { rights.short } else { rights.long };
            if let Some(f) = rook_file {
                mv.to = Square::new(f, back);
            }
        }
        Ok(mv)
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, PositionError> {
        let mut pos = Self::startpos();
        for m in moves { pos.play_uci(m)?; }
        Ok(pos)
    }
}

// `mv` in UCI text as played on `board`; king-takes-rook becomes the king's
// two-square move.
fn uci_on(board: &CozyBoard, mv: Move) -> String {
    let stm = board.side_to_move();
    let is_castle = board.piece_on(mv.from) == Some(Piece::King) && board.colored_pieces(stm, Piece::Rook).has(mv.to);
    if is_castle {
        let file = if mv.to.file() as usize > mv.from.file() as usize { File::G } else { File::C };
        let to = Square::new(file, mv.from.rank());
        return format!("{}{}", mv.from, to);
    }
    format!("{}", mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_move_restores_board_and_history() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let mv = pos.parse_uci("e2e4").unwrap();
        let inner = pos.with_move(mv, |p| p.fen());
        assert_ne!(inner, before);
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.plies_played(), 0);
    }

    #[test]
    fn castling_uses_standard_notation() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = pos.parse_uci("e1g1").unwrap();
        assert_eq!(mv.to, Square::H1);
        assert_eq!(pos.move_to_uci(mv), "e1g1");
        pos.try_play(mv).unwrap();
        assert_eq!(pos.board().piece_on(Square::G1), Some(Piece::King));
        assert_eq!(pos.last_move_uci().as_deref(), Some("e1g1"));
        let long = pos.parse_uci("e8c8").unwrap();
        assert_eq!(pos.move_to_uci(long), "e8c8");
    }

    #[test]
    fn plies_count_from_fen_move_number() {
        let pos = Position::from_fen("8/8/4k3/8/8/4K3/4P3/8 b - - 0 12").unwrap();
        assert_eq!(pos.plies_played(), 23);
    }
}
