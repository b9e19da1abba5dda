//! Individual evaluation terms. Every function returns White minus Black in
//! centipawns, before phase weighting.

use cozy_chess::{get_between_rays, get_bishop_moves, get_rook_moves, BitBoard, Board, Color, Piece, Square};

use crate::board::attacks::{attacked_by, attackers, attacks_from, is_attacked, king_square, king_zone};
use crate::board::Position;

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;

pub const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Trade value of a piece. Kings are never traded and count as zero.
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => 0,
    }
}

fn count(board: &Board, color: Color, piece: Piece) -> i32 {
    board.colored_pieces(color, piece).len() as i32
}

fn sign(color: Color) -> i32 {
    if color == Color::White { 1 } else { -1 }
}

fn back_rank(color: Color) -> usize {
    if color == Color::White { 0 } else { 7 }
}

fn center_bb() -> BitBoard {
    CENTER.iter().fold(BitBoard::EMPTY, |bb, &sq| bb | sq.bitboard())
}

fn per_color(board: &Board, f: impl Fn(&Board, Color) -> i32) -> i32 {
    f(board, Color::White) - f(board, Color::Black)
}

pub fn material(board: &Board) -> i32 {
    per_color(board, |b, c| {
        [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .iter()
            .map(|&p| count(b, c, p) * piece_value(p))
            .sum()
    })
}

pub fn king_safety(board: &Board) -> i32 {
    per_color(board, |b, c| match king_square(b, c) {
        None => -500,
        Some(k) if is_attacked(b, k, !c) => -50,
        Some(_) => 0,
    })
}

pub fn development(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let rank = back_rank(c);
        let off_home = |piece: Piece, files: [usize; 2]| {
            b.colored_pieces(c, piece)
                .into_iter()
                .filter(|sq| !(sq.rank() as usize == rank && files.contains(&(sq.file() as usize))))
                .count() as i32
        };
        off_home(Piece::Knight, [1, 6]) * 35 + off_home(Piece::Bishop, [2, 5]) * 20
    })
}

/// Legal-move difference. Zero while the side to move is in check, since the
/// opponent's count is not defined there.
pub fn mobility(pos: &Position) -> i32 {
    let board = pos.board();
    let Some(passed) = board.null_move() else { return 0 };
    let mut theirs = 0i32;
    passed.generate_moves(|ml| { theirs += ml.len() as i32; false });
    let ours = pos.legal_move_count() as i32;
    sign(board.side_to_move()) * (ours - theirs)
}

pub fn center_control(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let mut score = 0;
        for &sq in &CENTER {
            if b.color_on(sq) == Some(c) {
                score += match b.piece_on(sq) {
                    Some(Piece::Pawn) => 10,
                    Some(Piece::Knight) | Some(Piece::Bishop) => 20,
                    Some(Piece::Rook) => 15,
                    Some(Piece::Queen) => 25,
                    _ => 0,
                };
            }
            score += attackers(b, sq, c).len() as i32 * 10;
        }
        score
    })
}

pub fn center_pawns(board: &Board) -> i32 {
    per_color(board, |b, c| (b.colored_pieces(c, Piece::Pawn) & center_bb()).len() as i32 * 50)
}

pub fn castling(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let rights = b.castle_rights(c);
        if rights.short.is_some() || rights.long.is_some() { return 0; }
        let Some(k) = king_square(b, c) else { return 0 };
        let rank = back_rank(c);
        if k.rank() as usize != rank || is_attacked(b, k, !c) { return 0; }
        let hit = attacked_by(b, !c);
        let safe = |files: [usize; 2]| files.iter().all(|&f| !hit.has(Square::index(rank * 8 + f)));
        let file = k.file() as usize;
        if file >= 5 && safe([5, 6]) {
            50
        } else if file <= 2 && safe([2, 3]) {
            25
        } else {
            0
        }
    })
}

pub fn piece_safety(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let mine = b.colors(c) & !b.pieces(Piece::King);
        mine.into_iter()
            .filter(|&sq| is_attacked(b, sq, !c) && !is_attacked(b, sq, c))
            .count() as i32
            * -50
    })
}

pub fn piece_activity(board: &Board) -> i32 {
    per_color(board, |b, c| {
        CENTER
            .iter()
            .filter(|&&sq| b.color_on(sq) == Some(c))
            .map(|&sq| match b.piece_on(sq) {
                Some(Piece::Knight) | Some(Piece::Bishop) => 10,
                Some(Piece::Rook) => 15,
                Some(Piece::Queen) => 25,
                _ => 0,
            })
            .sum()
    })
}

pub fn attacking_chances(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let zone = king_zone(b, !c);
        let mut score = 0;
        for (piece, bonus) in [(Piece::Queen, 50), (Piece::Rook, 30), (Piece::Bishop, 20), (Piece::Knight, 20)] {
            for sq in b.colored_pieces(c, piece) {
                if !(attacks_from(b, sq) & zone).is_empty() { score += bonus; }
            }
        }
        score
    })
}

pub fn king_activity(board: &Board) -> i32 {
    per_color(board, |b, c| match king_square(b, c) {
        Some(k) if CENTER.contains(&k) => 50,
        _ => 0,
    })
}

pub fn pawn_structure(board: &Board) -> i32 {
    per_color(board, |b, c| {
        let mut files = [0i32; 8];
        for sq in b.colored_pieces(c, Piece::Pawn) { files[sq.file() as usize] += 1; }
        let doubled = files.iter().filter(|&&n| n > 1).count() as i32;
        let isolated: i32 = (0..8)
            .filter(|&f| {
                let left = f > 0 && files[f - 1] > 0;
                let right = f < 7 && files[f + 1] > 0;
                !left && !right
            })
            .map(|f| files[f])
            .sum();
        -30 * doubled - 20 * isolated
    })
}

/// Penalties that only make sense in the first plies: an early centralised
/// queen and re-moving the same non-pawn piece on consecutive turns.
pub fn opening_penalties(pos: &Position) -> i32 {
    let board = pos.board();
    let mut repeats = [0i32; 2];
    let mut last_to: [Option<Square>; 2] = [None, None];
    for played in pos.moves_played() {
        let c = if played.color == Color::White { 0 } else { 1 };
        if played.piece != Piece::Pawn && last_to[c] == Some(played.mv.from) {
            repeats[c] += 1;
        }
        last_to[c] = Some(played.mv.to);
    }
    per_color(board, |b, c| {
        let idx = if c == Color::White { 0 } else { 1 };
        let queens = (b.colored_pieces(c, Piece::Queen) & center_bb()).len() as i32;
        -40 * queens - 15 * repeats[idx]
    })
}

// For each slider of `color`, find enemy pieces sitting directly behind the
// first piece on a line. Returns (behind own blocker, behind enemy blocker).
fn line_threats(board: &Board, color: Color) -> (i32, i32) {
    let occ = board.occupied();
    let own = board.colors(color);
    let enemy = board.colors(!color);
    let mut hidden = 0;
    let mut xray = 0;
    let mut scan = |sq: Square, lines: fn(Square, BitBoard) -> BitBoard| {
        let direct = lines(sq, occ);
        let blockers = direct & occ;
        let behind = lines(sq, occ ^ blockers) & !direct & enemy;
        for target in behind {
            if !(get_between_rays(sq, target) & occ & own).is_empty() {
                hidden += 1;
            } else {
                xray += 1;
            }
        }
    };
    for sq in board.colored_pieces(color, Piece::Bishop) | board.colored_pieces(color, Piece::Queen) {
        scan(sq, get_bishop_moves);
    }
    for sq in board.colored_pieces(color, Piece::Rook) | board.colored_pieces(color, Piece::Queen) {
        scan(sq, get_rook_moves);
    }
    (hidden, xray)
}

/// Discovered attacks: an own piece stands between an own slider and an enemy piece.
pub fn hidden_attacks(board: &Board) -> i32 {
    per_color(board, |b, c| line_threats(b, c).0 * 8)
}

/// X-ray threats: an enemy piece shields another enemy piece on a slider line.
pub fn x_ray(board: &Board) -> i32 {
    per_color(board, |b, c| line_threats(b, c).1 * 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board { Board::from_fen(fen, false).unwrap() }

    #[test]
    fn doubled_and_isolated_pawns_penalised() {
        // White: doubled, isolated c-pawns. Black: connected e/f pawns.
        let b = board("4k3/4pp2/8/8/8/2P5/2P5/4K3 w - - 0 30");
        assert_eq!(pawn_structure(&b), -30 - 40);
    }

    #[test]
    fn rook_behind_knight_is_hidden_attack() {
        // Ra1, Na4 shields a black rook on a8: moving the knight discovers it.
        let b = board("r3k3/8/8/8/N7/8/8/R3K3 w - - 0 30");
        assert_eq!(line_threats(&b, Color::White), (1, 0));
        // Black's a8 rook x-rays the a1 rook through the knight.
        assert_eq!(line_threats(&b, Color::Black), (0, 1));
    }

    #[test]
    fn castled_king_on_safe_wing_earns_bonus() {
        let b = board("4k3/8/8/8/8/8/5PPP/5RK1 w - - 0 30");
        assert_eq!(castling(&b), 50);
    }

    #[test]
    fn king_value_never_counted() {
        assert_eq!(material(&board("4k3/8/8/8/8/8/8/4K3 w - - 0 1")), 0);
    }
}
