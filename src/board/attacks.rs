use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard, Board, Color,
    Piece, Square,
};

/// Squares attacked by whatever stands on `sq`, given the current occupancy.
pub fn attacks_from(board: &Board, sq: Square) -> BitBoard {
    let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else { return BitBoard::EMPTY };
    let occ = board.occupied();
    match piece {
        Piece::Pawn => get_pawn_attacks(sq, color),
        Piece::Knight => get_knight_moves(sq),
        Piece::Bishop => get_bishop_moves(sq, occ),
        Piece::Rook => get_rook_moves(sq, occ),
        Piece::Queen => get_bishop_moves(sq, occ) | get_rook_moves(sq, occ),
        Piece::King => get_king_moves(sq),
    }
}

/// Pieces of `by` attacking `sq`.
pub fn attackers(board: &Board, sq: Square, by: Color) -> BitBoard {
    let occ = board.occupied();
    let diag = board.pieces(Piece::Bishop) | board.pieces(Piece::Queen);
    let ortho = board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    let all = (get_knight_moves(sq) & board.pieces(Piece::Knight))
        | (get_king_moves(sq) & board.pieces(Piece::King))
        | (get_bishop_moves(sq, occ) & diag)
        | (get_rook_moves(sq, occ) & ortho)
        | (get_pawn_attacks(sq, !by) & board.pieces(Piece::Pawn));
    all & board.colors(by)
}

pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    !attackers(board, sq, by).is_empty()
}

/// King square, if the side still has one.
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.colored_pieces(color, Piece::King).into_iter().next()
}

/// The king's square plus its neighbours.
pub fn king_zone(board: &Board, color: Color) -> BitBoard {
    match king_square(board, color) {
        Some(k) => get_king_moves(k) | k.bitboard(),
        None => BitBoard::EMPTY,
    }
}

/// Every square attacked by at least one piece of `color`.
pub fn attacked_by(board: &Board, color: Color) -> BitBoard {
    board.colors(color).into_iter().fold(BitBoard::EMPTY, |acc, sq| acc | attacks_from(board, sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_and_slider_attackers_found() {
        // White pawn d3 and rook e1 both hit e4; black knight f6 too.
        let board = Board::from_fen("4k3/8/5n2/8/4p3/3P4/8/4RK2 w - - 0 1", false).unwrap();
        let white = attackers(&board, Square::E4, Color::White);
        assert!(white.has(Square::D3));
        assert!(white.has(Square::E1));
        assert_eq!(white.len(), 2);
        // The f6 knight defends its pawn.
        assert!(is_attacked(&board, Square::E4, Color::Black));
        assert!(attackers(&board, Square::D5, Color::Black).has(Square::F6));
    }

    #[test]
    fn side_attack_union() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false).unwrap();
        let white = attacked_by(&board, Color::White);
        assert!(white.has(Square::A8));
        assert!(white.has(Square::D1));
        assert!(!white.has(Square::A1));
        assert!(!white.has(Square::H1));
    }
}
