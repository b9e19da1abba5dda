use cozy_chess::{Board, Color, Piece};
use std::sync::OnceLock;

fn piece_index(color: Color, piece: Piece) -> usize {
    let p = match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    };
    let c = if color == Color::White { 0 } else { 1 };
    c * 6 + p
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

const PIECE_KEYS: usize = 12 * 64;
// [color][short/long][rook file]
const CASTLE_KEYS: usize = 2 * 2 * 8;
const EP_KEYS: usize = 8;

struct Keys {
    pieces: [u64; PIECE_KEYS],
    castling: [u64; CASTLE_KEYS],
    en_passant: [u64; EP_KEYS],
    side: u64,
}

static KEYS: OnceLock<Keys> = OnceLock::new();

fn keys() -> &'static Keys {
    KEYS.get_or_init(|| {
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        let mut next = || { seed = splitmix64(seed); seed };
        let mut pieces = [0u64; PIECE_KEYS];
        for v in &mut pieces { *v = next(); }
        let mut castling = [0u64; CASTLE_KEYS];
        for v in &mut castling { *v = next(); }
        let mut en_passant = [0u64; EP_KEYS];
        for v in &mut en_passant { *v = next(); }
        Keys { pieces, castling, en_passant, side: next() }
    })
}

/// Key over everything that makes two positions the same game state:
/// placement, side to move, castling rights and en-passant file.
pub fn compute(board: &Board) -> u64 {
    let k = keys();
    let mut key = 0u64;
    for &color in &Color::ALL {
        for &piece in &Piece::ALL {
            let pi = piece_index(color, piece);
            for sq in board.colored_pieces(color, piece) {
                key ^= k.pieces[pi * 64 + sq as usize];
            }
        }
        let c = if color == Color::White { 0 } else { 1 };
        let rights = board.castle_rights(color);
        if let Some(f) = rights.short { key ^= k.castling[c * 16 + f as usize]; }
        if let Some(f) = rights.long { key ^= k.castling[c * 16 + 8 + f as usize]; }
    }
    if let Some(f) = board.en_passant() { key ^= k.en_passant[f as usize]; }
    if board.side_to_move() == Color::Black { key ^= k.side; }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transposed_move_orders_share_a_key() {
        let mut a = Board::default();
        for m in ["g1f3", "g8f6", "b1c3"] { a.play(m.parse().unwrap()); }
        let mut b = Board::default();
        for m in ["b1c3", "g8f6", "g1f3"] { b.play(m.parse().unwrap()); }
        assert_eq!(compute(&a), compute(&b));
    }

    #[test]
    fn castling_rights_change_the_key() {
        let with = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", false).unwrap();
        let without = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1", false).unwrap();
        assert_ne!(compute(&with), compute(&without));
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let w = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1", false).unwrap();
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1", false).unwrap();
        assert_ne!(compute(&w), compute(&b));
    }
}
