use cozy_chess::{Move, Piece};

use crate::board::Position;
use crate::eval::terms::{piece_value, CENTER};

const CAPTURE_BASE: i32 = 10_000;
const QUEEN_TO_CENTER: i32 = -1_000;
const PAWN_TO_CENTER: i32 = 50;
const MINOR_DEVELOPED: i32 = 30;

/// Two killer slots per remaining depth, most recent first.
#[derive(Clone, Debug, Default)]
pub struct Killers {
    slots: Vec<[Option<Move>; 2]>,
}

impl Killers {
    pub fn new() -> Self { Self::default() }

    pub fn clear(&mut self) { self.slots.clear(); }

    pub fn record(&mut self, depth: u32, m: Move) {
        let d = depth as usize;
        if d >= self.slots.len() { self.slots.resize(d + 1, [None, None]); }
        let slot = &mut self.slots[d];
        if slot[0] == Some(m) { return; }
        slot[1] = slot[0];
        slot[0] = Some(m);
    }

    pub fn get(&self, depth: u32) -> [Option<Move>; 2] {
        self.slots.get(depth as usize).copied().unwrap_or([None, None])
    }
}

/// Moves promoted ahead of the heuristic sort.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderingHints {
    /// Best move from a shallower iteration or the table.
    pub hint: Option<Move>,
    pub killers: [Option<Move>; 2],
}

// Knights and bishops count as developed inside the c3-f6 box.
fn is_developed_square(m: Move) -> bool {
    let file = m.to.file() as usize;
    let rank = m.to.rank() as usize;
    (2..=5).contains(&file) && (2..=5).contains(&rank)
}

/// Static priority of a move; higher is searched first.
pub fn move_priority(pos: &Position, m: Move) -> i32 {
    let board = pos.board();
    let Some(piece) = board.piece_on(m.from) else { return 0 };
    let stm = pos.side_to_move();
    let mut score = 0;

    let victim = if board.colors(!stm).has(m.to) {
        board.piece_on(m.to)
    } else if piece == Piece::Pawn && m.from.file() != m.to.file() {
        // en passant
        Some(Piece::Pawn)
    } else {
        None
    };
    if let Some(v) = victim { score += CAPTURE_BASE + piece_value(v); }
    if let Some(p) = m.promotion { score += piece_value(p); }

    let to_center = CENTER.contains(&m.to);
    match piece {
        Piece::Queen if to_center => score += QUEEN_TO_CENTER,
        Piece::Pawn if to_center => score += PAWN_TO_CENTER,
        Piece::Knight | Piece::Bishop if is_developed_square(m) => score += MINOR_DEVELOPED,
        _ => {}
    }
    score
}

/// Hint move first, then killers, then the rest by descending priority.
/// Equal priorities keep generation order.
pub fn order_moves(pos: &Position, moves: Vec<Move>, hints: &OrderingHints) -> Vec<Move> {
    let mut ordered = Vec::with_capacity(moves.len());
    let mut rest = moves;
    let promoted = std::iter::once(hints.hint).chain(hints.killers).flatten();
    for m in promoted {
        if let Some(i) = rest.iter().position(|&x| x == m) {
            ordered.push(rest.remove(i));
        }
    }
    rest.sort_by_key(|&m| -move_priority(pos, m));
    ordered.extend(rest);
    ordered
}
