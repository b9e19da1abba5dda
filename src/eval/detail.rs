use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use super::GamePhase;
use crate::board::{Outcome, Position};

/// Weighted contribution of every evaluation term. Terms inactive in the
/// detected phase stay zero, so the fields always sum to `total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationDetail {
    pub phase: GamePhase,
    #[serde(skip)]
    pub terminal: Option<Outcome>,
    pub material: i32,
    pub king_safety: i32,
    pub development: i32,
    pub center_control: i32,
    pub castling: i32,
    pub piece_safety: i32,
    pub mobility: i32,
    pub opening_penalties: i32,
    pub piece_activity: i32,
    pub attacking_chances: i32,
    pub king_activity: i32,
    pub pawn_structure: i32,
    pub x_ray: i32,
    pub hidden_attacks: i32,
    pub total: i32,
}

impl EvaluationDetail {
    pub fn sum_terms(&self) -> i32 {
        if self.terminal.is_some() { return self.total; }
        self.material
            + self.king_safety
            + self.development
            + self.center_control
            + self.castling
            + self.piece_safety
            + self.mobility
            + self.opening_penalties
            + self.piece_activity
            + self.attacking_chances
            + self.king_activity
            + self.pawn_structure
            + self.x_ray
            + self.hidden_attacks
    }

    /// Named columns shown for this phase, in table order.
    pub fn columns(&self) -> Vec<(&'static str, i32)> {
        let mut cols = vec![("material", self.material)];
        match self.phase {
            GamePhase::Opening => cols.extend([
                ("king_safety", self.king_safety),
                ("development", self.development),
                ("center", self.center_control),
                ("castling", self.castling),
                ("piece_safety", self.piece_safety),
                ("mobility", self.mobility),
                ("penalties", self.opening_penalties),
            ]),
            GamePhase::Middlegame => cols.extend([
                ("activity", self.piece_activity),
                ("mobility", self.mobility),
                ("attack", self.attacking_chances),
                ("king_safety", self.king_safety),
            ]),
            GamePhase::Endgame => cols.extend([
                ("king_activity", self.king_activity),
                ("pawns", self.pawn_structure),
            ]),
        }
        cols.extend([("x_ray", self.x_ray), ("hidden", self.hidden_attacks), ("total", self.total)]);
        cols
    }
}

/// Org-style table of evaluated leaves, written through `log` on the
/// `chessbot::eval` target. One header per phase for the owner's lifetime.
#[derive(Debug, Default)]
pub struct EvalLog {
    enabled: bool,
    headers: [AtomicBool; 3],
}

const CELL: usize = 13;

impl EvalLog {
    pub fn new(enabled: bool) -> Self { Self { enabled, ..Default::default() } }

    /// Returns true exactly once per phase.
    fn take_header(&self, phase: GamePhase) -> bool {
        let idx = match phase {
            GamePhase::Opening => 0,
            GamePhase::Middlegame => 1,
            GamePhase::Endgame => 2,
        };
        !self.headers[idx].swap(true, Ordering::Relaxed)
    }

    pub fn header_line(phase: GamePhase, detail: &EvaluationDetail) -> String {
        let mut line = format!("| {:<CELL$} |", format!("move ({})", phase.name()));
        for (name, _) in detail.columns() {
            line.push_str(&format!(" {name:>CELL$} |"));
        }
        line
    }

    pub fn row_line(mv: &str, detail: &EvaluationDetail) -> String {
        let mut line = format!("| {mv:<CELL$} |");
        for (_, value) in detail.columns() {
            line.push_str(&format!(" {value:>CELL$} |"));
        }
        line
    }

    /// Row label: the move that led to the leaf, in UCI.
    fn leaf_label(pos: &Position) -> String {
        pos.last_move_uci().unwrap_or_else(|| "startpos".to_string())
    }

    pub fn record(&self, pos: &Position, detail: &EvaluationDetail) {
        if !self.enabled { return; }
        if detail.terminal.is_none() && self.take_header(detail.phase) {
            log::info!(target: "chessbot::eval", "{}", Self::header_line(detail.phase, detail));
        }
        let mv = Self::leaf_label(pos);
        match detail.terminal {
            Some(outcome) => log::info!(target: "chessbot::eval", "| {mv:<CELL$} | {outcome:?} {}", detail.total),
            None => log::info!(target: "chessbot::eval", "{}", Self::row_line(&mv, detail)),
        }
    }
}
