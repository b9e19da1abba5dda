//! Phase-aware classical evaluation.
//!
//! Scores are centipawns from White's point of view. The game phase picks a
//! weighted subset of the terms in [`terms`]; tactical line motifs are added
//! in every phase.

pub mod detail;
pub mod terms;

use cozy_chess::{Color, Piece};
use serde::Serialize;

use crate::board::{Outcome, Position};
pub use detail::{EvalLog, EvaluationDetail};

// Mate scoring helpers
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;

/// Last ply still counted as the opening.
pub const OPENING_PLIES: u32 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GamePhase {
    #[default]
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// Queenless boards are endgames regardless of move count.
    pub fn detect(pos: &Position) -> Self {
        if pos.board().pieces(Piece::Queen).is_empty() {
            GamePhase::Endgame
        } else if pos.plies_played() <= OPENING_PLIES {
            GamePhase::Opening
        } else {
            GamePhase::Middlegame
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        }
    }
}

// Weights are tenths: a weight of 12 scales a term by 1.2.
fn weighted(term: i32, weight: i32) -> i32 { term * weight / 10 }

pub fn evaluate(pos: &Position) -> i32 {
    evaluate_detailed(pos).total
}

pub fn evaluate_detailed(pos: &Position) -> EvaluationDetail {
    let phase = GamePhase::detect(pos);
    if let Some(outcome) = pos.outcome() {
        let total = match outcome {
            Outcome::Checkmate { winner: Color::White } => MATE_SCORE,
            Outcome::Checkmate { winner: Color::Black } => -MATE_SCORE,
            _ => DRAW_SCORE,
        };
        return EvaluationDetail { phase, terminal: Some(outcome), total, ..Default::default() };
    }

    let board = pos.board();
    let mut d = EvaluationDetail { phase, ..Default::default() };
    d.material = terms::material(board);
    match phase {
        GamePhase::Opening => {
            d.king_safety = weighted(terms::king_safety(board), 8);
            d.development = terms::development(board);
            d.center_control = weighted(terms::center_control(board) + terms::center_pawns(board), 20);
            d.castling = weighted(terms::castling(board), 5);
            d.piece_safety = weighted(terms::piece_safety(board), 5);
            d.mobility = weighted(terms::mobility(pos), 5);
            d.opening_penalties = terms::opening_penalties(pos);
        }
        GamePhase::Middlegame => {
            d.piece_activity = terms::piece_activity(board);
            d.mobility = weighted(terms::mobility(pos), 8);
            d.attacking_chances = terms::attacking_chances(board);
            d.king_safety = weighted(terms::king_safety(board), 12);
        }
        GamePhase::Endgame => {
            d.king_activity = weighted(terms::king_activity(board), 15);
            d.pawn_structure = weighted(terms::pawn_structure(board), 12);
        }
    }
    d.x_ray = terms::x_ray(board);
    d.hidden_attacks = terms::hidden_attacks(board);
    d.total = d.sum_terms();
    d
}
