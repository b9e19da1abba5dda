// Time-boxed alpha-beta chess bot
pub mod board;
pub mod eval;
pub mod perft;
pub mod search;

pub use board::{Outcome, Position, PositionError};
pub use eval::{evaluate, evaluate_detailed, EvaluationDetail, GamePhase, MATE_SCORE};
pub use search::{SearchConfig, SearchReport, Searcher};
