pub mod attacks;
pub mod cozy;

pub use cozy::{Outcome, PlayedMove, Position, PositionError};
