pub mod alphabeta;
pub mod deepening;
pub mod ordering;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchConfig, SearchResult, Searcher, INFINITY};
pub use deepening::SearchReport;
