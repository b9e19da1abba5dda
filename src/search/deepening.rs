use std::time::{Duration, Instant};

use cozy_chess::Move;

use crate::board::Position;
use crate::search::alphabeta::{SearchResult, Searcher};

/// Outcome of one `think` call: the deepest completed iteration.
#[derive(Default, Debug, Clone)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest iteration that ran to completion; 0 when the root is terminal.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl Searcher {
    /// Iterative deepening from depth 1 up to the configured maximum. Depth 1
    /// always runs; later depths start only while the budget is not spent.
    /// A running iteration is never interrupted, so a deep one may overrun.
    pub fn think(&mut self, pos: &mut Position, max_time: Option<Duration>) -> SearchReport {
        let started = Instant::now();
        let budget = max_time.unwrap_or_else(|| self.config.max_time());
        let max_depth = self.config.max_depth.max(1);
        self.nodes = 0;
        self.killers.clear();
        self.tt.bump_generation();

        let mut report = SearchReport::default();
        if let Some(outcome) = pos.outcome() {
            log::debug!("root is already over: {:?}", outcome);
            report.elapsed = started.elapsed();
            return report;
        }

        let mut completed: Option<(u32, SearchResult)> = None;
        for depth in 1..=max_depth {
            if depth > 1 && started.elapsed() > budget {
                log::debug!("time budget {:?} spent before depth {}", budget, depth);
                break;
            }
            let prev_best = completed.and_then(|(_, r)| r.best_move).filter(|&m| pos.is_legal(m));
            let result = self.search_root(pos, depth, prev_best);
            log::debug!(
                "depth {} score {} move {} nodes {} time {:?}",
                depth,
                result.score,
                result.best_move.map(|m| pos.move_to_uci(m)).unwrap_or_else(|| "none".into()),
                self.nodes,
                started.elapsed()
            );
            // A deeper result replaces a shallower one even when it scores lower.
            completed = Some((depth, result));
        }

        if let Some((depth, result)) = completed {
            report.best_move = result.best_move;
            report.score = result.score;
            report.depth = depth;
        }
        report.nodes = self.nodes;
        report.elapsed = started.elapsed();
        log::info!(
            "bestmove {} score {} depth {} nodes {} in {:?}",
            report.best_move.map(|m| pos.move_to_uci(m)).unwrap_or_else(|| "none".into()),
            report.score,
            report.depth,
            report.nodes,
            report.elapsed
        );
        report
    }

    /// Best move for the side to move, or `None` when the game is over.
    pub fn find_best_move(&mut self, pos: &mut Position, max_time: Option<Duration>) -> Option<Move> {
        self.think(pos, max_time).best_move
    }
}
