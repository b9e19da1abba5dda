use std::sync::Arc;
use std::time::Duration;

use cozy_chess::Move;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::eval::{evaluate_detailed, EvalLog, MATE_SCORE};
use crate::search::ordering::{order_moves, Killers, OrderingHints};
use crate::search::tt::{score_from_tt, score_to_tt, Bound, Tt, DEFAULT_CAPACITY};

/// Bound wider than any reachable score.
pub const INFINITY: i32 = MATE_SCORE + 2_000;
/// Score given to a root move that turns out not to be legal.
pub const ILLEGAL_MOVE_SCORE: i32 = -INFINITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub max_time_secs: f64,
    pub threads: usize,
    pub use_tt: bool,
    pub tt_capacity: usize,
    pub use_killers: bool,
    pub diagnostics: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_time_secs: 5.0,
            threads: 1,
            use_tt: true,
            tt_capacity: DEFAULT_CAPACITY,
            use_killers: true,
            diagnostics: false,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u32) -> Self { Self { max_depth, ..Self::default() } }

    /// Budget as a `Duration`. Negative or NaN means no time; anything too
    /// large for a `Duration` (including infinity) means unlimited.
    pub fn max_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_time_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Score of a node from the mover's point of view, and the move achieving it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self { Self { score, best_move: None } }
}

/// Negamax alpha-beta searcher. One per bot/game: it owns the position cache
/// and killer moves, which are never shared between instances.
pub struct Searcher {
    pub(crate) config: SearchConfig,
    pub(crate) tt: Tt,
    pub(crate) killers: Killers,
    pub(crate) eval_log: Arc<EvalLog>,
    pub(crate) nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchConfig::default()) }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let tt = if config.use_tt { Tt::with_capacity(config.tt_capacity) } else { Tt::new() };
        let eval_log = Arc::new(EvalLog::new(config.diagnostics));
        Self { config, tt, killers: Killers::new(), eval_log, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn tt(&self) -> &Tt { &self.tt }

    pub fn killers(&self) -> &Killers { &self.killers }

    pub fn get_threads(&self) -> usize { self.config.threads.max(1) }

    /// Forget everything learned in a previous game.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.killers.clear();
    }

    // Root workers: sequential, no table, private killers, shared eval log.
    fn worker(&self) -> Searcher {
        let config = SearchConfig { threads: 1, use_tt: false, ..self.config.clone() };
        Searcher { config, tt: Tt::new(), killers: Killers::new(), eval_log: self.eval_log.clone(), nodes: 0 }
    }

    /// One complete search of `pos` to `depth`. The position is restored on
    /// return and `nodes()` counts this search only.
    pub fn search_depth(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        self.nodes = 0;
        self.search_root(pos, depth.max(1), None)
    }

    pub(crate) fn search_root(&mut self, pos: &mut Position, depth: u32, prev_best: Option<Move>) -> SearchResult {
        if self.get_threads() > 1 && depth > 1 && !pos.is_game_over() {
            return self.search_root_parallel(pos, depth, prev_best);
        }
        self.negamax(pos, depth, -INFINITY, INFINITY, 0, prev_best)
    }

    fn search_root_parallel(&mut self, pos: &mut Position, depth: u32, prev_best: Option<Move>) -> SearchResult {
        let hints = OrderingHints { hint: prev_best, killers: self.killers_at(depth) };
        let moves = order_moves(pos, pos.legal_moves(), &hints);
        assert!(!moves.is_empty(), "no legal moves in a position that is not over: {}", pos.fen());

        let root: &Position = pos;
        let results: Vec<(Move, i32, u64)> = moves
            .par_iter()
            .map(|&m| {
                let mut child = root.clone();
                if !child.is_legal(m) {
                    return (m, ILLEGAL_MOVE_SCORE, 0);
                }
                let mut w = self.worker();
                child.play(m);
                let score = -w.negamax(&mut child, depth - 1, -INFINITY, INFINITY, 1, None).score;
                (m, score, w.nodes)
            })
            .collect();

        // Reduce in root order; the first strictly better move wins ties.
        let mut best = SearchResult { score: -INFINITY, best_move: None };
        for (m, score, nodes) in results {
            self.nodes += nodes;
            log::trace!("root {} scored {}", pos.move_to_uci(m), score);
            if best.best_move.is_none() || score > best.score {
                best = SearchResult { score, best_move: Some(m) };
            }
        }
        if self.config.use_tt {
            self.tt.store(pos.key(), depth, score_to_tt(best.score, 0), best.best_move, Bound::Exact);
        }
        best
    }

    fn killers_at(&self, depth: u32) -> [Option<Move>; 2] {
        if self.config.use_killers { self.killers.get(depth) } else { [None, None] }
    }

    /// Leaf score from the mover's side: the White-positive evaluation flipped
    /// by side to move, with mates shortened by the ply they occur at.
    fn leaf_score(&self, pos: &Position, ply: u32) -> i32 {
        let detail = evaluate_detailed(pos);
        self.eval_log.record(pos, &detail);
        let score = pos.perspective() * detail.total;
        if score <= -MATE_SCORE { score + ply as i32 } else { score }
    }

    fn negamax(
        &mut self,
        pos: &mut Position,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: u32,
        hint: Option<Move>,
    ) -> SearchResult {
        self.nodes += 1;
        if depth == 0 || pos.is_game_over() {
            return SearchResult::leaf(self.leaf_score(pos, ply));
        }

        let key = pos.key();
        let mut hint = hint;
        if self.config.use_tt {
            if let Some(en) = self.tt.get(key) {
                if en.depth >= depth {
                    let score = score_from_tt(en.score, ply);
                    let usable = match en.bound {
                        Bound::Exact => true,
                        Bound::Lower => score >= beta,
                        Bound::Upper => score <= alpha,
                    };
                    if usable && en.best.is_some() {
                        return SearchResult { score, best_move: en.best };
                    }
                }
                hint = hint.or(en.best);
            }
        }

        let hints = OrderingHints { hint, killers: self.killers_at(depth) };
        let moves = order_moves(pos, pos.legal_moves(), &hints);
        assert!(!moves.is_empty(), "no legal moves in a position that is not over: {}", pos.fen());

        let orig_alpha = alpha;
        let mut best = SearchResult { score: -INFINITY, best_move: None };
        for m in moves {
            let child = pos.with_move(m, |p| self.negamax(p, depth - 1, -beta, -alpha, ply + 1, None));
            let score = -child.score;
            if score > best.score {
                best = SearchResult { score, best_move: Some(m) };
            }
            if best.score > alpha { alpha = best.score; }
            if alpha >= beta {
                if self.config.use_killers { self.killers.record(depth, m); }
                break;
            }
        }

        if self.config.use_tt {
            let bound = if best.score <= orig_alpha {
                Bound::Upper
            } else if best.score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.store(key, depth, score_to_tt(best.score, ply), best.best_move, bound);
        }
        best
    }
}
