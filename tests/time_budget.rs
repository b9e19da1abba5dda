use std::time::Duration;

use chessbot::{Position, SearchConfig, Searcher};

#[test]
fn zero_budget_still_completes_depth_one() {
    let mut pos = Position::startpos();
    let mut s = Searcher::new(SearchConfig::with_depth(6));
    let r = s.think(&mut pos, Some(Duration::ZERO));
    assert_eq!(r.depth, 1);
    assert!(r.best_move.is_some(), "no move returned with an exhausted budget");
    assert!(r.nodes > 0);
}

#[test]
fn generous_budget_reaches_max_depth() {
    let mut pos = Position::from_fen("8/5pk1/6p1/8/3K4/8/5PPP/8 w - - 0 40").unwrap();
    let mut s = Searcher::new(SearchConfig::with_depth(3));
    let r = s.think(&mut pos, Some(Duration::from_secs(600)));
    assert_eq!(r.depth, 3);
    assert!(r.best_move.is_some());
}

#[test]
fn configured_budget_used_when_none_given() {
    let cfg = SearchConfig { max_depth: 8, max_time_secs: 0.0, ..SearchConfig::default() };
    let mut pos = Position::startpos();
    let mut s = Searcher::new(cfg);
    let r = s.think(&mut pos, None);
    assert_eq!(r.depth, 1);
}

#[test]
fn unbounded_budget_is_accepted() {
    for secs in [f64::INFINITY, 1e300, f64::NAN] {
        let cfg = SearchConfig { max_time_secs: secs, ..SearchConfig::with_depth(1) };
        let mut pos = Position::startpos();
        let mut s = Searcher::new(cfg);
        assert!(s.find_best_move(&mut pos, None).is_some(), "budget {secs}");
    }
    assert_eq!(SearchConfig { max_time_secs: f64::INFINITY, ..SearchConfig::default() }.max_time(), Duration::MAX);
    assert_eq!(SearchConfig { max_time_secs: -3.0, ..SearchConfig::default() }.max_time(), Duration::ZERO);
}

#[test]
fn deeper_iteration_wins_even_when_it_scores_lower() {
    // Qxd5 looks like a free pawn at depth 1; at depth 2 exd5 wins the queen back.
    let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 30";
    let mut pos = Position::from_fen(fen).unwrap();
    let shallow = Searcher::new(SearchConfig::with_depth(1)).search_depth(&mut pos, 1);
    let deep = Searcher::new(SearchConfig::with_depth(2)).search_depth(&mut pos, 2);
    assert_eq!(shallow.best_move.map(|m| pos.move_to_uci(m)).as_deref(), Some("d1d5"));
    assert!(deep.score < shallow.score, "{} >= {}", deep.score, shallow.score);

    let mut s = Searcher::new(SearchConfig::with_depth(2));
    let r = s.think(&mut pos, Some(Duration::from_secs(600)));
    assert_eq!(r.depth, 2);
    assert_eq!(r.score, deep.score);
    let bm = r.best_move.expect("move");
    assert_ne!(pos.move_to_uci(bm), "d1d5");
    // The reported move is worth the reported score at depth 2.
    let mut check = Searcher::new(SearchConfig::with_depth(1));
    let value = pos.with_move(bm, |p| -check.search_depth(p, 1).score);
    assert_eq!(value, r.score);
}
