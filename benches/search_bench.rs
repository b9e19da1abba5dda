use criterion::{criterion_group, criterion_main, Criterion, black_box};
use chessbot::{Position, SearchConfig, Searcher};

fn bench_search(c: &mut Criterion) {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3";
    c.bench_function("search_depth_3_italian", |ben| {
        ben.iter(|| {
            let mut pos = Position::from_fen(fen).unwrap();
            let mut s = Searcher::new(SearchConfig::with_depth(3));
            let r = s.search_depth(black_box(&mut pos), 3);
            black_box((r.score, s.nodes()))
        })
    });

    let mut group = c.benchmark_group("root_threads");
    group.sample_size(10);
    for &threads in &[1usize, 4] {
        group.bench_function(format!("threads_{}", threads), |ben| {
            ben.iter(|| {
                let mut pos = Position::startpos();
                let cfg = SearchConfig { max_depth: 3, threads, use_tt: false, ..SearchConfig::default() };
                let mut s = Searcher::new(cfg);
                black_box(s.search_depth(&mut pos, 3).score)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
