use anyhow::{Context, Result};
use chessbot::{evaluate_detailed, Position, SearchConfig, Searcher};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick a move with the time-boxed alpha-beta bot", long_about = None)]
struct Args {
    /// Starting FEN position (defaults to the initial position)
    #[arg(long)]
    fen: Option<String>,

    /// Moves in UCI notation played from the starting position
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// JSON file with search settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum iterative-deepening depth
    #[arg(long)]
    depth: Option<u32>,

    /// Time budget per move in seconds
    #[arg(long)]
    movetime: Option<f64>,

    /// Worker threads for the root split
    #[arg(long)]
    threads: Option<usize>,

    /// Transposition table size in entries
    #[arg(long)]
    hash: Option<usize>,

    /// Log a table row for every evaluated leaf (set RUST_LOG=info)
    #[arg(long)]
    diagnostics: bool,

    /// Print the search report as JSON
    #[arg(long)]
    json: bool,

    /// Let the bot play both sides for this many plies
    #[arg(long)]
    selfplay: Option<usize>,
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(d) = args.depth { cfg.max_depth = d; }
    if let Some(t) = args.movetime { cfg.max_time_secs = t; }
    if let Some(t) = args.threads { cfg.threads = t; }
    if let Some(h) = args.hash { cfg.tt_capacity = h; }
    if args.diagnostics { cfg.diagnostics = true; }
    Ok(cfg)
}

fn load_position(args: &Args) -> Result<Position> {
    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    for m in &args.moves {
        pos.play_uci(m).with_context(|| format!("applying {m}"))?;
    }
    Ok(pos)
}

fn analyse(searcher: &mut Searcher, pos: &mut Position, json: bool) -> Result<()> {
    let report = searcher.think(pos, None);
    let best = report.best_move.map(|m| pos.move_to_uci(m));
    if json {
        let detail = evaluate_detailed(pos);
        let out = serde_json::json!({
            "fen": pos.fen(),
            "bestmove": best,
            "score": report.score,
            "depth": report.depth,
            "nodes": report.nodes,
            "elapsed_ms": report.elapsed.as_millis() as u64,
            "static_eval": detail,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match best {
            Some(b) => println!("bestmove {b} (score {}, depth {}, nodes {})", report.score, report.depth, report.nodes),
            None => println!("bestmove 0000"),
        }
    }
    Ok(())
}

fn selfplay(searcher: &mut Searcher, pos: &mut Position, plies: usize, movetime: Duration) {
    for ply in 0..plies {
        if let Some(outcome) = pos.outcome() {
            println!("game over: {:?}", outcome);
            return;
        }
        let Some(mv) = searcher.find_best_move(pos, Some(movetime)) else { break };
        println!("{:>3}. {}", ply + 1, pos.move_to_uci(mv));
        pos.play(mv);
    }
    println!("{}", pos.fen());
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;
    let mut pos = load_position(&args)?;
    let movetime = cfg.max_time();
    let mut searcher = Searcher::new(cfg);

    match args.selfplay {
        Some(plies) => selfplay(&mut searcher, &mut pos, plies, movetime),
        None => analyse(&mut searcher, &mut pos, args.json)?,
    }
    Ok(())
}
