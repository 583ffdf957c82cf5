use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use smart_2048::engine::Board;
use smart_2048::planner::{Planner, PlannerConfig, PlannerParallel, Verdict};
use smart_2048::snapshot;

#[derive(Debug, Parser)]
#[command(name = "autoplay", about = "2048 lookahead autoplay runner")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// Suppress the status line
    #[arg(long)]
    quiet: bool,

    /// Stop after this many moves
    #[arg(long)]
    steps: Option<u64>,

    /// Seed for the spawn RNG (default: entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Lookahead depth in player moves
    #[arg(long, default_value_t = 3)]
    depth: u8,

    /// Evaluate the four root directions on rayon workers
    #[arg(long)]
    parallel: bool,

    /// Start from a board snapshot instead of a fresh game
    #[arg(long)]
    board: Option<PathBuf>,

    /// Write the final board snapshot to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print per-direction verdicts for a snapshot and exit
    Advise {
        /// Board snapshot to advise on
        #[arg(long)]
        board: PathBuf,

        /// Lookahead depth in player moves
        #[arg(long, default_value_t = 3)]
        depth: u8,
    },
}

enum Policy {
    Seq(Planner),
    Par(PlannerParallel),
}

impl Policy {
    fn new(cfg: PlannerConfig, parallel: bool) -> Self {
        if parallel {
            Policy::Par(PlannerParallel::with_config(cfg))
        } else {
            Policy::Seq(Planner::with_config(cfg))
        }
    }

    fn best_verdict(&mut self, board: Board) -> Verdict {
        match self {
            Policy::Seq(p) => p.best_verdict(board),
            Policy::Par(p) => p.best_verdict(board),
        }
    }

    fn verdicts(&mut self, board: Board) -> [Option<Verdict>; 4] {
        match self {
            Policy::Seq(p) => p.verdicts(board),
            Policy::Par(p) => p.verdicts(board),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Cmd::Advise { board, depth }) = &args.cmd {
        return advise(board, *depth);
    }

    let cfg = PlannerConfig {
        depth: args.depth,
        ..PlannerConfig::default()
    };
    let mut policy = Policy::new(cfg, args.parallel);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut board = match &args.board {
        Some(path) => snapshot::load_board(path)?,
        None => Board::EMPTY
            .with_random_tile(&mut rng)
            .with_random_tile(&mut rng),
    };

    let pb = if !args.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template(
            "{spinner} {elapsed_precise} | Moves: {msg}",
        )?);
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let mut move_count: u64 = 0;
    while !board.is_terminal() {
        let verdict = policy.best_verdict(board);
        let (_, moved) = board.apply(verdict.direction);
        if !moved {
            break;
        }
        move_count += 1;
        board = board.make_move(verdict.direction, &mut rng);
        if let Some(pb) = &pb {
            if move_count % 10 == 0 {
                let elapsed = start.elapsed().as_secs_f64().max(1e-6);
                pb.set_message(format!(
                    "{} | moves/sec: {:.1} | score: {}",
                    move_count,
                    move_count as f64 / elapsed,
                    board.score()
                ));
            }
        }
        if let Some(limit) = args.steps {
            if move_count >= limit {
                break;
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    println!(
        "Moves: {} | moves/sec: {:.1} | score: {} | highest tile: {}",
        move_count,
        move_count as f64 / elapsed,
        board.score(),
        board.highest_tile()
    );
    println!("{}", board);

    if let Some(out) = &args.out {
        snapshot::save_board(out, &board)?;
    }
    Ok(())
}

fn advise(path: &PathBuf, depth: u8) -> anyhow::Result<()> {
    let board = snapshot::load_board(path)?;
    let cfg = PlannerConfig {
        depth,
        ..PlannerConfig::default()
    };
    let mut policy = Policy::new(cfg, false);
    println!("{}", board);
    for verdict in policy.verdicts(board).iter().flatten() {
        println!(
            "{:>5}: quality {} | loss {:.2} | probability {:.3}",
            verdict.direction.to_string(),
            verdict.quality,
            verdict.quality_loss,
            verdict.probability
        );
    }
    let best = policy.best_verdict(board);
    if board.is_terminal() {
        println!("Board is terminal; no improving move exists.");
    }
    println!("Best move: {}", best.direction);
    Ok(())
}
