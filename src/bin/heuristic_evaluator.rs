use clap::Parser;
use eight_puzzle_search::config::SearchConfig;
use eight_puzzle_search::engine::PuzzleState;
use eight_puzzle_search::heuristics::HEURISTICS;
use eight_puzzle_search::solver::{search, search_dedup, SearchOutcome};
use eight_puzzle_search::utils::scramble;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const RUNS_PER_BOARD: usize = 5;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of seeded random boards
    #[clap(long, default_value_t = NUM_RANDOM_BOARDS_FOR_EVALUATION)]
    boards: usize,

    /// Random moves used to scramble each board
    #[clap(long, default_value_t = 16)]
    steps: usize,

    /// Expansion budget per search
    #[clap(long, default_value_t = 20_000)]
    max_expansions: u64,

    /// Use the search without duplicate detection. Expect lowest_step to hit the budget
    #[clap(long)]
    plain: bool,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_expanded: u64,
    total_time: Duration,
    runs: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let goal = PuzzleState::solved();
    let config = SearchConfig::new().with_max_expansions(args.max_expansions);

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for (name, _, _) in &HEURISTICS {
        tallies.insert(*name, Tally::default());
    }

    println!(
        "Starting heuristic evaluation for {} boards ({} scramble moves, {} runs each)...",
        args.boards, args.steps, RUNS_PER_BOARD
    );

    for board_idx in 0..args.boards {
        let current_seed = START_SEED + board_idx as u64;
        let start = scramble(&goal, args.steps, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for (name, _, heuristic) in &HEURISTICS {
            let mut last_outcome = None;
            let mut elapsed = Duration::ZERO;
            for _ in 0..RUNS_PER_BOARD {
                let started = Instant::now();
                let outcome = if args.plain {
                    search(&start, &goal, *heuristic, &config)
                } else {
                    search_dedup(&start, &goal, *heuristic, &config)
                };
                elapsed += started.elapsed();
                last_outcome = Some(outcome);
            }
            let Some(outcome) = last_outcome else {
                continue;
            };
            let Some(tally) = tallies.get_mut(name) else {
                continue;
            };
            tally.total_time += elapsed;
            tally.runs += RUNS_PER_BOARD as u32;
            let average = elapsed / RUNS_PER_BOARD as u32;

            match &outcome {
                SearchOutcome::Solved(solution) => {
                    tally.solved += 1;
                    tally.total_moves += solution.state.history().len();
                    tally.total_expanded += solution.stats.expanded;
                    println!(
                        "  Heuristic: {:<20} Moves: {:<4} Expanded: {:<7} Avg time: {:.7}s",
                        name,
                        solution.state.history().len(),
                        solution.stats.expanded,
                        average.as_secs_f64()
                    );
                }
                SearchOutcome::Interrupted { reason, .. } => {
                    println!("  Heuristic: {:<20} {} (avg time {:.7}s)", name, reason, average.as_secs_f64());
                }
                other => {
                    eprintln!("Warning: heuristic {} on board {} ended with {:?}", name, board_idx, other);
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    for (name, _, _) in &HEURISTICS {
        let Some(tally) = tallies.get(name) else {
            continue;
        };
        if tally.solved == 0 {
            println!("Heuristic {:<20}: no board solved within the budget.", name);
            continue;
        }
        let avg_time = if tally.runs == 0 {
            0.0
        } else {
            tally.total_time.as_secs_f64() / tally.runs as f64
        };
        println!(
            "Heuristic {:<20}: solved {}/{}, avg moves = {:.2}, avg expanded = {:.1}, avg time = {:.7}s",
            name,
            tally.solved,
            args.boards,
            tally.total_moves as f64 / tally.solved as f64,
            tally.total_expanded as f64 / tally.solved as f64,
            avg_time
        );
    }
}
