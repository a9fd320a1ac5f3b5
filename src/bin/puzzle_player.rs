use clap::Parser;
use eight_puzzle_search::config::SearchConfig;
use eight_puzzle_search::engine::{Move, PuzzleState};
use eight_puzzle_search::error::PuzzleError;
use eight_puzzle_search::solver::bfs_dedup;
use eight_puzzle_search::utils::{is_solvable, parse_tiles, scramble};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Start tiles, row-major, 0 or * for the blank. Scrambled from the goal when omitted
    #[clap(short, long)]
    start: Option<String>,

    /// Seed for the scramble
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Random moves in the scramble
    #[clap(long, default_value_t = 20)]
    steps: usize,
}

/// Takes back the last move.
///
/// There is no single operation for this: the history loses its last move first, which
/// leaves the tiles stale, and then the tiles are set back, which brings both fields
/// into agreement again.
fn undo(state: &mut PuzzleState) -> Result<Move, PuzzleError> {
    let (removed, _tiles_stale) = state.delete_history(1)?;
    let last = removed.moves()[0];
    let mut restored = PuzzleState::from_tiles(state.tiles())?;
    restored.apply(last.inverse())?;
    let _history_already_matches = state.set_value(restored.tiles())?;
    Ok(last)
}

fn hint(state: &PuzzleState, goal: &PuzzleState) -> Option<Move> {
    let fresh = PuzzleState::from_tiles(state.tiles()).ok()?;
    let config = SearchConfig::new().with_max_expansions(200_000);
    let solution = bfs_dedup(&fresh, goal, &config).into_solution()?;
    solution.state.history().moves().first().copied()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let goal = PuzzleState::solved();
    let mut state = match &args.start {
        Some(text) => match parse_tiles(text).and_then(|tiles| PuzzleState::from_tiles(&tiles)) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Invalid start: {}", e);
                std::process::exit(2);
            }
        },
        None => scramble(&goal, args.steps, args.seed),
    };
    if !is_solvable(state.tiles(), goal.tiles()) {
        println!("Note: this start cannot reach the goal.");
    }
    println!("Welcome to the 8-puzzle!");

    loop {
        println!("---------------------");
        println!("Moves: {}", state.history().len());
        println!("{}", state);

        if state.same_tiles(&goal) {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Moves: {}", state.history().len());
            println!("---------------------");
            break;
        }

        print!("Slide a tile (u/d/l/r), 'z' to undo, 'h' for a hint, 'q' to quit: ");
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim().to_ascii_uppercase();
        match trimmed_input.as_str() {
            "Q" => {
                println!("Thanks for playing!");
                break;
            }
            "Z" => match undo(&mut state) {
                Ok(mv) => println!("Took back {}.", mv),
                Err(_) => println!("Nothing to undo."),
            },
            "H" => match hint(&state, &goal) {
                Some(mv) => println!("Hint: slide {}.", mv),
                None => println!("No hint available."),
            },
            _ => {
                let mut chars = trimmed_input.chars();
                match (chars.next().and_then(Move::from_char), chars.next()) {
                    (Some(mv), None) => {
                        if let Err(e) = state.apply(mv) {
                            println!("Invalid move: {}.", e);
                        }
                    }
                    _ => println!("Invalid input. Use u, d, l, r, z, h or q."),
                }
            }
        }
    }
}
