use clap::{Parser, ValueEnum};
use eight_puzzle_search::config::SearchConfig;
use eight_puzzle_search::engine::PuzzleState;
use eight_puzzle_search::heuristics::by_name;
use eight_puzzle_search::solver::{
    bfs, bfs_dedup, dbfs, dfs, dls, search, search_dedup, SearchOutcome,
};
use eight_puzzle_search::utils::{is_solvable, parse_tiles};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Best-first search ordered by --heuristic
    Search,
    /// Best-first search that skips already seen arrangements
    SearchDedup,
    Bfs,
    BfsDedup,
    /// Unbounded depth-first search, needs --confirm-dfs
    Dfs,
    /// Depth-first search bounded by --limit
    Dls,
    /// Bidirectional breadth-first search
    Dbfs,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Start tiles, row-major: "123405678", "1 2 3 4 0 5 6 7 8" or "1,2,3,...". 0 or * is the blank
    #[clap(short, long)]
    start: String,

    /// Goal tiles in the same format [default: 12345678*]
    #[clap(short, long)]
    goal: Option<String>,

    #[clap(short, long, value_enum, default_value_t = Algorithm::Search)]
    algorithm: Algorithm,

    /// Heuristic for best-first search: lowest_step (ls), most_at_place (mp) or manhattan_distance (mhd)
    #[clap(long, default_value = "manhattan_distance")]
    heuristic: String,

    /// Depth limit for dls
    #[clap(short, long, default_value_t = 20, allow_negative_numbers = true)]
    limit: i64,

    /// TOML file with search limits; the flags below override it
    #[clap(long)]
    config: Option<PathBuf>,

    /// Stop after expanding this many states
    #[clap(long)]
    max_expansions: Option<u64>,

    /// Stop after this many milliseconds
    #[clap(long)]
    time_limit_ms: Option<u64>,

    /// Run dfs even though it may never terminate
    #[clap(long)]
    confirm_dfs: bool,

    /// Search even when the goal is unreachable from the start
    #[clap(long)]
    force: bool,
}

fn build_config(args: &Args) -> Result<SearchConfig, String> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?,
        None => SearchConfig::default(),
    };
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    if let Some(ms) = args.time_limit_ms {
        config.time_limit_ms = Some(ms);
    }
    if args.confirm_dfs {
        config = config.with_dfs_confirmed();
    }
    config
        .validate()
        .map_err(|e| format!("Invalid search limits: {}", e))?;
    Ok(config)
}

fn run(args: &Args) -> Result<SearchOutcome, String> {
    let start = parse_tiles(&args.start)
        .and_then(|tiles| PuzzleState::from_tiles(&tiles))
        .map_err(|e| format!("Invalid start: {}", e))?;
    let goal = match &args.goal {
        Some(text) => parse_tiles(text)
            .and_then(|tiles| PuzzleState::from_tiles(&tiles))
            .map_err(|e| format!("Invalid goal: {}", e))?,
        None => PuzzleState::solved(),
    };
    let config = build_config(args)?;

    if !is_solvable(start.tiles(), goal.tiles()) && !args.force {
        return Err(
            "The goal is unreachable from this start (inversion parity differs). Use --force to search anyway."
                .to_string(),
        );
    }

    println!("Start:\n{}\n", start);
    println!("Goal:\n{}\n", goal);
    println!("Searching with {:?}...\n", args.algorithm);

    let outcome = match args.algorithm {
        Algorithm::Search | Algorithm::SearchDedup => {
            let heuristic = by_name(&args.heuristic)
                .ok_or_else(|| format!("Unknown heuristic: {}", args.heuristic))?;
            if args.algorithm == Algorithm::Search {
                search(&start, &goal, heuristic, &config)
            } else {
                search_dedup(&start, &goal, heuristic, &config)
            }
        }
        Algorithm::Bfs => bfs(&start, &goal, &config),
        Algorithm::BfsDedup => bfs_dedup(&start, &goal, &config),
        Algorithm::Dfs => dfs(&start, &goal, &config),
        Algorithm::Dls => dls(&start, &goal, args.limit, &config).map_err(|e| e.to_string())?,
        Algorithm::Dbfs => dbfs(&start, &goal, &config),
    };
    Ok(outcome)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let outcome = match run(&args) {
        Ok(outcome) => outcome,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    match &outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}): {}", solution.state.history().len(), solution.state.history());
            println!("{}\n", solution.state);
        }
        SearchOutcome::Exhausted(_) => println!("No solution: every reachable state was searched.\n"),
        SearchOutcome::DepthLimit { limit, .. } => {
            println!("No solution within the depth limit of {}.\n", limit)
        }
        SearchOutcome::Interrupted { reason, .. } => println!("Search stopped: {}.\n", reason),
        SearchOutcome::Declined => {
            println!("Depth-first search was not run. Pass --confirm-dfs (and a limit) to run it anyway.\n")
        }
    }
    if let Some(stats) = outcome.stats() {
        println!("Expanded {} states, generated {}.", stats.expanded, stats.generated);
    }
    if !outcome.is_solved() {
        std::process::exit(1);
    }
}
