//! # 8-Puzzle Search Library
//!
//! This library models the 3×3 sliding tile puzzle and a family of graph searches
//! that find a move sequence from a start arrangement to a goal arrangement.
//!
//! It is used by three binaries:
//! - `puzzle_player`: Interactive play on the command line, with undo and hints.
//! - `solver`: Takes a start and goal, an algorithm and a heuristic, then
//!   prints the move sequence found.
//! - `heuristic_evaluator`: Compares the heuristics over seeded random instances.
//!
//! ## Modules
//! - `engine`: The puzzle state (`PuzzleState`), moves (`Move`), move history
//!   (`History`) and the move rules and expansion.
//! - `heuristics`: Cost estimators for best-first search.
//! - `solver`: Best-first, breadth-first, depth-first, depth-limited and
//!   bidirectional breadth-first search.
//! - `config`: Search budgets, DFS confirmation and cancellation (`SearchConfig`).
//! - `error`: The `PuzzleError` type.
//! - `utils`: Parsing tiles from text, solvability checks and seeded scrambles.

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

// Items are accessed via their module path, e.g. `eight_puzzle_search::solver::bfs`.
