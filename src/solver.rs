//! Search algorithms over the 8-puzzle state graph.
//!
//! Every entry point takes a start and an end state and reports the first generated
//! state whose tiles equal the end's tiles. A start that already matches is reported
//! as solved immediately, with its history unchanged.
//!
//! `search`, `bfs`, `dfs`, `dls` and `dbfs` keep no record of visited states: a state
//! reached again is expanded again, and which of several equally short paths gets
//! reported depends on that. `search_dedup` and `bfs_dedup` are the separate variants
//! that skip seen states.
//!
//! None of the searches recurse; depth-first searches keep an explicit stack that
//! visits states in the same order a recursive implementation would.
use crate::config::SearchConfig;
use crate::engine::{PuzzleState, Tiles};
use crate::error::{PuzzleError, Result};
use crate::heuristics::SearchTask;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Work counters for one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub expanded: u64,
    /// Successors generated and checked against the goal.
    pub generated: u64,
}

/// Represents a solution found by a search.
#[derive(Clone, Debug)]
pub struct Solution {
    /// A state with the goal's tiles. Its history is the start's history followed by
    /// the moves found.
    pub state: PuzzleState,
    pub stats: SearchStats,
}

/// Why a search stopped before finishing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    ExpansionLimit,
    TimeLimit,
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::ExpansionLimit => write!(f, "expansion limit reached"),
            StopReason::TimeLimit => write!(f, "time limit reached"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of a search call. None of these are errors.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The frontier ran empty: the goal is not reachable from the start.
    Exhausted(SearchStats),
    /// Depth-limited search found nothing within `limit` moves. The goal may still be
    /// reachable with a larger limit.
    DepthLimit { limit: u64, stats: SearchStats },
    /// Stopped by the [`SearchConfig`] budget or cancel flag.
    Interrupted {
        reason: StopReason,
        stats: SearchStats,
    },
    /// DFS was called without `confirm_dfs`.
    Declined,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// `None` only for [`SearchOutcome::Declined`], which does no work.
    pub fn stats(&self) -> Option<SearchStats> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution.stats),
            SearchOutcome::Exhausted(stats)
            | SearchOutcome::DepthLimit { stats, .. }
            | SearchOutcome::Interrupted { stats, .. } => Some(*stats),
            SearchOutcome::Declined => None,
        }
    }
}

/// Counts work and enforces the config limits for one search call.
struct Budget<'a> {
    algorithm: &'static str,
    config: &'a SearchConfig,
    started: Instant,
    stats: SearchStats,
}

impl<'a> Budget<'a> {
    fn start(algorithm: &'static str, config: &'a SearchConfig) -> Self {
        info!(
            event = "search_start",
            algorithm,
            max_expansions = ?config.max_expansions,
            time_limit_ms = ?config.time_limit_ms,
        );
        Budget {
            algorithm,
            config,
            started: Instant::now(),
            stats: SearchStats::default(),
        }
    }

    /// Polled before every expansion.
    fn expand(&mut self) -> std::result::Result<(), StopReason> {
        if self.config.is_cancelled() {
            return Err(StopReason::Cancelled);
        }
        if let Some(limit) = self.config.max_expansions {
            if self.stats.expanded >= limit {
                return Err(StopReason::ExpansionLimit);
            }
        }
        if let Some(limit) = self.config.time_limit() {
            if self.started.elapsed() >= limit {
                return Err(StopReason::TimeLimit);
            }
        }
        self.stats.expanded += 1;
        Ok(())
    }

    fn generated(&mut self, state: &PuzzleState) {
        self.stats.generated += 1;
        trace!(history = %state.history());
    }

    fn solved(self, state: PuzzleState) -> SearchOutcome {
        info!(
            event = "search_end",
            algorithm = self.algorithm,
            outcome = "solved",
            moves = state.history().len(),
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
        );
        SearchOutcome::Solved(Solution {
            state,
            stats: self.stats,
        })
    }

    fn exhausted(self) -> SearchOutcome {
        self.finish("exhausted");
        SearchOutcome::Exhausted(self.stats)
    }

    fn depth_limit(self, limit: u64) -> SearchOutcome {
        self.finish("depth_limit");
        SearchOutcome::DepthLimit {
            limit,
            stats: self.stats,
        }
    }

    fn interrupted(self, reason: StopReason) -> SearchOutcome {
        info!(event = "search_interrupted", algorithm = self.algorithm, %reason);
        self.finish("interrupted");
        SearchOutcome::Interrupted {
            reason,
            stats: self.stats,
        }
    }

    fn finish(&self, outcome: &'static str) {
        info!(
            event = "search_end",
            algorithm = self.algorithm,
            outcome,
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
        );
    }
}

/// Generic best-first search ordered by `heuristic`, lowest first.
///
/// Each round the whole frontier is stable-sorted by heuristic value, the front entry
/// is expanded, and each successor is checked against the goal as it is generated.
/// Ties keep insertion order, so [`crate::heuristics::lowest_step`] behaves like
/// breadth-first search.
///
/// Returns [`SearchOutcome::Exhausted`] only when the frontier empties, which needs an
/// unreachable goal and, without deduplication, never happens in practice; bound the
/// call through `config` when the goal may be unreachable.
///
/// # Examples
/// ```
/// use eight_puzzle_search::config::SearchConfig;
/// use eight_puzzle_search::engine::PuzzleState;
/// use eight_puzzle_search::heuristics::manhattan_distance;
/// use eight_puzzle_search::solver::search;
///
/// let start = PuzzleState::from_tiles(&[1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
/// let end = PuzzleState::from_tiles(&[1, 2, 3, 4, 5, 0, 6, 7, 8]).unwrap();
/// let outcome = search(&start, &end, manhattan_distance, &SearchConfig::default());
/// assert_eq!(outcome.solution().unwrap().state.history().to_string(), "L");
/// ```
pub fn search<H>(
    start: &PuzzleState,
    end: &PuzzleState,
    heuristic: H,
    config: &SearchConfig,
) -> SearchOutcome
where
    H: Fn(&SearchTask<'_>) -> u32,
{
    best_first("search", start, end, heuristic, config, false)
}

/// [`search`] with a seen-set: an arrangement already generated is never enqueued again.
pub fn search_dedup<H>(
    start: &PuzzleState,
    end: &PuzzleState,
    heuristic: H,
    config: &SearchConfig,
) -> SearchOutcome
where
    H: Fn(&SearchTask<'_>) -> u32,
{
    best_first("search_dedup", start, end, heuristic, config, true)
}

fn best_first<H>(
    algorithm: &'static str,
    start: &PuzzleState,
    end: &PuzzleState,
    heuristic: H,
    config: &SearchConfig,
    dedup: bool,
) -> SearchOutcome
where
    H: Fn(&SearchTask<'_>) -> u32,
{
    let mut budget = Budget::start(algorithm, config);
    let goal = end.tiles();
    if start.tiles() == goal {
        return budget.solved(start.clone());
    }

    let key = |now: &PuzzleState| -> u32 {
        heuristic(&SearchTask {
            start: start.tiles(),
            end: goal,
            now: now.tiles(),
            history: now.history(),
        })
    };

    let mut seen: HashSet<Tiles> = HashSet::new();
    if dedup {
        seen.insert(*start.tiles());
    }

    let mut front = VecDeque::from([start.clone()]);
    while !front.is_empty() {
        if let Err(reason) = budget.expand() {
            return budget.interrupted(reason);
        }
        // slice sort_by_cached_key is stable
        front.make_contiguous().sort_by_cached_key(|s| key(s));
        let Some(now) = front.pop_front() else {
            break;
        };
        for check in now.expand() {
            budget.generated(&check);
            if check.tiles() == goal {
                return budget.solved(check);
            }
            if !dedup || seen.insert(*check.tiles()) {
                front.push_back(check);
            }
        }
    }
    budget.exhausted()
}

/// Layer-by-layer breadth-first search.
///
/// Successors are checked against the goal as soon as they are generated, so the
/// reported solution is the first match in expansion order, and it is always a
/// shortest one.
pub fn bfs(start: &PuzzleState, end: &PuzzleState, config: &SearchConfig) -> SearchOutcome {
    layered("bfs", start, end, config, false)
}

/// [`bfs`] with a seen-set. Unlike `bfs`, this reports
/// [`SearchOutcome::Exhausted`] for an unreachable goal once all 181,440 reachable
/// arrangements have been generated.
pub fn bfs_dedup(start: &PuzzleState, end: &PuzzleState, config: &SearchConfig) -> SearchOutcome {
    layered("bfs_dedup", start, end, config, true)
}

fn layered(
    algorithm: &'static str,
    start: &PuzzleState,
    end: &PuzzleState,
    config: &SearchConfig,
    dedup: bool,
) -> SearchOutcome {
    let mut budget = Budget::start(algorithm, config);
    let goal = end.tiles();
    if start.tiles() == goal {
        return budget.solved(start.clone());
    }

    let mut seen: HashSet<Tiles> = HashSet::new();
    if dedup {
        seen.insert(*start.tiles());
    }

    let mut layer = vec![start.clone()];
    let mut depth = 0usize;
    while !layer.is_empty() {
        debug!(event = "layer", algorithm, depth, width = layer.len());
        let mut next_layer = Vec::new();
        for now in &layer {
            if let Err(reason) = budget.expand() {
                return budget.interrupted(reason);
            }
            for check in now.expand() {
                budget.generated(&check);
                if check.tiles() == goal {
                    return budget.solved(check);
                }
                if !dedup || seen.insert(*check.tiles()) {
                    next_layer.push(check);
                }
            }
        }
        layer = next_layer;
        depth += 1;
    }
    budget.exhausted()
}

/// Unbounded depth-first search. For demonstration only.
///
/// With no cycle or depth check this walks back and forth between two states forever
/// unless the goal lies on the very first branch. It therefore only runs when
/// `config.confirm_dfs` is set and returns [`SearchOutcome::Declined`] otherwise; set
/// `max_expansions` or a time limit as well.
pub fn dfs(start: &PuzzleState, end: &PuzzleState, config: &SearchConfig) -> SearchOutcome {
    warn!(
        event = "incomplete_search",
        algorithm = "dfs",
        "depth-first search is incomplete and may never terminate on the 8-puzzle; use it for demonstration only"
    );
    if !config.confirm_dfs {
        info!(event = "search_declined", algorithm = "dfs");
        return SearchOutcome::Declined;
    }

    let mut budget = Budget::start("dfs", config);
    if start.same_tiles(end) {
        return budget.solved(start.clone());
    }
    match depth_first(start, end.tiles(), None, &mut budget) {
        Ok(Some(state)) => budget.solved(state),
        Ok(None) => budget.exhausted(),
        Err(reason) => budget.interrupted(reason),
    }
}

/// Depth-first search that never expands a state `limit` moves below the start.
///
/// # Errors
/// `InvalidArgument` if `limit` is negative. Finding nothing is not an error: it is
/// [`SearchOutcome::DepthLimit`], which only means no solution within `limit` moves.
///
/// # Examples
/// ```
/// use eight_puzzle_search::config::SearchConfig;
/// use eight_puzzle_search::engine::PuzzleState;
/// use eight_puzzle_search::solver::{dls, SearchOutcome};
///
/// let start = PuzzleState::from_tiles(&[1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
/// let outcome = dls(&start, &PuzzleState::solved(), 0, &SearchConfig::default()).unwrap();
/// assert!(matches!(outcome, SearchOutcome::DepthLimit { limit: 0, .. }));
/// ```
pub fn dls(
    start: &PuzzleState,
    end: &PuzzleState,
    limit: i64,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    warn!(
        event = "incomplete_search",
        algorithm = "dls",
        "depth-limited search is incomplete"
    );
    if limit < 0 {
        return Err(PuzzleError::InvalidArgument(format!(
            "depth limit cannot be less than 0, got {}",
            limit
        )));
    }
    let limit = limit as u64;

    let mut budget = Budget::start("dls", config);
    if start.same_tiles(end) {
        return Ok(budget.solved(start.clone()));
    }
    Ok(match depth_first(start, end.tiles(), Some(limit), &mut budget) {
        Ok(Some(state)) => budget.solved(state),
        Ok(None) => budget.depth_limit(limit),
        Err(reason) => budget.interrupted(reason),
    })
}

/// Shared depth-first walk.
///
/// Each stack frame holds the not yet visited successors of one state together with
/// that state's depth. A successor is checked against the goal when it is taken from
/// its frame and is expanded right away, before its siblings, unless that would go
/// past `limit`.
fn depth_first(
    start: &PuzzleState,
    goal: &Tiles,
    limit: Option<u64>,
    budget: &mut Budget<'_>,
) -> std::result::Result<Option<PuzzleState>, StopReason> {
    if limit == Some(0) {
        return Ok(None);
    }
    budget.expand()?;
    let mut stack: Vec<(std::vec::IntoIter<PuzzleState>, u64)> =
        vec![(start.expand().into_iter(), 0)];

    loop {
        let Some((children, depth)) = stack.last_mut() else {
            break;
        };
        let depth = *depth;
        let Some(child) = children.next() else {
            stack.pop();
            continue;
        };
        budget.generated(&child);
        if child.tiles() == goal {
            return Ok(Some(child));
        }
        if limit.map_or(true, |limit| depth + 1 < limit) {
            budget.expand()?;
            stack.push((child.expand().into_iter(), depth + 1));
        }
    }
    Ok(None)
}

/// Bidirectional breadth-first search.
///
/// Alternates between expanding one layer from the start side and one from the goal
/// side. Every successor is compared with the other side's current layer; on the
/// first match the forward history is joined with the reverse side's history walked
/// backwards ([`crate::engine::History::reversed_inverse`]). The reported state has
/// the goal's tiles and that combined history.
pub fn dbfs(start: &PuzzleState, end: &PuzzleState, config: &SearchConfig) -> SearchOutcome {
    let mut budget = Budget::start("dbfs", config);
    let goal = end.tiles();
    if start.tiles() == goal {
        return budget.solved(start.clone());
    }

    let mut push = vec![start.clone()];
    let mut wait = vec![end.clone()];
    let mut forward = true;
    let mut round = 0usize;
    loop {
        let side = if forward { "forward" } else { "reverse" };
        debug!(
            event = "round",
            round,
            side,
            push = push.len(),
            wait = wait.len(),
        );
        // first index of each arrangement, so a match resolves in wait order
        let mut waiting: HashMap<Tiles, usize> = HashMap::with_capacity(wait.len());
        for (i, state) in wait.iter().enumerate() {
            waiting.entry(*state.tiles()).or_insert(i);
        }

        let mut next_layer = Vec::new();
        for now in &push {
            if let Err(reason) = budget.expand() {
                return budget.interrupted(reason);
            }
            for check in now.expand() {
                budget.generated(&check);
                if let Some(&i) = waiting.get(check.tiles()) {
                    let other = &wait[i];
                    let (ahead, behind) = if forward {
                        (&check, other)
                    } else {
                        (other, &check)
                    };
                    debug!(
                        event = "meet",
                        forward = %ahead.history(),
                        reverse = %behind.history(),
                    );
                    let mut history = ahead.history().clone();
                    history.extend_from(&behind.history().reversed_inverse());
                    return budget.solved(PuzzleState::from_parts(*goal, history));
                }
                next_layer.push(check);
            }
        }
        if next_layer.is_empty() {
            return budget.exhausted();
        }
        push = std::mem::replace(&mut wait, next_layer);
        forward = !forward;
        round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, Tiles};
    use crate::heuristics::{lowest_step, manhattan_distance, most_at_place, Heuristic};
    use crate::utils::scramble;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Duration;

    fn state(tiles: &[u8]) -> PuzzleState {
        PuzzleState::from_tiles(tiles).unwrap()
    }

    fn center_blank() -> PuzzleState {
        state(&[1, 2, 3, 4, 0, 5, 6, 7, 8])
    }

    /// Blank in the top-left corner, exactly 4 moves from `PuzzleState::solved()`.
    fn four_moves_out() -> PuzzleState {
        let mut s = PuzzleState::solved();
        for mv in [Move::Down, Move::Right, Move::Down, Move::Right] {
            s.apply(mv).unwrap();
        }
        PuzzleState::from_tiles(s.tiles()).unwrap()
    }

    fn replay(start: &PuzzleState, solution: &Solution) -> Tiles {
        let mut s = PuzzleState::from_tiles(start.tiles()).unwrap();
        for &mv in solution.state.history().moves() {
            s.apply(mv).unwrap();
        }
        *s.tiles()
    }

    fn capped(limit: u64) -> SearchConfig {
        SearchConfig::new().with_max_expansions(limit)
    }

    #[test]
    fn test_manhattan_search_single_move() {
        let end = state(&[1, 2, 3, 4, 5, 0, 6, 7, 8]);
        let outcome = search(&center_blank(), &end, manhattan_distance, &SearchConfig::default());
        let sol = outcome.solution().unwrap();
        assert_eq!(sol.state.history().len(), 1);
        assert_eq!(sol.state.history().to_string(), "L");
        assert!(sol.state.same_tiles(&end));
    }

    #[test]
    fn test_start_equals_goal_reports_immediately() {
        let start = PuzzleState::new(&[1, 2, 3, 4, 0, 5, 6, 7, 8], "UD").unwrap();
        let end = center_blank();
        let config = SearchConfig::new().with_dfs_confirmed();
        let outcomes = vec![
            search(&start, &end, manhattan_distance, &config),
            search_dedup(&start, &end, lowest_step, &config),
            bfs(&start, &end, &config),
            bfs_dedup(&start, &end, &config),
            dfs(&start, &end, &config),
            dls(&start, &end, 0, &config).unwrap(),
            dbfs(&start, &end, &config),
        ];
        for outcome in outcomes {
            let sol = outcome.into_solution().unwrap();
            assert_eq!(sol.state, start);
            assert_eq!(sol.stats.expanded, 0);
        }
    }

    #[test]
    fn test_lowest_step_matches_bfs_length() {
        let start = four_moves_out();
        let end = PuzzleState::solved();
        let config = SearchConfig::default();
        let by_search = search(&start, &end, lowest_step, &config).into_solution().unwrap();
        let by_bfs = bfs(&start, &end, &config).into_solution().unwrap();
        assert_eq!(by_search.state.history().len(), 4);
        assert_eq!(by_bfs.state.history().len(), 4);
        assert_eq!(replay(&start, &by_bfs), *end.tiles());
        assert_eq!(replay(&start, &by_search), *end.tiles());
    }

    #[test]
    fn test_informed_searches_reach_goal() {
        let end = PuzzleState::solved();
        let heuristics: [Heuristic; 2] = [manhattan_distance, most_at_place];
        for h in heuristics {
            let start = scramble(&end, 6, 7);
            let sol = search(&start, &end, h, &capped(20_000))
                .into_solution()
                .unwrap();
            assert_eq!(replay(&start, &sol), *end.tiles());

            let start = scramble(&end, 14, 11);
            let sol = search_dedup(&start, &end, h, &SearchConfig::default())
                .into_solution()
                .unwrap();
            assert_eq!(replay(&start, &sol), *end.tiles());
        }
    }

    #[test]
    fn test_bfs_reports_first_match_in_expansion_order() {
        // blank at 4 -> Up -> 7 -> Left -> 8; Down from 7 regenerates the start first
        let start = center_blank();
        let end = start.moved(Move::Up).unwrap().moved(Move::Left).unwrap();
        let sol = bfs(&start, &end, &SearchConfig::default()).into_solution().unwrap();
        assert_eq!(sol.state.history().to_string(), "UL");
        assert_eq!(sol.stats.expanded, 2);
        assert_eq!(sol.stats.generated, 4 + 2);
    }

    #[test]
    fn test_dedup_expands_less_than_plain_bfs() {
        let start = four_moves_out();
        let end = PuzzleState::solved();
        let plain = bfs(&start, &end, &SearchConfig::default()).into_solution().unwrap();
        let dedup = bfs_dedup(&start, &end, &SearchConfig::default())
            .into_solution()
            .unwrap();
        assert_eq!(dedup.state.history().len(), plain.state.history().len());
        assert!(dedup.stats.expanded < plain.stats.expanded);
    }

    #[test]
    fn test_bfs_dedup_exhausts_unreachable_goal() {
        let start = PuzzleState::solved();
        let end = state(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        let outcome = bfs_dedup(&start, &end, &SearchConfig::default());
        match outcome {
            SearchOutcome::Exhausted(stats) => assert_eq!(stats.expanded, 181_440),
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_bfs_is_bounded_by_config() {
        let start = PuzzleState::solved();
        let end = state(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        let outcome = bfs(&start, &end, &capped(500));
        assert!(matches!(
            outcome,
            SearchOutcome::Interrupted {
                reason: StopReason::ExpansionLimit,
                stats: SearchStats { expanded: 500, .. }
            }
        ));
    }

    #[test]
    fn test_dfs_requires_confirmation() {
        let outcome = dfs(&center_blank(), &PuzzleState::solved(), &SearchConfig::default());
        assert!(matches!(outcome, SearchOutcome::Declined));
        assert!(outcome.stats().is_none());
    }

    #[test]
    fn test_dfs_loops_until_capped() {
        let config = capped(1_000).with_dfs_confirmed();
        let outcome = dfs(&center_blank(), &PuzzleState::solved(), &config);
        assert!(matches!(
            outcome,
            SearchOutcome::Interrupted {
                reason: StopReason::ExpansionLimit,
                ..
            }
        ));
    }

    #[test]
    fn test_dfs_finds_goal_on_first_branch() {
        let start = center_blank();
        let end = start.moved(Move::Up).unwrap();
        let config = capped(100).with_dfs_confirmed();
        let sol = dfs(&start, &end, &config).into_solution().unwrap();
        assert_eq!(sol.state.history().to_string(), "U");
    }

    #[test]
    fn test_dls_zero_limit_reports_depth_limit() {
        let outcome = dls(&center_blank(), &PuzzleState::solved(), 0, &SearchConfig::default()).unwrap();
        assert!(matches!(
            outcome,
            SearchOutcome::DepthLimit { limit: 0, stats } if stats.expanded == 0
        ));
    }

    #[test]
    fn test_dls_negative_limit_is_error() {
        let err = dls(&center_blank(), &PuzzleState::solved(), -1, &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidArgument(_)));
    }

    #[test]
    fn test_dls_within_and_below_limit() {
        let start = four_moves_out();
        let end = PuzzleState::solved();
        let config = SearchConfig::default();

        let too_shallow = dls(&start, &end, 3, &config).unwrap();
        assert!(matches!(too_shallow, SearchOutcome::DepthLimit { limit: 3, .. }));

        let sol = dls(&start, &end, 4, &config).unwrap().into_solution().unwrap();
        assert_eq!(sol.state.history().len(), 4);
        assert_eq!(replay(&start, &sol), *end.tiles());
    }

    #[test]
    fn test_dls_one_level_expands_only_start() {
        let start = center_blank();
        let end = start.moved(Move::Right).unwrap();
        let sol = dls(&start, &end, 1, &SearchConfig::default())
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(sol.state.history().to_string(), "R");
        assert_eq!(sol.stats.expanded, 1);
    }

    #[test]
    fn test_dbfs_two_moves_apart() {
        let start = center_blank();
        let end = start.moved(Move::Up).unwrap().moved(Move::Left).unwrap();
        let end = PuzzleState::from_tiles(end.tiles()).unwrap();
        let sol = dbfs(&start, &end, &SearchConfig::default()).into_solution().unwrap();
        assert!(sol.state.same_tiles(&end));
        assert_eq!(replay(&start, &sol), *end.tiles());
    }

    #[test]
    fn test_dbfs_longer_path_replays() {
        let end = PuzzleState::solved();
        let start = scramble(&end, 12, 3);
        let sol = dbfs(&start, &end, &capped(500_000)).into_solution().unwrap();
        assert_eq!(replay(&start, &sol), *end.tiles());
    }

    #[test]
    fn test_time_limit_stops_plain_search() {
        let end = state(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        let config = SearchConfig::new().with_time_limit(Duration::from_millis(1));
        // every ordering pass outlasts the limit, so the second expansion never starts
        let slow = |_: &SearchTask<'_>| -> u32 {
            std::thread::sleep(Duration::from_millis(3));
            0
        };
        let outcome = search(&PuzzleState::solved(), &end, slow, &config);
        assert!(matches!(
            outcome,
            SearchOutcome::Interrupted {
                reason: StopReason::TimeLimit,
                stats: SearchStats { expanded: 1, .. }
            }
        ));
    }

    #[test]
    fn test_sub_millisecond_time_limit_still_searches() {
        let end = state(&[1, 2, 3, 4, 5, 0, 6, 7, 8]);
        let config = SearchConfig::new().with_time_limit(Duration::from_micros(900));
        let sol = bfs(&center_blank(), &end, &config).into_solution().unwrap();
        assert_eq!(sol.state.history().to_string(), "L");
        assert_eq!(sol.stats.expanded, 1);
    }

    #[test]
    fn test_cancel_flag_stops_before_first_expansion() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = SearchConfig::new().with_cancel_flag(flag);
        let outcome = bfs(&center_blank(), &PuzzleState::solved(), &config);
        assert!(matches!(
            outcome,
            SearchOutcome::Interrupted {
                reason: StopReason::Cancelled,
                stats: SearchStats { expanded: 0, generated: 0 }
            }
        ));
    }
}
