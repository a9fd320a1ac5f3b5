use crate::engine::{History, Tiles, CELL_COUNT, GRID_SIZE};

/// Everything a heuristic may look at when scoring one frontier entry.
///
/// Built fresh for every evaluation; nothing here outlives the call.
#[derive(Clone, Copy, Debug)]
pub struct SearchTask<'a> {
    /// Tiles of the state the search started from.
    pub start: &'a Tiles,
    /// Tiles of the goal.
    pub end: &'a Tiles,
    /// Tiles of the state being scored.
    pub now: &'a Tiles,
    /// History of the state being scored.
    pub history: &'a History,
}

/// A plain function heuristic. [`crate::solver::search`] accepts any
/// `Fn(&SearchTask) -> u32`, this alias is for the named registry below.
pub type Heuristic = fn(&SearchTask<'_>) -> u32;

/// Path cost so far: the length of the history.
///
/// Used alone it turns best-first search into breadth-first order, since the frontier
/// sort is stable and ties keep insertion order.
pub fn lowest_step(task: &SearchTask<'_>) -> u32 {
    task.history.len() as u32
}

/// `9 - (cells whose tile already matches the goal)`.
///
/// The blank counts like any other tile, so a solved board scores 0.
pub fn most_at_place(task: &SearchTask<'_>) -> u32 {
    let matching = task
        .now
        .iter()
        .zip(task.end.iter())
        .filter(|(now, end)| now == end)
        .count();
    (CELL_COUNT - matching) as u32
}

/// Sum over every value 0-8 of its row plus column displacement from the goal.
///
/// Unlike the textbook heuristic this includes the blank's own displacement, which can
/// overestimate the remaining moves.
///
/// # Examples
/// ```
/// use eight_puzzle_search::heuristics::{manhattan_distance, SearchTask};
/// use eight_puzzle_search::engine::History;
/// let start = [1, 2, 3, 4, 0, 5, 6, 7, 8];
/// let end = [1, 2, 3, 4, 5, 0, 6, 7, 8];
/// let history = History::new();
/// let task = SearchTask { start: &start, end: &end, now: &start, history: &history };
/// // tile 5 and the blank are each one column off
/// assert_eq!(manhattan_distance(&task), 2);
/// ```
pub fn manhattan_distance(task: &SearchTask<'_>) -> u32 {
    let mut now_pos = [0usize; CELL_COUNT];
    let mut goal_pos = [0usize; CELL_COUNT];
    for i in 0..CELL_COUNT {
        now_pos[task.now[i] as usize] = i;
        goal_pos[task.end[i] as usize] = i;
    }
    (0..CELL_COUNT)
        .map(|value| {
            let (now, goal) = (now_pos[value], goal_pos[value]);
            (now / GRID_SIZE).abs_diff(goal / GRID_SIZE) + (now % GRID_SIZE).abs_diff(goal % GRID_SIZE)
        })
        .sum::<usize>() as u32
}

/// Every named heuristic, full name first, then its short alias.
pub const HEURISTICS: [(&str, &str, Heuristic); 3] = [
    ("lowest_step", "ls", lowest_step),
    ("most_at_place", "mp", most_at_place),
    ("manhattan_distance", "mhd", manhattan_distance),
];

/// Looks a heuristic up by full name or alias. Dashes are accepted in place of
/// underscores, so `manhattan-distance` works as a command line value.
pub fn by_name(name: &str) -> Option<Heuristic> {
    let name = name.replace('-', "_");
    HEURISTICS
        .iter()
        .find(|(full, alias, _)| *full == name || *alias == name)
        .map(|&(_, _, h)| h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: Tiles = [1, 2, 3, 4, 5, 6, 7, 8, 0];

    fn score(h: Heuristic, now: &Tiles, history: &str) -> u32 {
        let history: History = history.parse().unwrap();
        h(&SearchTask {
            start: now,
            end: &GOAL,
            now,
            history: &history,
        })
    }

    #[test]
    fn test_lowest_step_counts_history() {
        assert_eq!(score(lowest_step, &GOAL, ""), 0);
        assert_eq!(score(lowest_step, &GOAL, "UDLRU"), 5);
    }

    #[test]
    fn test_most_at_place() {
        assert_eq!(score(most_at_place, &GOAL, ""), 0);
        // blank and 8 swapped
        assert_eq!(score(most_at_place, &[1, 2, 3, 4, 5, 6, 7, 0, 8], ""), 2);
        assert_eq!(score(most_at_place, &[0, 1, 2, 3, 4, 5, 6, 7, 8], ""), 9);
    }

    #[test]
    fn test_manhattan_distance_includes_blank() {
        assert_eq!(score(manhattan_distance, &GOAL, ""), 0);
        assert_eq!(score(manhattan_distance, &[1, 2, 3, 4, 5, 6, 7, 0, 8], ""), 2);
        // blank is 4 away, tiles 3 and 6 wrap a row (3 each), the rest shift by 1
        assert_eq!(score(manhattan_distance, &[0, 1, 2, 3, 4, 5, 6, 7, 8], ""), 16);
    }

    #[test]
    fn test_manhattan_ignores_history() {
        let tiles = [1, 2, 3, 4, 5, 6, 7, 0, 8];
        assert_eq!(
            score(manhattan_distance, &tiles, ""),
            score(manhattan_distance, &tiles, "UDUD")
        );
    }

    #[test]
    fn test_by_name() {
        let tiles = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        for name in ["manhattan_distance", "mhd", "manhattan-distance"] {
            let h = by_name(name).unwrap();
            assert_eq!(score(h, &tiles, ""), score(manhattan_distance, &tiles, ""));
        }
        assert!(by_name("ls").is_some());
        assert!(by_name("most_at_place").is_some());
        assert!(by_name("euclid").is_none());
    }
}
