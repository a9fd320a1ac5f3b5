use crate::engine::{validate_tiles, PuzzleState, Tiles, BLANK, CELL_COUNT};
use crate::error::{PuzzleError, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Parses a tile arrangement from text.
///
/// Three encodings are accepted, all row-major:
/// - comma separated: `"1, 2, 3, 4, 0, 5, 6, 7, 8"`
/// - whitespace separated: `"1 2 3 4 0 5 6 7 8"`
/// - 9 contiguous characters: `"123405678"`
///
/// `0` and `*` both denote the blank. `9`, an empty cell and a bare space are not
/// accepted as the blank; write `0` or `*` instead.
///
/// # Returns
/// * `Ok(Tiles)` if the text holds a permutation of `0..=8`.
/// * `Err(PuzzleError::InvalidTiles)` for an unrecognized token, a wrong count, or a
///   repeated value.
///
/// # Examples
/// ```
/// use eight_puzzle_search::utils::parse_tiles;
///
/// let expected = [1, 2, 3, 4, 0, 5, 6, 7, 8];
/// assert_eq!(parse_tiles("1,2,3,4,0,5,6,7,8").unwrap(), expected);
/// assert_eq!(parse_tiles("1 2 3\n4 * 5\n6 7 8").unwrap(), expected);
/// assert_eq!(parse_tiles("1234*5678").unwrap(), expected);
/// assert!(parse_tiles("12345678").is_err());
/// ```
pub fn parse_tiles(s: &str) -> Result<Tiles> {
    let s = s.trim();
    let tokens: Vec<&str> = if s.contains(',') {
        s.split(',').map(str::trim).collect()
    } else if s.contains(char::is_whitespace) {
        s.split_whitespace().collect()
    } else {
        // one token per character
        s.char_indices()
            .map(|(i, c)| &s[i..i + c.len_utf8()])
            .collect()
    };

    let mut values = Vec::with_capacity(CELL_COUNT);
    for token in tokens {
        let value = match token {
            "*" => BLANK,
            _ => token
                .parse::<u8>()
                .map_err(|_| PuzzleError::InvalidTiles(values.clone()))?,
        };
        values.push(value);
    }
    validate_tiles(&values)
}

/// Number of pairs that appear out of order, ignoring the blank.
fn count_inversions(tiles: &Tiles) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < val)
                .count()
        })
        .sum()
}

/// Whether `goal` can be reached from `start` at all.
///
/// On a 3-wide board every move preserves the parity of the inversion count, and the
/// arrangements split into two classes of 181,440 by that parity. The searches without
/// deduplication never stop on their own for a pair from different classes.
pub fn is_solvable(start: &Tiles, goal: &Tiles) -> bool {
    count_inversions(start) % 2 == count_inversions(goal) % 2
}

/// Walks `steps` random legal moves away from `from`, reproducibly for a given `seed`.
///
/// The returned state has an empty history, so it can serve directly as a search
/// start. It is always solvable towards `from`, at most `steps` moves away.
pub fn scramble(from: &PuzzleState, steps: usize, seed: u64) -> PuzzleState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = from.clone();
    for _ in 0..steps {
        let moves = state.available_moves();
        // every blank position has at least two legal moves
        if let Some(&mv) = moves.choose(&mut rng) {
            if state.apply(mv).is_err() {
                break;
            }
        }
    }
    PuzzleState::from_parts(*state.tiles(), Default::default())
}
