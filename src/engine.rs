//! Core puzzle model for the 8-puzzle.
//!
//! This module defines the fundamental components:
//! - `Move`: the four ways a tile can slide into the blank.
//! - `History`: the ordered list of moves that produced a state.
//! - `PuzzleState`: a 3×3 tile arrangement plus its history, with in-place moves,
//!   derived moves, expansion and the single-field setters.
//!
//! Moves are named after the tile that slides, not the blank: `Up` slides the tile
//! below the blank up into it, so the blank index grows by 3.
use crate::error::{PuzzleError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Width and height of the board.
pub const GRID_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// The value that marks the blank cell.
pub const BLANK: u8 = 0;

/// Row-major tile arrangement.
pub type Tiles = [u8; CELL_COUNT];

/// A single slide of a tile into the blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// The tile below the blank slides up.
    Up,
    /// The tile above the blank slides down.
    Down,
    /// The tile right of the blank slides left.
    Left,
    /// The tile left of the blank slides right.
    Right,
}

impl Move {
    /// All moves in expansion order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Converts the move to its history symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use eight_puzzle_search::engine::Move;
    /// assert_eq!(Move::Up.to_char(), 'U');
    /// assert_eq!(Move::Right.to_char(), 'R');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    /// Parses a history symbol. Returns `None` for anything but `U`, `D`, `L`, `R`.
    pub fn from_char(c: char) -> Option<Move> {
        match c {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }

    /// The move that undoes this one.
    pub fn inverse(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Whether the move is available with the blank at `blank`.
    ///
    /// `Up` needs a row below the blank, `Down` a row above, `Left` a column to the
    /// right and `Right` a column to the left.
    pub fn is_legal(&self, blank: usize) -> bool {
        match self {
            Move::Up => !matches!(blank, 6..=8),
            Move::Down => !matches!(blank, 0..=2),
            Move::Left => !matches!(blank, 2 | 5 | 8),
            Move::Right => !matches!(blank, 0 | 3 | 6),
        }
    }

    /// Index of the tile that swaps with the blank. Only meaningful for legal moves.
    fn source_index(&self, blank: usize) -> usize {
        match self {
            Move::Up => blank + GRID_SIZE,
            Move::Down => blank - GRID_SIZE,
            Move::Left => blank + 1,
            Move::Right => blank - 1,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// The ordered moves that lead from some reference start to a state.
///
/// Displays as its `U`/`D`/`L`/`R` string. Parsing with [`str::parse`] accepts an
/// optional cosmetic `"-> "` or `"->"` prefix, which is how histories are printed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct History(Vec<Move>);

impl History {
    pub fn new() -> Self {
        History(Vec::new())
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    /// Appends every move of `other`.
    pub fn extend_from(&mut self, other: &History) {
        self.0.extend_from_slice(&other.0);
    }

    /// The path that walks this history backwards: reversed order, each move inverted.
    ///
    /// If this history leads from `a` to `b`, the result leads from `b` to `a`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eight_puzzle_search::engine::History;
    /// let h: History = "UUL".parse().unwrap();
    /// assert_eq!(h.reversed_inverse().to_string(), "RDD");
    /// ```
    pub fn reversed_inverse(&self) -> History {
        History(self.0.iter().rev().map(Move::inverse).collect())
    }

    /// Parses bare symbols without stripping any prefix.
    fn parse_symbols(s: &str) -> Result<History> {
        s.chars()
            .map(|c| {
                Move::from_char(c).ok_or_else(|| PuzzleError::InvalidHistory {
                    history: s.to_string(),
                    found: c,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(History)
    }
}

impl From<Vec<Move>> for History {
    fn from(moves: Vec<Move>) -> Self {
        History(moves)
    }
}

impl FromStr for History {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let stripped = s
            .strip_prefix("-> ")
            .or_else(|| s.strip_prefix("->"))
            .unwrap_or(s);
        History::parse_symbols(stripped)
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv.to_char())?;
        }
        Ok(())
    }
}

/// Diagnostic returned by the single-field setters of [`PuzzleState`].
///
/// `set_value` changes tiles without touching history and the history setters change
/// history without touching tiles. Nothing keeps the two consistent afterwards; this
/// value names the field the caller is now responsible for.
#[must_use = "a single-field setter leaves the other field stale"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Desync {
    /// Tiles changed, history still describes the old tiles.
    HistoryNotUpdated,
    /// History changed, tiles still reflect the old history.
    TilesNotUpdated,
}

impl fmt::Display for Desync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Desync::HistoryNotUpdated => write!(f, "tiles changed but history was not updated"),
            Desync::TilesNotUpdated => write!(f, "history changed but tiles were not updated"),
        }
    }
}

/// Checks that `tiles` is a permutation of `0..=8` and copies it into a fixed array.
pub fn validate_tiles(tiles: &[u8]) -> Result<Tiles> {
    if tiles.len() != CELL_COUNT {
        return Err(PuzzleError::InvalidTiles(tiles.to_vec()));
    }
    let mut seen = [false; CELL_COUNT];
    let mut out = [BLANK; CELL_COUNT];
    for (i, &t) in tiles.iter().enumerate() {
        let idx = t as usize;
        if idx >= CELL_COUNT || seen[idx] {
            return Err(PuzzleError::InvalidTiles(tiles.to_vec()));
        }
        seen[idx] = true;
        out[i] = t;
    }
    Ok(out)
}

fn blank_of(tiles: &Tiles) -> usize {
    // validated tiles always contain the blank
    tiles.iter().position(|&t| t == BLANK).unwrap_or(0)
}

/// A 3×3 tile arrangement together with the moves that produced it.
///
/// The blank index is cached and kept in sync with `tiles` by every operation.
/// `tiles` and `history`, on the other hand, are only kept in sync by the move
/// operations ([`apply`](Self::apply), [`moved`](Self::moved),
/// [`expand`](Self::expand)); the setters change one field and return a [`Desync`].
///
/// `Clone` is the copy operation: the clone owns its own tiles and history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    tiles: Tiles,
    history: History,
    blank: usize,
}

impl PuzzleState {
    /// Creates a validated state.
    ///
    /// # Arguments
    /// * `tiles`: 9 values forming `0..=8`, row-major, 0 is the blank.
    /// * `history`: moves over `U`/`D`/`L`/`R`; a leading `"-> "` or `"->"` is stripped.
    ///
    /// # Errors
    /// * `InvalidTiles` if `tiles` is not a permutation of `0..=8`.
    /// * `InvalidHistory` if `history` contains any other symbol.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_search::engine::PuzzleState;
    /// let s = PuzzleState::new(&[1, 2, 3, 4, 0, 5, 6, 7, 8], "-> UL").unwrap();
    /// assert_eq!(s.blank_index(), 4);
    /// assert_eq!(s.history().to_string(), "UL");
    /// assert!(PuzzleState::new(&[1, 1, 2, 3, 4, 5, 6, 7, 8], "").is_err());
    /// ```
    pub fn new(tiles: &[u8], history: &str) -> Result<Self> {
        let tiles = validate_tiles(tiles)?;
        let history: History = history.parse()?;
        Ok(Self::from_parts(tiles, history))
    }

    /// Creates a validated state with an empty history.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self> {
        Self::new(tiles, "")
    }

    /// The conventional goal `1 2 3 / 4 5 6 / 7 8 *`.
    pub fn solved() -> Self {
        Self::from_parts([1, 2, 3, 4, 5, 6, 7, 8, BLANK], History::new())
    }

    /// Builds a state from already-validated tiles.
    pub(crate) fn from_parts(tiles: Tiles, history: History) -> Self {
        let blank = blank_of(&tiles);
        PuzzleState {
            tiles,
            history,
            blank,
        }
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index (0-8) of the blank in `tiles`.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Whether both states hold the same arrangement, regardless of history.
    pub fn same_tiles(&self, other: &PuzzleState) -> bool {
        self.tiles == other.tiles
    }

    /// Replaces the tiles without touching the history.
    ///
    /// The history keeps describing the old arrangement. The returned
    /// [`Desync::HistoryNotUpdated`] is also logged as a warning.
    ///
    /// # Errors
    /// `InvalidTiles` if `tiles` is not a permutation of `0..=8`; the state is unchanged.
    pub fn set_value(&mut self, tiles: &[u8]) -> Result<Desync> {
        self.tiles = validate_tiles(tiles)?;
        self.blank = blank_of(&self.tiles);
        let desync = Desync::HistoryNotUpdated;
        warn!(event = "desync", "set_value: {}", desync);
        Ok(desync)
    }

    /// Appends moves to the history without touching the tiles.
    ///
    /// # Errors
    /// `InvalidHistory` if `history` contains a symbol other than `U`/`D`/`L`/`R`.
    pub fn add_history(&mut self, history: &str) -> Result<Desync> {
        let extra = History::parse_symbols(history)?;
        self.history.extend_from(&extra);
        let desync = Desync::TilesNotUpdated;
        warn!(event = "desync", "add_history: {}", desync);
        Ok(desync)
    }

    /// Removes the last `length` moves from the history without touching the tiles.
    ///
    /// # Returns
    /// The removed suffix, in its original order, and the [`Desync`] diagnostic.
    ///
    /// # Errors
    /// `InvalidArgument` if `length` is 0 or longer than the history.
    pub fn delete_history(&mut self, length: usize) -> Result<(History, Desync)> {
        if length < 1 {
            return Err(PuzzleError::InvalidArgument(
                "length must be greater than 0".to_string(),
            ));
        }
        if length > self.history.len() {
            return Err(PuzzleError::InvalidArgument(format!(
                "length {} exceeds history length {}",
                length,
                self.history.len()
            )));
        }
        let keep = self.history.len() - length;
        let removed = History(self.history.0.split_off(keep));
        let desync = Desync::TilesNotUpdated;
        warn!(event = "desync", "delete_history: {}", desync);
        Ok((removed, desync))
    }

    /// The legal moves for the current blank position, in `U`, `D`, `L`, `R` order.
    pub fn available_moves(&self) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|mv| mv.is_legal(self.blank))
            .collect()
    }

    pub fn can_move(&self, mv: Move) -> bool {
        mv.is_legal(self.blank)
    }

    /// Applies `mv` in place and records it in the history.
    ///
    /// # Errors
    /// `IllegalMove` if the blank position does not allow `mv`; the state is unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        if !self.can_move(mv) {
            return Err(PuzzleError::IllegalMove {
                mv,
                blank: self.blank,
            });
        }
        self.step(mv);
        Ok(())
    }

    /// Returns a new state with `mv` applied, leaving `self` untouched.
    ///
    /// # Errors
    /// `IllegalMove` if the blank position does not allow `mv`.
    pub fn moved(&self, mv: Move) -> Result<PuzzleState> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }

    /// Every state one legal move away, in `U`, `D`, `L`, `R` order.
    ///
    /// A state that already matches some goal still expands; stopping is the caller's
    /// decision.
    pub fn expand(&self) -> Vec<PuzzleState> {
        Move::ALL
            .into_iter()
            .filter(|mv| mv.is_legal(self.blank))
            .map(|mv| {
                let mut next = self.clone();
                next.step(mv);
                next
            })
            .collect()
    }

    // Caller guarantees legality.
    fn step(&mut self, mv: Move) {
        let source = mv.source_index(self.blank);
        self.tiles.swap(self.blank, source);
        self.blank = source;
        self.history.push(mv);
    }
}

impl fmt::Display for PuzzleState {
    /// Renders the history line followed by the 3×3 grid, blank shown as `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "moved via -> {}:", self.history)?;
        for row in 0..GRID_SIZE {
            write!(f, "{}", if row == 0 { "[" } else { " " })?;
            for col in 0..GRID_SIZE {
                let t = self.tiles[row * GRID_SIZE + col];
                if t == BLANK {
                    write!(f, " *")?;
                } else {
                    write!(f, " {}", t)?;
                }
            }
            if row == GRID_SIZE - 1 {
                write!(f, " ]")?;
            } else {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
