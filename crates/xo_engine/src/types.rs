//! Core domain types for tic-tac-toe.

use crate::error::{CellError, SignError};
use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// A player's marker on the board.
///
/// Parsed case-insensitively from `"x"` or `"o"`; nothing else is a sign.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sign {
    /// The `x` marker.
    X,
    /// The `o` marker.
    O,
}

impl Sign {
    /// Parses a sign, rejecting anything but `x` and `o`.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, SignError> {
        Self::from_str(input.trim()).map_err(|_| SignError::new(input))
    }

    /// Returns the other sign.
    pub fn opponent(self) -> Self {
        match self {
            Sign::X => Sign::O,
            Sign::O => Sign::X,
        }
    }
}

/// Opaque user identity.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct User(String);

impl User {
    /// Creates a user identity from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for User {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A user together with the sign they play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Participant {
    user: User,
    sign: Sign,
}

impl Participant {
    /// Pairs a user with an already validated sign.
    pub fn new(user: User, sign: Sign) -> Self {
        Self { user, sign }
    }

    /// Pairs a user with a sign given as text, rejecting invalid signs.
    #[instrument(skip(user), fields(user = %user))]
    pub fn parse(user: User, sign: &str) -> Result<Self, SignError> {
        Ok(Self::new(user, Sign::parse(sign)?))
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{user: {:?}, sign: {:?}}}", self.user.as_str(), self.sign.to_string())
    }
}

/// A coordinate on the board; both components are always in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
#[display("({row}, {column})")]
pub struct Cell {
    row: usize,
    column: usize,
}

impl Cell {
    /// Creates a cell, failing if either component is out of range.
    #[instrument]
    pub fn new(row: usize, column: usize) -> Result<Self, CellError> {
        if row < BOARD_SIZE && column < BOARD_SIZE {
            Ok(Self { row, column })
        } else {
            Err(CellError::new(row, column))
        }
    }

    /// Row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index.
    pub fn column(&self) -> usize {
        self.column
    }

    /// All nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |column| Cell { row, column }))
    }
}

impl TryFrom<(usize, usize)> for Cell {
    type Error = CellError;

    fn try_from((row, column): (usize, usize)) -> Result<Self, Self::Error> {
        Cell::new(row, column)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.column)
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square marked with a sign.
    Occupied(Sign),
}

/// The 3x3 grid of squares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self {
            rows: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.rows[cell.row][cell.column]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[[Square; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }

    /// Marks a cell. Squares are never cleared, so this is crate-private.
    pub(crate) fn mark(&mut self, cell: Cell, sign: Sign) {
        self.rows[cell.row][cell.column] = Square::Occupied(sign);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            let line = row
                .iter()
                .map(|square| match square {
                    Square::Empty => ".".to_string(),
                    Square::Occupied(sign) => sign.to_string(),
                })
                .collect::<Vec<_>>()
                .join("|");
            if index + 1 < BOARD_SIZE {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
