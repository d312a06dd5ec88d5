//! Win detection logic for tic-tac-toe.

use crate::{Grid, Sign, Square};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight winning lines as `(row, column)` triples.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Checks whether any of the eight lines is filled entirely with `sign`.
#[instrument(skip(grid))]
pub fn has_line(grid: &Grid, sign: Sign) -> bool {
    LINES.iter().any(|line| {
        line.iter()
            .all(|&(row, column)| grid.rows()[row][column] == Square::Occupied(sign))
    })
}

/// Returns the sign that owns a complete line, if any.
#[instrument(skip(grid))]
pub fn winning_sign(grid: &Grid) -> Option<Sign> {
    Sign::iter().find(|sign| has_line(grid, *sign))
}
