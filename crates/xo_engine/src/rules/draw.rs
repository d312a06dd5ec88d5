//! Draw detection logic for tic-tac-toe.

use super::win::winning_sign;
use crate::{Grid, Square};
use tracing::instrument;

/// Checks if the grid is full (all squares occupied).
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.rows()
        .iter()
        .flatten()
        .all(|square| *square != Square::Empty)
}

/// A full grid with no complete line.
#[instrument(skip(grid))]
pub fn is_draw(grid: &Grid) -> bool {
    is_full(grid) && winning_sign(grid).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Sign};

    fn grid_from(rows: [&str; 3]) -> Grid {
        let mut grid = Grid::new();
        for (row, text) in rows.iter().enumerate() {
            for (column, ch) in text.chars().enumerate() {
                let cell = Cell::new(row, column).unwrap();
                match ch {
                    'x' => grid.mark(cell, Sign::X),
                    'o' => grid.mark(cell, Sign::O),
                    _ => {}
                }
            }
        }
        grid
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Grid::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let grid = grid_from(["...", ".x.", "..."]);
        assert!(!is_full(&grid));
        assert!(!is_draw(&grid));
    }

    #[test]
    fn test_draw_detection() {
        let grid = grid_from(["xox", "oxx", "oxo"]);
        assert!(is_full(&grid));
        assert!(is_draw(&grid));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let grid = grid_from(["xxx", "oox", "oxo"]);
        assert!(is_full(&grid));
        assert!(!is_draw(&grid));
    }
}
