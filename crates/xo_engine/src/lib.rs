//! Tic-tac-toe board engine.
//!
//! Pure game logic with no shared state: signs, cells, the 3x3 grid and
//! the [`Board`] state machine that validates moves between two named
//! participants and detects wins and draws.
//!
//! # Example
//!
//! ```
//! use xo_engine::{Board, Cell, Participant, Sign, User};
//!
//! let alice = User::new("alice");
//! let bob = User::new("bob");
//! let mut board = Board::new(
//!     Participant::new(alice.clone(), Sign::O),
//!     Participant::new(bob.clone(), Sign::X),
//! )
//! .unwrap();
//!
//! assert!(board.make_move(Cell::new(1, 1).unwrap(), &alice).unwrap().is_none());
//! assert!(board.make_move(Cell::new(1, 1).unwrap(), &bob).is_err());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod outcome;
pub mod rules;
mod types;

pub use board::Board;
pub use error::{CellError, MoveError, SetupError, SignError};
pub use outcome::{GameStatus, Outcome};
pub use types::{BOARD_SIZE, Cell, Grid, Participant, Sign, Square, User};
