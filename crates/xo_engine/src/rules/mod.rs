//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Grid`](crate::Grid), kept apart from the
//! board state machine so each rule can be tested on its own.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, has_line, winning_sign};
