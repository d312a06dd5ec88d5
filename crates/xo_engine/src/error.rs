//! Errors raised while building boards and applying moves.

use super::{Cell, Sign, User};
use tracing::instrument;

/// A cell coordinate outside the 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("invalid cell ({}, {}), row and column must be in 0..3", row, column)]
pub struct CellError {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub column: usize,
}

impl CellError {
    /// Creates a new cell error.
    #[instrument]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::error::Error for CellError {}

/// Text that is neither `x` nor `o`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("invalid sign {:?}, valid signs are \"x\" and \"o\"", input)]
pub struct SignError {
    /// The rejected input.
    pub input: String,
}

impl SignError {
    /// Creates a new sign error.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl std::error::Error for SignError {}

/// Reasons two participants cannot share a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Both participants are the same user.
    #[display("cannot start a game with yourself ({})", _0)]
    SameUser(User),

    /// Both participants chose the same sign.
    #[display("cannot start a game with equal signs ({})", _0)]
    SameSign(Sign),

    /// The opening user is neither participant.
    #[display("opener {:?} does not play on this board", _0.as_str())]
    UnknownOpener(User),
}

impl std::error::Error for SetupError {}

/// Error that can occur when applying a move or forfeiting a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell already holds a sign.
    #[display("cell {} already holds {}, cannot overwrite it", _0, _1)]
    CellOccupied(Cell, Sign),

    /// The user does not play on this board.
    #[display("user {:?} is not a participant of this game", _0.as_str())]
    NotParticipant(User),

    /// The user made the previous move as well.
    #[display("user {:?} cannot make two moves in a row", _0.as_str())]
    ConsecutiveMove(User),

    /// The game already has a winner.
    #[display("game is finished, {:?} is the winner", _0.as_str())]
    AlreadyWon(User),

    /// The game already ended in a draw.
    #[display("game is finished in a draw")]
    AlreadyDrawn,
}

impl std::error::Error for MoveError {}
