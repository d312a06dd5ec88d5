//! Board status and the outcome of a finished game.

use super::User;
use serde::{Deserialize, Serialize};

/// Where a board stands. `Won` and `Draw` are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still accepted.
    InProgress,
    /// The user won, by line or by forfeit.
    Won(User),
    /// All cells filled without a line.
    Draw,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One participant beat the other.
    Won {
        /// The winning user.
        winner: User,
        /// The losing user.
        loser: User,
    },
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<&User> {
        match self {
            Outcome::Won { winner, .. } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won { winner, loser } => write!(f, "{} wins {}", winner, loser),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
