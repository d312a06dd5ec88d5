//! The board state machine: two participants, alternating moves, win/draw.

use super::error::{MoveError, SetupError};
use super::outcome::{GameStatus, Outcome};
use super::{Cell, Grid, Participant, Square, User, rules};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// A tic-tac-toe game between two participants.
///
/// Participants keep the order they were given in. The opener makes the
/// first move; afterwards the same user may never move twice in a row. Once the status
/// is terminal the board refuses every further move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Board {
    /// Squares of the game.
    grid: Grid,
    /// Both participants, in pairing order.
    participants: [Participant; 2],
    /// User that made the most recent move.
    last_mover: User,
    /// Current status.
    status: GameStatus,
}

impl Board {
    /// Creates a board where `first` makes the opening move.
    pub fn new(first: Participant, second: Participant) -> Result<Self, SetupError> {
        let opener = first.user().clone();
        Self::with_opener(first, second, &opener)
    }

    /// Creates a board for `first` and `second` where `opener` moves first.
    #[instrument(
        skip(first, second, opener),
        fields(first = %first, second = %second, opener = %opener)
    )]
    pub fn with_opener(
        first: Participant,
        second: Participant,
        opener: &User,
    ) -> Result<Self, SetupError> {
        if first.user() == second.user() {
            warn!("Rejected board with the same user twice");
            return Err(SetupError::SameUser(first.user().clone()));
        }
        if first.sign() == second.sign() {
            warn!("Rejected board with equal signs");
            return Err(SetupError::SameSign(*first.sign()));
        }

        let last_mover = if first.user() == opener {
            second.user().clone()
        } else if second.user() == opener {
            first.user().clone()
        } else {
            warn!("Opener does not play on this board");
            return Err(SetupError::UnknownOpener(opener.clone()));
        };

        info!("Creating new board");
        Ok(Self {
            grid: Grid::new(),
            last_mover,
            participants: [first, second],
            status: GameStatus::InProgress,
        })
    }

    /// Returns the participant record for `user`.
    pub fn participant(&self, user: &User) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user() == user)
    }

    /// Returns the other participant of `user`'s game.
    pub fn opponent_of(&self, user: &User) -> Option<&Participant> {
        self.participant(user)?;
        self.participants.iter().find(|p| p.user() != user)
    }

    /// Returns the user whose turn it is.
    pub fn next_to_move(&self) -> &User {
        let [first, second] = &self.participants;
        if first.user() == &self.last_mover {
            second.user()
        } else {
            first.user()
        }
    }

    /// Places `user`'s sign on `cell`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// occupied cell, non-participant, consecutive move, finished game.
    /// Returns the outcome only when this move ended the game.
    #[instrument(skip(self, cell, user), fields(cell = %cell, user = %user))]
    pub fn make_move(&mut self, cell: Cell, user: &User) -> Result<Option<Outcome>, MoveError> {
        if let Square::Occupied(sign) = self.grid.get(cell) {
            warn!(%sign, "Cell already occupied");
            return Err(MoveError::CellOccupied(cell, sign));
        }

        let sign = match self.participant(user) {
            Some(participant) => *participant.sign(),
            None => {
                warn!("Move by a non-participant");
                return Err(MoveError::NotParticipant(user.clone()));
            }
        };

        if &self.last_mover == user {
            warn!("Second move in a row");
            return Err(MoveError::ConsecutiveMove(user.clone()));
        }

        self.ensure_in_progress()?;

        self.grid.mark(cell, sign);
        self.last_mover = user.clone();

        if rules::has_line(&self.grid, sign) {
            self.status = GameStatus::Won(user.clone());
        } else if rules::is_draw(&self.grid) {
            self.status = GameStatus::Draw;
        }

        let outcome = self.outcome();
        match &outcome {
            Some(outcome) => info!(%outcome, "Game finished"),
            None => debug!(next = %self.next_to_move(), "Move applied"),
        }
        Ok(outcome)
    }

    /// Ends the game in favour of the other participant of `exiting`.
    ///
    /// No winning line is required. Fails if `exiting` does not play on
    /// this board or the game is already over.
    #[instrument(skip(self, exiting), fields(exiting = %exiting))]
    pub fn forfeit(&mut self, exiting: &User) -> Result<Outcome, MoveError> {
        let winner = self
            .opponent_of(exiting)
            .map(|p| p.user().clone())
            .ok_or_else(|| MoveError::NotParticipant(exiting.clone()))?;
        self.ensure_in_progress()?;

        info!(winner = %winner, "Participant forfeited");
        self.status = GameStatus::Won(winner.clone());
        Ok(Outcome::Won {
            winner,
            loser: exiting.clone(),
        })
    }

    /// Returns the outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.status {
            GameStatus::InProgress => None,
            GameStatus::Draw => Some(Outcome::Draw),
            GameStatus::Won(winner) => {
                let loser = self.opponent_of(winner)?.user().clone();
                Some(Outcome::Won {
                    winner: winner.clone(),
                    loser,
                })
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        match &self.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Won(winner) => Err(MoveError::AlreadyWon(winner.clone())),
            GameStatus::Draw => Err(MoveError::AlreadyDrawn),
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second] = &self.participants;
        writeln!(f, "{} vs {}", first, second)?;
        write!(f, "{}", self.grid)
    }
}
