//! Append-only log of finished games.

use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use tracing::{info, instrument};
use xo_engine::{Board, Outcome, User};

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The first user of the record won.
    FirstWon,
    /// Nobody won.
    Draw,
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new, Getters)]
pub struct HistoryRecord {
    /// Winner, or the user who joined a waiting opponent in a drawn game.
    first: User,
    /// Loser, or the user who was waiting in a drawn game.
    second: User,
    /// How the game ended.
    outcome: RecordOutcome,
}

impl HistoryRecord {
    /// Builds the record for a board that ended with `outcome`.
    pub fn from_outcome(outcome: &Outcome, board: &Board) -> Self {
        match outcome {
            Outcome::Won { winner, loser } => {
                Self::new(winner.clone(), loser.clone(), RecordOutcome::FirstWon)
            }
            Outcome::Draw => {
                let [first, second] = board.participants();
                Self::new(
                    first.user().clone(),
                    second.user().clone(),
                    RecordOutcome::Draw,
                )
            }
        }
    }
}

/// Finished games, oldest first. Records are never changed or removed.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    #[instrument(skip(self))]
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
        info!(total = self.records.len(), "Game archived");
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no game has finished yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xo_engine::{Participant, Sign};

    /// Paired the way the lobby pairs: joiner first, waiting user opens.
    fn board() -> Board {
        Board::with_opener(
            Participant::new(User::new("joiner"), Sign::X),
            Participant::new(User::new("waiting"), Sign::O),
            &User::new("waiting"),
        )
        .unwrap()
    }

    #[test]
    fn test_win_record_lists_winner_first() {
        let outcome = Outcome::Won {
            winner: User::new("joiner"),
            loser: User::new("waiting"),
        };
        let record = HistoryRecord::from_outcome(&outcome, &board());
        assert_eq!(record.first(), &User::new("joiner"));
        assert_eq!(record.outcome(), &RecordOutcome::FirstWon);
    }

    #[test]
    fn test_draw_record_follows_board_order() {
        let mut log = HistoryLog::new();
        log.append(HistoryRecord::from_outcome(&Outcome::Draw, &board()));

        assert_eq!(log.len(), 1);
        let record = &log.records()[0];
        assert_eq!(record.first(), &User::new("joiner"));
        assert_eq!(record.second(), &User::new("waiting"));
        assert_eq!(
            serde_json::to_value(record).unwrap()["outcome"],
            "draw"
        );
    }
}
