//! Game registry: the board each playing user is on.

use std::collections::HashMap;
use tracing::{debug, instrument};
use xo_engine::{Board, User};

/// Identifier of a registered board.
pub type GameId = u64;

/// Boards in play, reachable from either participant.
///
/// Each board is stored once and both of its users point at it, so a
/// move by one participant is immediately visible to the other.
#[derive(Debug, Default)]
pub struct GameRegistry {
    boards: HashMap<GameId, Board>,
    players: HashMap<User, GameId>,
    next_id: GameId,
}

impl GameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a board for both of its participants.
    #[instrument(skip_all)]
    pub fn insert(&mut self, board: Board) -> GameId {
        self.next_id += 1;
        let id = self.next_id;
        for participant in board.participants() {
            self.players.insert(participant.user().clone(), id);
        }
        self.boards.insert(id, board);
        debug!(game_id = id, games = self.boards.len(), "Board registered");
        id
    }

    /// Returns true if `user` is on a board.
    pub fn contains(&self, user: &User) -> bool {
        self.players.contains_key(user)
    }

    /// Board of `user`.
    pub fn board_of(&self, user: &User) -> Option<&Board> {
        self.players.get(user).and_then(|id| self.boards.get(id))
    }

    /// Mutable board of `user`.
    pub fn board_of_mut(&mut self, user: &User) -> Option<&mut Board> {
        let id = self.players.get(user)?;
        self.boards.get_mut(id)
    }

    /// Removes `user`'s board and releases both participants.
    #[instrument(skip(self), fields(user = %user))]
    pub fn remove(&mut self, user: &User) -> Option<Board> {
        let id = self.players.get(user).copied()?;
        let board = self.boards.remove(&id)?;
        for participant in board.participants() {
            self.players.remove(participant.user());
        }
        debug!(game_id = id, games = self.boards.len(), "Board released");
        Some(board)
    }

    /// Number of boards in play.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Returns true if no game is in play.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xo_engine::{Cell, Participant, Sign};

    fn board() -> Board {
        Board::new(
            Participant::new(User::new("alice"), Sign::O),
            Participant::new(User::new("bob"), Sign::X),
        )
        .unwrap()
    }

    #[test]
    fn test_both_participants_share_one_board() {
        let mut registry = GameRegistry::new();
        let alice = User::new("alice");
        let bob = User::new("bob");
        registry.insert(board());

        registry
            .board_of_mut(&alice)
            .unwrap()
            .make_move(Cell::new(1, 1).unwrap(), &alice)
            .unwrap();

        assert_eq!(registry.board_of(&bob).unwrap().last_mover(), &alice);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_releases_both_users() {
        let mut registry = GameRegistry::new();
        registry.insert(board());

        assert!(registry.remove(&User::new("bob")).is_some());
        assert!(!registry.contains(&User::new("alice")));
        assert!(!registry.contains(&User::new("bob")));
        assert!(registry.is_empty());
    }
}
