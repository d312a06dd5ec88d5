//! Matchmaking queue of users waiting for an opponent.

use std::collections::BTreeMap;
use tracing::{debug, instrument};
use xo_engine::{Participant, User};

/// Pending match requests keyed by user.
///
/// A user has at most one request; registering again replaces it.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: BTreeMap<User, Participant>,
}

impl MatchmakingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the request of the participant's user.
    #[instrument(skip(self), fields(participant = %participant))]
    pub fn enqueue(&mut self, participant: Participant) -> Option<Participant> {
        let replaced = self
            .waiting
            .insert(participant.user().clone(), participant);
        debug!(waiting = self.waiting.len(), replaced = replaced.is_some(), "Request queued");
        replaced
    }

    /// Returns the pending request of `user`.
    pub fn get(&self, user: &User) -> Option<&Participant> {
        self.waiting.get(user)
    }

    /// Removes and returns the pending request of `user`.
    #[instrument(skip(self), fields(user = %user))]
    pub fn remove(&mut self, user: &User) -> Option<Participant> {
        self.waiting.remove(user)
    }

    /// Copies all pending requests, ordered by user.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.waiting.values().cloned().collect()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Returns true if nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xo_engine::Sign;

    #[test]
    fn test_reregistering_overwrites() {
        let mut queue = MatchmakingQueue::new();
        let alice = User::new("alice");
        queue.enqueue(Participant::new(alice.clone(), Sign::X));
        let replaced = queue.enqueue(Participant::new(alice.clone(), Sign::O));

        assert_eq!(replaced.map(|p| *p.sign()), Some(Sign::X));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(&alice).map(|p| *p.sign()), Some(Sign::O));
    }

    #[test]
    fn test_snapshot_is_sorted_copy() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(Participant::new(User::new("zed"), Sign::X));
        queue.enqueue(Participant::new(User::new("amy"), Sign::O));

        let snapshot = queue.snapshot();
        queue.remove(&User::new("amy"));

        let names: Vec<_> = snapshot.iter().map(|p| p.user().as_str()).collect();
        assert_eq!(names, ["amy", "zed"]);
        assert_eq!(queue.len(), 1);
    }
}
