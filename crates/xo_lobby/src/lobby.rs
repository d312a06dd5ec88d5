//! The lobby: accounts, sessions, matchmaking, games and history behind one lock.

use crate::config::LobbyConfig;
use crate::credentials::CredentialStore;
use crate::error::{ErrorContext, LobbyError};
use crate::history::{HistoryLog, HistoryRecord};
use crate::matchmaking::MatchmakingQueue;
use crate::registry::GameRegistry;
use crate::sessions::{SessionDirectory, SessionToken};
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};
use xo_engine::{Board, Cell, Outcome, Participant, User};

/// A game that just ended, as returned to the player whose action ended it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new, Getters)]
pub struct FinishedGame {
    /// Final board.
    board: Board,
    /// How it ended.
    outcome: Outcome,
}

impl FinishedGame {
    /// Human-readable result: `"{winner} wins {loser}"` or `"draw"`.
    pub fn phrase(&self) -> String {
        self.outcome.to_string()
    }
}

/// Everything the lobby knows. Only reachable through [`Lobby`].
#[derive(Debug)]
struct LobbyState {
    credentials: CredentialStore,
    sessions: SessionDirectory,
    queue: MatchmakingQueue,
    registry: GameRegistry,
    history: HistoryLog,
}

impl LobbyState {
    fn new(config: &LobbyConfig) -> Self {
        Self {
            credentials: CredentialStore::new(),
            sessions: SessionDirectory::new(config.token_prefix()),
            queue: MatchmakingQueue::new(),
            registry: GameRegistry::new(),
            history: HistoryLog::new(),
        }
    }

    fn login(&mut self, username: &str, password: &str) -> Result<SessionToken, LobbyError> {
        let user = self.credentials.authenticate(username, password)?;
        let (token, superseded) = self.sessions.open(user.clone());
        if superseded.is_some() {
            self.force_exit(&user);
        }
        info!(user = %user, "User logged in");
        Ok(token)
    }

    fn logout(&mut self, token: &SessionToken) -> Result<(), LobbyError> {
        let user = self.sessions.close(token)?;
        self.force_exit(&user);
        info!(user = %user, "User logged out");
        Ok(())
    }

    fn enqueue_as(&mut self, user: User, sign: &str) -> Result<(), LobbyError> {
        let participant = Participant::parse(user, sign)?;
        if let Some(opponent) = self.opponent_of(participant.user()) {
            warn!("Already playing");
            return Err(LobbyError::conflict(format!(
                "already playing with {}",
                opponent
            )));
        }

        self.queue.enqueue(participant);
        Ok(())
    }

    fn pair_as(&mut self, user: User, sign: &str, opponent: &User) -> Result<(), LobbyError> {
        let waiting = self
            .queue
            .get(opponent)
            .cloned()
            .ok_or_else(|| LobbyError::not_found(format!("opponent {} not found", opponent)))?;
        let caller = Participant::parse(user, sign)?;
        if let Some(current) = self.opponent_of(caller.user()) {
            warn!("Caller already playing");
            return Err(LobbyError::conflict(format!(
                "already playing with {}",
                current
            )));
        }

        // The request that was already waiting moves first.
        let opener = waiting.user().clone();
        let board = Board::with_opener(caller, waiting, &opener)?;
        for participant in board.participants() {
            self.queue.remove(participant.user());
        }
        let game_id = self.registry.insert(board);
        info!(game_id, opponent = %opponent, "Players paired");
        Ok(())
    }

    fn move_as(&mut self, user: &User, cell: Cell) -> Result<Option<FinishedGame>, LobbyError> {
        let board = self.registry.board_of_mut(user).ok_or_else(|| {
            LobbyError::not_found(format!("user {} does not participate in any play", user))
        })?;

        let outcome = board.make_move(cell, user)?;
        match outcome {
            Some(outcome) => self.finish_game(user, outcome).map(Some),
            None => Ok(None),
        }
    }

    fn withdraw_as(&mut self, user: &User) -> Result<(), LobbyError> {
        if self.queue.remove(user).is_none() {
            return Err(LobbyError::not_found(format!(
                "no pending match request for {}",
                user
            )));
        }
        info!(user = %user, "Match request withdrawn");
        Ok(())
    }

    fn board_as(&self, user: &User) -> Result<Board, LobbyError> {
        self.registry.board_of(user).cloned().ok_or_else(|| {
            LobbyError::not_found(format!("user {} does not participate in any play", user))
        })
    }

    fn opponent_of(&self, user: &User) -> Option<Participant> {
        self.registry
            .board_of(user)
            .and_then(|board| board.opponent_of(user))
            .cloned()
    }

    /// Ends `user`'s game in favour of the other participant.
    fn forfeit(&mut self, user: &User) -> Result<FinishedGame, LobbyError> {
        let board = self.registry.board_of_mut(user).ok_or_else(|| {
            LobbyError::not_found(format!("user {} does not participate in any play", user))
        })?;
        let outcome = board.forfeit(user)?;
        self.finish_game(user, outcome)
    }

    /// Releases a terminal board and archives it.
    fn finish_game(&mut self, user: &User, outcome: Outcome) -> Result<FinishedGame, LobbyError> {
        let board = self
            .registry
            .remove(user)
            .ok_or_else(|| LobbyError::not_found(format!("no board registered for {}", user)))?;
        self.history
            .append(HistoryRecord::from_outcome(&outcome, &board));
        info!(outcome = %outcome, "Game finished");
        Ok(FinishedGame::new(board, outcome))
    }

    /// Consequences of a session ending while the user is busy: an
    /// in-progress game is forfeited, a pending request is withdrawn.
    fn force_exit(&mut self, user: &User) {
        if self.registry.contains(user) {
            match self.forfeit(user) {
                Ok(game) => info!(user = %user, outcome = %game.outcome(), "Game forfeited"),
                Err(err) => warn!(user = %user, error = %err, "Could not forfeit game"),
            }
        } else if self.queue.remove(user).is_some() {
            info!(user = %user, "Match request withdrawn");
        } else {
            debug!(user = %user, "Nothing in flight");
        }
    }
}

/// Shared handle to the lobby.
///
/// Clones share the same state. Every operation takes the single lock
/// once, validates, then commits, so callers on different threads observe
/// each operation as atomic.
#[derive(Debug, Clone)]
pub struct Lobby {
    state: Arc<Mutex<LobbyState>>,
}

impl Lobby {
    /// Creates a lobby with default configuration.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(&LobbyConfig::default())
    }

    /// Creates a lobby from configuration.
    #[instrument]
    pub fn with_config(config: &LobbyConfig) -> Self {
        info!("Creating lobby");
        Self {
            state: Arc::new(Mutex::new(LobbyState::new(config))),
        }
    }

    /// Mutations happen only after validation, so a poisoned lock still
    /// guards consistent state.
    fn lock(&self) -> MutexGuard<'_, LobbyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new account.
    #[instrument(skip(self, password))]
    pub fn register_user(&self, username: &str, password: &str) -> Result<(), LobbyError> {
        self.lock()
            .credentials
            .register(username, password)
            .with_context(|| format!("register_user({})", username))
    }

    /// Logs in and returns a fresh session token.
    ///
    /// A session the user already holds is invalidated; an in-progress game
    /// is forfeited to the opponent and a pending match request withdrawn.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, LobbyError> {
        self.lock()
            .login(username, password)
            .with_context(|| format!("login({}, *****)", username))
    }

    /// Ends a session with the same consequences as a superseding login.
    #[instrument(skip_all)]
    pub fn logout(&self, token: &SessionToken) -> Result<(), LobbyError> {
        self.lock().logout(token).context("logout")
    }

    /// Queues the caller for a game with the given sign.
    #[instrument(skip(self, token))]
    pub fn register_as_participant(
        &self,
        token: &SessionToken,
        sign: &str,
    ) -> Result<(), LobbyError> {
        let mut state = self.lock();
        let user = state
            .sessions
            .resolve(token)
            .context("register_as_participant")?;
        state
            .enqueue_as(user.clone(), sign)
            .with_context(|| format!("register_as_participant({}, {})", user, sign))
    }

    /// Snapshot of everyone waiting for an opponent.
    #[instrument(skip_all)]
    pub fn search_opponents(&self, token: &SessionToken) -> Result<Vec<Participant>, LobbyError> {
        let state = self.lock();
        state.sessions.resolve(token).context("search_opponents")?;
        let waiting = state.queue.snapshot();
        debug!(waiting = waiting.len(), "Listed waiting opponents");
        Ok(waiting)
    }

    /// Starts a game against a waiting opponent, who moves first.
    #[instrument(skip(self, token))]
    pub fn start_playing_with_waiting_opponent(
        &self,
        token: &SessionToken,
        sign: &str,
        opponent: &str,
    ) -> Result<(), LobbyError> {
        let mut state = self.lock();
        let user = state
            .sessions
            .resolve(token)
            .context("start_playing_with_waiting_opponent")?;
        state
            .pair_as(user.clone(), sign, &User::new(opponent))
            .with_context(|| {
                format!(
                    "start_playing_with_waiting_opponent({}, {}, {})",
                    user, sign, opponent
                )
            })
    }

    /// Plays `cell` for the caller.
    ///
    /// Returns the final board and outcome only when this move ended the
    /// game; the board is then released for both players and archived.
    #[instrument(skip(self, token, cell), fields(cell = %cell))]
    pub fn make_a_move(
        &self,
        token: &SessionToken,
        cell: Cell,
    ) -> Result<Option<FinishedGame>, LobbyError> {
        let mut state = self.lock();
        let user = state.sessions.resolve(token).context("make_a_move")?;
        state
            .move_as(&user, cell)
            .with_context(|| format!("make_a_move({}, {})", user, cell))
    }

    /// Withdraws the caller's pending match request.
    #[instrument(skip_all)]
    pub fn withdraw(&self, token: &SessionToken) -> Result<(), LobbyError> {
        let mut state = self.lock();
        let user = state.sessions.resolve(token).context("withdraw")?;
        state
            .withdraw_as(&user)
            .with_context(|| format!("withdraw({})", user))
    }

    /// Gives up the caller's current game; the opponent wins.
    #[instrument(skip_all)]
    pub fn resign(&self, token: &SessionToken) -> Result<FinishedGame, LobbyError> {
        let mut state = self.lock();
        let user = state.sessions.resolve(token).context("resign")?;
        state
            .forfeit(&user)
            .with_context(|| format!("resign({})", user))
    }

    /// Snapshot of the caller's current board.
    #[instrument(skip_all)]
    pub fn current_board(&self, token: &SessionToken) -> Result<Board, LobbyError> {
        let state = self.lock();
        let user = state.sessions.resolve(token).context("current_board")?;
        state
            .board_as(&user)
            .with_context(|| format!("current_board({})", user))
    }

    /// Snapshot of all finished games, oldest first.
    #[instrument(skip(self))]
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.lock().history.records().to_vec()
    }

    /// Returns true if the user holds a session.
    #[instrument(skip(self))]
    pub fn is_logged_in(&self, username: &str) -> bool {
        self.lock().sessions.is_active(&User::new(username))
    }

    /// Returns true if the user is on a board.
    #[instrument(skip(self))]
    pub fn is_playing(&self, username: &str) -> bool {
        self.lock().registry.contains(&User::new(username))
    }

    /// Number of open sessions.
    #[instrument(skip(self))]
    pub fn active_sessions(&self) -> usize {
        self.lock().sessions.len()
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}
