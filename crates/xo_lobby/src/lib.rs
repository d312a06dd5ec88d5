//! Tic-tac-toe lobby.
//!
//! In-memory multiplayer front for the [`xo_engine`] board: users register
//! and log in, queue for an opponent, get paired onto a shared board, play
//! alternating moves, and finished games are archived.
//!
//! # Architecture
//!
//! - **Credentials**: registered usernames and passwords
//! - **Sessions**: token/user mapping, one live session per user
//! - **Matchmaking**: users waiting for an opponent, with their sign
//! - **Registry**: the board each playing user is on
//! - **History**: append-only record of finished games
//! - **Lobby**: the only entry point; owns all of the above behind one lock
//!
//! # Example
//!
//! ```
//! use xo_lobby::{Cell, Lobby};
//!
//! # fn example() -> Result<(), xo_lobby::LobbyError> {
//! let lobby = Lobby::new();
//! lobby.register_user("user1", "pw1")?;
//! lobby.register_user("user2", "pw2")?;
//! let first = lobby.login("user1", "pw1")?;
//! let second = lobby.login("user2", "pw2")?;
//!
//! lobby.register_as_participant(&first, "o")?;
//! lobby.start_playing_with_waiting_opponent(&second, "x", "user1")?;
//!
//! // The waiting player moves first.
//! assert!(lobby.make_a_move(&first, Cell::new(0, 0)?)?.is_none());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod credentials;
mod error;
mod history;
mod lobby;
mod matchmaking;
mod registry;
pub mod repl;
mod sessions;

// Crate-level exports - Configuration
pub use config::{ConfigError, LobbyConfig};

// Crate-level exports - Errors
pub use error::{ErrorContext, LobbyError, LobbyErrorKind};

// Crate-level exports - Lobby
pub use history::{HistoryRecord, RecordOutcome};
pub use lobby::{FinishedGame, Lobby};
pub use sessions::SessionToken;

// Crate-level exports - Components
pub use credentials::{Credential, CredentialStore};
pub use history::HistoryLog;
pub use matchmaking::MatchmakingQueue;
pub use registry::{GameId, GameRegistry};
pub use sessions::SessionDirectory;

// Crate-level exports - Game types
pub use xo_engine::{Board, Cell, GameStatus, Outcome, Participant, Sign, User};
