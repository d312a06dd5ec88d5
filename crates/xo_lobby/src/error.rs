//! Lobby error types.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::instrument;
use xo_engine::{CellError, MoveError, SetupError, SignError};

/// Category of a lobby failure.
///
/// The kind decides how a caller should react; the message inside is for
/// people reading logs.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LobbyErrorKind {
    /// Malformed input: bad sign, cell out of range, impossible pairing.
    #[display("{}", _0)]
    Validation(String),

    /// Unknown session, user, opponent or board.
    #[display("{}", _0)]
    NotFound(String),

    /// Password does not match.
    #[display("{}", _0)]
    AuthMismatch(String),

    /// Request clashes with current state: already playing, wrong turn,
    /// occupied cell, finished game.
    #[display("{}", _0)]
    Conflict(String),

    /// Username already registered.
    #[display("{}", _0)]
    DuplicateUser(String),
}

/// Lobby error with location tracking and contextual prefixes.
///
/// Context added through [`ErrorContext`] is rendered before the message
/// (`"login(alice, *****): password does not match"`) and never changes
/// the [`kind`](LobbyError::kind).
#[derive(Debug, Clone, Error, Getters)]
pub struct LobbyError {
    /// What went wrong.
    kind: LobbyErrorKind,
    /// Prefixes, outermost first.
    context: Vec<String>,
    /// Line number where error occurred.
    line: u32,
    /// Source file where error occurred.
    #[getter(skip)]
    file: &'static str,
}

impl LobbyError {
    /// Source file where error occurred.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Creates a new lobby error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: LobbyErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            context: Vec::new(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Malformed input.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::Validation(message.into()))
    }

    /// Unknown session, user, opponent or board.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::NotFound(message.into()))
    }

    /// Wrong password.
    #[track_caller]
    pub fn auth_mismatch(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::AuthMismatch(message.into()))
    }

    /// Request clashes with current state.
    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::Conflict(message.into()))
    }

    /// Username already taken.
    #[track_caller]
    pub fn duplicate_user(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::DuplicateUser(message.into()))
    }

    /// Prepends a context prefix.
    pub fn wrap(mut self, prefix: impl Into<String>) -> Self {
        self.context.insert(0, prefix.into());
        self
    }

    /// Returns true for [`LobbyErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, LobbyErrorKind::NotFound(_))
    }

    /// Returns true for [`LobbyErrorKind::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind, LobbyErrorKind::Conflict(_))
    }

    /// Returns true for [`LobbyErrorKind::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, LobbyErrorKind::Validation(_))
    }
}

impl std::fmt::Display for LobbyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for prefix in &self.context {
            write!(f, "{}: ", prefix)?;
        }
        write!(f, "{} at {}:{}", self.kind, self.file, self.line)
    }
}

impl From<SignError> for LobbyError {
    #[track_caller]
    fn from(err: SignError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CellError> for LobbyError {
    #[track_caller]
    fn from(err: CellError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<SetupError> for LobbyError {
    #[track_caller]
    fn from(err: SetupError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<MoveError> for LobbyError {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        Self::conflict(err.to_string())
    }
}

/// Attaches a formatted prefix to a failure without altering its kind.
pub trait ErrorContext<T> {
    /// Prefixes the error with `prefix`.
    fn context(self, prefix: impl Into<String>) -> Result<T, LobbyError>;

    /// Prefixes the error with a lazily built prefix.
    fn with_context<F, S>(self, prefix: F) -> Result<T, LobbyError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    LobbyError: From<E>,
{
    #[track_caller]
    fn context(self, prefix: impl Into<String>) -> Result<T, LobbyError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(LobbyError::from(err).wrap(prefix)),
        }
    }

    #[track_caller]
    fn with_context<F, S>(self, prefix: F) -> Result<T, LobbyError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(LobbyError::from(err).wrap(prefix())),
        }
    }
}
