//! Session directory: which user holds which token.

use crate::error::LobbyError;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use xo_engine::User;

/// Opaque session token handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Bidirectional token/user mapping.
///
/// Both maps are updated together so that a token resolves to a user
/// exactly when that user's current token is the same token.
#[derive(Debug)]
pub struct SessionDirectory {
    token_user: HashMap<SessionToken, User>,
    user_token: HashMap<User, SessionToken>,
    prefix: String,
    issued: u64,
}

impl SessionDirectory {
    /// Creates an empty directory issuing tokens as `"{prefix}-{n}"`.
    #[instrument]
    pub fn new(prefix: &str) -> Self {
        Self {
            token_user: HashMap::new(),
            user_token: HashMap::new(),
            prefix: prefix.to_string(),
            issued: 0,
        }
    }

    /// Opens a session for `user`, replacing any session they already hold.
    ///
    /// Returns the new token and the token it superseded, if any.
    #[instrument(skip(self), fields(user = %user))]
    pub fn open(&mut self, user: User) -> (SessionToken, Option<SessionToken>) {
        let superseded = self.user_token.remove(&user);
        if let Some(old) = &superseded {
            self.token_user.remove(old);
            info!("Superseded previous session");
        }

        let token = self.next_token();
        self.token_user.insert(token.clone(), user.clone());
        self.user_token.insert(user, token.clone());
        debug!(sessions = self.token_user.len(), "Session opened");
        (token, superseded)
    }

    /// Closes the session behind `token` and returns its user.
    #[instrument(skip_all)]
    pub fn close(&mut self, token: &SessionToken) -> Result<User, LobbyError> {
        let user = self
            .token_user
            .remove(token)
            .ok_or_else(|| LobbyError::not_found("session not found"))?;
        self.user_token.remove(&user);
        info!(user = %user, "Session closed");
        Ok(user)
    }

    /// Resolves a token to its user.
    #[instrument(skip_all)]
    pub fn resolve(&self, token: &SessionToken) -> Result<User, LobbyError> {
        self.token_user.get(token).cloned().ok_or_else(|| {
            debug!("Unknown session token");
            LobbyError::not_found("session not found")
        })
    }

    /// Returns true if `user` currently holds a session.
    pub fn is_active(&self, user: &User) -> bool {
        self.user_token.contains_key(user)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.token_user.len()
    }

    /// Returns true if no session is open.
    pub fn is_empty(&self) -> bool {
        self.token_user.is_empty()
    }

    fn next_token(&mut self) -> SessionToken {
        self.issued += 1;
        SessionToken(format!("{}-{}", self.prefix, self.issued))
    }
}
