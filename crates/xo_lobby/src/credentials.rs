//! Registered accounts.

use crate::error::LobbyError;
use derive_getters::Getters;
use derive_new::new;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};
use xo_engine::User;

/// A registered username and its password.
///
/// Passwords are stored as given; hashing is left to a future storage layer.
#[derive(Clone, new, Getters)]
pub struct Credential {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// Username/password registry. Credentials are never changed or removed.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, Credential>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), LobbyError> {
        if self.users.contains_key(username) {
            warn!("Username already taken");
            return Err(LobbyError::duplicate_user(format!(
                "user {:?} already exists",
                username
            )));
        }

        self.users.insert(
            username.to_string(),
            Credential::new(username.to_string(), password.to_string()),
        );
        info!(accounts = self.users.len(), "Registered user");
        Ok(())
    }

    /// Checks a username/password pair and returns the user identity.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, LobbyError> {
        let credential = self.users.get(username).ok_or_else(|| {
            debug!("Unknown username");
            LobbyError::not_found(format!("user {:?} not found", username))
        })?;

        if credential.password() != password {
            warn!("Password mismatch");
            return Err(LobbyError::auth_mismatch("password does not match"));
        }

        Ok(User::new(credential.username().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LobbyErrorKind;

    #[test]
    fn test_register_and_authenticate() {
        let mut store = CredentialStore::new();
        store.register("alice", "secret").unwrap();
        assert_eq!(
            store.authenticate("alice", "secret").unwrap(),
            User::new("alice")
        );
    }

    #[test]
    fn test_failures_have_distinct_kinds() {
        let mut store = CredentialStore::new();
        store.register("alice", "secret").unwrap();

        let dup = store.register("alice", "other").unwrap_err();
        assert!(matches!(dup.kind(), LobbyErrorKind::DuplicateUser(_)));

        let wrong = store.authenticate("alice", "nope").unwrap_err();
        assert!(matches!(wrong.kind(), LobbyErrorKind::AuthMismatch(_)));

        let missing = store.authenticate("bob", "secret").unwrap_err();
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_empty_username_is_an_ordinary_account() {
        let mut store = CredentialStore::new();
        store.register("", "pw").unwrap();
        assert_eq!(store.authenticate("", "pw").unwrap(), User::new(""));

        let dup = store.register("", "other").unwrap_err();
        assert!(matches!(dup.kind(), LobbyErrorKind::DuplicateUser(_)));
    }

    #[test]
    fn test_password_hidden_from_debug() {
        let credential = Credential::new("alice".to_string(), "secret".to_string());
        assert!(!format!("{:?}", credential).contains("secret"));
    }
}
