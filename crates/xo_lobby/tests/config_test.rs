//! Loading lobby configuration from disk.

use std::io::Write;
use tempfile::NamedTempFile;
use xo_lobby::{Lobby, LobbyConfig};

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "token_prefix = \"table\"").expect("write");
    writeln!(file, "log_filter = \"warn\"").expect("write");

    let config = LobbyConfig::from_file(file.path()).expect("load config");
    assert_eq!(config.token_prefix(), "table");
    assert_eq!(config.log_filter(), "warn");

    let lobby = Lobby::with_config(&config);
    lobby.register_user("alice", "pw").expect("register");
    let token = lobby.login("alice", "pw").expect("login");
    assert_eq!(token.as_str(), "table-1");
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = NamedTempFile::new().expect("temp file");
    let config = LobbyConfig::from_file(file.path()).expect("load config");
    assert_eq!(config, LobbyConfig::default());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = LobbyConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"), "{}", err);
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "token_prefix = [").expect("write");
    let err = LobbyConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"), "{}", err);
}
