//! xo_lobby - command-line front end for the tic-tac-toe lobby.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use xo_lobby::{Cell, Lobby, LobbyConfig, repl};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    initialize_tracing(&config);

    let lobby = Lobby::with_config(&config);
    match cli.command {
        Command::Repl => run_repl(&lobby),
        Command::Demo => run_demo(&lobby),
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<LobbyConfig> {
    if path.exists() {
        LobbyConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))
    } else {
        Ok(LobbyConfig::default())
    }
}

/// Logs go to stderr so stdout stays clean for replies.
fn initialize_tracing(config: &LobbyConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(token_prefix = %config.token_prefix(), "Tracing initialized");
}

/// Run the interactive command loop
#[instrument(skip(lobby))]
fn run_repl(lobby: &Lobby) -> Result<()> {
    info!("Reading lobby commands from stdin");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(lobby, stdin.lock(), stdout.lock())
}

/// Play the scripted game: user1 waits with `o`, user2 joins with `x`,
/// user1 completes the top row on the fifth move.
#[instrument(skip(lobby))]
fn run_demo(lobby: &Lobby) -> Result<()> {
    for (user, password) in [("user1", "pw1"), ("user2", "pw2")] {
        lobby.register_user(user, password)?;
    }
    let first = lobby.login("user1", "pw1")?;
    let second = lobby.login("user2", "pw2")?;

    lobby.register_as_participant(&first, "o")?;
    let waiting = lobby.search_opponents(&second)?;
    let opponent = waiting
        .first()
        .context("nobody is waiting for a game")?;
    let sign = opponent.sign().opponent().to_string();
    lobby.start_playing_with_waiting_opponent(&second, &sign, opponent.user().as_str())?;
    info!(opponent = %opponent, "Demo game started");

    let moves = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
    let mut players = [&first, &second].into_iter().cycle();
    for (row, column) in moves {
        let token = players.next().context("no player to move")?;
        if let Some(game) = lobby.make_a_move(token, Cell::new(row, column)?)? {
            println!("{}", game.phrase());
            println!("{}", game.board().grid());
        }
    }

    println!("{}", serde_json::to_string_pretty(&lobby.history())?);
    Ok(())
}
