//! Command-line interface for xo_lobby.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xo_lobby - in-memory tic-tac-toe lobby
#[derive(Parser, Debug)]
#[command(name = "xo_lobby")]
#[command(about = "Multiplayer tic-tac-toe lobby with matchmaking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the lobby configuration file (defaults are used if missing)
    #[arg(short, long, default_value = "xo_lobby.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read lobby commands from stdin, one per line
    Repl,

    /// Play a scripted two-player game and print the result
    Demo,
}
