//! Line-oriented command interpreter over a [`Lobby`].
//!
//! One command per line, words separated by whitespace:
//!
//! ```text
//! register <user> <password>      login <user> <password>
//! logout <token>                  queue <token> <sign>
//! waiting <token>                 pair <token> <sign> <opponent>
//! move <token> <row> <column>     withdraw <token>
//! resign <token>                  board <token>
//! history                         quit
//! ```

use crate::{Cell, Lobby, SessionToken};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account.
    Register {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// Open a session.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// Close a session.
    Logout {
        /// Session token.
        token: SessionToken,
    },
    /// Wait for an opponent.
    Queue {
        /// Session token.
        token: SessionToken,
        /// Requested sign.
        sign: String,
    },
    /// List waiting players.
    Waiting {
        /// Session token.
        token: SessionToken,
    },
    /// Start a game with a waiting player.
    Pair {
        /// Session token.
        token: SessionToken,
        /// Caller's sign.
        sign: String,
        /// Waiting opponent.
        opponent: String,
    },
    /// Play a cell.
    Move {
        /// Session token.
        token: SessionToken,
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
    },
    /// Leave the queue.
    Withdraw {
        /// Session token.
        token: SessionToken,
    },
    /// Give up the current game.
    Resign {
        /// Session token.
        token: SessionToken,
    },
    /// Show the current board.
    Board {
        /// Session token.
        token: SessionToken,
    },
    /// Show finished games.
    History,
    /// Stop reading input.
    Quit,
}

/// A line that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommandError {
    /// Blank line.
    #[display("empty command")]
    Empty,

    /// First word is not a command.
    #[display("unknown command {:?}", _0)]
    Unknown(String),

    /// Wrong number of arguments.
    #[display("usage: {}", _0)]
    Usage(&'static str),

    /// A row or column is not a number.
    #[display("{:?} is not a number", _0)]
    BadNumber(String),
}

impl std::error::Error for CommandError {}

fn token(word: &str) -> SessionToken {
    SessionToken::from(word)
}

fn number(word: &str) -> Result<usize, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = words.split_first().ok_or(CommandError::Empty)?;

        let command = match (*name, args) {
            ("register", [username, password]) => Command::Register {
                username: username.to_string(),
                password: password.to_string(),
            },
            ("register", _) => return Err(CommandError::Usage("register <user> <password>")),
            ("login", [username, password]) => Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(CommandError::Usage("login <user> <password>")),
            ("logout", [t]) => Command::Logout { token: token(t) },
            ("logout", _) => return Err(CommandError::Usage("logout <token>")),
            ("queue", [t, sign]) => Command::Queue {
                token: token(t),
                sign: sign.to_string(),
            },
            ("queue", _) => return Err(CommandError::Usage("queue <token> <sign>")),
            ("waiting", [t]) => Command::Waiting { token: token(t) },
            ("waiting", _) => return Err(CommandError::Usage("waiting <token>")),
            ("pair", [t, sign, opponent]) => Command::Pair {
                token: token(t),
                sign: sign.to_string(),
                opponent: opponent.to_string(),
            },
            ("pair", _) => return Err(CommandError::Usage("pair <token> <sign> <opponent>")),
            ("move", [t, row, column]) => Command::Move {
                token: token(t),
                row: number(row)?,
                column: number(column)?,
            },
            ("move", _) => return Err(CommandError::Usage("move <token> <row> <column>")),
            ("withdraw", [t]) => Command::Withdraw { token: token(t) },
            ("withdraw", _) => return Err(CommandError::Usage("withdraw <token>")),
            ("resign", [t]) => Command::Resign { token: token(t) },
            ("resign", _) => return Err(CommandError::Usage("resign <token>")),
            ("board", [t]) => Command::Board { token: token(t) },
            ("board", _) => return Err(CommandError::Usage("board <token>")),
            ("history", []) => Command::History,
            ("history", _) => return Err(CommandError::Usage("history")),
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Runs one command and returns the text to print.
#[instrument(skip_all)]
pub fn execute(lobby: &Lobby, command: Command) -> Result<String> {
    let reply = match command {
        Command::Register { username, password } => {
            lobby.register_user(&username, &password)?;
            "ok".to_string()
        }
        Command::Login { username, password } => lobby.login(&username, &password)?.to_string(),
        Command::Logout { token } => {
            lobby.logout(&token)?;
            "ok".to_string()
        }
        Command::Queue { token, sign } => {
            lobby.register_as_participant(&token, &sign)?;
            "ok".to_string()
        }
        Command::Waiting { token } => serde_json::to_string(&lobby.search_opponents(&token)?)?,
        Command::Pair {
            token,
            sign,
            opponent,
        } => {
            lobby.start_playing_with_waiting_opponent(&token, &sign, &opponent)?;
            "ok".to_string()
        }
        Command::Move { token, row, column } => {
            let cell = Cell::new(row, column)?;
            match lobby.make_a_move(&token, cell)? {
                Some(game) => format!("{}\n{}", game.phrase(), game.board().grid()),
                None => "ok".to_string(),
            }
        }
        Command::Withdraw { token } => {
            lobby.withdraw(&token)?;
            "ok".to_string()
        }
        Command::Resign { token } => lobby.resign(&token)?.phrase(),
        Command::Board { token } => lobby.current_board(&token)?.to_string(),
        Command::History => serde_json::to_string(&lobby.history())?,
        Command::Quit => String::new(),
    };
    Ok(reply)
}

/// Reads commands from `input` until end of input or `quit`.
///
/// Rejected commands print `error: ...` and the loop continues; only I/O
/// failures end it early.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(lobby: &Lobby, input: R, mut output: W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!(error = %err, "Rejected input line");
                writeln!(output, "error: {}", err)?;
                continue;
            }
        };
        if command == Command::Quit {
            debug!("Quit requested");
            break;
        }

        match execute(lobby, command) {
            Ok(reply) => writeln!(output, "{}", reply)?,
            Err(err) => writeln!(output, "error: {}", err)?,
        }
        output.flush()?;
    }
    Ok(())
}
