//! Shell Commands
//!
//! Parses one line of input into a data store command.

use thiserror::Error;

/// A single shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `PUT <key> <value...>`; the value is the rest of the line
    Put { key: String, value: String },
    /// `GET <key>`
    Get { key: String },
    /// `EXISTS <key>`
    Exists { key: String },
    /// `SIZE`
    Size,
    /// `FLUSH`
    Flush,
    /// `STATS`
    Stats,
    /// `QUIT` / `EXIT`
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parses a line such as `PUT greeting hello world`.
    ///
    /// Command names are case-insensitive. A `PUT` value keeps its inner
    /// spacing and may be empty.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        let (name, rest) = split_word(line);
        if name.is_empty() {
            return Err(CommandError::Empty);
        }

        match name.to_ascii_uppercase().as_str() {
            "PUT" | "SET" => {
                let (key, value) = split_word(rest);
                if key.is_empty() {
                    return Err(CommandError::Usage("PUT <key> <value>"));
                }
                Ok(Command::Put {
                    key: key.to_string(),
                    value: value.trim_end_matches(['\r', '\n']).to_string(),
                })
            }
            "GET" => Ok(Command::Get {
                key: single_key(rest, "GET <key>")?,
            }),
            "EXISTS" => Ok(Command::Exists {
                key: single_key(rest, "EXISTS <key>")?,
            }),
            "SIZE" => Ok(Command::Size),
            "FLUSH" => Ok(Command::Flush),
            "STATS" => Ok(Command::Stats),
            "QUIT" | "EXIT" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Splits off the first whitespace-delimited word; the remainder loses only
/// the single separating space.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => {
            let (word, rest) = s.split_at(idx);
            let mut chars = rest.chars();
            chars.next();
            (word, chars.as_str())
        }
        None => (s, ""),
    }
}

fn single_key(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(key), None) => Ok(key.to_string()),
        _ => Err(CommandError::Usage(usage)),
    }
}
