//! Command Shell
//!
//! Line-oriented driver for a data store, used by the binary.

mod command;

pub use command::{Command, CommandError};

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::cache::DataStore;
use crate::persistence::Persistence;

/// Reply printed for a `GET` miss.
pub const NIL_REPLY: &str = "(nil)";

/// Outcome of running a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print
    Text(String),
    /// Stop reading input
    Quit,
}

/// Executes one parsed command against the store.
pub fn execute<P: Persistence>(store: &mut DataStore<P>, command: Command) -> Reply {
    match command {
        Command::Put { key, value } => {
            store.put(key, value);
            Reply::Text("OK".to_string())
        }
        Command::Get { key } => {
            Reply::Text(store.get(&key).unwrap_or_else(|| NIL_REPLY.to_string()))
        }
        Command::Exists { key } => Reply::Text(store.is_in_cache(&key).to_string()),
        Command::Size => Reply::Text(store.len().to_string()),
        Command::Flush => match store.flush() {
            Ok(written) => Reply::Text(format!("OK {}", written)),
            Err(e) => Reply::Text(format!("ERR {}", e)),
        },
        Command::Stats => match serde_json::to_string(&store.stats()) {
            Ok(json) => Reply::Text(json),
            Err(e) => Reply::Text(format!("ERR {}", e)),
        },
        Command::Quit => Reply::Quit,
    }
}

/// Reads commands from `input` until EOF or `QUIT`, writing replies to `output`.
///
/// Returns the number of commands executed.
pub fn run<P, R, W>(store: &mut DataStore<P>, input: R, mut output: W) -> io::Result<usize>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let mut executed = 0;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(command) => {
                debug!("Executing {:?}", command);
                executed += 1;
                match execute(store, command) {
                    Reply::Text(text) => writeln!(output, "{}", text)?,
                    Reply::Quit => break,
                }
            }
            Err(e) => {
                warn!("Rejected input line: {}", e);
                writeln!(output, "ERR {}", e)?;
            }
        }
        output.flush()?;
    }

    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn run_script(capacity: usize, script: &str) -> String {
        let mut store = DataStore::open(&Config::new(capacity, ":memory:")).unwrap();
        let mut out = Vec::new();
        run(&mut store, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_eviction_script() {
        let out = run_script(1, "PUT 1 one\nPUT 2 two\nEXISTS 1\nGET 1\nSIZE\n");
        assert_eq!(out, "OK\nOK\nfalse\none\n1\n");
    }

    #[test]
    fn test_run_get_miss() {
        let out = run_script(2, "GET nothing\n");
        assert_eq!(out, "(nil)\n");
    }

    #[test]
    fn test_run_stops_at_quit() {
        let out = run_script(2, "PUT a 1\nQUIT\nPUT b 2\n");
        assert_eq!(out, "OK\n");
    }

    #[test]
    fn test_run_reports_bad_lines() {
        let out = run_script(2, "\nBOGUS\nFLUSH\n");
        assert_eq!(out, "ERR unknown command: BOGUS\nOK 0\n");
    }

    #[test]
    fn test_stats_is_json() {
        let out = run_script(2, "PUT a 1\nGET a\nSTATS\n");
        let last = out.lines().last().unwrap();
        let json: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["total_entries"], 1);
    }
}
