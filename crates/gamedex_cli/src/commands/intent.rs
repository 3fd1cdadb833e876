//! Parsing of interactive session input.

use gamedex_core::{ExternalId, Rating};
use thiserror::Error;

/// A user intent typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search the provider.
    Search(String),
    /// Next result page.
    NextPage,
    /// Previous result page.
    PreviousPage,
    /// Add the n-th (1-based) preview result to the catalog.
    Add(usize),
    /// List catalog entries.
    List,
    /// Stage a new description.
    Describe(ExternalId, String),
    /// Stage a new rating.
    Rate(ExternalId, Rating),
    /// Save staged edits.
    Save(ExternalId),
    /// Drop staged edits.
    Revert(ExternalId),
    /// Delete an entry.
    Delete(ExternalId),
    /// Show sync statistics.
    Stats,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

/// Input that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    /// Unknown command word.
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    /// Missing or malformed argument.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  search <text>          search games (results appear after a short pause)
  next | prev            move through result pages
  add <n>                add the n-th search result to the catalog
  list                   show the catalog
  describe <id> <text>   stage a description for an entry
  rate <id> <0-5>        stage a star rating for an entry
  save <id>              save staged edits to the catalog service
  revert <id>            drop staged edits that were not saved
  delete <id>            delete an entry
  stats                  show sync statistics
  help                   show this help
  quit                   leave";

impl Intent {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Intent>, IntentError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let intent = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Intent::Search(rest.to_string()),
            "next" | "n" => Intent::NextPage,
            "prev" | "p" => Intent::PreviousPage,
            "add" | "a" => Intent::Add(
                rest.parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(IntentError::Usage("add <n>"))?,
            ),
            "list" | "ls" => Intent::List,
            "describe" | "d" => {
                let (id, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(id, text)| (id, text.trim()))
                    .unwrap_or((rest, ""));
                Intent::Describe(
                    parse_id(id).ok_or(IntentError::Usage("describe <id> <text>"))?,
                    text.to_string(),
                )
            }
            "rate" | "r" => {
                let usage = IntentError::Usage("rate <id> <0-5>");
                let mut parts = rest.split_whitespace();
                let id = parts.next().and_then(parse_id);
                let stars = parts
                    .next()
                    .and_then(|s| s.parse::<u8>().ok())
                    .and_then(|s| Rating::from_stars(s).ok());
                match (id, stars, parts.next()) {
                    (Some(id), Some(rating), None) => Intent::Rate(id, rating),
                    _ => return Err(usage),
                }
            }
            "save" => Intent::Save(parse_id(rest).ok_or(IntentError::Usage("save <id>"))?),
            "revert" => {
                Intent::Revert(parse_id(rest).ok_or(IntentError::Usage("revert <id>"))?)
            }
            "delete" | "rm" => {
                Intent::Delete(parse_id(rest).ok_or(IntentError::Usage("delete <id>"))?)
            }
            "stats" => Intent::Stats,
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            other => return Err(IntentError::Unknown(other.to_string())),
        };
        Ok(Some(intent))
    }
}

fn parse_id(text: &str) -> Option<ExternalId> {
    text.trim().parse().ok().map(ExternalId::new)
}
