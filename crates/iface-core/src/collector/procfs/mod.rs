//! Collector for `/proc/net/dev`.
//!
//! This module provides the parser and the snapshot reader for the network
//! interface statistics exposed by the `/proc` virtual filesystem.

pub mod parser;
pub mod reader;

pub use parser::{NetDevHeader, NetDevRow, ParseError, ValueParseWarning};
pub use reader::NetDevReader;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading the statistics source.
    Io(std::io::Error),
    /// Malformed table content or metric namespace.
    Format(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Format(msg) => write!(f, "format error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Format(e.message)
    }
}
