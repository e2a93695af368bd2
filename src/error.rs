//! Error types for docnb operations.

use std::fmt;

use thiserror::Error;

/// Which half of a handler pair a registration targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Leave,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Enter => f.write_str("enter"),
            Phase::Leave => f.write_str("leave"),
        }
    }
}

/// Errors that can occur while loading or rendering a document tree.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid document tree: {0}")]
    InvalidTree(String),

    #[error("indentation context stack underflow: pop with no open context")]
    ContextUnderflow,

    #[error("unbalanced indentation contexts: {0} still open at end of render")]
    UnbalancedContext(usize),

    #[error("list nesting stack underflow: list item or list end outside any list")]
    ListUnderflow,

    #[error("duplicate {phase} handler registered for `{kind}`")]
    DuplicateHandler { kind: &'static str, phase: Phase },
}

pub type Result<T> = std::result::Result<T, Error>;
