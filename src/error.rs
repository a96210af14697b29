//! The single error type the front-end can fail with.
//!
//! A [`CheckerError`] carries one of three [`ErrorKind`]s, an optional source
//! [`Location`], and a message. Parse errors are born with a location already
//! attached (the combinator engine knows where it is in the token stream).
//! Semantic and type errors are raised without one and are decorated with the
//! nearest enclosing statement's location as they propagate back out through
//! the walker (see [`crate::checker::walker`]).

use thiserror::Error;

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Type,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Semantic => "Semantic Error",
            ErrorKind::Type => "Type Error",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", render(.kind, .location, .message))]
pub struct CheckerError {
    pub kind: ErrorKind,
    pub location: Option<Location>,
    pub message: String,
}

fn render(kind: &ErrorKind, location: &Option<Location>, message: &str) -> String {
    match location {
        Some(loc) => {
            if message.is_empty() {
                format!(
                    "{} in statement on line {}, column {}",
                    kind.label(),
                    loc.line,
                    loc.column
                )
            } else {
                format!(
                    "{} in statement on line {}, column {}: {}",
                    kind.label(),
                    loc.line,
                    loc.column,
                    message
                )
            }
        }
        None => {
            if message.is_empty() {
                kind.label().to_owned()
            } else {
                format!("{}: {}", kind.label(), message)
            }
        }
    }
}

impl CheckerError {
    pub fn syntax(location: Location, message: impl Into<String>) -> Self {
        CheckerError {
            kind: ErrorKind::Syntax,
            location: Some(location),
            message: message.into(),
        }
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        CheckerError {
            kind: ErrorKind::Semantic,
            location: None,
            message: message.into(),
        }
    }

    pub fn semantic_at(location: Location, message: impl Into<String>) -> Self {
        CheckerError {
            kind: ErrorKind::Semantic,
            location: Some(location),
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        CheckerError {
            kind: ErrorKind::Type,
            location: None,
            message: message.into(),
        }
    }

    /// Replace this error's location unconditionally. The walker calls this
    /// at every `IdentifiedStatement` boundary on the way up, so the
    /// outermost wrap on the propagation path wins (last-writer).
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// The three exit codes a host CLI assigns to the three error kinds, and the
/// lookup that picks the right one for a given error. This mapping itself is
/// host policy -- the core only exposes the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodes {
    pub syntax: i32,
    pub semantic: i32,
    pub type_error: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        ExitCodes {
            syntax: 100,
            semantic: 200,
            type_error: 200,
        }
    }
}

pub fn exit_code_for(error: &CheckerError, codes: &ExitCodes) -> i32 {
    match error.kind {
        ErrorKind::Syntax => codes.syntax,
        ErrorKind::Semantic => codes.semantic,
        ErrorKind::Type => codes.type_error,
    }
}
