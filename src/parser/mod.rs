mod definition;
mod expr;
mod statement;
mod types;

use colored::Colorize;
use std::fmt::Display;

use crate::ast::AnnotatedProgram;
use crate::error::CheckerError;
use crate::lexer::{Lexer, Token, Tokens};
use crate::location::{Location, LocationData, StatementId};

/// The mutable state threaded through every recursive-descent parse
/// function: the token cursor plus the id counter and location map
/// statements are annotated with. Backtracking is a snapshot/restore of
/// the cursor's index; the location map may end up with entries for ids
/// that a backtracked-past alternative minted and never used again, which
/// is harmless because the final tree never references them.
pub struct ParseState {
    pub tokens: Tokens<Token>,
    pub locations: LocationData,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
            locations: LocationData::new(),
        }
    }

    pub fn peek(&self) -> Option<Token> {
        self.tokens.peek()
    }

    pub fn snapshot(&self) -> usize {
        self.tokens.get_index()
    }

    pub fn restore(&mut self, snapshot: usize) {
        self.tokens.set_index(snapshot);
    }

    /// Draw a fresh `StatementId` and save `location` for it right away;
    /// this must happen before the statement's own sub-parser runs.
    pub fn next_id_at(&mut self, location: Location) -> StatementId {
        let id = self.locations.next_id();
        self.locations.save(id, location);
        id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub location: Option<Location>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        ParseError {
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn eof(item: &str) -> ParseError {
        ParseError {
            message: format!("hit end of input while parsing {item}"),
            location: None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message.as_str().red())
    }
}

impl From<ParseError> for CheckerError {
    fn from(value: ParseError) -> Self {
        match value.location {
            Some(loc) => CheckerError::syntax(loc, value.message),
            None => CheckerError::syntax(Location::new(0, 0), value.message),
        }
    }
}

pub trait FromTokens {
    type Output;

    fn parse(state: &mut ParseState) -> Result<Self::Output, ParseError>;
}

/// Parse a full source file into an [`AnnotatedProgram`]. This is the
/// only entry point external collaborators need for the parsing stage.
pub fn parse(source: &str) -> Result<AnnotatedProgram, CheckerError> {
    let tokens = Lexer::new(source)
        .lex()
        .map_err(|e| CheckerError::syntax(e.location, e.message))?;

    let mut state = ParseState::new(tokens);
    let definitions = definition::parse_program(&mut state)?;

    Ok(AnnotatedProgram {
        definitions,
        locations: state.locations,
    })
}
