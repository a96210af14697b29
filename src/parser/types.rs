use crate::ast::Type;
use crate::lexer::Terminal;

use super::{FromTokens, ParseError, ParseState};

/// Parses a `Type`: a base type keyword, a `pair(...)` constructor, or a
/// struct name, each optionally followed by any number of `[]` and `*`
/// suffixes applied in the order they appear (`int[]*` is a pointer to an
/// int array).
pub struct TypeParser;

impl FromTokens for TypeParser {
    type Output = Type;

    fn parse(state: &mut ParseState) -> Result<Type, ParseError> {
        let mut ty = parse_base(state)?;

        loop {
            match state.peek() {
                Some(token) if token.is_terminal(Terminal::LBracket) => {
                    state.tokens.next();
                    let close = state.tokens.next();
                    if !matches!(&close, Some(t) if t.is_terminal(Terminal::RBracket)) {
                        return Err(ParseError::new(
                            "expected ']' to close array type",
                            token.location(),
                        ));
                    }
                    ty = Type::array_of(ty);
                }
                Some(token) if token.is_terminal(Terminal::Star) => {
                    state.tokens.next();
                    ty = Type::ptr_of(ty);
                }
                _ => break,
            }
        }

        Ok(ty)
    }
}

fn parse_base(state: &mut ParseState) -> Result<Type, ParseError> {
    let Some(token) = state.peek() else {
        return Err(ParseError::eof("type"));
    };

    let ty = match &token {
        t if t.is_terminal(Terminal::TypeInt) => {
            state.tokens.next();
            Type::TInt
        }
        t if t.is_terminal(Terminal::TypeBool) => {
            state.tokens.next();
            Type::TBool
        }
        t if t.is_terminal(Terminal::TypeChar) => {
            state.tokens.next();
            Type::TChar
        }
        t if t.is_terminal(Terminal::TypeString) => {
            state.tokens.next();
            Type::TString
        }
        t if t.is_terminal(Terminal::Pair) => {
            state.tokens.next();
            parse_pair_tail(state)?
        }
        crate::lexer::Token::Ident(name, _) => {
            state.tokens.next();
            Type::TStruct(name.clone())
        }
        _ => {
            return Err(ParseError::new(
                format!("expected a type, found {token:?}"),
                token.location(),
            ))
        }
    };

    Ok(ty)
}

/// `pair(T1, T2)`, or the bare `pair` keyword standing for
/// `pair(TArb, TArb)` inside nested pair-element declarations.
fn parse_pair_tail(state: &mut ParseState) -> Result<Type, ParseError> {
    match state.peek() {
        Some(token) if token.is_terminal(Terminal::LParen) => {
            state.tokens.next();
            let fst = TypeParser::parse(state)?;
            expect(state, Terminal::Comma, "expected ',' in pair type")?;
            let snd = TypeParser::parse(state)?;
            expect(state, Terminal::RParen, "expected ')' to close pair type")?;
            Ok(Type::pair_of(fst, snd))
        }
        _ => Ok(Type::pair_of(Type::TArb, Type::TArb)),
    }
}

pub(super) fn expect(
    state: &mut ParseState,
    term: Terminal,
    message: &str,
) -> Result<(), ParseError> {
    match state.peek() {
        Some(token) if token.is_terminal(term) => {
            state.tokens.next();
            Ok(())
        }
        Some(token) => Err(ParseError::new(message.to_string(), token.location())),
        None => Err(ParseError::eof(message)),
    }
}
