mod token;
mod tokens;

pub use token::*;
pub use tokens::*;

use std::{error::Error, fmt::Display, iter::Peekable, str::Chars};

use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: Location,
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.location.line, self.location.column
        )
    }
}

impl Error for LexError {}

/// Hand-rolled character scanner producing a flat `Vec<Token>`. Mirrors the
/// line/column bookkeeping of a classic recursive-descent lexer: every
/// `lex_*` helper consumes one token's worth of characters and recurses into
/// `lex_internal` for the next.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: vec![],
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.iterator.peek()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.iterator.next();
        if let Some(c) = c {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        c
    }

    fn next_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        let c = self.iterator.next_if(func);
        if let Some(c) = c {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        c
    }

    fn position(&self) -> Location {
        Location::new(self.line, self.col)
    }

    fn eat_whitespace_and_comments(&mut self) {
        loop {
            let mut ate_any = false;
            while self.next_if(|c| c.is_whitespace()).is_some() {
                ate_any = true;
            }
            if self.peek() == Some(&'#') {
                while let Some(c) = self.next() {
                    if c == '\n' {
                        break;
                    }
                }
                ate_any = true;
            }
            if !ate_any {
                break;
            }
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        self.lex_internal()?;
        Ok(self.tokens)
    }

    fn lex_internal(&mut self) -> LexResult<()> {
        self.eat_whitespace_and_comments();

        let Some(next) = self.peek().copied() else {
            return Ok(());
        };

        match next {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_alphanumeric()?,
            '0'..='9' => self.lex_numeric()?,
            '\'' => self.lex_char_literal()?,
            '"' => self.lex_str_literal()?,
            _ => self.lex_special()?,
        };

        self.lex_internal()
    }

    fn lex_alphanumeric(&mut self) -> LexResult<()> {
        let position = self.position();
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_alphanumeric() || *item == '_') {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        let token = match LEX_MAP.get(read.as_str()) {
            Some(Terminal::True) => Token::BoolLiteral(true, position),
            Some(Terminal::False) => Token::BoolLiteral(false, position),
            Some(terminal) => Token::Terminal(terminal, position),
            None => Token::Ident(read, position),
        };
        self.tokens.push(token);

        Ok(())
    }

    fn lex_numeric(&mut self) -> LexResult<()> {
        let position = self.position();
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_ascii_digit()) {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();
        let value = read.parse::<i64>().map_err(|_| LexError {
            message: format!("integer literal '{read}' out of 64-bit range"),
            location: position,
        })?;

        self.tokens.push(Token::IntLiteral(value, position));
        Ok(())
    }

    /// Decodes one character of literal content, handling the fixed escape
    /// set. An unescaped control character (one that is itself an escape
    /// source character, e.g. a raw tab or newline) is a lexical error: it
    /// must be spelled as its escape.
    fn lex_literal_char(&mut self) -> LexResult<char> {
        let position = self.position();
        let Some(c) = self.next() else {
            return Err(LexError {
                message: "unterminated literal".into(),
                location: position,
            });
        };

        if c == '\\' {
            let Some(escaped) = self.next() else {
                return Err(LexError {
                    message: "unterminated escape sequence".into(),
                    location: position,
                });
            };
            return match escaped {
                '\\' => Ok('\\'),
                '"' => Ok('"'),
                '\'' => Ok('\''),
                '0' => Ok('\0'),
                'n' => Ok('\n'),
                'r' => Ok('\r'),
                'v' => Ok('\u{000B}'),
                't' => Ok('\t'),
                'b' => Ok('\u{0008}'),
                'f' => Ok('\u{000C}'),
                other => Err(LexError {
                    message: format!("unknown escape sequence '\\{other}'"),
                    location: position,
                }),
            };
        }

        const ESCAPE_SOURCE_CHARS: [char; 10] =
            ['\\', '"', '\'', '\0', '\n', '\r', '\u{000B}', '\t', '\u{0008}', '\u{000C}'];
        if ESCAPE_SOURCE_CHARS.contains(&c) {
            return Err(LexError {
                message: format!("unescaped control character {c:?} inside literal"),
                location: position,
            });
        }

        Ok(c)
    }

    fn lex_char_literal(&mut self) -> LexResult<()> {
        let position = self.position();
        self.next(); // opening '\''

        let value = self.lex_literal_char()?;

        match self.next() {
            Some('\'') => {}
            _ => {
                return Err(LexError {
                    message: "unterminated char literal".into(),
                    location: position,
                })
            }
        }

        self.tokens.push(Token::CharLiteral(value, position));
        Ok(())
    }

    fn lex_str_literal(&mut self) -> LexResult<()> {
        let position = self.position();
        self.next(); // opening '"'

        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.next();
                    break;
                }
                None => {
                    return Err(LexError {
                        message: "unterminated string literal".into(),
                        location: position,
                    })
                }
                _ => value.push(self.lex_literal_char()?),
            }
        }

        self.tokens.push(Token::StrLiteral(value, position));
        Ok(())
    }

    fn lex_special(&mut self) -> LexResult<()> {
        let position = self.position();
        let mut stack = vec![];

        while let Some(next) = self.next() {
            stack.push(next);
            let read = stack.iter().collect::<String>();

            let can_read_next = self
                .peek()
                .map(|item| {
                    let mut probe = stack.clone();
                    probe.push(*item);
                    let probe = probe.iter().collect::<String>();
                    LEX_MAP.can_match(probe.as_str())
                })
                .unwrap_or(false);

            if can_read_next {
                continue;
            }

            let Some(terminal) = LEX_MAP.get(read.as_str()) else {
                return Err(LexError {
                    message: format!("failed to lex '{read}'"),
                    location: position,
                });
            };

            self.tokens.push(Token::Terminal(terminal, position));
            break;
        }

        Ok(())
    }
}
