use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::location::Location;

/// A terminal's identity, stripped of its source position. Used for
/// lookahead ("does this token match this terminal") and as the keys of
/// [`LexMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Begin,
    End,
    Is,
    Skip,
    Return,
    Break,
    Continue,
    If,
    Then,
    Else,
    Fi,
    While,
    Do,
    Done,
    For,
    Call,
    NewPair,
    News,
    Null,
    True,
    False,
    Fst,
    Snd,
    Pair,
    Struct,
    Extern,
    Read,
    Free,
    Exit,
    Print,
    Println,
    Inline,
    TypeInt,
    TypeBool,
    TypeChar,
    TypeString,
    Semicolon,
    Comma,
    Colon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Assign,
    Bang,
    Len,
    Ord,
    Chr,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
}

/// A lexed token, carrying the [`Location`] of its first character.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Terminal(Terminal, Location),
    Ident(String, Location),
    IntLiteral(i64, Location),
    BoolLiteral(bool, Location),
    CharLiteral(char, Location),
    StrLiteral(String, Location),
}

impl Token {
    pub fn location(&self) -> Location {
        match self {
            Token::Terminal(_, loc)
            | Token::Ident(_, loc)
            | Token::IntLiteral(_, loc)
            | Token::BoolLiteral(_, loc)
            | Token::CharLiteral(_, loc)
            | Token::StrLiteral(_, loc) => *loc,
        }
    }

    pub fn is_terminal(&self, term: Terminal) -> bool {
        matches!(self, Token::Terminal(t, _) if *t == term)
    }

    /// The token's own spelling, with no location or variant-tag noise --
    /// used to reconstruct source text for inline assembly capture.
    pub fn spelling(&self) -> String {
        match self {
            Token::Terminal(term, _) => term.spelling().to_owned(),
            Token::Ident(name, _) => name.clone(),
            Token::IntLiteral(value, _) => value.to_string(),
            Token::BoolLiteral(value, _) => value.to_string(),
            Token::CharLiteral(value, _) => format!("'{value}'"),
            Token::StrLiteral(value, _) => format!("\"{value}\""),
        }
    }
}

impl Terminal {
    /// The exact source spelling this terminal was lexed from.
    pub fn spelling(self) -> &'static str {
        use Terminal::*;
        match self {
            Begin => "begin",
            End => "end",
            Is => "is",
            Skip => "skip",
            Return => "return",
            Break => "break",
            Continue => "continue",
            If => "if",
            Then => "then",
            Else => "else",
            Fi => "fi",
            While => "while",
            Do => "do",
            Done => "done",
            For => "for",
            Call => "call",
            NewPair => "newpair",
            News => "news",
            Null => "null",
            True => "true",
            False => "false",
            Fst => "fst",
            Snd => "snd",
            Pair => "pair",
            Struct => "struct",
            Extern => "extern",
            Read => "read",
            Free => "free",
            Exit => "exit",
            Print => "print",
            Println => "println",
            Inline => "inline",
            TypeInt => "int",
            TypeBool => "bool",
            TypeChar => "char",
            TypeString => "string",
            Semicolon => ";",
            Comma => ",",
            Colon => ":",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Assign => "=",
            Bang => "!",
            Len => "len",
            Ord => "ord",
            Chr => "chr",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Amp => "&",
            AmpAmp => "&&",
            Pipe => "|",
            PipePipe => "||",
            Caret => "^",
            Shl => "<<",
            Shr => ">>",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            EqEq => "==",
            Ne => "!=",
        }
    }
}

/// The table of fixed-spelling tokens: both reserved words (looked up after
/// a full identifier has been read) and symbol operators (looked up via
/// greedy longest-match, see [`crate::lexer::Lexer::lex_special`]).
pub struct LexMap(HashMap<&'static str, Terminal>);

impl LexMap {
    pub fn get(&self, text: &str) -> Option<Terminal> {
        self.0.get(text).copied()
    }

    /// True if some key in the map starts with `prefix` -- used by the
    /// greedy symbol scanner to decide whether to keep reading.
    pub fn can_match(&self, prefix: &str) -> bool {
        self.0.keys().any(|key| key.starts_with(prefix))
    }
}

pub static LEX_MAP: Lazy<LexMap> = Lazy::new(|| {
    use Terminal::*;
    let mut m = HashMap::new();
    m.insert("begin", Begin);
    m.insert("end", End);
    m.insert("is", Is);
    m.insert("skip", Skip);
    m.insert("return", Return);
    m.insert("break", Break);
    m.insert("continue", Continue);
    m.insert("if", If);
    m.insert("then", Then);
    m.insert("else", Else);
    m.insert("fi", Fi);
    m.insert("while", While);
    m.insert("do", Do);
    m.insert("done", Done);
    m.insert("for", For);
    m.insert("call", Call);
    m.insert("newpair", NewPair);
    m.insert("news", News);
    m.insert("null", Null);
    m.insert("true", True);
    m.insert("false", False);
    m.insert("fst", Fst);
    m.insert("snd", Snd);
    m.insert("pair", Pair);
    m.insert("struct", Struct);
    m.insert("extern", Extern);
    m.insert("read", Read);
    m.insert("free", Free);
    m.insert("exit", Exit);
    m.insert("print", Print);
    m.insert("println", Println);
    m.insert("inline", Inline);
    m.insert("len", Len);
    m.insert("ord", Ord);
    m.insert("chr", Chr);
    m.insert("int", TypeInt);
    m.insert("bool", TypeBool);
    m.insert("char", TypeChar);
    m.insert("string", TypeString);

    m.insert(";", Semicolon);
    m.insert(",", Comma);
    m.insert(":", Colon);
    m.insert("(", LParen);
    m.insert(")", RParen);
    m.insert("[", LBracket);
    m.insert("]", RBracket);
    m.insert("=", Assign);
    m.insert("!", Bang);
    m.insert("+", Plus);
    m.insert("-", Minus);
    m.insert("*", Star);
    m.insert("/", Slash);
    m.insert("%", Percent);
    m.insert("&", Amp);
    m.insert("&&", AmpAmp);
    m.insert("|", Pipe);
    m.insert("||", PipePipe);
    m.insert("^", Caret);
    m.insert("<<", Shl);
    m.insert(">>", Shr);
    m.insert("<", Lt);
    m.insert("<=", Le);
    m.insert(">", Gt);
    m.insert(">=", Ge);
    m.insert("==", EqEq);
    m.insert("!=", Ne);

    LexMap(m)
});
