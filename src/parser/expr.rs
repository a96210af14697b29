use crate::ast::{BinOp, Expr, Literal, PairSide, UnOp};
use crate::lexer::{Terminal, Token};

use super::types::expect;
use super::{FromTokens, ParseError, ParseState};

pub struct ExprParser;

impl FromTokens for ExprParser {
    type Output = Expr;

    fn parse(state: &mut ParseState) -> Result<Expr, ParseError> {
        parse_binary(state, 0)
    }
}

/// Precedence-climbing binary operator driver: `min_prec` is the
/// lowest precedence this call is allowed to consume, so recursive calls
/// naturally bind tighter operators before looser ones.
fn parse_binary(state: &mut ParseState, min_prec: u8) -> Result<Expr, ParseError> {
    let mut lhs = parse_unary(state)?;

    while let Some(op) = peek_binop(state) {
        let prec = op.precedence();
        if prec < min_prec {
            break;
        }
        state.tokens.next();
        let rhs = parse_binary(state, prec + 1)?;
        lhs = Expr::BinApp(op, Box::new(lhs), Box::new(rhs));
    }

    Ok(lhs)
}

fn peek_binop(state: &ParseState) -> Option<BinOp> {
    let token = state.peek()?;
    let Token::Terminal(term, _) = token else {
        return None;
    };
    let op = match term {
        Terminal::Star => BinOp::Mul,
        Terminal::Slash => BinOp::Div,
        Terminal::Percent => BinOp::Mod,
        Terminal::Plus => BinOp::Add,
        Terminal::Minus => BinOp::Sub,
        Terminal::Shl => BinOp::Shl,
        Terminal::Shr => BinOp::Shr,
        Terminal::Lt => BinOp::Lt,
        Terminal::Le => BinOp::Le,
        Terminal::Gt => BinOp::Gt,
        Terminal::Ge => BinOp::Ge,
        Terminal::EqEq => BinOp::Eq,
        Terminal::Ne => BinOp::Ne,
        Terminal::Amp => BinOp::BitAnd,
        Terminal::Caret => BinOp::BitXor,
        Terminal::Pipe => BinOp::BitOr,
        Terminal::AmpAmp => BinOp::And,
        Terminal::PipePipe => BinOp::Or,
        _ => return None,
    };
    Some(op)
}

fn parse_unary(state: &mut ParseState) -> Result<Expr, ParseError> {
    let Some(token) = state.peek() else {
        return Err(ParseError::eof("expression"));
    };
    let Token::Terminal(term, _) = &token else {
        return parse_term(state);
    };

    let op = match term {
        Terminal::Bang => UnOp::Not,
        Terminal::Minus => UnOp::Neg,
        Terminal::Len => UnOp::Len,
        Terminal::Ord => UnOp::Ord,
        Terminal::Chr => UnOp::Chr,
        Terminal::Star => UnOp::Deref,
        Terminal::Amp => UnOp::AddrOf,
        _ => return parse_term(state),
    };

    state.tokens.next();
    let inner = parse_unary(state)?;
    Ok(Expr::UnApp(op, Box::new(inner)))
}

fn parse_term(state: &mut ParseState) -> Result<Expr, ParseError> {
    let Some(token) = state.peek() else {
        return Err(ParseError::eof("expression"));
    };

    match &token {
        Token::Terminal(Terminal::LParen, _) => {
            state.tokens.next();
            let inner = ExprParser::parse(state)?;
            expect(state, Terminal::RParen, "expected ')' to close expression")?;
            Ok(inner)
        }
        Token::Terminal(Terminal::Call, _) => parse_fun_call(state),
        Token::Terminal(Terminal::NewPair, _) => parse_new_pair(state),
        Token::Terminal(Terminal::News, _) => parse_new_struct(state),
        Token::Terminal(Terminal::Fst, _) => parse_pair_elem(state, PairSide::Fst),
        Token::Terminal(Terminal::Snd, _) => parse_pair_elem(state, PairSide::Snd),
        Token::Terminal(Terminal::Null, _) => {
            state.tokens.next();
            Ok(Expr::Lit(Literal::Null))
        }
        Token::Terminal(Terminal::LBracket, _) => parse_array_literal(state),
        Token::IntLiteral(value, _) => {
            let value = *value;
            state.tokens.next();
            Ok(Expr::Lit(Literal::Int(value)))
        }
        Token::BoolLiteral(value, _) => {
            let value = *value;
            state.tokens.next();
            Ok(Expr::Lit(Literal::Bool(value)))
        }
        Token::CharLiteral(value, _) => {
            let value = *value;
            state.tokens.next();
            Ok(Expr::Lit(Literal::Char(value)))
        }
        Token::StrLiteral(value, _) => {
            let value = value.clone();
            state.tokens.next();
            Ok(Expr::Lit(Literal::Str(value)))
        }
        Token::Ident(name, _) => {
            let name = name.clone();
            state.tokens.next();
            parse_ident_tail(state, name)
        }
        _ => Err(ParseError::new(
            format!("unexpected token {token:?} while parsing expression"),
            token.location(),
        )),
    }
}

/// After a bare identifier, zero or more `[idx]` suffixes turn it into an
/// array element reference; otherwise it is a plain `Ident`.
fn parse_ident_tail(state: &mut ParseState, name: String) -> Result<Expr, ParseError> {
    let mut indices = vec![];
    while let Some(token) = state.peek() {
        if !token.is_terminal(Terminal::LBracket) {
            break;
        }
        state.tokens.next();
        indices.push(ExprParser::parse(state)?);
        expect(state, Terminal::RBracket, "expected ']' to close array index")?;
    }

    if indices.is_empty() {
        Ok(Expr::Ident(name))
    } else {
        Ok(Expr::ArrElem(name, indices))
    }
}

fn parse_pair_elem(state: &mut ParseState, side: PairSide) -> Result<Expr, ParseError> {
    state.tokens.next();
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::new(
            "expected identifier after 'fst'/'snd'",
            state.peek().map(|t| t.location()).unwrap_or(crate::location::Location::new(0, 0)),
        ));
    };
    state.tokens.next();
    Ok(Expr::PairElem(side, name))
}

fn parse_fun_call(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.tokens.next();
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::eof("function call"));
    };
    state.tokens.next();
    expect(state, Terminal::LParen, "expected '(' in function call")?;
    let args = parse_arg_list(state)?;
    expect(state, Terminal::RParen, "expected ')' to close function call")?;
    Ok(Expr::FunCall(name, args))
}

fn parse_arg_list(state: &mut ParseState) -> Result<Vec<crate::ast::Expr>, ParseError> {
    let mut args = vec![];
    if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::RParen)) {
        return Ok(args);
    }
    args.push(ExprParser::parse(state)?);
    while matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Comma)) {
        state.tokens.next();
        args.push(ExprParser::parse(state)?);
    }
    Ok(args)
}

fn parse_new_pair(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.tokens.next();
    expect(state, Terminal::LParen, "expected '(' after 'newpair'")?;
    let fst = ExprParser::parse(state)?;
    expect(state, Terminal::Comma, "expected ',' in 'newpair'")?;
    let snd = ExprParser::parse(state)?;
    expect(state, Terminal::RParen, "expected ')' to close 'newpair'")?;
    Ok(Expr::NewPair(Box::new(fst), Box::new(snd)))
}

fn parse_new_struct(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.tokens.next();
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::eof("struct name after 'news'"));
    };
    state.tokens.next();
    Ok(Expr::NewStruct(name))
}

fn parse_array_literal(state: &mut ParseState) -> Result<Expr, ParseError> {
    state.tokens.next();
    let mut elements = vec![];
    if !matches!(state.peek(), Some(t) if t.is_terminal(Terminal::RBracket)) {
        elements.push(ExprParser::parse(state)?);
        while matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Comma)) {
            state.tokens.next();
            elements.push(ExprParser::parse(state)?);
        }
    }
    expect(state, Terminal::RBracket, "expected ']' to close array literal")?;
    Ok(Expr::Lit(Literal::Array(elements)))
}
