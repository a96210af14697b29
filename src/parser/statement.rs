use crate::ast::{BuiltinOp, CtrlOp, Declaration, Expr, Statement};
use crate::lexer::{Terminal, Token};
use crate::location::Location;

use super::expr::ExprParser;
use super::types::{expect, TypeParser};
use super::{FromTokens, ParseError, ParseState};

/// Parses one statement, always returning it wrapped as an
/// `IdentifiedStatement` whose id was minted (and whose location saved)
/// *before* the statement's own sub-parser ran.
pub fn parse_statement(state: &mut ParseState) -> Result<Statement, ParseError> {
    let location = state.peek().map(|t| t.location()).unwrap_or(Location::new(0, 0));
    let id = state.next_id_at(location);
    let inner = parse_statement_kind(state)?;
    Ok(Statement::identified(inner, id))
}

/// `begin … end` -- a block that may stand on its own as a statement.
pub fn parse_block(state: &mut ParseState) -> Result<Vec<Statement>, ParseError> {
    expect(state, Terminal::Begin, "expected 'begin'")?;
    let body = parse_statement_sequence(state)?;
    expect(state, Terminal::End, "expected 'end'")?;
    Ok(body)
}

/// A `;`-separated sequence of statements (shared by blocks, loop bodies,
/// and conditional branches).
pub fn parse_statement_sequence(state: &mut ParseState) -> Result<Vec<Statement>, ParseError> {
    let mut statements = vec![parse_statement(state)?];
    while matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Semicolon)) {
        state.tokens.next();
        statements.push(parse_statement(state)?);
    }
    Ok(statements)
}

fn parse_statement_kind(state: &mut ParseState) -> Result<Statement, ParseError> {
    let Some(token) = state.peek() else {
        return Err(ParseError::eof("statement"));
    };

    match &token {
        Token::Terminal(Terminal::Begin, _) if peeks_inline_asm(state) => parse_inline_assembly(state),
        Token::Terminal(Terminal::Begin, _) => Ok(Statement::Block(parse_block(state)?)),
        Token::Terminal(Terminal::Return, _) => {
            state.tokens.next();
            let value = ExprParser::parse(state)?;
            Ok(Statement::Ctrl(CtrlOp::Return(value)))
        }
        Token::Terminal(Terminal::Break, _) => {
            state.tokens.next();
            Ok(Statement::Ctrl(CtrlOp::Break))
        }
        Token::Terminal(Terminal::Continue, _) => {
            state.tokens.next();
            Ok(Statement::Ctrl(CtrlOp::Continue))
        }
        Token::Terminal(Terminal::If, _) => parse_conditional(state),
        Token::Terminal(Terminal::Extern, _) => {
            state.tokens.next();
            let Some(Token::Ident(name, _)) = state.peek() else {
                return Err(ParseError::eof("extern declaration"));
            };
            state.tokens.next();
            Ok(Statement::ExternDecl(name))
        }
        Token::Terminal(Terminal::While, _) => parse_loop(state),
        Token::Terminal(Terminal::For, _) => parse_for(state, token.location()),
        Token::Terminal(Terminal::Read, _) => parse_builtin(state, BuiltinOp::Read),
        Token::Terminal(Terminal::Free, _) => parse_builtin(state, BuiltinOp::Free),
        Token::Terminal(Terminal::Exit, _) => parse_builtin(state, BuiltinOp::Exit),
        Token::Terminal(Terminal::Print, _) => parse_builtin(state, BuiltinOp::Print),
        Token::Terminal(Terminal::Println, _) => parse_builtin(state, BuiltinOp::PrintLn),
        Token::Terminal(Terminal::Skip, _) => {
            state.tokens.next();
            Ok(Statement::Noop)
        }
        _ => {
            if let Some(vardef) = try_parse_var_def(state)? {
                return Ok(vardef);
            }
            if let Some(assign) = try_parse_assign(state)? {
                return Ok(assign);
            }
            let expr = ExprParser::parse(state)?;
            Ok(Statement::ExpStmt(expr))
        }
    }
}

/// `T name is ...` can't occur here (that's a definition), but `T name =
/// expr` can overlap syntactically with a bare-identifier expression
/// statement (a struct-typed variable definition reads `Foo x = ...` where
/// `Foo` is itself just an identifier). Try the definition reading first and
/// backtrack on failure.
fn try_parse_var_def(state: &mut ParseState) -> Result<Option<Statement>, ParseError> {
    let snapshot = state.snapshot();
    let attempt = (|| {
        let ty = TypeParser::parse(state)?;
        let Some(Token::Ident(name, _)) = state.peek() else {
            return Err(ParseError::eof("variable name"));
        };
        state.tokens.next();
        expect(state, Terminal::Assign, "expected '=' in variable definition")?;
        let value = ExprParser::parse(state)?;
        Ok(Statement::VarDef(Declaration::new(name, ty), value))
    })();

    match attempt {
        Ok(stmt) => Ok(Some(stmt)),
        Err(_) => {
            state.restore(snapshot);
            Ok(None)
        }
    }
}

fn try_parse_assign(state: &mut ParseState) -> Result<Option<Statement>, ParseError> {
    let snapshot = state.snapshot();
    let attempt = (|| {
        let target = ExprParser::parse(state)?;
        if !is_assignable(&target) {
            return Err(ParseError::new(
                "left-hand side of assignment is not assignable",
                state.peek().map(|t| t.location()).unwrap_or(Location::new(0, 0)),
            ));
        }
        expect(state, Terminal::Assign, "expected '=' in assignment")?;
        let value = ExprParser::parse(state)?;
        Ok(Statement::Assign(target, value))
    })();

    match attempt {
        Ok(stmt) => Ok(Some(stmt)),
        Err(_) => {
            state.restore(snapshot);
            Ok(None)
        }
    }
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(_) | Expr::ArrElem(_, _) | Expr::PairElem(_, _))
}

fn parse_conditional(state: &mut ParseState) -> Result<Statement, ParseError> {
    state.tokens.next(); // if
    let cond = ExprParser::parse(state)?;
    expect(state, Terminal::Then, "expected 'then'")?;
    let then_branch = Statement::Block(parse_statement_sequence(state)?);

    let else_branch = if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Else)) {
        state.tokens.next();
        Statement::Block(parse_statement_sequence(state)?)
    } else {
        Statement::Noop
    };

    expect(state, Terminal::Fi, "expected 'fi'")?;
    Ok(Statement::Cond(cond, Box::new(then_branch), Box::new(else_branch)))
}

fn parse_loop(state: &mut ParseState) -> Result<Statement, ParseError> {
    state.tokens.next(); // while
    let cond = ExprParser::parse(state)?;
    expect(state, Terminal::Do, "expected 'do'")?;
    let body = Statement::Block(parse_statement_sequence(state)?);
    expect(state, Terminal::Done, "expected 'done'")?;
    Ok(Statement::Loop(cond, Box::new(body)))
}

fn parse_builtin(state: &mut ParseState, op: BuiltinOp) -> Result<Statement, ParseError> {
    state.tokens.next();
    let arg = ExprParser::parse(state)?;
    if op == BuiltinOp::Read && !is_assignable(&arg) {
        return Err(ParseError::new(
            "'read' target must be an identifier, array element, or pair element",
            state.peek().map(|t| t.location()).unwrap_or(Location::new(0, 0)),
        ));
    }
    Ok(Statement::Builtin(op, arg))
}

/// `for (init ; cond ; step) do body done`, desugared at parse time
/// into a `Block` holding a `VarDef`/init statement and a `Loop` whose body
/// runs the original body followed by the step -- all four pieces sharing
/// one `StatementId`, minted at the `for` keyword's own location.
fn parse_for(state: &mut ParseState, for_location: Location) -> Result<Statement, ParseError> {
    state.tokens.next(); // for
    let shared_id = state.next_id_at(for_location);

    expect(state, Terminal::LParen, "expected '(' after 'for'")?;
    let init = parse_statement_kind(state)?;
    expect(state, Terminal::Semicolon, "expected ';' after for-init")?;
    let cond = ExprParser::parse(state)?;
    expect(state, Terminal::Semicolon, "expected ';' after for-condition")?;
    let step = parse_statement_kind(state)?;
    expect(state, Terminal::RParen, "expected ')' to close for-header")?;
    expect(state, Terminal::Do, "expected 'do'")?;
    let body = parse_statement_sequence(state)?;
    expect(state, Terminal::Done, "expected 'done'")?;

    let wrap = |s: Statement| Statement::identified(s, shared_id);

    let inner_block = Statement::Block(
        body.into_iter()
            .chain(std::iter::once(wrap(step)))
            .collect(),
    );
    let loop_stmt = wrap(Statement::Loop(cond, Box::new(wrap(inner_block))));

    Ok(Statement::Block(vec![wrap(init), loop_stmt]))
}

/// Lookahead helper: `begin inline ... end` vs. a plain `begin ... end`
/// block. Only consulted when the next token is `begin`.
fn peeks_inline_asm(state: &ParseState) -> bool {
    matches!(state.tokens.peek_at(1), Some(t) if t.is_terminal(Terminal::Inline))
}

/// Captures the text between `begin inline` and the terminating `end` as
/// its own token spellings, one per element, without interpreting it as
/// WACC syntax.
fn parse_inline_assembly(state: &mut ParseState) -> Result<Statement, ParseError> {
    state.tokens.next(); // begin
    state.tokens.next(); // inline

    let mut lines: Vec<String> = vec![];
    loop {
        match state.peek() {
            Some(t) if t.is_terminal(Terminal::End) => {
                state.tokens.next();
                break;
            }
            None => return Err(ParseError::eof("inline assembly block")),
            Some(t) => {
                lines.push(t.spelling());
                state.tokens.next();
            }
        }
    }

    Ok(Statement::InlineAssembly(lines))
}
