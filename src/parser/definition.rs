use crate::ast::{Declaration, Definition, Statement, Type};
use crate::lexer::{Terminal, Token};

use super::expr::ExprParser;
use super::statement::parse_statement_sequence;
use super::types::{expect, TypeParser};
use super::{ParseError, ParseState};

/// `begin definition* end`, followed by end-of-input.
pub fn parse_program(state: &mut ParseState) -> Result<Vec<Definition>, ParseError> {
    expect(state, Terminal::Begin, "expected 'begin' to start the program")?;

    let mut definitions = vec![];
    while !matches!(state.peek(), Some(t) if t.is_terminal(Terminal::End)) {
        definitions.push(parse_definition(state)?);
        if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Semicolon)) {
            state.tokens.next();
        }
    }

    expect(state, Terminal::End, "expected 'end' to close the program")?;

    if state.peek().is_some() {
        return Err(ParseError::new(
            "unexpected trailing input after program",
            state.peek().unwrap().location(),
        ));
    }

    Ok(definitions)
}

fn parse_definition(state: &mut ParseState) -> Result<Definition, ParseError> {
    if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Struct)) {
        return parse_type_def(state);
    }

    let ty = TypeParser::parse(state)?;
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::eof("definition name"));
    };
    state.tokens.next();

    if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::LParen)) {
        parse_fun_def(state, name, ty)
    } else {
        parse_global_def(state, name, ty)
    }
}

fn parse_fun_def(state: &mut ParseState, name: String, ret: Type) -> Result<Definition, ParseError> {
    state.tokens.next(); // (
    let params = parse_param_list(state)?;
    expect(state, Terminal::RParen, "expected ')' to close parameter list")?;
    expect(state, Terminal::Is, "expected 'is'")?;
    let body = Statement::Block(parse_statement_sequence(state)?);
    expect(state, Terminal::End, "expected 'end' to close function body")?;

    let fn_type = Type::TFun(Box::new(ret), params);
    Ok(Definition::FunDef(Declaration::new(name, fn_type), body))
}

fn parse_param_list(state: &mut ParseState) -> Result<Vec<Declaration>, ParseError> {
    let mut params = vec![];
    if matches!(state.peek(), Some(t) if t.is_terminal(Terminal::RParen)) {
        return Ok(params);
    }
    params.push(parse_param(state)?);
    while matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Comma)) {
        state.tokens.next();
        params.push(parse_param(state)?);
    }
    Ok(params)
}

fn parse_param(state: &mut ParseState) -> Result<Declaration, ParseError> {
    let ty = TypeParser::parse(state)?;
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::eof("parameter name"));
    };
    state.tokens.next();
    Ok(Declaration::new(name, ty))
}

fn parse_global_def(state: &mut ParseState, name: String, ty: Type) -> Result<Definition, ParseError> {
    expect(state, Terminal::Assign, "expected '=' in global definition")?;
    let value = ExprParser::parse(state)?;
    Ok(Definition::GlobalDef(Declaration::new(name, ty), value))
}

/// `struct name is field; field; … end`.
fn parse_type_def(state: &mut ParseState) -> Result<Definition, ParseError> {
    state.tokens.next(); // struct
    let Some(Token::Ident(name, _)) = state.peek() else {
        return Err(ParseError::eof("struct name"));
    };
    state.tokens.next();
    expect(state, Terminal::Is, "expected 'is'")?;

    let mut fields = vec![parse_param(state)?];
    while matches!(state.peek(), Some(t) if t.is_terminal(Terminal::Semicolon)) {
        state.tokens.next();
        fields.push(parse_param(state)?);
    }

    expect(state, Terminal::End, "expected 'end' to close struct definition")?;
    Ok(Definition::TypeDef(name, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CtrlOp, Expr, Literal};
    use crate::lexer::Lexer;

    fn parse(src: &str) -> Vec<Definition> {
        let tokens = Lexer::new(src).lex().expect("lex should succeed");
        let mut state = ParseState::new(tokens);
        parse_program(&mut state).expect("parse should succeed")
    }

    #[test]
    fn parses_main_and_one_function() {
        let defs = parse("begin int main() is skip end; int f(int x) is return x + 1 end end");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name(), "main");
        assert_eq!(defs[1].name(), "f");

        let Definition::FunDef(decl, _) = &defs[1] else {
            panic!("expected function definition");
        };
        assert_eq!(decl.ty, Type::TFun(Box::new(Type::TInt), vec![Declaration::new("x", Type::TInt)]));
    }

    #[test]
    fn desugared_for_loop_body_contains_expected_statements() {
        let defs = parse(
            "begin int main() is for (int i = 0; i < 10; i = i + 1) do skip done end end",
        );
        let Definition::FunDef(_, Statement::Block(body)) = &defs[0] else {
            panic!("expected function body block");
        };
        assert_eq!(body.len(), 1);
        let (inner, _) = body[0].unwrap_id();
        assert!(matches!(inner, Statement::Block(parts) if parts.len() == 2));
    }

    #[test]
    fn parses_global_def() {
        let defs = parse("begin int main() is skip end; int counter = 0 end");
        let Definition::GlobalDef(decl, Expr::Lit(Literal::Int(0))) = &defs[1] else {
            panic!("expected global def");
        };
        assert_eq!(decl.name, "counter");
    }

    #[test]
    fn parses_struct_def() {
        let defs = parse("begin struct point is int x; int y end int main() is skip end end");
        let Definition::TypeDef(name, fields) = &defs[0] else {
            panic!("expected type def");
        };
        assert_eq!(name, "point");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn return_type_mismatch_is_a_parse_level_non_issue() {
        // Type checking of the return expression is a later stage; the
        // parser only needs to recognize the grammar.
        let defs = parse("begin int f() is return true end end");
        let Definition::FunDef(_, Statement::Block(body)) = &defs[0] else {
            panic!("expected body");
        };
        let (inner, _) = body[0].unwrap_id();
        assert!(matches!(inner, Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Bool(true))))));
    }
}
