use super::expr::Expr;
use super::types::Declaration;
use crate::location::StatementId;

#[derive(Debug, Clone, PartialEq)]
pub enum CtrlOp {
    Return(Expr),
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOp {
    Read,
    Free,
    Exit,
    Print,
    PrintLn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Noop,
    Block(Vec<Statement>),
    VarDef(Declaration, Expr),
    Ctrl(CtrlOp),
    Cond(Expr, Box<Statement>, Box<Statement>),
    Loop(Expr, Box<Statement>),
    Builtin(BuiltinOp, Expr),
    /// Reassignment of an already-declared lvalue, distinct from `VarDef`
    /// (which both declares and binds) so a later `x = x + 1` can be
    /// expressed.
    Assign(Expr, Expr),
    ExpStmt(Expr),
    ExternDecl(String),
    InlineAssembly(Vec<String>),
    /// Every statement the parser emits is wrapped in one of these; see
    /// [`crate::location`].
    IdentifiedStatement(Box<Statement>, StatementId),
}

impl Statement {
    pub fn identified(inner: Statement, id: StatementId) -> Statement {
        Statement::IdentifiedStatement(Box::new(inner), id)
    }

    /// Strip the `IdentifiedStatement` wrapper, if any, returning the inner
    /// form and the id it carried.
    pub fn unwrap_id(&self) -> (&Statement, Option<StatementId>) {
        match self {
            Statement::IdentifiedStatement(inner, id) => (inner, Some(*id)),
            other => (other, None),
        }
    }
}
