//! The algebraic data model of WACC programs.

pub mod definition;
pub mod expr;
pub mod literal;
pub mod ops;
pub mod program;
pub mod statement;
pub mod types;

pub use definition::Definition;
pub use expr::{Expr, PairSide};
pub use literal::Literal;
pub use ops::{BinOp, UnOp};
pub use program::AnnotatedProgram;
pub use statement::{BuiltinOp, CtrlOp, Statement};
pub use types::{Declaration, Type};
