pub mod ast;
pub mod checker;
pub mod error;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod symboltable;
pub mod typing;

use error::CheckerError;

/// Parse and semantically check a full WACC source file in one go.
///
/// This is the convenience entry point external collaborators (the CLI, the
/// future codegen stage) are expected to call; everything else in this crate
/// is reachable individually for anyone who wants the two stages separately.
pub fn compile(source: &str) -> Result<ast::AnnotatedProgram, CheckerError> {
    let program = parser::parse(source)?;
    checker::check(&program)?;
    Ok(program)
}
