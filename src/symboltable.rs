//! The scoped symbol table backing name resolution.
//!
//! Frames are pushed on block entry and popped on block exit, forming a
//! stack; lookup walks from the innermost frame outward. The special key
//! `%RETURN%` is how the semantic walker threads a function's declared
//! return type down into its body without a separate parameter.

use std::collections::HashMap;

use crate::ast::Type;
use crate::error::CheckerError;

pub const RETURN_BINDING: &str = "%RETURN%";

pub struct SymbolTable {
    frames: Vec<HashMap<String, Type>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            frames: vec![HashMap::new()],
        }
    }

    pub fn increase_scope(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn decrease_scope(&mut self) {
        self.frames.pop();
    }

    /// Runs `action` inside a fresh child scope, guaranteeing the scope is
    /// torn down again even if `action` returns an error.
    pub fn scoped<T>(
        &mut self,
        action: impl FnOnce(&mut SymbolTable) -> Result<T, CheckerError>,
    ) -> Result<T, CheckerError> {
        self.increase_scope();
        let result = action(self);
        self.decrease_scope();
        result
    }

    /// Adds `name: ty` to the innermost frame. Shadowing an outer frame's
    /// binding is fine; redeclaring within the *same* frame is a semantic
    /// error.
    pub fn add_symbol(&mut self, name: &str, ty: Type) -> Result<(), CheckerError> {
        let frame = self.frames.last_mut().expect("symbol table has no open frame");
        if frame.contains_key(name) {
            return Err(CheckerError::semantic(format!(
                "'{name}' is already defined in this scope"
            )));
        }
        frame.insert(name.to_string(), ty);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Type, CheckerError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .cloned()
            .ok_or_else(|| CheckerError::semantic(format!("'{name}' is not defined")))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_nearest_enclosing_frame() {
        let mut table = SymbolTable::new();
        table.add_symbol("x", Type::TInt).unwrap();
        table.increase_scope();
        table.add_symbol("x", Type::TBool).unwrap();
        assert_eq!(table.lookup("x").unwrap(), Type::TBool);
        table.decrease_scope();
        assert_eq!(table.lookup("x").unwrap(), Type::TInt);
    }

    #[test]
    fn duplicate_in_same_frame_is_an_error() {
        let mut table = SymbolTable::new();
        table.add_symbol("x", Type::TInt).unwrap();
        assert!(table.add_symbol("x", Type::TBool).is_err());
    }

    #[test]
    fn undefined_identifier_is_an_error() {
        let table = SymbolTable::new();
        assert!(table.lookup("missing").is_err());
    }

    #[test]
    fn scoped_tears_down_frame_even_on_error() {
        let mut table = SymbolTable::new();
        let result = table.scoped(|t| {
            t.add_symbol("y", Type::TInt)?;
            Err(CheckerError::semantic("boom"))
        });
        assert!(result.is_err());
        assert!(table.lookup("y").is_err());
    }
}
