//! The semantic walker. Per-statement-form rules live here; the typing
//! itself is delegated to [`crate::typing`].

use crate::ast::{BuiltinOp, CtrlOp, Statement};
use crate::error::CheckerError;
use crate::location::LocationData;
use crate::symboltable::{SymbolTable, RETURN_BINDING};
use crate::typing::{equal_types, typeof_expr};

/// Visits one statement under `symbols`, consulting `locations` to rewrap
/// errors raised anywhere below an `IdentifiedStatement` boundary with that
/// statement's saved position. Because every wrap along the propagation
/// path overwrites the location unconditionally, the outermost wrap wins.
pub fn check_statement(
    stmt: &Statement,
    symbols: &mut SymbolTable,
    locations: &LocationData,
) -> Result<(), CheckerError> {
    match stmt {
        Statement::IdentifiedStatement(inner, id) => {
            check_statement(inner, symbols, locations).map_err(|e| match locations.get(*id) {
                Some(loc) => e.with_location(loc),
                None => e,
            })
        }
        Statement::Noop => Ok(()),
        Statement::Block(stmts) => symbols.scoped(|scope| {
            for s in stmts {
                check_statement(s, scope, locations)?;
            }
            Ok(())
        }),
        Statement::VarDef(decl, value) => {
            let value_ty = typeof_expr(value, symbols)?;
            if !equal_types(&decl.ty, &value_ty) {
                return Err(CheckerError::type_error(format!(
                    "cannot assign {value_ty:?} to '{}' of type {:?}",
                    decl.name, decl.ty
                )));
            }
            symbols.add_symbol(&decl.name, decl.ty.clone())
        }
        Statement::Assign(target, value) => {
            let target_ty = typeof_expr(target, symbols)?;
            let value_ty = typeof_expr(value, symbols)?;
            if !equal_types(&target_ty, &value_ty) {
                return Err(CheckerError::type_error(format!(
                    "cannot assign {value_ty:?} to a target of type {target_ty:?}"
                )));
            }
            Ok(())
        }
        Statement::Ctrl(CtrlOp::Break) | Statement::Ctrl(CtrlOp::Continue) => Ok(()),
        Statement::Ctrl(CtrlOp::Return(value)) => {
            let return_ty = symbols.lookup(RETURN_BINDING)?;
            let value_ty = typeof_expr(value, symbols)?;
            if !equal_types(&return_ty, &value_ty) {
                return Err(CheckerError::type_error(format!(
                    "function returns {return_ty:?}, found {value_ty:?}"
                )));
            }
            Ok(())
        }
        Statement::Cond(cond, then_branch, else_branch) => {
            // unlike a loop's condition, an `if`'s condition isn't required
            // to be `TBool` here.
            typeof_expr(cond, symbols)?;
            check_statement(then_branch, symbols, locations)?;
            check_statement(else_branch, symbols, locations)
        }
        Statement::Loop(cond, body) => {
            let cond_ty = typeof_expr(cond, symbols)?;
            if !equal_types(&crate::ast::Type::TBool, &cond_ty) {
                return Err(CheckerError::type_error(format!(
                    "loop condition must be bool, found {cond_ty:?}"
                )));
            }
            check_statement(body, symbols, locations)
        }
        Statement::Builtin(op, arg) => check_builtin(*op, arg, symbols),
        Statement::ExpStmt(expr) => {
            typeof_expr(expr, symbols)?;
            Ok(())
        }
        Statement::ExternDecl(_) | Statement::InlineAssembly(_) => Ok(()),
    }
}

fn check_builtin(op: BuiltinOp, arg: &crate::ast::Expr, symbols: &mut SymbolTable) -> Result<(), CheckerError> {
    use crate::ast::{Expr, Type};

    let arg_ty = typeof_expr(arg, symbols)?;
    match op {
        BuiltinOp::Read => {
            if !matches!(arg, Expr::Ident(_) | Expr::ArrElem(_, _) | Expr::PairElem(_, _)) {
                return Err(CheckerError::semantic(
                    "'read' target must be an identifier, array element, or pair element",
                ));
            }
            Ok(())
        }
        BuiltinOp::Free => match arg_ty {
            Type::TPair(_, _) | Type::TArray(_) => Ok(()),
            other => Err(CheckerError::type_error(format!(
                "'free' requires a pair or array, found {other:?}"
            ))),
        },
        BuiltinOp::Exit => {
            if !equal_types(&Type::TInt, &arg_ty) {
                return Err(CheckerError::type_error(format!(
                    "'exit' requires an int, found {arg_ty:?}"
                )));
            }
            Ok(())
        }
        BuiltinOp::Print | BuiltinOp::PrintLn => Ok(()),
    }
}

/// Entry sequence for a function body: open a scope, bind the
/// parameters and `%RETURN%`, walk the body, close the scope.
pub fn check_function_body(
    params: &[crate::ast::Declaration],
    return_ty: &crate::ast::Type,
    body: &Statement,
    symbols: &mut SymbolTable,
    locations: &LocationData,
) -> Result<(), CheckerError> {
    symbols.scoped(|scope| {
        for param in params {
            scope.add_symbol(&param.name, param.ty.clone())?;
        }
        scope.add_symbol(RETURN_BINDING, return_ty.clone())?;
        check_statement(body, scope, locations)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Literal, Type};
    use crate::location::Location;

    fn identified(inner: Statement, locations: &mut LocationData) -> Statement {
        let id = locations.next_id();
        locations.save(id, Location::new(1, 1));
        Statement::identified(inner, id)
    }

    #[test]
    fn var_def_binding_not_visible_in_its_own_initializer() {
        let mut locations = LocationData::new();
        let mut symbols = SymbolTable::new();
        let stmt = identified(
            Statement::VarDef(
                crate::ast::Declaration::new("x", Type::TInt),
                Expr::Ident("x".into()),
            ),
            &mut locations,
        );
        assert!(check_statement(&stmt, &mut symbols, &locations).is_err());
    }

    #[test]
    fn return_type_mismatch_is_a_type_error() {
        let mut locations = LocationData::new();
        let mut symbols = SymbolTable::new();
        symbols.add_symbol(RETURN_BINDING, Type::TInt).unwrap();
        let stmt = identified(
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Bool(true)))),
            &mut locations,
        );
        let err = check_statement(&stmt, &mut symbols, &locations).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Type);
        assert_eq!(err.location, Some(Location::new(1, 1)));
    }

    #[test]
    fn nested_error_takes_outermost_location() {
        let mut locations = LocationData::new();
        let mut symbols = SymbolTable::new();
        symbols.add_symbol(RETURN_BINDING, Type::TInt).unwrap();

        let inner_id = locations.next_id();
        locations.save(inner_id, Location::new(5, 1));
        let inner = Statement::identified(
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Bool(true)))),
            inner_id,
        );

        let outer_id = locations.next_id();
        locations.save(outer_id, Location::new(9, 1));
        let outer = Statement::identified(Statement::Block(vec![inner]), outer_id);

        let err = check_statement(&outer, &mut symbols, &locations).unwrap_err();
        assert_eq!(err.location, Some(Location::new(9, 1)));
    }

    #[test]
    fn read_rejects_non_assignable_target() {
        let mut symbols = SymbolTable::new();
        let err = check_builtin(BuiltinOp::Read, &Expr::Lit(Literal::Int(3)), &mut symbols).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Semantic);
    }
}
