//! On-demand expression typing and the structural type-equality relation
//! the semantic walker is built on.
//!
//! Operator signatures are kept as small data-shaped match arms rather than
//! threading a generic `(op, args) -> result` table through the walker --
//! the set is fixed and small enough that a table buys nothing over a
//! direct match.

use crate::ast::{BinOp, Expr, Literal, PairSide, Type, UnOp};
use crate::error::CheckerError;
use crate::symboltable::SymbolTable;

/// Structural equality with `TArb` as a wildcard at every position
/// (reflexive and symmetric).
pub fn equal_types(expected: &Type, actual: &Type) -> bool {
    match (expected, actual) {
        (Type::TArb, _) | (_, Type::TArb) => true,
        (Type::TInt, Type::TInt)
        | (Type::TBool, Type::TBool)
        | (Type::TChar, Type::TChar)
        | (Type::TString, Type::TString) => true,
        (Type::TArray(a), Type::TArray(b)) => equal_types(a, b),
        (Type::TPair(a1, a2), Type::TPair(b1, b2)) => equal_types(a1, b1) && equal_types(a2, b2),
        (Type::TPtr(a), Type::TPtr(b)) => equal_types(a, b),
        (Type::TStruct(a), Type::TStruct(b)) => a == b,
        (Type::TFun(ra, pa), Type::TFun(rb, pb)) => {
            equal_types(ra, rb)
                && pa.len() == pb.len()
                && pa.iter().zip(pb).all(|(x, y)| equal_types(&x.ty, &y.ty))
        }
        _ => false,
    }
}

fn type_mismatch(expected: &Type, actual: &Type) -> CheckerError {
    CheckerError::type_error(format!("expected type {expected:?}, found {actual:?}"))
}

pub fn typeof_expr(expr: &Expr, symbols: &SymbolTable) -> Result<Type, CheckerError> {
    match expr {
        Expr::Lit(lit) => typeof_literal(lit, symbols),
        Expr::Ident(name) => symbols.lookup(name),
        Expr::ArrElem(name, indices) => typeof_arr_elem(name, indices, symbols),
        Expr::PairElem(side, name) => typeof_pair_elem(*side, name, symbols),
        Expr::UnApp(op, e) => typeof_unop(*op, typeof_expr(e, symbols)?),
        Expr::BinApp(op, lhs, rhs) => {
            typeof_binop(*op, typeof_expr(lhs, symbols)?, typeof_expr(rhs, symbols)?)
        }
        Expr::FunCall(name, args) => typeof_fun_call(name, args, symbols),
        Expr::NewPair(fst, snd) => Ok(Type::pair_of(
            typeof_expr(fst, symbols)?,
            typeof_expr(snd, symbols)?,
        )),
        Expr::NewStruct(name) => Ok(Type::ptr_of(Type::TStruct(name.clone()))),
    }
}

fn typeof_literal(lit: &Literal, symbols: &SymbolTable) -> Result<Type, CheckerError> {
    match lit {
        Literal::Int(_) => Ok(Type::TInt),
        Literal::Bool(_) => Ok(Type::TBool),
        Literal::Char(_) => Ok(Type::TChar),
        Literal::Str(_) => Ok(Type::TString),
        Literal::Null => Ok(Type::pair_of(Type::TArb, Type::TArb)),
        Literal::Array(elements) => {
            let Some(first) = elements.first() else {
                return Ok(Type::array_of(Type::TArb));
            };
            let elem_ty = typeof_expr(first, symbols)?;
            for rest in &elements[1..] {
                let ty = typeof_expr(rest, symbols)?;
                if !equal_types(&elem_ty, &ty) {
                    return Err(type_mismatch(&elem_ty, &ty));
                }
            }
            Ok(Type::array_of(elem_ty))
        }
    }
}

fn typeof_arr_elem(name: &str, indices: &[Expr], symbols: &SymbolTable) -> Result<Type, CheckerError> {
    let mut ty = symbols.lookup(name)?;
    for index in indices {
        let index_ty = typeof_expr(index, symbols)?;
        if !equal_types(&Type::TInt, &index_ty) {
            return Err(type_mismatch(&Type::TInt, &index_ty));
        }
        ty = match ty {
            Type::TArray(elem) => *elem,
            other => {
                return Err(CheckerError::type_error(format!(
                    "cannot index into non-array type {other:?}"
                )))
            }
        };
    }
    Ok(ty)
}

fn typeof_pair_elem(side: PairSide, name: &str, symbols: &SymbolTable) -> Result<Type, CheckerError> {
    match symbols.lookup(name)? {
        Type::TPair(fst, snd) => Ok(match side {
            PairSide::Fst => *fst,
            PairSide::Snd => *snd,
        }),
        other => Err(CheckerError::type_error(format!(
            "'{name}' has type {other:?}, expected a pair"
        ))),
    }
}

fn typeof_fun_call(name: &str, args: &[Expr], symbols: &SymbolTable) -> Result<Type, CheckerError> {
    let Type::TFun(ret, params) = symbols.lookup(name)? else {
        return Err(CheckerError::semantic(format!("'{name}' is not a function")));
    };
    if args.len() != params.len() {
        return Err(CheckerError::semantic(format!(
            "'{name}' expects {} argument(s), got {}",
            params.len(),
            args.len()
        )));
    }
    for (arg, param) in args.iter().zip(&params) {
        let arg_ty = typeof_expr(arg, symbols)?;
        if !equal_types(&param.ty, &arg_ty) {
            return Err(type_mismatch(&param.ty, &arg_ty));
        }
    }
    Ok(*ret)
}

fn typeof_unop(op: UnOp, arg: Type) -> Result<Type, CheckerError> {
    match op {
        UnOp::Not if equal_types(&Type::TBool, &arg) => Ok(Type::TBool),
        UnOp::Neg if equal_types(&Type::TInt, &arg) => Ok(Type::TInt),
        UnOp::Len => match arg {
            Type::TArray(_) | Type::TArb => Ok(Type::TInt),
            other => Err(CheckerError::type_error(format!("'len' requires an array, found {other:?}"))),
        },
        UnOp::Ord if equal_types(&Type::TChar, &arg) => Ok(Type::TInt),
        UnOp::Chr if equal_types(&Type::TInt, &arg) => Ok(Type::TChar),
        UnOp::Deref => match arg {
            Type::TPtr(inner) => Ok(*inner),
            other => Err(CheckerError::type_error(format!("cannot dereference non-pointer type {other:?}"))),
        },
        UnOp::AddrOf => Ok(Type::ptr_of(arg)),
        _ => Err(CheckerError::type_error(format!("operator {op:?} is not defined for {arg:?}"))),
    }
}

fn typeof_binop(op: BinOp, lhs: Type, rhs: Type) -> Result<Type, CheckerError> {
    use BinOp::*;
    match op {
        Mul | Div | Mod | Add | Sub | Shl | Shr => {
            expect_both(&lhs, &rhs, &Type::TInt)?;
            Ok(Type::TInt)
        }
        Lt | Le | Gt | Ge => {
            if (equal_types(&Type::TInt, &lhs) && equal_types(&Type::TInt, &rhs))
                || (equal_types(&Type::TChar, &lhs) && equal_types(&Type::TChar, &rhs))
            {
                Ok(Type::TBool)
            } else {
                Err(CheckerError::type_error(format!(
                    "operator {op:?} requires two ints or two chars, found {lhs:?} and {rhs:?}"
                )))
            }
        }
        Eq | Ne => {
            if equal_types(&lhs, &rhs) {
                Ok(Type::TBool)
            } else {
                Err(type_mismatch(&lhs, &rhs))
            }
        }
        BitAnd | BitXor | BitOr => {
            if (equal_types(&Type::TInt, &lhs) && equal_types(&Type::TInt, &rhs))
                || (equal_types(&Type::TBool, &lhs) && equal_types(&Type::TBool, &rhs))
            {
                Ok(lhs)
            } else {
                Err(CheckerError::type_error(format!(
                    "operator {op:?} requires two ints or two bools, found {lhs:?} and {rhs:?}"
                )))
            }
        }
        And | Or => {
            expect_both(&lhs, &rhs, &Type::TBool)?;
            Ok(Type::TBool)
        }
    }
}

fn expect_both(lhs: &Type, rhs: &Type, expected: &Type) -> Result<(), CheckerError> {
    if !equal_types(expected, lhs) {
        return Err(type_mismatch(expected, lhs));
    }
    if !equal_types(expected, rhs) {
        return Err(type_mismatch(expected, rhs));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_types_wildcard_matches_anything_nested() {
        assert!(equal_types(&Type::array_of(Type::TArb), &Type::array_of(Type::TInt)));
        assert!(equal_types(&Type::pair_of(Type::TArb, Type::TArb), &Type::pair_of(Type::TInt, Type::TBool)));
    }

    #[test]
    fn equal_types_is_symmetric_and_reflexive() {
        let a = Type::array_of(Type::TInt);
        let b = Type::TBool;
        assert!(equal_types(&a, &a));
        assert_eq!(equal_types(&a, &b), equal_types(&b, &a));
    }

    #[test]
    fn empty_array_literal_types_as_wildcard_array() {
        let mut symbols = SymbolTable::new();
        symbols.increase_scope();
        let ty = typeof_expr(&Expr::Lit(Literal::Array(vec![])), &symbols).unwrap();
        assert_eq!(ty, Type::array_of(Type::TArb));
    }

    #[test]
    fn new_struct_is_typed_without_checking_existence() {
        let symbols = SymbolTable::new();
        let ty = typeof_expr(&Expr::NewStruct("nonexistent".into()), &symbols).unwrap();
        assert_eq!(ty, Type::ptr_of(Type::TStruct("nonexistent".into())));
    }

    #[test]
    fn arr_elem_peels_one_array_layer_per_index() {
        let mut symbols = SymbolTable::new();
        symbols.add_symbol("xs", Type::array_of(Type::array_of(Type::TInt))).unwrap();
        let ty = typeof_expr(
            &Expr::ArrElem("xs".into(), vec![Expr::Lit(Literal::Int(0))]),
            &symbols,
        )
        .unwrap();
        assert_eq!(ty, Type::array_of(Type::TInt));
    }

    #[test]
    fn relational_ops_accept_chars() {
        assert_eq!(typeof_binop(BinOp::Lt, Type::TChar, Type::TChar).unwrap(), Type::TBool);
    }

    #[test]
    fn eq_requires_matching_types() {
        assert!(typeof_binop(BinOp::Eq, Type::TInt, Type::TBool).is_err());
    }
}
