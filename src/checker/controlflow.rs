//! Return-coverage, unreachable-code, and main-cannot-return checks.
//!
//! A function body's control flow can be seen as a set of linear
//! statement sequences, but materializing them would blow up
//! exponentially under nested conditionals. Instead each "path" is
//! collapsed to a [`PathSummary`] --
//! has a return/exit happened, is the last thing on the path a
//! return/exit, how many return/exits appear (saturating past one) -- and
//! the right-fold over a statement list operates on the bounded *set* of
//! distinct summaries reachable at each point, deduplicating as it goes.
//! The summary space is fixed-size (2 * 2 * 3 * 2 = 24 values), so the set
//! never grows past that regardless of nesting depth.

use crate::ast::{CtrlOp, Statement};
use crate::error::CheckerError;
use crate::location::{Location, LocationData};

/// Saturating counter capped at "more than one" so the summary space stays
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Zero,
    One,
    Many,
}

impl Count {
    fn add(self, other: Count) -> Count {
        match (self, other) {
            (Count::Zero, x) | (x, Count::Zero) => x,
            _ => Count::Many,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathSummary {
    has_return_or_exit: bool,
    last_is_return_or_exit: bool,
    return_exit_count: Count,
    /// Tracks `Ctrl(Return(_))` specifically, not `Builtin(Exit, _)` --
    /// needed only by `check_main_does_not_return`.
    has_bare_return: bool,
}

const EMPTY_SUMMARY: PathSummary = PathSummary {
    has_return_or_exit: false,
    last_is_return_or_exit: false,
    return_exit_count: Count::Zero,
    has_bare_return: false,
};

/// What follows a statement (or statement list) being folded over: either
/// the literal end of the body (`AtEnd`), or an already-computed set of
/// summaries for everything after. The distinction matters exactly once
/// per return/exit node: whether it is truly the last thing on its path,
/// or merely followed by statements that (coincidentally or not) also
/// summarize to "nothing interesting happened".
enum PathTail {
    AtEnd,
    Known(Vec<PathSummary>),
}

fn dedup_push(set: &mut Vec<PathSummary>, summary: PathSummary) {
    if !set.contains(&summary) {
        set.push(summary);
    }
}

fn union(mut a: Vec<PathSummary>, b: Vec<PathSummary>) -> Vec<PathSummary> {
    for s in b {
        dedup_push(&mut a, s);
    }
    a
}

fn append_terminator(tail: &PathTail, is_bare_return: bool) -> Vec<PathSummary> {
    match tail {
        PathTail::AtEnd => vec![PathSummary {
            has_return_or_exit: true,
            last_is_return_or_exit: true,
            return_exit_count: Count::One,
            has_bare_return: is_bare_return,
        }],
        PathTail::Known(rest) => rest
            .iter()
            .map(|s| PathSummary {
                has_return_or_exit: true,
                last_is_return_or_exit: s.last_is_return_or_exit,
                return_exit_count: Count::One.add(s.return_exit_count),
                has_bare_return: is_bare_return || s.has_bare_return,
            })
            .collect(),
    }
}

fn tail_as_set(tail: &PathTail) -> Vec<PathSummary> {
    match tail {
        PathTail::AtEnd => vec![EMPTY_SUMMARY],
        PathTail::Known(rest) => rest.clone(),
    }
}

fn paths_of_seq(stmts: &[Statement], tail: &PathTail) -> Vec<PathSummary> {
    let Some((last, init)) = stmts.split_last() else {
        return tail_as_set(tail);
    };
    let extended = paths_of(last, tail);
    paths_of_seq(init, &PathTail::Known(extended))
}

fn paths_of(stmt: &Statement, tail: &PathTail) -> Vec<PathSummary> {
    match stmt.unwrap_id().0 {
        Statement::Block(inner) => paths_of_seq(inner, tail),
        Statement::Cond(_, then_branch, else_branch) => {
            union(paths_of(then_branch, tail), paths_of(else_branch, tail))
        }
        Statement::Loop(_, body) => union(paths_of(body, tail), tail_as_set(tail)),
        Statement::Ctrl(CtrlOp::Return(_)) => append_terminator(tail, true),
        Statement::Builtin(crate::ast::BuiltinOp::Exit, _) => append_terminator(tail, false),
        _ => tail_as_set(tail),
    }
}

/// Location blamed for a control-flow failure: the position of the last
/// statement in the body -- so a trailing `if` that doesn't cover all
/// paths is blamed at the `if`'s own line.
fn trailing_location(stmts: &[Statement], locations: &LocationData) -> Location {
    stmts
        .last()
        .and_then(|s| s.unwrap_id().1)
        .and_then(|id| locations.get(id))
        .unwrap_or(Location::new(1, 1))
}

fn body_stmts(body: &Statement) -> &[Statement] {
    match body.unwrap_id().0 {
        Statement::Block(stmts) => stmts,
        other => std::slice::from_ref(other),
    }
}

pub fn check_code_paths_return(body: &Statement, locations: &LocationData) -> Result<(), CheckerError> {
    let stmts = body_stmts(body);
    let summaries = paths_of_seq(stmts, &PathTail::AtEnd);
    if summaries.iter().any(|s| !s.has_return_or_exit) {
        return Err(CheckerError::semantic_at(
            trailing_location(stmts, locations),
            "not all code paths return a value",
        ));
    }
    Ok(())
}

pub fn check_unreachable_code(body: &Statement, locations: &LocationData) -> Result<(), CheckerError> {
    let stmts = body_stmts(body);
    let summaries = paths_of_seq(stmts, &PathTail::AtEnd);
    let all_trail_non_return = summaries.iter().all(|s| !s.last_is_return_or_exit);
    let all_have_extra_returns = summaries.iter().all(|s| s.return_exit_count == Count::Many);
    if all_trail_non_return || all_have_extra_returns {
        return Err(CheckerError::semantic_at(
            trailing_location(stmts, locations),
            "unreachable code after return statement",
        ));
    }
    Ok(())
}

pub fn check_main_does_not_return(body: &Statement, locations: &LocationData) -> Result<(), CheckerError> {
    let stmts = body_stmts(body);
    let summaries = paths_of_seq(stmts, &PathTail::AtEnd);
    if summaries.iter().any(|s| s.has_bare_return) {
        return Err(CheckerError::semantic_at(
            trailing_location(stmts, locations),
            "cannot return a value from the global scope",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BuiltinOp, Expr, Literal};

    fn id_stmt(locations: &mut LocationData, inner: Statement) -> Statement {
        let id = locations.next_id();
        locations.save(id, Location::new(1, 1));
        Statement::identified(inner, id)
    }

    #[test]
    fn single_return_covers_all_paths() {
        let mut locations = LocationData::new();
        let body = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(0)))),
        )]);
        assert!(check_code_paths_return(&body, &locations).is_ok());
    }

    #[test]
    fn conditional_missing_else_return_is_incomplete() {
        let mut locations = LocationData::new();
        let then_branch = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(1)))),
        )]);
        let else_branch = Statement::Block(vec![id_stmt(&mut locations, Statement::Noop)]);
        let cond = id_stmt(
            &mut locations,
            Statement::Cond(Expr::Lit(Literal::Bool(true)), Box::new(then_branch), Box::new(else_branch)),
        );
        let body = Statement::Block(vec![cond]);
        assert!(check_code_paths_return(&body, &locations).is_err());
    }

    #[test]
    fn two_branches_each_returning_is_not_unreachable() {
        let mut locations = LocationData::new();
        let then_branch = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(1)))),
        )]);
        let else_branch = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(2)))),
        )]);
        let cond = id_stmt(
            &mut locations,
            Statement::Cond(Expr::Lit(Literal::Bool(true)), Box::new(then_branch), Box::new(else_branch)),
        );
        let body = Statement::Block(vec![cond]);
        assert!(check_unreachable_code(&body, &locations).is_ok());
    }

    #[test]
    fn statement_after_return_is_unreachable() {
        let mut locations = LocationData::new();
        let body = Statement::Block(vec![
            id_stmt(&mut locations, Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(0))))),
            id_stmt(&mut locations, Statement::Noop),
        ]);
        assert!(check_unreachable_code(&body, &locations).is_err());
    }

    #[test]
    fn main_using_exit_is_fine_but_return_is_not() {
        let mut locations = LocationData::new();
        let exit_body = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Builtin(BuiltinOp::Exit, Expr::Lit(Literal::Int(0))),
        )]);
        assert!(check_main_does_not_return(&exit_body, &locations).is_ok());

        let return_body = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(0)))),
        )]);
        assert!(check_main_does_not_return(&return_body, &locations).is_err());
    }

    #[test]
    fn loop_may_execute_zero_times() {
        let mut locations = LocationData::new();
        let loop_body = Statement::Block(vec![id_stmt(
            &mut locations,
            Statement::Ctrl(CtrlOp::Return(Expr::Lit(Literal::Int(0)))),
        )]);
        let loop_stmt = id_stmt(
            &mut locations,
            Statement::Loop(Expr::Lit(Literal::Bool(true)), Box::new(loop_body)),
        );
        let body = Statement::Block(vec![loop_stmt]);
        // a loop can be skipped entirely, so it never covers all paths on its own
        assert!(check_code_paths_return(&body, &locations).is_err());
    }
}
