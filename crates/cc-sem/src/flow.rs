//! Definite-assignment and definite-return analysis.
//!
//! Both walk the already-parsed, already-type-checked statement list; they
//! never re-examine types, only control flow.

use cc_par::ast::{Expr, Stmt};
use cc_util::{DiagnosticBuilder, Handler, Symbol};

/// Does `expr` reference `target` anywhere within it (including as a call
/// argument)?
pub fn uses_symbol(expr: &Expr, target: Symbol) -> bool {
    match expr {
        Expr::IntLiteral { .. } | Expr::DoubleLiteral { .. } | Expr::StringLiteral { .. } => false,
        Expr::Ident { name, call, .. } => {
            *name == target || call.as_ref().is_some_and(|c| c.args.iter().any(|a| uses_symbol(a, target)))
        }
        Expr::Binary { left, right, .. } => uses_symbol(left, target) || uses_symbol(right, target),
        Expr::Unary { operand, .. } => uses_symbol(operand, target),
        Expr::Paren { inner, .. } => uses_symbol(inner, target),
    }
}

/// Walks `stmts` (a sibling-level sequence) checking that `target` is never
/// used before it is assigned, given that it enters the sequence in
/// `initialized` state. Returns the state `target` is in after the
/// sequence, for propagation to whatever sequence this one is nested in.
pub fn check_definite_assignment(
    target: Symbol,
    stmts: &[Stmt],
    mut initialized: bool,
    handler: &mut Handler,
) -> Result<bool, ()> {
    for stmt in stmts {
        match stmt {
            Stmt::Decl(d) => {
                if let Some(init) = &d.init {
                    check_use(target, init, initialized, handler)?;
                }
            }
            Stmt::Assign(a) => {
                check_use(target, &a.value, initialized, handler)?;
                if a.name == target && !uses_symbol(&a.value, target) {
                    initialized = true;
                }
            }
            Stmt::If(i) => {
                check_use(target, &i.cond, initialized, handler)?;
                let then_init = check_definite_assignment(target, std::slice::from_ref(&*i.then_branch), initialized, handler)?;
                let else_init = match &i.else_branch {
                    Some(e) => check_definite_assignment(target, std::slice::from_ref(&**e), initialized, handler)?,
                    None => initialized,
                };
                initialized = then_init && else_init;
            }
            Stmt::While(w) => {
                check_use(target, &w.cond, initialized, handler)?;
                // The loop body's initializations are not promoted out —
                // we still walk it (for use-before-init errors inside the
                // loop) but discard its resulting state.
                check_definite_assignment(target, std::slice::from_ref(&*w.body), initialized, handler)?;
            }
            Stmt::Block(inner) => {
                initialized = check_definite_assignment(target, inner, initialized, handler)?;
            }
            Stmt::Return(r) => {
                if let Some(value) = &r.value {
                    check_use(target, value, initialized, handler)?;
                }
                return Ok(initialized);
            }
            Stmt::Expr(e) => {
                check_use(target, e, initialized, handler)?;
            }
        }
    }
    Ok(initialized)
}

fn check_use(target: Symbol, expr: &Expr, initialized: bool, handler: &mut Handler) -> Result<(), ()> {
    if !initialized && uses_symbol(expr, target) {
        DiagnosticBuilder::error("use of a variable that may not be initialized yet")
            .span(expr.span())
            .emit(handler);
        return Err(());
    }
    Ok(())
}

/// Whether `expr` references `target` as anything other than an immediate
/// self-assignment — used to reject a declaration's initializer
/// referencing the name it's declaring.
pub fn references_self(init: &Expr, target: Symbol) -> bool {
    uses_symbol(init, target)
}

pub fn definitely_returns(stmts: &[Stmt]) -> bool {
    stmts.iter().any(stmt_definitely_returns)
}

fn stmt_definitely_returns(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::Block(inner) => definitely_returns(inner),
        Stmt::If(i) => match &i.else_branch {
            Some(e) => stmt_definitely_returns(&i.then_branch) && stmt_definitely_returns(e),
            None => false,
        },
        Stmt::While(_) => false,
        Stmt::Decl(_) | Stmt::Assign(_) | Stmt::Expr(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Direct AST-construction tests here would be more noise than signal;
    // end-to-end coverage lives in cc-sem's lib.rs tests and cc-drv's
    // integration tests, which exercise this module through the parser.
    #[test]
    fn definitely_returns_is_false_for_empty_body() {
        assert!(!definitely_returns(&[]));
    }
}
