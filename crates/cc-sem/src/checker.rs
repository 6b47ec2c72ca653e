//! Per-function semantic checking: resolves identifiers, type-checks every
//! expression against the context it appears in, and enforces the two flow
//! invariants (definite assignment, definite return).

use cc_par::ast::{Function, Stmt};
use cc_util::{DiagnosticBuilder, Handler, Interner};

use crate::context::{Context, Checker as ExprChecker};
use crate::flow::{check_definite_assignment, definitely_returns, references_self};
use crate::resolve::{LocalScope, Resolution};
use crate::table::FunctionTable;

type SResult<T> = Result<T, ()>;

pub fn check_function(
    function: &Function,
    table: &FunctionTable,
    interner: &Interner,
    handler: &mut Handler,
) -> SResult<()> {
    let scope = LocalScope::build(function);

    for stmt in &function.body {
        if let Stmt::Decl(d) = stmt {
            if let Some(init) = &d.init {
                if references_self(init, d.name) {
                    DiagnosticBuilder::error(format!(
                        "'{}' cannot reference itself in its own initializer",
                        interner.resolve(d.name)
                    ))
                    .span(init.span())
                    .emit(handler);
                    return Err(());
                }
                let mut checker = ExprChecker { scope: &scope, table, interner, handler: &mut *handler };
                match type_context(d.ty) {
                    Some(ctx) => checker.check(init, ctx)?,
                    None => checker.check_no_type(init)?,
                }
            }
        }
    }

    check_stmts(&function.body, function, &scope, table, interner, handler)?;

    for (index, stmt) in function.body.iter().enumerate() {
        if let Stmt::Decl(d) = stmt {
            if d.init.is_none() {
                check_definite_assignment(d.name, &function.body[index + 1..], false, handler)?;
            }
        }
    }

    if !function.return_type.is_void() && !definitely_returns(&function.body) {
        DiagnosticBuilder::error(format!(
            "function '{}' does not definitely return on every path",
            interner.resolve(function.name)
        ))
        .span(function.name_span)
        .emit(handler);
        return Err(());
    }

    Ok(())
}

fn check_stmts(
    stmts: &[Stmt],
    function: &Function,
    scope: &LocalScope,
    table: &FunctionTable,
    interner: &Interner,
    handler: &mut Handler,
) -> SResult<()> {
    for stmt in stmts {
        check_stmt(stmt, function, scope, table, interner, handler)?;
    }
    Ok(())
}

fn check_stmt(
    stmt: &Stmt,
    function: &Function,
    scope: &LocalScope,
    table: &FunctionTable,
    interner: &Interner,
    handler: &mut Handler,
) -> SResult<()> {
    match stmt {
        Stmt::Decl(_) => Ok(()), // initializers already checked in check_function
        Stmt::Assign(a) => {
            // The original resolves an assignment target the same way as
            // any other identifier use and checks the RHS against whatever
            // type comes back — a function name's "type" is its return
            // type — without distinguishing functions from variables.
            let ty = match scope.resolve(a.name, table) {
                Some(Resolution::Local(ty)) => ty,
                Some(Resolution::Function(sig)) => sig.return_type,
                None => {
                    return checker_error(handler, a.name_span, format!("identifier '{}' is not defined", interner.resolve(a.name)));
                }
            };
            let mut checker = ExprChecker { scope, table, interner, handler };
            match type_context(ty) {
                Some(ctx) => checker.check(&a.value, ctx),
                None => checker.check_no_type(&a.value),
            }
        }
        Stmt::If(i) => {
            ExprChecker { scope, table, interner, handler: &mut *handler }.check(&i.cond, Context::Bool)?;
            check_stmt(&i.then_branch, function, scope, table, interner, handler)?;
            if let Some(e) = &i.else_branch {
                check_stmt(e, function, scope, table, interner, handler)?;
            }
            Ok(())
        }
        Stmt::While(w) => {
            ExprChecker { scope, table, interner, handler: &mut *handler }.check(&w.cond, Context::Bool)?;
            check_stmt(&w.body, function, scope, table, interner, handler)
        }
        Stmt::Block(inner) => check_stmts(inner, function, scope, table, interner, handler),
        Stmt::Return(r) => check_return(r, function, scope, table, interner, handler),
        Stmt::Expr(e) => match e {
            cc_par::ast::Expr::Ident { name, span, call: Some(call) } => {
                ExprChecker { scope, table, interner, handler }.check_call(*name, *span, call)
            }
            _ => checker_error(handler, e.span(), "expression statements must be a function call".to_string()),
        },
    }
}

fn check_return(
    r: &cc_par::ast::ReturnStmt,
    function: &Function,
    scope: &LocalScope,
    table: &FunctionTable,
    interner: &Interner,
    handler: &mut Handler,
) -> SResult<()> {
    match (&r.value, function.return_type.is_void()) {
        (Some(_), true) => checker_error(handler, r.span, "a void function cannot return a value".to_string()),
        (None, false) => checker_error(handler, r.span, "a non-void function must return a value".to_string()),
        (Some(value), false) => {
            let mut checker = ExprChecker { scope, table, interner, handler };
            match type_context(function.return_type) {
                Some(ctx) => checker.check(value, ctx),
                None => checker.check_no_type(value),
            }
        }
        (None, true) => Ok(()),
    }
}

fn type_context(ty: cc_par::ast::Type) -> Option<Context> {
    if ty.is_int() {
        Some(Context::Int)
    } else if ty.is_double() {
        Some(Context::Double)
    } else if ty.is_string() {
        Some(Context::String)
    } else {
        None
    }
}

fn checker_error(handler: &mut Handler, span: cc_util::Span, message: String) -> SResult<()> {
    DiagnosticBuilder::error(message).span(span).emit(handler);
    Err(())
}
