//! Context-directed expression type checking.
//!
//! Each of the four contexts corresponds to one "kind of slot" an
//! expression can be asked to fill (a declaration's initializer, an
//! assignment's right-hand side, a call argument, an `if`/`while`
//! condition). The checker never infers a type for an expression in
//! isolation — it only ever asks "does this expression fit here".

use std::cmp::Ordering;

use cc_par::ast::{BinOp, CallSuffix, Expr, UnOp};
use cc_util::{DiagnosticBuilder, Handler, Interner};

use crate::resolve::{LocalScope, Resolution};
use crate::table::FunctionTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Context {
    Int,
    Double,
    Bool,
    String,
}

pub struct Checker<'t> {
    pub scope: &'t LocalScope,
    pub table: &'t FunctionTable,
    pub interner: &'t Interner,
    pub handler: &'t mut Handler,
}

type CResult<T> = Result<T, ()>;

impl<'t> Checker<'t> {
    pub fn check(&mut self, expr: &Expr, ctx: Context) -> CResult<()> {
        self.check_inner(expr, ctx, false)
    }

    /// `negated` tracks the parity of the unary `-` chain directly
    /// enclosing the position being checked, for the integer-literal range
    /// check; it resets at every binary operator boundary, since the chain
    /// is specifically "syntactically prefixed" onto one atom.
    fn check_inner(&mut self, expr: &Expr, ctx: Context, negated: bool) -> CResult<()> {
        match ctx {
            Context::Int => self.check_int(expr, negated),
            Context::Double => self.check_double(expr, negated),
            Context::Bool => self.check_bool(expr),
            Context::String => self.check_string(expr),
        }
    }

    fn check_int(&mut self, expr: &Expr, negated: bool) -> CResult<()> {
        match expr {
            Expr::IntLiteral { digits, span } => {
                if fits_i32_range(digits, negated) {
                    Ok(())
                } else {
                    self.error(*span, format!("integer literal '{digits}' is out of range"))
                }
            }
            Expr::Ident { name, span, call } => self.check_int_or_double_ident(*name, *span, call, true),
            Expr::Paren { inner, .. } => self.check_int(inner, negated),
            Expr::Unary { op: UnOp::Plus, operand, .. } => self.check_int(operand, negated),
            Expr::Unary { op: UnOp::Minus, operand, .. } => self.check_int(operand, !negated),
            Expr::Binary { op, left, right, .. } if is_arithmetic(*op) => {
                self.check_int(left, false)?;
                self.check_int(right, false)
            }
            other => self.error(other.span(), "expected an int expression".to_string()),
        }
    }

    fn check_double(&mut self, expr: &Expr, negated: bool) -> CResult<()> {
        match expr {
            Expr::IntLiteral { .. } => Ok(()),
            Expr::DoubleLiteral { .. } => Ok(()),
            Expr::Ident { name, span, call } => self.check_int_or_double_ident(*name, *span, call, false),
            Expr::Paren { inner, .. } => self.check_double(inner, negated),
            Expr::Unary { op: UnOp::Plus, operand, .. } => self.check_double(operand, negated),
            Expr::Unary { op: UnOp::Minus, operand, .. } => self.check_double(operand, !negated),
            Expr::Binary { op, left, right, .. } if is_arithmetic(*op) => {
                self.check_double(left, false)?;
                self.check_double(right, false)
            }
            other => self.error(other.span(), "expected a double expression".to_string()),
        }
    }

    fn check_bool(&mut self, expr: &Expr) -> CResult<()> {
        match expr {
            Expr::Unary { op: UnOp::Not, operand, .. } => self.check_bool(operand),
            Expr::Paren { inner, .. } => self.check_bool(inner),
            Expr::Binary { op: BinOp::And, left, right, .. } | Expr::Binary { op: BinOp::Or, left, right, .. } => {
                self.check_bool(left)?;
                self.check_bool(right)
            }
            Expr::Binary { op, left, right, .. } if is_relational(*op) => {
                self.check_double(left, false)?;
                self.check_double(right, false)
            }
            Expr::Ident { name, span, call } => {
                if let Some(call) = call {
                    self.check_call(*name, *span, call)?;
                }
                self.resolve_exists(*name, *span)
            }
            other => self.error(other.span(), "expected a bool expression".to_string()),
        }
    }

    fn check_string(&mut self, expr: &Expr) -> CResult<()> {
        match expr {
            Expr::StringLiteral { .. } => Ok(()),
            Expr::Ident { name, span, call: None } => match self.scope.resolve(*name, self.table) {
                Some(Resolution::Local(ty)) if ty.is_string() => Ok(()),
                Some(_) => self.error(*span, format!("'{}' is not a string", self.text(*name))),
                None => self.undefined(*name, *span),
            },
            other => self.error(other.span(), "expected a string expression".to_string()),
        }
    }

    fn check_int_or_double_ident(
        &mut self,
        name: cc_util::Symbol,
        span: cc_util::Span,
        call: &Option<CallSuffix>,
        want_int: bool,
    ) -> CResult<()> {
        if call.is_some() {
            return self.error(span, "a function call cannot be used as a numeric value here".to_string());
        }
        match self.scope.resolve(name, self.table) {
            Some(Resolution::Local(ty)) if want_int && ty.is_int() => Ok(()),
            Some(Resolution::Local(ty)) if !want_int && ty.is_double() => Ok(()),
            Some(_) => {
                let kind = if want_int { "an int" } else { "a double" };
                self.error(span, format!("'{}' is not {kind}", self.text(name)))
            }
            None => self.undefined(name, span),
        }
    }

    fn resolve_exists(&mut self, name: cc_util::Symbol, span: cc_util::Span) -> CResult<()> {
        match self.scope.resolve(name, self.table) {
            Some(_) => Ok(()),
            None => self.undefined(name, span),
        }
    }

    /// Validates a call's arguments against the callee's parameters. Does
    /// not check the call's result against any context — callers decide
    /// whether a call is even allowed in their position.
    pub fn check_call(&mut self, name: cc_util::Symbol, span: cc_util::Span, call: &CallSuffix) -> CResult<()> {
        let sig = match self.scope.resolve(name, self.table) {
            Some(Resolution::Function(sig)) => sig.clone(),
            Some(Resolution::Local(_)) => {
                return self.error(span, format!("'{}' is not a function", self.text(name)));
            }
            None => return self.undefined(name, span),
        };

        if sig.params.is_empty() {
            if !call.args.is_empty() {
                return self.error(call.span, "too many arguments to function call".to_string());
            }
            return Ok(());
        }

        if call.args.len() != sig.params.len() {
            return self.error(
                call.span,
                format!("expected {} argument(s), found {}", sig.params.len(), call.args.len()),
            );
        }

        for (arg, param_ty) in call.args.iter().zip(sig.params.iter()) {
            let ctx = if param_ty.is_int() {
                Context::Int
            } else if param_ty.is_double() {
                Context::Double
            } else if param_ty.is_string() {
                Context::String
            } else {
                self.check_no_type(arg)?;
                continue;
            };
            self.check(arg, ctx)?;
        }
        Ok(())
    }

    /// Checks an expression against a target type this front end does not
    /// model (`void`, or any pointer depth deeper than the supported
    /// `char*` form). The original's `check_expr` falls through to
    /// `report_error(expr->token, "expression is no type at all")` in this
    /// situation rather than skipping the expression outright, so this
    /// still walks it for identifier/call validity before rejecting it.
    pub fn check_no_type(&mut self, expr: &Expr) -> CResult<()> {
        self.resolve_any(expr)?;
        self.error(expr.span(), "expression is no type at all".to_string())
    }

    /// Walks an expression purely for identifier existence and call-arity
    /// validity, without asking it to fit any particular type.
    fn resolve_any(&mut self, expr: &Expr) -> CResult<()> {
        match expr {
            Expr::IntLiteral { .. } | Expr::DoubleLiteral { .. } | Expr::StringLiteral { .. } => Ok(()),
            Expr::Ident { name, span, call } => {
                if let Some(call) = call {
                    self.check_call(*name, *span, call)?;
                }
                self.resolve_exists(*name, *span)
            }
            Expr::Paren { inner, .. } => self.resolve_any(inner),
            Expr::Unary { operand, .. } => self.resolve_any(operand),
            Expr::Binary { left, right, .. } => {
                self.resolve_any(left)?;
                self.resolve_any(right)
            }
        }
    }

    fn undefined(&mut self, name: cc_util::Symbol, span: cc_util::Span) -> CResult<()> {
        self.error(span, format!("identifier '{}' is not defined", self.text(name)))
    }

    fn text(&self, name: cc_util::Symbol) -> &str {
        self.interner.resolve(name)
    }

    fn error(&mut self, span: cc_util::Span, message: String) -> CResult<()> {
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
        Err(())
    }
}

fn is_arithmetic(op: BinOp) -> bool {
    matches!(op, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod)
}

fn is_relational(op: BinOp) -> bool {
    matches!(op, BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge)
}

/// Strips leading zeros, then compares by length and lexicographically
/// against the i32 bound for the literal's sign.
fn fits_i32_range(digits: &str, negative: bool) -> bool {
    let stripped = digits.trim_start_matches('0');
    let stripped = if stripped.is_empty() { "0" } else { stripped };
    let bound = if negative { "2147483648" } else { "2147483647" };
    match stripped.len().cmp(&bound.len()) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => stripped <= bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_positive_fits() {
        assert!(fits_i32_range("2147483647", false));
    }

    #[test]
    fn one_past_max_positive_does_not_fit() {
        assert!(!fits_i32_range("2147483648", false));
    }

    #[test]
    fn min_negative_fits_when_negated() {
        assert!(fits_i32_range("2147483648", true));
    }

    #[test]
    fn one_past_min_negative_does_not_fit() {
        assert!(!fits_i32_range("2147483649", true));
    }

    #[test]
    fn leading_zeros_are_stripped_before_comparing() {
        assert!(fits_i32_range("002147483647", false));
    }
}
