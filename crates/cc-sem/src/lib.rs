//! Semantic analysis: identifier resolution, context-directed type
//! checking, definite assignment, and definite return.

mod checker;
mod context;
mod flow;
mod resolve;
mod table;

use cc_par::ast::Program;
use cc_util::{Handler, Interner};

pub use context::Context;
pub use table::{FunctionSig, FunctionTable};

/// Checks an entire program, fail-fast: the first function with a semantic
/// error aborts the whole run.
pub fn check_program(program: &Program, interner: &Interner, handler: &mut Handler) -> Result<(), ()> {
    let table = FunctionTable::build(program);
    for function in &program.functions {
        checker::check_function(function, &table, interner, handler)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_par::Parser;

    fn check(source: &str) -> bool {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let program = {
            let mut parser = Parser::new(source, &mut interner, &mut handler);
            parser.parse_program()
        };
        match program {
            Ok(program) => check_program(&program, &interner, &mut handler).is_ok(),
            Err(()) => false,
        }
    }

    #[test]
    fn simple_main_passes() {
        assert!(check("int main(void) { return 0; }"));
    }

    #[test]
    fn uninitialized_use_fails() {
        assert!(!check("int main(void) { int x; return x; }"));
    }

    #[test]
    fn assignment_before_use_passes() {
        assert!(check("int main(void) { int x; x = 1; return x; }"));
    }

    #[test]
    fn both_if_branches_initializing_passes() {
        assert!(check(
            "int main(void) { int c; int x; c = 1; if (c) { x = 1; } else { x = 2; } return x; }"
        ));
    }

    #[test]
    fn while_body_initialization_does_not_promote_out() {
        assert!(!check("int main(void) { int c; int x; c = 0; while (c) { x = 1; } return x; }"));
    }

    #[test]
    fn trailing_unreachable_return_is_accepted() {
        assert!(check("int main(void) { return 1; return 2; }"));
    }

    #[test]
    fn missing_definite_return_fails() {
        assert!(!check("int f(void) { int x; x = 1; } int main(void) { return f(); }"));
    }

    #[test]
    fn both_branches_returning_satisfies_definite_return() {
        assert!(check("int f(void) { if (1 == 1) return 1; else return 0; }"));
    }

    #[test]
    fn if_without_else_never_satisfies_definite_return() {
        assert!(!check("int f(void) { if (1 == 1) return 1; }"));
    }

    #[test]
    fn double_literal_in_int_context_fails() {
        assert!(!check("int main(void) { int x = 1.0; return x; }"));
    }

    #[test]
    fn int_literal_widens_into_double_context() {
        assert!(check("int main(void) { double x = 1; return 0; }"));
    }

    #[test]
    fn not_operator_in_int_context_fails() {
        assert!(!check("int main(void) { int x = !1; return x; }"));
    }

    #[test]
    fn integer_literal_bounds() {
        assert!(check("int main(void) { int x = 2147483647; return x; }"));
        assert!(!check("int main(void) { int x = 2147483648; return x; }"));
        assert!(check("int main(void) { int x = -2147483648; return x; }"));
        assert!(!check("int main(void) { int x = -2147483649; return x; }"));
        assert!(check("int main(void) { int x = 002147483647; return x; }"));
    }

    #[test]
    fn undefined_identifier_is_rejected() {
        assert!(!check("int main(void) { return y; }"));
    }

    #[test]
    fn call_argument_count_mismatch_is_rejected() {
        assert!(!check("int f(int a) { return a; } int main(void) { return f(1, 2); }"));
    }

    #[test]
    fn call_with_void_params_matches_empty_args() {
        assert!(check("int f(void) { return 1; } int main(void) { return f(); }"));
    }

    #[test]
    fn decl_initializer_cannot_self_reference() {
        assert!(!check("int main(void) { int x = x + 1; return x; }"));
    }

    #[test]
    fn decl_initializer_can_reference_a_later_decl() {
        assert!(check("int main(void) { int x = y; int y; y = 1; return x; }"));
    }

    #[test]
    fn void_initializer_with_undefined_name_is_still_rejected() {
        assert!(!check("int main(void) { void x = totally_undefined_name; return 0; }"));
    }

    #[test]
    fn void_assignment_with_undefined_name_is_still_rejected() {
        assert!(!check("int main(void) { void x; x = totally_undefined_name; return 0; }"));
    }

    #[test]
    fn pointer_return_with_undefined_name_is_still_rejected() {
        assert!(!check("int* f(void) { return totally_undefined_name; }"));
    }

    #[test]
    fn void_context_still_rejects_a_well_formed_expression() {
        // A target type outside int/double/string is never satisfiable,
        // even when the expression itself resolves cleanly.
        assert!(!check("int main(void) { void x = 1; return 0; }"));
    }

    #[test]
    fn assigning_into_a_function_name_checks_against_its_return_type() {
        assert!(check("int f(void) { return 1; } int main(void) { f = 2; return 0; }"));
        assert!(!check("int f(void) { return 1; } int main(void) { f = 2.5; return 0; }"));
    }
}
