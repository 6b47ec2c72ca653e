//! The global function table: every declared function's signature, keyed by
//! name, built once before any function body is checked so forward
//! references ("a function name declared earlier in the program" per
//! identifier lookup — functions may call functions defined later too,
//! since the whole table is built up front) resolve uniformly.
//!
//! Signatures live in a [`DefId`]-indexed [`IndexVec`] rather than directly
//! in the name map, the way the teacher's own scope tables separate "the
//! stable thing an identifier resolves to" from "the data behind it" — here
//! there is only one flat table (this language has no nested scopes to give
//! a `DefId` space), but keeping the indirection means a caller that has
//! already resolved a `DefId` never has to re-hash the name.

use rustc_hash::FxHashMap;

use cc_par::ast::{Program, Type};
use cc_util::{DefId, IndexVec, Symbol};

#[derive(Clone, Debug)]
pub struct FunctionSig {
    pub return_type: Type,
    pub params: Vec<Type>,
}

pub struct FunctionTable {
    signatures: IndexVec<DefId, FunctionSig>,
    by_name: FxHashMap<Symbol, DefId>,
}

impl FunctionTable {
    pub fn build(program: &Program) -> Self {
        let mut signatures = IndexVec::new();
        let mut by_name = FxHashMap::default();
        for function in &program.functions {
            let id = signatures.push(FunctionSig {
                return_type: function.return_type,
                params: function.params.iter().map(|p| p.ty).collect(),
            });
            by_name.insert(function.name, id);
        }
        Self { signatures, by_name }
    }

    pub fn get(&self, name: Symbol) -> Option<&FunctionSig> {
        self.by_name.get(&name).map(|&id| &self.signatures[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_par::Parser;
    use cc_util::{Handler, Interner};

    #[test]
    fn looks_up_a_later_declared_function_by_name() {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let mut parser =
            Parser::new("int f(void) { return 1; } int g(void) { return 2; }", &mut interner, &mut handler);
        let program = parser.parse_program().expect("parses");
        let table = FunctionTable::build(&program);
        let g = interner.intern("g");
        assert!(table.get(g).is_some());
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let mut interner = Interner::new();
        let mut handler = Handler::new();
        let mut parser = Parser::new("int f(void) { return 1; }", &mut interner, &mut handler);
        let program = parser.parse_program().expect("parses");
        let table = FunctionTable::build(&program);
        let missing = interner.intern("missing");
        assert!(table.get(missing).is_none());
    }
}
