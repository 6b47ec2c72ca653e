//! Identifier resolution within one function: declaration prefix, then
//! parameters, then the global function table.

use rustc_hash::FxHashMap;

use cc_par::ast::{Function, Type};
use cc_util::Symbol;

use crate::table::FunctionTable;

/// What an identifier resolved to.
pub enum Resolution<'a> {
    Local(Type),
    Function(&'a crate::table::FunctionSig),
}

/// The name→type environment for one function: its declared locals and its
/// parameters, kept separate so lookup can respect the spec's ordering
/// (locals shadow parameters) even though the parser already forbids the
/// two sets from actually colliding.
pub struct LocalScope {
    decls: FxHashMap<Symbol, Type>,
    params: FxHashMap<Symbol, Type>,
}

impl LocalScope {
    pub fn build(function: &Function) -> Self {
        let mut decls = FxHashMap::default();
        for stmt in &function.body {
            if let cc_par::ast::Stmt::Decl(d) = stmt {
                decls.insert(d.name, d.ty);
            } else {
                break;
            }
        }
        let params = function.params.iter().map(|p| (p.name, p.ty)).collect();
        Self { decls, params }
    }

    pub fn resolve<'t>(&self, name: Symbol, table: &'t FunctionTable) -> Option<Resolution<'t>> {
        if let Some(&ty) = self.decls.get(&name) {
            return Some(Resolution::Local(ty));
        }
        if let Some(&ty) = self.params.get(&name) {
            return Some(Resolution::Local(ty));
        }
        table.get(name).map(Resolution::Function)
    }
}
