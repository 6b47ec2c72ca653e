//! Shared plumbing used by every compiler-phase crate: interned strings,
//! source spans, diagnostics, and typed-index vectors.

mod def_id;
mod diagnostic;
mod index_vec;
mod span;
mod symbol;

pub use def_id::DefId;
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::{Interner, Symbol};
