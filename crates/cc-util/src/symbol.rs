//! String interning.
//!
//! Identifier and string-literal text is interned into compact [`Symbol`]
//! handles so that equality checks (redeclaration, identifier resolution)
//! are `u32` comparisons instead of string comparisons. Unlike the
//! process-wide, lock-based string tables some compilers use, the
//! [`Interner`] here is an explicit value owned by the compilation session
//! — there is no global table, since this front-end never runs more than
//! one compilation at a time (see the driver's session type).

use rustc_hash::FxHashMap;

/// A compact (4-byte) handle to an interned string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Owns the interned string storage for one compilation run.
///
/// # Examples
///
/// ```
/// use cc_util::Interner;
///
/// let mut interner = Interner::new();
/// let a = interner.intern("foo");
/// let b = interner.intern("foo");
/// let c = interner.intern("bar");
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(interner.resolve(a), "foo");
/// ```
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    map: FxHashMap<Box<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self { strings: Vec::new(), map: FxHashMap::default() }
    }

    /// Intern `text`, returning its symbol. Interning the same text twice
    /// returns the same symbol.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&index) = self.map.get(text) {
            return Symbol(index);
        }
        let index = self.strings.len() as u32;
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, index);
        Symbol(index)
    }

    /// Look up the text behind a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not produced by this same interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }
}
