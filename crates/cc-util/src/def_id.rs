//! Identifier for a declared function.
//!
//! The checker builds one global function table per compilation; `DefId` is
//! its index type. Generation is a plain counter rather than an atomic one —
//! the front end is strictly single-threaded, so there is never a second
//! thread around to race with.

use crate::Idx;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefId(pub u32);

impl Idx for DefId {
    fn from_usize(idx: usize) -> Self {
        assert!(idx <= u32::MAX as usize, "function table index space exhausted");
        DefId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}
