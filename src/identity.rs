// src/identity.rs
//
// Identities shared by the reflection layer: interned type-variable names
// and handles for declared classes.

mod entities;
mod intern;

pub use entities::ClassId;
pub use intern::Interner;

/// Unique identifier for an interned name (type variables, class names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Create a Symbol from a raw index. Only the interner should use this.
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the underlying index.
    pub fn index(self) -> u32 {
        self.0
    }
}
