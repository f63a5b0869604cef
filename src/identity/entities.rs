//! First-class identity types for declared entities.
//!
//! IDs are indices into the owning registry's storage, so a handle is only
//! meaningful inside the universe that issued it.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(u32);

        impl $name {
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

define_entity_id! {
    /// Identity for a declared class or interface (the erased, raw class)
    pub struct ClassId;
}

impl ClassId {
    /// `Object` is always the first class a universe declares.
    pub const OBJECT: ClassId = ClassId(0);
}
