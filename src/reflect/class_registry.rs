//! Registry of declared classes and interfaces.
//!
//! Each ClassDef records the class's type parameters and its *generic*
//! supertypes, i.e. `AbstractList<E>` rather than the erased `AbstractList`,
//! expressed in terms of the declaring class's own type variables.

use rustc_hash::FxHashMap;

use crate::identity::{ClassId, Symbol};
use crate::reflect::type_arena::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    pub fn name(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// A class or interface declaration
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub id: ClassId,
    pub name: Symbol,
    pub kind: ClassKind,
    /// Declared type parameter names, in order (e.g. K, V in Map<K, V>)
    pub type_params: Vec<Symbol>,
    /// Generic superclass; None for Object and for interfaces
    pub superclass: Option<TypeId>,
    /// Directly implemented (or, for interfaces, extended) generic interfaces
    pub interfaces: Vec<TypeId>,
}

impl ClassDef {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

/// Declared classes, indexed by ClassId
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    class_defs: Vec<ClassDef>,
    class_by_name: FxHashMap<Symbol, ClassId>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new class definition. The caller checks for name clashes.
    pub fn register(
        &mut self,
        name: Symbol,
        kind: ClassKind,
        type_params: Vec<Symbol>,
        superclass: Option<TypeId>,
    ) -> ClassId {
        let id = ClassId::new(self.class_defs.len() as u32);
        self.class_defs.push(ClassDef {
            id,
            name,
            kind,
            type_params,
            superclass,
            interfaces: Vec::new(),
        });
        self.class_by_name.insert(name, id);
        id
    }

    /// Get a class definition by ID
    pub fn get(&self, id: ClassId) -> &ClassDef {
        &self.class_defs[id.index() as usize]
    }

    pub fn try_get(&self, id: ClassId) -> Option<&ClassDef> {
        self.class_defs.get(id.index() as usize)
    }

    pub(crate) fn get_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.class_defs[id.index() as usize]
    }

    /// Look up a class by its declared name
    pub fn by_name(&self, name: Symbol) -> Option<ClassId> {
        self.class_by_name.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.class_defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_defs.is_empty()
    }
}
