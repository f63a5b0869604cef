// src/reflect/type_arena.rs
//
// Interned type representations using TypeId handles for O(1) equality.
//
// - TypeId: u32 handle to an interned type (Copy, trivial Eq/Hash)
// - TypeArena: per-universe storage with automatic deduplication
// - ReflectType: the canonical representation, children referenced by TypeId
//
// Interning is what makes a representation canonical: two structurally equal
// types always receive the same TypeId.

use std::hash::{Hash, Hasher};

use hashbrown::HashMap;
use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::identity::{ClassId, Symbol};

/// Canonical type identity in the TypeArena.
///
/// Unlike `ClassId` (which identifies a declaration like `class List<E>`),
/// `TypeId` identifies a concrete use of a type (like `List<String>`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// The null type representation (must be 0, interned first by TypeArena::new()).
    pub const INVALID: TypeId = TypeId(0);

    /// Get the raw index (for debugging)
    pub fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

/// SmallVec for type arguments - inline up to 4 (covers nearly every generic class)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;

/// A generic class applied to type arguments, e.g. `Map<String, V>`.
///
/// Canonical parameterized types carry at least one argument or an owner; raw
/// use of a top-level generic class is a `ReflectType::Class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameterized {
    /// Enclosing type for member classes (`Outer<T>.Inner<U>`)
    pub owner: Option<TypeId>,
    pub raw: ClassId,
    pub args: TypeIdVec,
}

/// A type variable, scoped to the class whose supertypes mention it.
///
/// The `E` in `ArrayList`'s supertype `List<E>` has `decl` set to `ArrayList`
/// and is a different type from a free `E` written by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    /// Declaring class, or None for a free variable
    pub decl: Option<ClassId>,
    pub name: Symbol,
}

/// The canonical type representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ReflectType {
    /// The null/unusable type, only ever at `TypeId::INVALID`
    Invalid,
    /// A non-generic class, or raw use of a generic one
    Class(ClassId),
    Parameterized(Parameterized),
    /// Array with the given component type
    Array(TypeId),
    /// A type variable (the `E` in `List<E>`)
    TypeVar(TypeVariable),
}

/// Coarse classification of a type representation, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Invalid,
    Class,
    Parameterized,
    Array,
    TypeVar,
}

impl TypeShape {
    pub fn name(self) -> &'static str {
        match self {
            TypeShape::Invalid => "invalid type",
            TypeShape::Class => "class",
            TypeShape::Parameterized => "parameterized type",
            TypeShape::Array => "array type",
            TypeShape::TypeVar => "type variable",
        }
    }
}

impl std::fmt::Display for TypeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ReflectType {
    pub fn shape(&self) -> TypeShape {
        match self {
            ReflectType::Invalid => TypeShape::Invalid,
            ReflectType::Class(_) => TypeShape::Class,
            ReflectType::Parameterized(_) => TypeShape::Parameterized,
            ReflectType::Array(_) => TypeShape::Array,
            ReflectType::TypeVar(_) => TypeShape::TypeVar,
        }
    }

    pub fn as_parameterized(&self) -> Option<&Parameterized> {
        match self {
            ReflectType::Parameterized(p) => Some(p),
            _ => None,
        }
    }

    /// Name of a type variable. Bindings are keyed by name alone.
    pub fn as_type_var(&self) -> Option<Symbol> {
        match self {
            ReflectType::TypeVar(var) => Some(var.name),
            _ => None,
        }
    }
}

/// Per-universe type arena with automatic interning/deduplication.
pub struct TypeArena {
    /// Interned types, indexed by TypeId
    types: Vec<ReflectType>,
    /// Deduplication map
    intern_map: HashMap<ReflectType, TypeId>,
}

impl std::fmt::Debug for TypeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeArena")
            .field("types_count", &self.types.len())
            .finish_non_exhaustive()
    }
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create a new TypeArena with the invalid type pre-interned at index 0
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::new(),
            intern_map: HashMap::new(),
        };
        let invalid = arena.intern(ReflectType::Invalid);
        debug_assert_eq!(invalid, TypeId::INVALID);
        arena
    }

    /// Intern a type, returning existing TypeId if already interned
    fn intern(&mut self, ty: ReflectType) -> TypeId {
        let next_id = TypeId(self.types.len() as u32);
        *self.intern_map.entry(ty.clone()).or_insert_with(|| {
            self.types.push(ty);
            next_id
        })
    }

    /// Get the ReflectType for a TypeId issued by this arena
    pub fn get(&self, id: TypeId) -> &ReflectType {
        &self.types[id.0 as usize]
    }

    /// Whether `id` was issued by this arena.
    pub fn contains(&self, id: TypeId) -> bool {
        (id.0 as usize) < self.types.len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ========================================================================
    // Builders - intern on construction, invalid children propagate
    // ========================================================================

    pub fn class(&mut self, class: ClassId) -> TypeId {
        self.intern(ReflectType::Class(class))
    }

    /// Apply `raw` to `args`. An empty argument list without an owner is the
    /// raw class itself.
    pub fn parameterized(
        &mut self,
        owner: Option<TypeId>,
        raw: ClassId,
        args: impl Into<TypeIdVec>,
    ) -> TypeId {
        let args = args.into();
        if args.iter().any(|a| a.is_invalid()) || owner.is_some_and(TypeId::is_invalid) {
            return TypeId::INVALID;
        }
        if args.is_empty() && owner.is_none() {
            return self.class(raw);
        }
        self.intern(ReflectType::Parameterized(Parameterized { owner, raw, args }))
    }

    pub fn array(&mut self, component: TypeId) -> TypeId {
        if component.is_invalid() {
            return TypeId::INVALID;
        }
        self.intern(ReflectType::Array(component))
    }

    pub fn type_var(&mut self, decl: Option<ClassId>, name: Symbol) -> TypeId {
        self.intern(ReflectType::TypeVar(TypeVariable { decl, name }))
    }

    /// Structural hash of a type: computed from its shape, class identities
    /// and variable names rather than from interning order.
    pub fn structural_hash(&self, id: TypeId) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash_into(id, &mut hasher);
        hasher.finish()
    }

    fn hash_into(&self, id: TypeId, state: &mut FxHasher) {
        let ty = self.get(id);
        std::mem::discriminant(ty).hash(state);
        match ty {
            ReflectType::Invalid => {}
            ReflectType::Class(class) => class.hash(state),
            ReflectType::Parameterized(p) => {
                p.raw.hash(state);
                match p.owner {
                    Some(owner) => {
                        1u8.hash(state);
                        self.hash_into(owner, state);
                    }
                    None => 0u8.hash(state),
                }
                p.args.len().hash(state);
                for &arg in &p.args {
                    self.hash_into(arg, state);
                }
            }
            ReflectType::Array(component) => self.hash_into(*component, state),
            ReflectType::TypeVar(var) => var.hash(state),
        }
    }
}
