// src/reflect/type_expr.rs
//
// Un-normalized type expressions, the input side of canonicalization.
//
// A TypeExpr is what a caller hands to the reflection layer: it may name
// classes by string, spell out raw generic use as an empty argument list, or
// embed already-canonical TypeIds. `TypeUniverse::canonicalize` turns it into
// an interned TypeId.

use crate::identity::ClassId;
use crate::reflect::type_arena::TypeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// An already interned type (canonicalizes to itself)
    Id(TypeId),
    Class(ClassId),
    /// A class looked up by its declared name
    Named(String),
    Parameterized {
        owner: Option<Box<TypeExpr>>,
        raw: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Array(Box<TypeExpr>),
    /// A type variable by name
    Var(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        TypeExpr::Var(name.into())
    }

    /// `raw<args...>` with no owner
    pub fn generic(raw: impl Into<TypeExpr>, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Parameterized {
            owner: None,
            raw: Box::new(raw.into()),
            args: args.into_iter().collect(),
        }
    }

    /// `owner.raw<args...>` for member classes
    pub fn member(
        owner: impl Into<TypeExpr>,
        raw: impl Into<TypeExpr>,
        args: impl IntoIterator<Item = TypeExpr>,
    ) -> Self {
        TypeExpr::Parameterized {
            owner: Some(Box::new(owner.into())),
            raw: Box::new(raw.into()),
            args: args.into_iter().collect(),
        }
    }

    pub fn array_of(component: impl Into<TypeExpr>) -> Self {
        TypeExpr::Array(Box::new(component.into()))
    }
}

impl From<TypeId> for TypeExpr {
    fn from(id: TypeId) -> Self {
        TypeExpr::Id(id)
    }
}

impl From<ClassId> for TypeExpr {
    fn from(class: ClassId) -> Self {
        TypeExpr::Class(class)
    }
}

impl From<&str> for TypeExpr {
    fn from(name: &str) -> Self {
        TypeExpr::Named(name.to_string())
    }
}
