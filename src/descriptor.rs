// src/descriptor.rs
//
// TypeDescriptor: an immutable, hashable value naming a possibly generic type.
//
// Descriptors are built through a reflection backend, which canonicalizes the
// type first, so two descriptors for the same type are always equal and hash
// alike. They carry handles into that backend and are only comparable with
// descriptors from the same universe.

mod reify;

pub use reify::Reflect;

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::assignability::AssignabilityResolver;
use crate::errors::{ReflectError, Result};
use crate::identity::ClassId;
use crate::reflect::{ReflectType, TypeExpr, TypeId, TypeReflection};

#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    canonical: TypeId,
    raw: TypeId,
    hash: u64,
}

impl TypeDescriptor {
    /// Descriptor for a class used without type arguments.
    pub fn of_class<R: TypeReflection + ?Sized>(reflect: &mut R, class: ClassId) -> Result<Self> {
        Self::of_type(reflect, TypeExpr::Class(class))
    }

    /// General constructor: canonicalizes `ty`, then derives the raw type.
    pub fn of_type<R: TypeReflection + ?Sized>(reflect: &mut R, ty: impl Into<TypeExpr>) -> Result<Self> {
        let canonical = reflect.canonicalize(&ty.into())?;
        Self::from_canonical(reflect, canonical)
    }

    /// `raw<args...>` with no enclosing owner.
    pub fn of_parameterized<R, A>(
        reflect: &mut R,
        raw: impl Into<TypeExpr>,
        args: impl IntoIterator<Item = A>,
    ) -> Result<Self>
    where
        R: TypeReflection + ?Sized,
        A: Into<TypeExpr>,
    {
        let expr = TypeExpr::generic(raw, args.into_iter().map(Into::into));
        Self::of_type(reflect, expr)
    }

    /// Array of `component`.
    pub fn of_array<R: TypeReflection + ?Sized>(
        reflect: &mut R,
        component: impl Into<TypeExpr>,
    ) -> Result<Self> {
        Self::of_type(reflect, TypeExpr::array_of(component))
    }

    /// Capture an explicitly spelled parameterized type.
    ///
    /// Fails with `MissingTypeParameter` when the capture is not parameterized,
    /// e.g. a bare `String` or raw `List`.
    pub fn capture<R: TypeReflection + ?Sized>(reflect: &mut R, ty: &TypeExpr) -> Result<Self> {
        let canonical = reflect.canonicalize(ty)?;
        if !matches!(reflect.get(canonical), ReflectType::Parameterized(_)) {
            return Err(ReflectError::MissingTypeParameter {
                found: reflect.describe(canonical),
            });
        }
        Self::from_canonical(reflect, canonical)
    }

    /// Capture the parameterized Rust type `T`, e.g. `Vec<String>`.
    pub fn reify<T: Reflect + ?Sized>(reflect: &mut (impl TypeReflection + ?Sized)) -> Result<Self> {
        Self::capture(reflect, &T::type_expr())
    }

    fn from_canonical<R: TypeReflection + ?Sized>(reflect: &mut R, canonical: TypeId) -> Result<Self> {
        let raw = reflect.raw_type_of(canonical)?;
        Ok(Self {
            canonical,
            raw,
            hash: reflect.structural_hash(canonical),
        })
    }

    /// The erased type (`List` for `List<String>`)
    pub fn raw_type(&self) -> TypeId {
        self.raw
    }

    pub fn canonical_type(&self) -> TypeId {
        self.canonical
    }

    /// Whether a value of type `from` can be used where `self` is expected.
    pub fn is_assignable_from<R: TypeReflection + ?Sized>(
        &self,
        from: &TypeDescriptor,
        reflect: &R,
    ) -> Result<bool> {
        AssignabilityResolver::new(reflect).is_assignable_from(from.canonical, self.canonical)
    }

    /// Human-readable rendering through `reflect`.
    pub fn display<'r, R: TypeReflection + ?Sized>(&self, reflect: &'r R) -> DescriptorDisplay<'r, R> {
        DescriptorDisplay {
            ty: self.canonical,
            reflect,
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        // Canonical handles from one universe are equal iff the types are.
        self.canonical == other.canonical
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl From<TypeDescriptor> for TypeExpr {
    fn from(descriptor: TypeDescriptor) -> Self {
        TypeExpr::Id(descriptor.canonical)
    }
}

impl From<&TypeDescriptor> for TypeExpr {
    fn from(descriptor: &TypeDescriptor) -> Self {
        TypeExpr::Id(descriptor.canonical)
    }
}

pub struct DescriptorDisplay<'r, R: TypeReflection + ?Sized> {
    ty: TypeId,
    reflect: &'r R,
}

impl<R: TypeReflection + ?Sized> fmt::Display for DescriptorDisplay<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reflect.describe(self.ty))
    }
}
