// src/lib.rs
//! Generic type descriptors and structural assignability.
//!
//! A [`TypeDescriptor`] names a possibly generic type, such as `List<String>`,
//! in canonical form, so it can be compared, hashed and displayed. The
//! [`AssignabilityResolver`] decides whether one type satisfies a parameterized
//! target by walking its class hierarchy and tracking what each type variable
//! is bound to. Both are written against the [`TypeReflection`] trait,
//! implemented by [`TypeUniverse`].

pub mod assignability;
pub mod descriptor;
pub mod errors;
pub mod identity;
pub mod reflect;

pub use assignability::{AssignabilityResolver, Bindings};
pub use descriptor::{Reflect, TypeDescriptor};
pub use errors::ReflectError;
pub use identity::{ClassId, Symbol};
pub use reflect::{Parameterized, TypeExpr, TypeId, TypeReflection, TypeUniverse};
