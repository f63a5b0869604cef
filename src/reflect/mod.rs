// src/reflect/mod.rs
//
// The reflection layer: canonical type representations, class declarations
// and the primitives the assignability resolver is written against.

pub mod class_registry;
pub mod type_arena;
pub mod type_display;
pub mod type_expr;
pub mod universe;
pub mod well_known;

pub use class_registry::{ClassDef, ClassKind, ClassRegistry};
pub use type_arena::{
    Parameterized, ReflectType, TypeArena, TypeId, TypeIdVec, TypeShape, TypeVariable,
};
pub use type_expr::TypeExpr;
pub use universe::TypeUniverse;
pub use well_known::WellKnownClasses;

use crate::errors::{ReflectError, Result};
use crate::identity::{ClassId, Symbol};

/// Reflection capabilities over a set of declared types.
///
/// Constructors take `&mut self` because they intern; every query is `&self`,
/// so a resolver can share one universe across threads once it is built.
pub trait TypeReflection {
    /// Normalize an expression to its canonical, interned form. Idempotent.
    fn canonicalize(&mut self, ty: &TypeExpr) -> Result<TypeId>;

    /// The erased type: `List<String>` -> `List`, `T` -> `Object`,
    /// `List<String>[]` -> `List[]`.
    fn raw_type_of(&mut self, ty: TypeId) -> Result<TypeId>;

    fn parameterized_type(
        &mut self,
        owner: Option<TypeId>,
        raw: ClassId,
        args: &[TypeId],
    ) -> Result<TypeId>;

    fn array_type(&mut self, component: TypeId) -> Result<TypeId>;

    fn get(&self, ty: TypeId) -> &ReflectType;

    /// Structural equality, independent of how the types were built.
    fn types_equal(&self, a: TypeId, b: TypeId) -> bool;

    /// Hash consistent with `types_equal`
    fn structural_hash(&self, ty: TypeId) -> u64;

    /// Human-readable rendering for diagnostics
    fn describe(&self, ty: TypeId) -> String;

    /// Class whose hierarchy a type walks. Type variables erase to `Object`;
    /// arrays and the invalid type have none.
    fn raw_class_of(&self, ty: TypeId) -> Option<ClassId>;

    fn type_params(&self, class: ClassId) -> &[Symbol];

    fn generic_interfaces(&self, ty: TypeId) -> &[TypeId];

    fn generic_superclass(&self, ty: TypeId) -> Option<TypeId>;

    fn symbol_name(&self, name: Symbol) -> &str;
}

/// Build the diagnostic for a type whose shape is none of `expected`.
pub fn unexpected_type_shape<R: TypeReflection + ?Sized>(
    reflect: &R,
    ty: TypeId,
    expected: &[TypeShape],
) -> ReflectError {
    let expected = expected
        .iter()
        .map(|shape| shape.name())
        .collect::<Vec<_>>()
        .join(", ");
    ReflectError::UnexpectedTypeShape {
        expected,
        actual: reflect.get(ty).shape().name().to_string(),
        rendered: reflect.describe(ty),
    }
}
