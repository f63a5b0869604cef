// src/assignability.rs
//
// Structural assignability between generic types.
//
// The resolver answers "can `from` be treated as an instance of the
// parameterized type `to`?" by walking `from`'s interfaces and superclasses,
// recording what each declared type parameter is bound to on the way. Each
// branch of the walk works on its own copy of the bindings, so a dead-end
// interface never leaks substitutions into its siblings.
//
// This is one-directional resolution, not unification: only variables on the
// `from` side are substituted, and variables on the `to` side must match
// literally.

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::identity::{ClassId, Symbol};
use crate::reflect::{Parameterized, ReflectType, TypeId, TypeReflection, TypeShape};

pub use crate::reflect::unexpected_type_shape;

/// Type-variable substitutions for one branch of an assignability search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: FxHashMap<Symbol, TypeId>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: Symbol) -> Option<TypeId> {
        self.map.get(&name).copied()
    }

    pub fn insert(&mut self, name: Symbol, ty: TypeId) {
        self.map.insert(name, ty);
    }

    pub fn remove(&mut self, name: Symbol) {
        self.map.remove(&name);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Assignability queries against one reflection backend.
pub struct AssignabilityResolver<'a, R: TypeReflection + ?Sized> {
    reflect: &'a R,
}

impl<'a, R: TypeReflection + ?Sized> AssignabilityResolver<'a, R> {
    pub fn new(reflect: &'a R) -> Self {
        Self { reflect }
    }

    /// Whether `from` structurally matches `to` once `from`'s type variables
    /// are resolved through its hierarchy. `None` is the end of a hierarchy.
    pub fn is_assignable(&self, from: Option<TypeId>, to: &Parameterized, bindings: Bindings) -> bool {
        self.resolve(from, to, bindings).is_some()
    }

    /// Like `is_assignable`, but returns the bindings of the branch that matched.
    ///
    /// The first matching branch wins: interfaces in declaration order, then the
    /// superclass. No consistency check is made between alternative paths.
    pub fn resolve(
        &self,
        from: Option<TypeId>,
        to: &Parameterized,
        mut bindings: Bindings,
    ) -> Option<Bindings> {
        let from = from?;
        let from_ty = self.reflect.get(from);

        if from_ty.as_parameterized() == Some(to) {
            tracing::trace!(from = %self.reflect.describe(from), "exact match");
            return Some(bindings);
        }

        if let Some(ptype) = from_ty.as_parameterized() {
            let params = self.reflect.type_params(ptype.raw);
            for (&param, &arg) in params.iter().zip(ptype.args.iter()) {
                match self.resolve_variable(arg, &bindings) {
                    Some(resolved) => bindings.insert(param, resolved),
                    // An unresolvable argument leaves the parameter unbound.
                    None => bindings.remove(param),
                }
            }
            tracing::trace!(
                from = %self.reflect.describe(from),
                bound = bindings.len(),
                "populated bindings"
            );
            if self.types_equal_under(ptype, to, &bindings) {
                return Some(bindings);
            }
        }

        for &interface in self.reflect.generic_interfaces(from) {
            tracing::trace!(interface = %self.reflect.describe(interface), "trying interface");
            if let Some(found) = self.resolve(Some(interface), to, bindings.clone()) {
                return Some(found);
            }
        }

        let superclass = self.reflect.generic_superclass(from);
        self.resolve(superclass, to, bindings)
    }

    /// Follow a chain of variables through `bindings` to a bound type.
    fn resolve_variable(&self, mut arg: TypeId, bindings: &Bindings) -> Option<TypeId> {
        // A chain longer than the map is a cycle in caller-supplied bindings.
        for _ in 0..=bindings.len() {
            match self.reflect.get(arg).as_type_var() {
                Some(name) => arg = bindings.get(name)?,
                None => return Some(arg),
            }
        }
        None
    }

    /// Same raw class, and every argument pair matches under `bindings`.
    pub fn types_equal_under(
        &self,
        from: &Parameterized,
        to: &Parameterized,
        bindings: &Bindings,
    ) -> bool {
        from.raw == to.raw
            && from.args.len() == to.args.len()
            && from
                .args
                .iter()
                .zip(to.args.iter())
                .all(|(&f, &t)| self.matches(f, t, bindings))
    }

    /// Identical types, or a `from` variable bound to exactly `to`.
    fn matches(&self, from: TypeId, to: TypeId, bindings: &Bindings) -> bool {
        if self.reflect.types_equal(from, to) {
            return true;
        }
        match self.reflect.get(from).as_type_var() {
            Some(name) => bindings
                .get(name)
                .is_some_and(|bound| self.reflect.types_equal(bound, to)),
            None => false,
        }
    }

    /// Dispatch on the shape of `to`:
    /// - class: `from`'s raw class is `to` or inherits from it,
    /// - parameterized type: structural match with fresh bindings,
    /// - array: `from` is an array whose component is assignable to `to`'s.
    ///
    /// Any other target shape is a usage error.
    #[tracing::instrument(level = "debug", skip(self), ret)]
    pub fn is_assignable_from(&self, from: TypeId, to: TypeId) -> Result<bool> {
        match self.reflect.get(to) {
            ReflectType::Class(class) => Ok(self.is_subclass(from, *class)),
            ReflectType::Parameterized(p) => Ok(self.is_assignable(Some(from), p, Bindings::new())),
            ReflectType::Array(to_component) => match self.reflect.get(from) {
                ReflectType::Array(from_component) => {
                    self.is_assignable_from(*from_component, *to_component)
                }
                _ => Ok(false),
            },
            ReflectType::TypeVar(_) | ReflectType::Invalid => Err(unexpected_type_shape(
                self.reflect,
                to,
                &[TypeShape::Class, TypeShape::Parameterized, TypeShape::Array],
            )),
        }
    }

    /// Raw-class subtyping, ignoring type arguments.
    fn is_subclass(&self, from: TypeId, target: ClassId) -> bool {
        if matches!(self.reflect.get(from), ReflectType::Invalid) {
            return false;
        }
        if target == ClassId::OBJECT || self.reflect.raw_class_of(from) == Some(target) {
            return true;
        }
        self.reflect
            .generic_interfaces(from)
            .iter()
            .any(|&interface| self.is_subclass(interface, target))
            || self
                .reflect
                .generic_superclass(from)
                .is_some_and(|superclass| self.is_subclass(superclass, target))
    }
}
