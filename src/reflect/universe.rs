// src/reflect/universe.rs
//
// TypeUniverse: the concrete reflection backend. Owns the name interner, the
// class registry and the type arena, and enforces the rules that keep every
// interned type well formed (known classes, matching arity, acyclic
// hierarchies).

use crate::errors::{ReflectError, Result};
use crate::identity::{ClassId, Interner, Symbol};
use crate::reflect::class_registry::{ClassDef, ClassKind, ClassRegistry};
use crate::reflect::type_arena::{ReflectType, TypeArena, TypeId, TypeIdVec, TypeShape};
use crate::reflect::type_display::display_type;
use crate::reflect::type_expr::TypeExpr;
use crate::reflect::well_known::WellKnownClasses;
use crate::reflect::{TypeReflection, unexpected_type_shape};

static INVALID_TYPE: ReflectType = ReflectType::Invalid;

/// A closed world of declared classes and the types built from them.
#[derive(Debug)]
pub struct TypeUniverse {
    names: Interner,
    classes: ClassRegistry,
    arena: TypeArena,
    /// Interned `Class(id)` for every declared class, indexed by ClassId
    class_types: Vec<TypeId>,
    well_known: Option<WellKnownClasses>,
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeUniverse {
    /// A universe containing only `Object`, the root of every hierarchy.
    pub fn new() -> Self {
        let mut universe = Self {
            names: Interner::new(),
            classes: ClassRegistry::new(),
            arena: TypeArena::new(),
            class_types: Vec::new(),
            well_known: None,
        };
        let object = universe.register("Object", ClassKind::Class, Vec::new(), None);
        debug_assert_eq!(object, ClassId::OBJECT);
        universe
    }

    /// A universe preloaded with the collection and boxed-value classes.
    pub fn with_well_known() -> Self {
        let mut universe = Self::new();
        match WellKnownClasses::declare(&mut universe) {
            Ok(classes) => universe.well_known = Some(classes),
            // The well-known set is fixed and declared into a fresh universe.
            Err(err) => unreachable!("well-known classes failed to declare: {err}"),
        }
        universe
    }

    pub fn well_known(&self) -> Option<&WellKnownClasses> {
        self.well_known.as_ref()
    }

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn names(&self) -> &Interner {
        &self.names
    }

    /// The canonical type of `Object`
    pub fn object_type(&self) -> TypeId {
        self.class_types[ClassId::OBJECT.index() as usize]
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn declare_class(&mut self, name: &str, type_params: &[&str]) -> Result<ClassId> {
        self.declare(name, ClassKind::Class, type_params)
    }

    pub fn declare_interface(&mut self, name: &str, type_params: &[&str]) -> Result<ClassId> {
        self.declare(name, ClassKind::Interface, type_params)
    }

    fn declare(&mut self, name: &str, kind: ClassKind, type_params: &[&str]) -> Result<ClassId> {
        if name.is_empty() {
            return Err(ReflectError::invalid_type("class name must not be empty"));
        }
        if self.class_by_name(name).is_some() {
            return Err(ReflectError::invalid_type(format!(
                "class '{name}' is already declared"
            )));
        }
        for (i, param) in type_params.iter().enumerate() {
            if type_params[..i].contains(param) {
                return Err(ReflectError::invalid_type(format!(
                    "type parameter '{param}' is declared twice on '{name}'"
                )));
            }
        }
        let params = type_params.iter().map(|p| self.names.intern(p)).collect();
        let superclass = match kind {
            ClassKind::Class => Some(self.object_type()),
            ClassKind::Interface => None,
        };
        let id = self.register(name, kind, params, superclass);
        tracing::debug!(name, kind = kind.name(), id = id.index(), "declared class");
        Ok(id)
    }

    fn register(
        &mut self,
        name: &str,
        kind: ClassKind,
        params: Vec<Symbol>,
        superclass: Option<TypeId>,
    ) -> ClassId {
        let sym = self.names.intern(name);
        let id = self.classes.register(sym, kind, params, superclass);
        let ty = self.arena.class(id);
        self.class_types.push(ty);
        id
    }

    /// Replace the generic superclass of a class (`Object` by default).
    pub fn set_superclass(&mut self, class: ClassId, superclass: impl Into<TypeExpr>) -> Result<()> {
        let def = self.class_def_checked(class)?;
        if def.is_interface() {
            return Err(ReflectError::invalid_type(format!(
                "interface '{}' cannot have a superclass",
                self.names.resolve(def.name)
            )));
        }
        if class == ClassId::OBJECT {
            return Err(ReflectError::invalid_type("Object cannot have a superclass"));
        }
        let (ty, raw) = self.canonicalize_supertype(class, &superclass.into())?;
        if self.classes.get(raw).is_interface() {
            return Err(ReflectError::invalid_type(format!(
                "'{}' is an interface and cannot be extended by a class",
                self.describe(ty)
            )));
        }
        self.classes.get_mut(class).superclass = Some(ty);
        Ok(())
    }

    /// Add a directly implemented interface (for interfaces: an extended one).
    pub fn add_interface(&mut self, class: ClassId, interface: impl Into<TypeExpr>) -> Result<()> {
        self.class_def_checked(class)?;
        let (ty, raw) = self.canonicalize_supertype(class, &interface.into())?;
        if !self.classes.get(raw).is_interface() {
            return Err(ReflectError::invalid_type(format!(
                "'{}' is not an interface",
                self.describe(ty)
            )));
        }
        let def = self.classes.get_mut(class);
        if !def.interfaces.contains(&ty) {
            def.interfaces.push(ty);
        }
        Ok(())
    }

    /// Canonicalize a supertype and check that it can sit in `class`'s hierarchy.
    fn canonicalize_supertype(&mut self, class: ClassId, expr: &TypeExpr) -> Result<(TypeId, ClassId)> {
        let ty = self.canonicalize(expr)?;
        let raw = match self.arena.get(ty) {
            ReflectType::Class(c) => *c,
            ReflectType::Parameterized(p) => p.raw,
            _ => {
                return Err(unexpected_type_shape(
                    &*self,
                    ty,
                    &[TypeShape::Class, TypeShape::Parameterized],
                ));
            }
        };
        // Supertypes must be declared first, which keeps hierarchies acyclic.
        if raw >= class {
            return Err(ReflectError::invalid_type(format!(
                "supertype '{}' must be declared before '{}'",
                self.describe(ty),
                self.names.resolve(self.classes.get(class).name)
            )));
        }
        let mut vars = Vec::new();
        self.collect_type_vars(ty, &mut vars);
        let def = self.classes.get(class);
        if let Some(unknown) = vars.iter().find(|v| !def.type_params.contains(v)) {
            return Err(ReflectError::invalid_type(format!(
                "type variable '{}' is not declared by '{}'",
                self.names.resolve(*unknown),
                self.names.resolve(def.name)
            )));
        }
        Ok((self.scope_type_vars(ty, class), raw))
    }

    /// Rebuild `ty` with every type variable owned by `decl`.
    fn scope_type_vars(&mut self, ty: TypeId, decl: ClassId) -> TypeId {
        match self.arena.get(ty).clone() {
            ReflectType::TypeVar(var) => self.arena.type_var(Some(decl), var.name),
            ReflectType::Array(component) => {
                let component = self.scope_type_vars(component, decl);
                self.arena.array(component)
            }
            ReflectType::Parameterized(p) => {
                let owner = p.owner.map(|owner| self.scope_type_vars(owner, decl));
                let args: TypeIdVec = p
                    .args
                    .iter()
                    .map(|&arg| self.scope_type_vars(arg, decl))
                    .collect();
                self.arena.parameterized(owner, p.raw, args)
            }
            ReflectType::Class(_) | ReflectType::Invalid => ty,
        }
    }

    fn collect_type_vars(&self, ty: TypeId, out: &mut Vec<Symbol>) {
        match self.arena.get(ty) {
            ReflectType::TypeVar(var) => out.push(var.name),
            ReflectType::Array(component) => self.collect_type_vars(*component, out),
            ReflectType::Parameterized(p) => {
                if let Some(owner) = p.owner {
                    self.collect_type_vars(owner, out);
                }
                for &arg in &p.args {
                    self.collect_type_vars(arg, out);
                }
            }
            ReflectType::Class(_) | ReflectType::Invalid => {}
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.names.lookup(name).and_then(|sym| self.classes.by_name(sym))
    }

    pub fn class_def(&self, class: ClassId) -> Option<&ClassDef> {
        self.classes.try_get(class)
    }

    /// The canonical (raw) type of a declared class
    pub fn class_type(&self, class: ClassId) -> Option<TypeId> {
        self.class_types.get(class.index() as usize).copied()
    }

    pub fn class_name(&self, class: ClassId) -> Option<&str> {
        self.classes.try_get(class).map(|def| self.names.resolve(def.name))
    }

    fn class_def_checked(&self, class: ClassId) -> Result<&ClassDef> {
        self.classes
            .try_get(class)
            .ok_or_else(|| ReflectError::invalid_type(format!("unknown class id {}", class.index())))
    }

    fn check_type(&self, ty: TypeId) -> Result<TypeId> {
        if ty.is_invalid() {
            return Err(ReflectError::invalid_type("null type representation"));
        }
        if !self.arena.contains(ty) {
            return Err(ReflectError::invalid_type(format!(
                "type id {} does not belong to this universe",
                ty.index()
            )));
        }
        Ok(ty)
    }
}

impl TypeReflection for TypeUniverse {
    fn canonicalize(&mut self, ty: &TypeExpr) -> Result<TypeId> {
        match ty {
            TypeExpr::Id(id) => self.check_type(*id),
            TypeExpr::Class(class) => {
                self.class_def_checked(*class)?;
                Ok(self.class_types[class.index() as usize])
            }
            TypeExpr::Named(name) => {
                let class = self
                    .class_by_name(name)
                    .ok_or_else(|| ReflectError::invalid_type(format!("unknown class '{name}'")))?;
                Ok(self.class_types[class.index() as usize])
            }
            TypeExpr::Var(name) => {
                if name.is_empty() {
                    return Err(ReflectError::invalid_type("type variable name must not be empty"));
                }
                let sym = self.names.intern(name);
                Ok(self.arena.type_var(None, sym))
            }
            TypeExpr::Array(component) => {
                let component = self.canonicalize(component)?;
                self.array_type(component)
            }
            TypeExpr::Parameterized { owner, raw, args } => {
                let raw_id = self.canonicalize(raw)?;
                let raw_class = match self.arena.get(raw_id) {
                    ReflectType::Class(class) => *class,
                    _ => {
                        return Err(ReflectError::invalid_type(format!(
                            "'{}' cannot be parameterized",
                            self.describe(raw_id)
                        )));
                    }
                };
                let owner = match owner {
                    Some(owner) => Some(self.canonicalize(owner)?),
                    None => None,
                };
                let args = args
                    .iter()
                    .map(|arg| self.canonicalize(arg))
                    .collect::<Result<TypeIdVec>>()?;
                self.parameterized_type(owner, raw_class, &args)
            }
        }
    }

    fn raw_type_of(&mut self, ty: TypeId) -> Result<TypeId> {
        self.check_type(ty)?;
        match self.arena.get(ty) {
            ReflectType::Class(_) => Ok(ty),
            ReflectType::Parameterized(p) => Ok(self.class_types[p.raw.index() as usize]),
            ReflectType::Array(component) => {
                let component = *component;
                let raw_component = self.raw_type_of(component)?;
                Ok(self.arena.array(raw_component))
            }
            ReflectType::TypeVar(_) => Ok(self.object_type()),
            ReflectType::Invalid => Err(ReflectError::invalid_type("null type representation")),
        }
    }

    fn parameterized_type(
        &mut self,
        owner: Option<TypeId>,
        raw: ClassId,
        args: &[TypeId],
    ) -> Result<TypeId> {
        let def = self.class_def_checked(raw)?;
        let expected = def.type_params.len();
        if !args.is_empty() && args.len() != expected {
            return Err(ReflectError::invalid_type(format!(
                "'{}' expects {} type argument(s), found {}",
                self.names.resolve(def.name),
                expected,
                args.len()
            )));
        }
        if let Some(owner) = owner {
            self.check_type(owner)?;
            if !matches!(
                self.arena.get(owner),
                ReflectType::Class(_) | ReflectType::Parameterized(_)
            ) {
                return Err(unexpected_type_shape(
                    &*self,
                    owner,
                    &[TypeShape::Class, TypeShape::Parameterized],
                ));
            }
        }
        for &arg in args {
            self.check_type(arg)?;
        }
        Ok(self.arena.parameterized(owner, raw, args))
    }

    fn array_type(&mut self, component: TypeId) -> Result<TypeId> {
        self.check_type(component)?;
        Ok(self.arena.array(component))
    }

    fn get(&self, ty: TypeId) -> &ReflectType {
        if self.arena.contains(ty) {
            self.arena.get(ty)
        } else {
            &INVALID_TYPE
        }
    }

    fn types_equal(&self, a: TypeId, b: TypeId) -> bool {
        // Interning makes structural equality handle equality.
        a == b
    }

    fn structural_hash(&self, ty: TypeId) -> u64 {
        if self.arena.contains(ty) {
            self.arena.structural_hash(ty)
        } else {
            0
        }
    }

    fn describe(&self, ty: TypeId) -> String {
        display_type(ty, &self.arena, &self.classes, &self.names)
    }

    fn raw_class_of(&self, ty: TypeId) -> Option<ClassId> {
        match self.get(ty) {
            ReflectType::Class(class) => Some(*class),
            ReflectType::Parameterized(p) => Some(p.raw),
            ReflectType::TypeVar(_) => Some(ClassId::OBJECT),
            ReflectType::Array(_) | ReflectType::Invalid => None,
        }
    }

    fn type_params(&self, class: ClassId) -> &[Symbol] {
        self.classes
            .try_get(class)
            .map(|def| def.type_params.as_slice())
            .unwrap_or(&[])
    }

    fn generic_interfaces(&self, ty: TypeId) -> &[TypeId] {
        match self.raw_class_of(ty).and_then(|class| self.classes.try_get(class)) {
            Some(def) => def.interfaces.as_slice(),
            None => &[],
        }
    }

    fn generic_superclass(&self, ty: TypeId) -> Option<TypeId> {
        match self.get(ty) {
            ReflectType::Array(_) => Some(self.object_type()),
            _ => self
                .raw_class_of(ty)
                .and_then(|class| self.classes.try_get(class))
                .and_then(|def| def.superclass),
        }
    }

    fn symbol_name(&self, name: Symbol) -> &str {
        self.names.resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> TypeUniverse {
        TypeUniverse::with_well_known()
    }

    fn list_of(u: &mut TypeUniverse, arg: &str) -> TypeId {
        u.canonicalize(&TypeExpr::generic("List", [TypeExpr::named(arg)]))
            .unwrap()
    }

    #[test]
    fn object_is_the_root() {
        let u = TypeUniverse::new();
        assert_eq!(u.class_by_name("Object"), Some(ClassId::OBJECT));
        assert_eq!(u.generic_superclass(u.object_type()), None);
        assert!(u.generic_interfaces(u.object_type()).is_empty());
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let mut u = universe();
        let list = list_of(&mut u, "String");
        assert_eq!(u.canonicalize(&TypeExpr::Id(list)).unwrap(), list);
        assert_eq!(list_of(&mut u, "String"), list);
    }

    #[test]
    fn raw_generic_use_canonicalizes_to_class() {
        let mut u = universe();
        let raw = u.canonicalize(&TypeExpr::generic("List", [])).unwrap();
        let list = u.class_by_name("List").unwrap();
        assert_eq!(u.get(raw), &ReflectType::Class(list));
    }

    #[test]
    fn null_and_foreign_ids_are_invalid() {
        let mut u = universe();
        assert!(matches!(
            u.canonicalize(&TypeExpr::Id(TypeId::INVALID)),
            Err(ReflectError::InvalidType { .. })
        ));
        assert!(u.raw_type_of(TypeId::INVALID).is_err());
        assert!(matches!(
            u.canonicalize(&TypeExpr::named("Nope")),
            Err(ReflectError::InvalidType { .. })
        ));
    }

    #[test]
    fn arity_is_checked() {
        let mut u = universe();
        let err = u
            .canonicalize(&TypeExpr::generic(
                "List",
                [TypeExpr::named("String"), TypeExpr::named("Integer")],
            ))
            .unwrap_err();
        assert!(err.to_string().contains("expects 1 type argument(s), found 2"));
    }

    #[test]
    fn arrays_cannot_be_parameterized() {
        let mut u = universe();
        let expr = TypeExpr::generic(TypeExpr::array_of("String"), [TypeExpr::named("String")]);
        assert!(matches!(
            u.canonicalize(&expr),
            Err(ReflectError::InvalidType { .. })
        ));
    }

    #[test]
    fn raw_type_erases_arguments() {
        let mut u = universe();
        let list = list_of(&mut u, "String");
        let list_class = u.class_type(u.class_by_name("List").unwrap()).unwrap();
        assert_eq!(u.raw_type_of(list).unwrap(), list_class);

        let array = u.array_type(list).unwrap();
        let raw_array = u.raw_type_of(array).unwrap();
        assert_eq!(u.get(raw_array), &ReflectType::Array(list_class));

        let t = u.canonicalize(&TypeExpr::var("T")).unwrap();
        assert_eq!(u.raw_type_of(t).unwrap(), u.object_type());
    }

    #[test]
    fn describe_keeps_nesting_visible() {
        let mut u = universe();
        let list = list_of(&mut u, "String");
        let array_of_list = u.array_type(list).unwrap();
        let string_array = u.canonicalize(&TypeExpr::array_of("String")).unwrap();
        let list_class = u.class_by_name("List").unwrap();
        let list_of_array = u.parameterized_type(None, list_class, &[string_array]).unwrap();

        assert_eq!(u.describe(array_of_list), "List<String>[]");
        assert_eq!(u.describe(list_of_array), "List<String[]>");
    }

    #[test]
    fn describe_member_types_with_owner() {
        let mut u = universe();
        let outer = u.declare_class("Outer", &["T"]).unwrap();
        u.declare_class("Inner", &["U"]).unwrap();
        let expr = TypeExpr::member(
            TypeExpr::generic(outer, [TypeExpr::named("String")]),
            "Inner",
            [TypeExpr::named("Integer")],
        );
        let ty = u.canonicalize(&expr).unwrap();
        assert_eq!(u.describe(ty), "Outer<String>.Inner<Integer>");
    }

    #[test]
    fn member_types_without_arguments_keep_their_owner() {
        let mut u = universe();
        let outer = u.declare_class("Outer", &["T"]).unwrap();
        u.declare_class("Inner", &[]).unwrap();
        let inner_of = |u: &mut TypeUniverse, arg: &str| {
            let expr = TypeExpr::member(TypeExpr::generic(outer, [TypeExpr::named(arg)]), "Inner", []);
            u.canonicalize(&expr).unwrap()
        };
        let a = inner_of(&mut u, "String");
        let b = inner_of(&mut u, "Integer");
        assert_ne!(a, b);
        assert_eq!(u.describe(a), "Outer<String>.Inner");
        assert_eq!(u.describe(b), "Outer<Integer>.Inner");
        assert_eq!(u.raw_type_of(a).unwrap(), u.raw_type_of(b).unwrap());
    }

    #[test]
    fn owners_must_be_classes_or_parameterized_types() {
        let mut u = universe();
        u.declare_class("Inner", &[]).unwrap();
        for owner in [TypeExpr::array_of("String"), TypeExpr::var("T")] {
            let expr = TypeExpr::member(owner, "Inner", [TypeExpr::named("String")]);
            assert!(matches!(
                u.canonicalize(&expr),
                Err(ReflectError::UnexpectedTypeShape { .. })
            ));
        }
    }

    #[test]
    fn supertype_variables_are_scoped_to_the_declaring_class() {
        let mut u = universe();
        let array_list = u.class_type(u.class_by_name("ArrayList").unwrap()).unwrap();
        let list_of_e = u.generic_interfaces(array_list)[0];
        let free = u
            .canonicalize(&TypeExpr::generic("List", [TypeExpr::var("E")]))
            .unwrap();
        assert_ne!(list_of_e, free);
        assert_eq!(u.describe(list_of_e), u.describe(free));
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let mut u = universe();
        assert!(u.declare_class("String", &[]).is_err());
        assert!(u.declare_class("Pair", &["A", "A"]).is_err());
    }

    #[test]
    fn supertypes_must_be_declared_first() {
        let mut u = TypeUniverse::new();
        let a = u.declare_class("A", &[]).unwrap();
        let b = u.declare_class("B", &[]).unwrap();
        assert!(u.set_superclass(b, a).is_ok());
        assert!(u.set_superclass(a, b).is_err());
        assert!(u.set_superclass(a, a).is_err());
    }

    #[test]
    fn supertype_kinds_are_checked() {
        let mut u = universe();
        let list = u.class_by_name("List").unwrap();
        let number = u.class_by_name("Number").unwrap();
        let c = u.declare_class("C", &["E"]).unwrap();

        assert!(u.set_superclass(c, TypeExpr::generic(list, [TypeExpr::var("E")])).is_err());
        assert!(u.add_interface(c, number).is_err());
        assert!(u.set_superclass(list, number).is_err());
        assert!(matches!(
            u.add_interface(c, TypeExpr::array_of("String")),
            Err(ReflectError::UnexpectedTypeShape { .. })
        ));
    }

    #[test]
    fn supertypes_only_use_declared_variables() {
        let mut u = universe();
        let c = u.declare_class("C", &["E"]).unwrap();
        let err = u
            .add_interface(c, TypeExpr::generic("List", [TypeExpr::var("X")]))
            .unwrap_err();
        assert!(err.to_string().contains("type variable 'X' is not declared by 'C'"));
        assert!(u.add_interface(c, TypeExpr::generic("List", [TypeExpr::var("E")])).is_ok());
    }

    #[test]
    fn arrays_extend_object() {
        let mut u = universe();
        let array = u.canonicalize(&TypeExpr::array_of("String")).unwrap();
        assert_eq!(u.generic_superclass(array), Some(u.object_type()));
        assert!(u.generic_interfaces(array).is_empty());
        assert_eq!(u.raw_class_of(array), None);
    }
}
