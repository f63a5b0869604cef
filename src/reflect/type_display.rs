//! Type display utilities for formatting types in diagnostics.
//!
//! Arrays render postfix (`String[]`), type arguments in angle brackets, and
//! member classes behind their owner (`Outer<T>.Inner<U>`), so the nesting of
//! `List<String>[]` and `List<String[]>` stays visible.

use crate::identity::Interner;
use crate::reflect::class_registry::ClassRegistry;
use crate::reflect::type_arena::{ReflectType, TypeArena, TypeId};

/// Display a TypeId by matching on ReflectType.
pub fn display_type(
    type_id: TypeId,
    arena: &TypeArena,
    registry: &ClassRegistry,
    names: &Interner,
) -> String {
    let mut out = String::new();
    write_type(&mut out, type_id, arena, registry, names);
    out
}

fn write_type(
    out: &mut String,
    type_id: TypeId,
    arena: &TypeArena,
    registry: &ClassRegistry,
    names: &Interner,
) {
    if !arena.contains(type_id) {
        out.push_str("<unknown>");
        return;
    }
    match arena.get(type_id) {
        ReflectType::Invalid => out.push_str("<invalid>"),
        ReflectType::Class(class) => match registry.try_get(*class) {
            Some(def) => out.push_str(names.resolve(def.name)),
            None => out.push_str("<unknown class>"),
        },
        ReflectType::Parameterized(p) => {
            if let Some(owner) = p.owner {
                write_type(out, owner, arena, registry, names);
                out.push('.');
            }
            match registry.try_get(p.raw) {
                Some(def) => out.push_str(names.resolve(def.name)),
                None => out.push_str("<unknown class>"),
            }
            if !p.args.is_empty() {
                out.push('<');
                for (i, &arg) in p.args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, arg, arena, registry, names);
                }
                out.push('>');
            }
        }
        ReflectType::Array(component) => {
            write_type(out, *component, arena, registry, names);
            out.push_str("[]");
        }
        ReflectType::TypeVar(var) => out.push_str(names.resolve(var.name)),
    }
}
