// tests/descriptor.rs
//! Construction, identity and rendering of type descriptors.

mod common;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use common::{generic1, universe};
use type_descriptor::{ReflectError, TypeDescriptor, TypeExpr, TypeId, TypeReflection};

fn hash_of(d: &TypeDescriptor) -> u64 {
    let mut hasher = DefaultHasher::new();
    d.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn null_type_is_invalid() {
    let mut u = universe();
    let err = TypeDescriptor::of_type(&mut u, TypeId::INVALID).unwrap_err();
    assert!(matches!(err, ReflectError::InvalidType { .. }));
    assert!(TypeDescriptor::of_array(&mut u, TypeId::INVALID).is_err());
    assert!(TypeDescriptor::of_parameterized(&mut u, "List", [TypeId::INVALID]).is_err());
}

#[test]
fn raw_capture_is_missing_its_type_parameter() {
    let mut u = universe();
    let err = TypeDescriptor::capture(&mut u, &TypeExpr::named("Container")).unwrap_err();
    assert_eq!(
        err,
        ReflectError::MissingTypeParameter {
            found: "Container".to_string()
        }
    );
}

#[test]
fn reify_captures_nested_generics() {
    let mut u = universe();
    let reified = TypeDescriptor::reify::<Vec<Vec<String>>>(&mut u).unwrap();
    let explicit = TypeDescriptor::of_parameterized(
        &mut u,
        "ArrayList",
        [generic1("ArrayList", "String")],
    )
    .unwrap();
    assert_eq!(reified, explicit);
    assert_eq!(hash_of(&reified), hash_of(&explicit));
}

#[test]
fn array_rendering_keeps_nesting_distinct() {
    let mut u = universe();
    let array_of_container =
        TypeDescriptor::of_array(&mut u, generic1("Container", "String")).unwrap();
    let container_of_array = TypeDescriptor::of_parameterized(
        &mut u,
        "Container",
        [TypeExpr::array_of("String")],
    )
    .unwrap();

    let a = array_of_container.display(&u).to_string();
    let b = container_of_array.display(&u).to_string();
    assert_eq!(a, "Container<String>[]");
    assert_eq!(b, "Container<String[]>");
    assert_ne!(array_of_container, container_of_array);
}

#[test]
fn equality_is_an_equivalence_consistent_with_hash() {
    let mut u = universe();
    let a = TypeDescriptor::of_type(&mut u, generic1("List", "String")).unwrap();
    let b = TypeDescriptor::of_parameterized(&mut u, "List", ["String"]).unwrap();
    let list = u.class_by_name("List").unwrap();
    let string = u.class_by_name("String").unwrap();
    let c = TypeDescriptor::of_parameterized(&mut u, list, [string]).unwrap();
    let other = TypeDescriptor::of_parameterized(&mut u, "List", ["Integer"]).unwrap();

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
    assert_ne!(a, other);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(hash_of(&b), hash_of(&c));
}

#[test]
fn canonicalizing_first_changes_nothing() {
    let mut u = universe();
    let exprs = [
        generic1("Container", "String"),
        TypeExpr::array_of(TypeExpr::generic(
            "HashMap",
            [TypeExpr::named("String"), TypeExpr::var("V")],
        )),
        TypeExpr::generic("ArrayList", []),
        TypeExpr::var("T"),
    ];
    for expr in exprs {
        let direct = TypeDescriptor::of_type(&mut u, expr.clone()).unwrap();
        let canonical = u.canonicalize(&expr).unwrap();
        let via_canonical = TypeDescriptor::of_type(&mut u, canonical).unwrap();
        assert_eq!(direct, via_canonical);
        assert_eq!(direct.raw_type(), via_canonical.raw_type());
        assert_eq!(hash_of(&direct), hash_of(&via_canonical));
    }
}

#[test]
fn descriptors_key_a_codec_table() {
    let mut u = universe();
    let mut codecs = HashMap::new();
    let strings = TypeDescriptor::reify::<Vec<String>>(&mut u).unwrap();
    let longs = TypeDescriptor::reify::<Vec<i64>>(&mut u).unwrap();
    codecs.insert(strings, "string-list");
    codecs.insert(longs, "long-list");

    let lookup = TypeDescriptor::of_parameterized(&mut u, "ArrayList", ["Long"]).unwrap();
    assert_eq!(codecs.get(&lookup), Some(&"long-list"));
}

#[test]
fn raw_type_of_type_variable_is_object() {
    let mut u = universe();
    let t = TypeDescriptor::of_type(&mut u, TypeExpr::var("T")).unwrap();
    assert_eq!(t.raw_type(), u.object_type());
    assert_eq!(t.display(&u).to_string(), "T");
}

#[test]
fn descriptors_are_plain_shareable_values() {
    fn assert_send_sync<T: Send + Sync + Copy>() {}
    assert_send_sync::<TypeDescriptor>();
}

#[test]
fn member_types_differ_by_owner_arguments() {
    let mut u = universe();
    let outer = u.declare_class("Outer", &["T"]).unwrap();
    u.declare_class("Inner", &[]).unwrap();

    let mut inner_of = |arg: &str| {
        let owner = TypeExpr::generic(outer, [TypeExpr::named(arg)]);
        TypeDescriptor::of_type(&mut u, TypeExpr::member(owner, "Inner", [])).unwrap()
    };
    let a = inner_of("String");
    let b = inner_of("Integer");

    assert_ne!(a, b);
    assert_eq!(a.raw_type(), b.raw_type());
    assert_eq!(a.display(&u).to_string(), "Outer<String>.Inner");
}
