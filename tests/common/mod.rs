// tests/common/mod.rs
//! Shared helpers for integration tests.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use type_descriptor::{TypeExpr, TypeReflection, TypeUniverse};

/// Route resolver traces to the test output, filtered by RUST_LOG.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Well-known classes plus a small user hierarchy:
///
/// ```text
/// interface Container<T>
/// class StringList extends AbstractList<String>
/// interface Alpha<E>
/// interface Target<T>
/// class Mixed<E> implements Alpha<Integer>, Target<E>
/// class Mid<Y> implements Target<Y>
/// class Sub<X> extends Mid<X>
/// ```
pub fn universe() -> TypeUniverse {
    init_tracing();
    let mut u = TypeUniverse::with_well_known();

    u.declare_interface("Container", &["T"]).unwrap();

    let string_list = u.declare_class("StringList", &[]).unwrap();
    u.set_superclass(
        string_list,
        TypeExpr::generic("AbstractList", [TypeExpr::named("String")]),
    )
    .unwrap();

    u.declare_interface("Alpha", &["E"]).unwrap();
    u.declare_interface("Target", &["T"]).unwrap();
    let mixed = u.declare_class("Mixed", &["E"]).unwrap();
    u.add_interface(mixed, TypeExpr::generic("Alpha", [TypeExpr::named("Integer")]))
        .unwrap();
    u.add_interface(mixed, TypeExpr::generic("Target", [TypeExpr::var("E")]))
        .unwrap();

    let mid = u.declare_class("Mid", &["Y"]).unwrap();
    u.add_interface(mid, TypeExpr::generic("Target", [TypeExpr::var("Y")]))
        .unwrap();
    let sub = u.declare_class("Sub", &["X"]).unwrap();
    u.set_superclass(sub, TypeExpr::generic("Mid", [TypeExpr::var("X")]))
        .unwrap();

    u
}

/// `raw<arg>` for a single named argument
pub fn generic1(raw: &str, arg: &str) -> TypeExpr {
    TypeExpr::generic(raw, [TypeExpr::named(arg)])
}

pub fn canonical(u: &mut TypeUniverse, expr: TypeExpr) -> type_descriptor::TypeId {
    u.canonicalize(&expr).unwrap()
}
