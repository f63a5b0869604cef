//! Compile-time type capture.
//!
//! `Reflect` maps a Rust type to the type expression it stands for in a
//! universe with the well-known classes, so a caller can write
//! `TypeDescriptor::reify::<Vec<String>>(&mut universe)` instead of spelling
//! out `ArrayList<String>` by hand.

use std::collections::HashMap;

use crate::reflect::TypeExpr;

pub trait Reflect {
    fn type_expr() -> TypeExpr;
}

macro_rules! reflect_as_class {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_expr() -> TypeExpr {
                    TypeExpr::named($name)
                }
            }
        )*
    };
}

reflect_as_class! {
    String => "String",
    str => "String",
    bool => "Boolean",
    i32 => "Integer",
    i64 => "Long",
    f64 => "Double",
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_expr() -> TypeExpr {
        T::type_expr()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_expr() -> TypeExpr {
        TypeExpr::generic("ArrayList", [T::type_expr()])
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_expr() -> TypeExpr {
        TypeExpr::generic("HashMap", [K::type_expr(), V::type_expr()])
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_expr() -> TypeExpr {
        TypeExpr::array_of(T::type_expr())
    }
}

impl<T: Reflect> Reflect for [T] {
    fn type_expr() -> TypeExpr {
        TypeExpr::array_of(T::type_expr())
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_expr() -> TypeExpr {
        T::type_expr()
    }
}
