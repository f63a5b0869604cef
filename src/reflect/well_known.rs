// src/reflect/well_known.rs
//
// A small standard library of classes: boxed values, strings and the
// collection hierarchy. Declared in dependency order so every supertype
// exists before the classes that extend it.

use crate::errors::Result;
use crate::identity::ClassId;
use crate::reflect::TypeExpr;
use crate::reflect::universe::TypeUniverse;

/// ClassIds of the preloaded classes, for fast identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownClasses {
    pub object: ClassId,
    pub comparable: ClassId,
    pub char_sequence: ClassId,
    pub number: ClassId,
    pub string: ClassId,
    pub integer: ClassId,
    pub long: ClassId,
    pub double: ClassId,
    pub boolean: ClassId,
    pub iterable: ClassId,
    pub collection: ClassId,
    pub list: ClassId,
    pub abstract_collection: ClassId,
    pub abstract_list: ClassId,
    pub array_list: ClassId,
    pub map: ClassId,
    pub abstract_map: ClassId,
    pub hash_map: ClassId,
}

fn var(name: &str) -> TypeExpr {
    TypeExpr::var(name)
}

impl WellKnownClasses {
    /// Declare the well-known classes into `universe`.
    pub fn declare(universe: &mut TypeUniverse) -> Result<Self> {
        let comparable = universe.declare_interface("Comparable", &["T"])?;
        let char_sequence = universe.declare_interface("CharSequence", &[])?;
        let number = universe.declare_class("Number", &[])?;

        let string = universe.declare_class("String", &[])?;
        universe.add_interface(string, char_sequence)?;
        universe.add_interface(string, TypeExpr::generic(comparable, [TypeExpr::Class(string)]))?;

        let mut boxed = |name: &str, numeric: bool| -> Result<ClassId> {
            let class = universe.declare_class(name, &[])?;
            if numeric {
                universe.set_superclass(class, number)?;
            }
            universe.add_interface(class, TypeExpr::generic(comparable, [TypeExpr::Class(class)]))?;
            Ok(class)
        };
        let integer = boxed("Integer", true)?;
        let long = boxed("Long", true)?;
        let double = boxed("Double", true)?;
        let boolean = boxed("Boolean", false)?;

        let iterable = universe.declare_interface("Iterable", &["T"])?;
        let collection = universe.declare_interface("Collection", &["E"])?;
        universe.add_interface(collection, TypeExpr::generic(iterable, [var("E")]))?;
        let list = universe.declare_interface("List", &["E"])?;
        universe.add_interface(list, TypeExpr::generic(collection, [var("E")]))?;

        let abstract_collection = universe.declare_class("AbstractCollection", &["E"])?;
        universe.add_interface(abstract_collection, TypeExpr::generic(collection, [var("E")]))?;
        let abstract_list = universe.declare_class("AbstractList", &["E"])?;
        universe.set_superclass(abstract_list, TypeExpr::generic(abstract_collection, [var("E")]))?;
        universe.add_interface(abstract_list, TypeExpr::generic(list, [var("E")]))?;
        let array_list = universe.declare_class("ArrayList", &["E"])?;
        universe.set_superclass(array_list, TypeExpr::generic(abstract_list, [var("E")]))?;
        universe.add_interface(array_list, TypeExpr::generic(list, [var("E")]))?;

        let map = universe.declare_interface("Map", &["K", "V"])?;
        let abstract_map = universe.declare_class("AbstractMap", &["K", "V"])?;
        universe.add_interface(abstract_map, TypeExpr::generic(map, [var("K"), var("V")]))?;
        let hash_map = universe.declare_class("HashMap", &["K", "V"])?;
        universe.set_superclass(hash_map, TypeExpr::generic(abstract_map, [var("K"), var("V")]))?;
        universe.add_interface(hash_map, TypeExpr::generic(map, [var("K"), var("V")]))?;

        Ok(Self {
            object: ClassId::OBJECT,
            comparable,
            char_sequence,
            number,
            string,
            integer,
            long,
            double,
            boolean,
            iterable,
            collection,
            list,
            abstract_collection,
            abstract_list,
            array_list,
            map,
            abstract_map,
            hash_map,
        })
    }
}
