//! Type introspection.
//!
//! The resolver never inspects classes directly. Everything it needs (declared type parameters,
//! generic superclass, generic interfaces and the universal top type) comes through
//! [`TypeEnv`], so hosts can plug in whatever class model they have. [`TypeStore`] is a small
//! in-memory implementation used by tests and by callers that build class graphs by hand.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ClassId, TypeExpr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
}

/// A declared type parameter (`T extends Comparable<T>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
    /// Declared bounds in source order. Empty means "unbounded" (implicitly the top type).
    pub upper_bounds: Vec<TypeExpr>,
}

impl TypeParamDef {
    pub fn new(name: impl Into<String>, upper_bounds: Vec<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            upper_bounds,
        }
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Binary name, e.g. `java.util.ArrayList` or `com.example.Outer$Inner`.
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamDef>,
    /// Generic superclass as written in the declaration. Always `None` for interfaces.
    pub super_class: Option<TypeExpr>,
    /// Directly implemented (or, for interfaces, extended) interfaces in declaration order.
    pub interfaces: Vec<TypeExpr>,
}

impl ClassDef {
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
        }
    }

    pub fn type_param(mut self, name: impl Into<String>, upper_bounds: Vec<TypeExpr>) -> Self {
        self.type_params.push(TypeParamDef::new(name, upper_bounds));
        self
    }

    pub fn extends(mut self, super_class: TypeExpr) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, iface: TypeExpr) -> Self {
        self.interfaces.push(iface);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Name without package or enclosing class prefix (`ArrayList`, `Inner`).
    pub fn simple_name(&self) -> &str {
        let name = self.name.rsplit('.').next().unwrap_or(&self.name);
        name.rsplit('$').next().unwrap_or(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownTypes {
    /// Universal top type; hierarchy walks stop when they reach it.
    pub object: ClassId,
}

/// Read-only view of a class model.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;
}

/// Human-readable class name for messages. Falls back to the raw id for unknown classes.
pub fn class_name(env: &dyn TypeEnv, id: ClassId) -> String {
    match env.class(id) {
        Some(def) => def.name.clone(),
        None => format!("<unknown class #{}>", id.to_raw()),
    }
}

/// In-memory class registry. Classes are stored in an arena and addressed by [`ClassId`].
#[derive(Debug, Clone)]
pub struct TypeStore {
    classes: Vec<Option<ClassDef>>,
    by_name: HashMap<String, ClassId>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// Empty store containing only `java.lang.Object`.
    pub fn new() -> Self {
        let mut store = TypeStore {
            classes: Vec::new(),
            by_name: HashMap::new(),
            well_known: WellKnownTypes {
                object: ClassId::from_raw(0),
            },
        };
        let object = store.add_class(ClassDef::class("java.lang.Object"));
        store.well_known.object = object;
        store
    }

    /// Store pre-populated with the handful of JDK types most generic hierarchies bottom out in:
    /// `String`, boxed numbers, `Comparable`, `Enum`, and the core collection hierarchy.
    pub fn with_minimal_jdk() -> Self {
        let mut store = TypeStore::new();
        let object = TypeExpr::named(store.well_known.object);
        let var = |name: &str| TypeExpr::var(name);

        let serializable = store.add_class(ClassDef::interface("java.io.Serializable"));
        let cloneable = store.add_class(ClassDef::interface("java.lang.Cloneable"));
        let char_sequence = store.add_class(ClassDef::interface("java.lang.CharSequence"));
        let comparable = store.add_class(
            ClassDef::interface("java.lang.Comparable").type_param("T", vec![object.clone()]),
        );
        let comparable_of = |ty: TypeExpr| TypeExpr::parameterized(comparable, vec![ty]);

        let string = store.intern_class_id("java.lang.String");
        store.define_class(
            string,
            ClassDef::class("java.lang.String")
                .extends(object.clone())
                .implements(TypeExpr::named(serializable))
                .implements(comparable_of(TypeExpr::named(string)))
                .implements(TypeExpr::named(char_sequence)),
        );

        let number = store.add_class(
            ClassDef::class("java.lang.Number")
                .extends(object.clone())
                .implements(TypeExpr::named(serializable)),
        );
        for boxed in ["java.lang.Integer", "java.lang.Long", "java.lang.Double"] {
            let id = store.intern_class_id(boxed);
            store.define_class(
                id,
                ClassDef::class(boxed)
                    .extends(TypeExpr::named(number))
                    .implements(comparable_of(TypeExpr::named(id))),
            );
        }

        // abstract class Enum<E extends Enum<E>> implements Comparable<E>, Serializable
        let enum_ = store.intern_class_id("java.lang.Enum");
        store.define_class(
            enum_,
            ClassDef::class("java.lang.Enum")
                .type_param("E", vec![TypeExpr::parameterized(enum_, vec![var("E")])])
                .extends(object.clone())
                .implements(comparable_of(var("E")))
                .implements(TypeExpr::named(serializable)),
        );

        let iterable = store.add_class(
            ClassDef::interface("java.lang.Iterable").type_param("T", vec![object.clone()]),
        );
        let collection = store.add_class(
            ClassDef::interface("java.util.Collection")
                .type_param("E", vec![object.clone()])
                .implements(TypeExpr::parameterized(iterable, vec![var("E")])),
        );
        let list = store.add_class(
            ClassDef::interface("java.util.List")
                .type_param("E", vec![object.clone()])
                .implements(TypeExpr::parameterized(collection, vec![var("E")])),
        );
        let random_access = store.add_class(ClassDef::interface("java.util.RandomAccess"));
        let abstract_collection = store.add_class(
            ClassDef::class("java.util.AbstractCollection")
                .type_param("E", vec![object.clone()])
                .extends(object.clone())
                .implements(TypeExpr::parameterized(collection, vec![var("E")])),
        );
        let abstract_list = store.add_class(
            ClassDef::class("java.util.AbstractList")
                .type_param("E", vec![object.clone()])
                .extends(TypeExpr::parameterized(abstract_collection, vec![var("E")]))
                .implements(TypeExpr::parameterized(list, vec![var("E")])),
        );
        store.add_class(
            ClassDef::class("java.util.ArrayList")
                .type_param("E", vec![object.clone()])
                .extends(TypeExpr::parameterized(abstract_list, vec![var("E")]))
                .implements(TypeExpr::parameterized(list, vec![var("E")]))
                .implements(TypeExpr::named(random_access))
                .implements(TypeExpr::named(cloneable))
                .implements(TypeExpr::named(serializable)),
        );

        let map = store.add_class(
            ClassDef::interface("java.util.Map")
                .type_param("K", vec![object.clone()])
                .type_param("V", vec![object.clone()]),
        );
        let abstract_map = store.add_class(
            ClassDef::class("java.util.AbstractMap")
                .type_param("K", vec![object.clone()])
                .type_param("V", vec![object.clone()])
                .extends(object.clone())
                .implements(TypeExpr::parameterized(map, vec![var("K"), var("V")])),
        );
        store.add_class(
            ClassDef::class("java.util.HashMap")
                .type_param("K", vec![object.clone()])
                .type_param("V", vec![object.clone()])
                .extends(TypeExpr::parameterized(abstract_map, vec![var("K"), var("V")]))
                .implements(TypeExpr::parameterized(map, vec![var("K"), var("V")]))
                .implements(TypeExpr::named(cloneable))
                .implements(TypeExpr::named(serializable)),
        );

        store
    }

    /// Register `def` under a fresh id, or redefine an existing class with the same name.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        self.upsert_class(def)
    }

    pub fn upsert_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    /// Reserve an id for `name` without defining it, so self- and forward-references
    /// (`class String implements Comparable<String>`) can be expressed.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let raw: u32 = self
            .classes
            .len()
            .try_into()
            .expect("too many classes in type store");
        let id = ClassId::from_raw(raw);
        self.classes.push(None);
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Define (or overwrite) the class behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this store.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        if let Some(old) = self.classes[id.index()].as_ref() {
            if old.name != def.name {
                self.by_name.remove(&old.name);
            }
        }
        self.by_name.insert(def.name.clone(), id);
        self.classes[id.index()] = Some(def);
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index()).and_then(Option::as_ref)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}
