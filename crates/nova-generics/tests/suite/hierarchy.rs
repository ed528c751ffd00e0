use nova_generics::{
    analyze_in_context, analyze_root, Bindings, ClassDef, ClassId, GenericsError, TypeEnv,
    TypeExpr, TypeStore,
};

use pretty_assertions::assert_eq;

fn id(env: &TypeStore, name: &str) -> ClassId {
    env.class_id(name)
        .unwrap_or_else(|| panic!("{name} must exist in the store"))
}

fn named(env: &TypeStore, name: &str) -> TypeExpr {
    TypeExpr::named(id(env, name))
}

fn bindings<const N: usize>(entries: [(&str, TypeExpr); N]) -> Bindings {
    entries.into_iter().collect()
}

#[test]
fn array_list_of_string_binds_every_collection_ancestor() {
    let env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let array_list = id(&env, "java.util.ArrayList");

    let info = analyze_in_context(
        &env,
        &Bindings::new(),
        &TypeExpr::parameterized(array_list, vec![string.clone()]),
        &[],
    )
    .unwrap();

    assert_eq!(info.root_class(), array_list);
    for name in [
        "java.util.ArrayList",
        "java.util.List",
        "java.util.Collection",
        "java.util.AbstractList",
        "java.util.AbstractCollection",
    ] {
        assert_eq!(
            info.type_generics(id(&env, name)),
            Some(&bindings([("E", string.clone())])),
            "{name}"
        );
    }
    assert_eq!(
        info.type_generics(id(&env, "java.lang.Iterable")),
        Some(&bindings([("T", string.clone())]))
    );
    for name in ["java.util.RandomAccess", "java.lang.Cloneable", "java.io.Serializable"] {
        assert_eq!(info.type_generics(id(&env, name)), Some(&Bindings::new()), "{name}");
    }
    assert!(!info.contains(env.well_known().object));
}

#[test]
fn walk_order_visits_interfaces_before_superclass() {
    let env = TypeStore::with_minimal_jdk();
    let info = analyze_root(&env, id(&env, "java.util.ArrayList"), &[]).unwrap();

    let names: Vec<&str> = info
        .composing_types()
        .iter()
        .map(|ty| env.class(*ty).unwrap().name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "java.util.ArrayList",
            "java.util.List",
            "java.util.Collection",
            "java.lang.Iterable",
            "java.util.RandomAccess",
            "java.lang.Cloneable",
            "java.io.Serializable",
            "java.util.AbstractList",
            "java.util.AbstractCollection",
        ]
    );
}

#[test]
fn analyze_root_is_deterministic() {
    let env = TypeStore::with_minimal_jdk();
    let hash_map = id(&env, "java.util.HashMap");
    let cloneable = id(&env, "java.lang.Cloneable");

    let first = analyze_root(&env, hash_map, &[cloneable]).unwrap();
    let second = analyze_root(&env, hash_map, &[cloneable]).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.iter().collect::<Vec<_>>(),
        second.iter().collect::<Vec<_>>()
    );
}

#[test]
fn root_type_parameters_resolve_to_their_bounds() {
    let env = TypeStore::with_minimal_jdk();
    let object = named(&env, "java.lang.Object");
    let info = analyze_root(&env, id(&env, "java.util.HashMap"), &[]).unwrap();

    let expected = bindings([("K", object.clone()), ("V", object)]);
    assert_eq!(info.type_generics(id(&env, "java.util.HashMap")), Some(&expected));
    assert_eq!(info.type_generics(id(&env, "java.util.AbstractMap")), Some(&expected));
    assert_eq!(info.type_generics(id(&env, "java.util.Map")), Some(&expected));
}

#[test]
fn non_generic_hierarchy_has_empty_bindings() {
    let mut env = TypeStore::with_minimal_jdk();
    let object = named(&env, "java.lang.Object");
    let marker = env.add_class(ClassDef::interface("com.example.Marker"));
    let base = env.add_class(
        ClassDef::class("com.example.Base")
            .extends(object)
            .implements(TypeExpr::named(marker)),
    );
    let plain = env.add_class(ClassDef::class("com.example.Plain").extends(TypeExpr::named(base)));

    let info = analyze_root(&env, plain, &[]).unwrap();
    assert_eq!(info.composing_types(), &[plain, base, marker]);
    for (_, generics) in info.iter() {
        assert!(generics.is_empty());
    }
}

#[test]
fn interface_arguments_are_bound_positionally() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let integer = named(&env, "java.lang.Integer");
    let pair = env.add_class(
        ClassDef::interface("com.example.Pair")
            .type_param("X", vec![])
            .type_param("Y", vec![]),
    );
    let imp = env.add_class(
        ClassDef::class("com.example.Impl")
            .implements(TypeExpr::parameterized(pair, vec![string.clone(), integer.clone()])),
    );

    let info = analyze_root(&env, imp, &[]).unwrap();
    let generics = info.type_generics(pair).unwrap();
    assert_eq!(
        generics.iter().collect::<Vec<_>>(),
        vec![("X", &string), ("Y", &integer)]
    );
}

#[test]
fn renamed_variables_are_substituted_across_levels() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let list = id(&env, "java.util.List");

    // interface I<T>; class A<X> implements I<X>
    let i = env.add_class(ClassDef::interface("com.example.I").type_param("T", vec![]));
    let a = env.add_class(
        ClassDef::class("com.example.A")
            .type_param("X", vec![])
            .implements(TypeExpr::parameterized(i, vec![TypeExpr::var("X")])),
    );
    // class Base<P, Q>; class Child<Z> extends Base<List<Z>, Z>
    let base = env.add_class(
        ClassDef::class("com.example.Base")
            .type_param("P", vec![])
            .type_param("Q", vec![]),
    );
    let child = env.add_class(
        ClassDef::class("com.example.Child")
            .type_param("Z", vec![])
            .extends(TypeExpr::parameterized(
                base,
                vec![
                    TypeExpr::parameterized(list, vec![TypeExpr::var("Z")]),
                    TypeExpr::var("Z"),
                ],
            )),
    );

    let info = analyze_in_context(
        &env,
        &Bindings::new(),
        &TypeExpr::parameterized(a, vec![string.clone()]),
        &[],
    )
    .unwrap();
    assert_eq!(info.type_generics(i), Some(&bindings([("T", string.clone())])));

    let info = analyze_in_context(
        &env,
        &Bindings::new(),
        &TypeExpr::parameterized(child, vec![string.clone()]),
        &[],
    )
    .unwrap();
    let expected = bindings([
        ("P", TypeExpr::parameterized(list, vec![string.clone()])),
        ("Q", string),
    ]);
    assert_eq!(info.type_generics(base), Some(&expected));
    assert!(info.type_generics(base).unwrap().values().all(TypeExpr::is_variable_free));
}

fn diamond(env: &mut TypeStore) -> (ClassId, ClassId, ClassId, ClassId) {
    // interface I<T>; class B<T> implements I<T>; interface C<T> extends I<T>;
    // class D<T> extends B<T> implements C<T>
    let i = env.add_class(ClassDef::interface("com.example.I").type_param("T", vec![]));
    let b = env.add_class(
        ClassDef::class("com.example.B")
            .type_param("T", vec![])
            .implements(TypeExpr::parameterized(i, vec![TypeExpr::var("T")])),
    );
    let c = env.add_class(
        ClassDef::interface("com.example.C")
            .type_param("T", vec![])
            .implements(TypeExpr::parameterized(i, vec![TypeExpr::var("T")])),
    );
    let d = env.add_class(
        ClassDef::class("com.example.D")
            .type_param("T", vec![])
            .extends(TypeExpr::parameterized(b, vec![TypeExpr::var("T")]))
            .implements(TypeExpr::parameterized(c, vec![TypeExpr::var("T")])),
    );
    (i, b, c, d)
}

#[test]
fn consistent_diamond_resolves_to_single_entry() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let (i, b, c, d) = diamond(&mut env);

    let info = analyze_in_context(
        &env,
        &Bindings::new(),
        &TypeExpr::parameterized(d, vec![string.clone()]),
        &[],
    )
    .unwrap();

    let expected = bindings([("T", string)]);
    for ty in [d, c, i, b] {
        assert_eq!(info.type_generics(ty), Some(&expected));
    }
    assert_eq!(info.composing_types(), &[d, c, i, b]);
}

#[test]
fn conflicting_diamond_fails_naming_the_interface() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let integer = named(&env, "java.lang.Integer");

    // interface I<T>; class B implements I<String>; class D extends B implements I<Integer>
    let i = env.add_class(ClassDef::interface("com.example.I").type_param("T", vec![]));
    let b = env.add_class(
        ClassDef::class("com.example.B").implements(TypeExpr::parameterized(i, vec![string])),
    );
    let d = env.add_class(
        ClassDef::class("com.example.D")
            .extends(TypeExpr::named(b))
            .implements(TypeExpr::parameterized(i, vec![integer])),
    );

    let err = analyze_root(&env, d, &[]).unwrap_err();
    assert_eq!(
        err,
        GenericsError::HierarchyConflict {
            interface: "com.example.I".to_string()
        }
    );
    assert!(err.to_string().contains("com.example.I"), "{err}");

    // Ignoring the conflicting superclass removes the second path.
    let info = analyze_root(&env, d, &[b]).unwrap();
    assert!(info.contains(i));
    assert!(!info.contains(b));
}

#[test]
fn ignored_superclass_truncates_chain() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = id(&env, "java.util.ArrayList");
    let abstract_list = id(&env, "java.util.AbstractList");
    let abstract_collection = id(&env, "java.util.AbstractCollection");

    let info = analyze_root(&env, array_list, &[abstract_list]).unwrap();
    assert!(!info.contains(abstract_list));
    assert!(!info.contains(abstract_collection));
    assert!(info.contains(id(&env, "java.util.Collection")));
    assert_eq!(info.ignored_types(), &[abstract_list]);
}

#[test]
fn ignored_interface_is_not_walked() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = id(&env, "java.util.ArrayList");
    let list = id(&env, "java.util.List");

    let info = analyze_root(&env, array_list, &[list, list]).unwrap();
    assert!(!info.contains(list));
    // Still reachable through AbstractList -> AbstractCollection.
    assert!(info.contains(id(&env, "java.util.Collection")));
    assert_eq!(info.ignored_types(), &[list]);
}

#[test]
fn self_referential_enum_bounds() {
    let mut env = TypeStore::with_minimal_jdk();
    let enum_ = id(&env, "java.lang.Enum");
    let comparable = id(&env, "java.lang.Comparable");

    // enum Color -> class Color extends Enum<Color>
    let color = env.intern_class_id("com.example.Color");
    env.define_class(
        color,
        ClassDef::class("com.example.Color")
            .extends(TypeExpr::parameterized(enum_, vec![TypeExpr::named(color)])),
    );
    let info = analyze_root(&env, color, &[]).unwrap();
    assert_eq!(
        info.type_generics(enum_),
        Some(&bindings([("E", TypeExpr::named(color))]))
    );
    assert_eq!(
        info.type_generics(comparable),
        Some(&bindings([("T", TypeExpr::named(color))]))
    );

    // Raw `Enum` as root: `E extends Enum<E>` can only be approximated.
    let info = analyze_root(&env, enum_, &[]).unwrap();
    let approx = TypeExpr::parameterized(enum_, vec![TypeExpr::Unresolved("E".to_string())]);
    assert_eq!(info.type_generics(enum_), Some(&bindings([("E", approx.clone())])));
    assert_eq!(info.type_generics(comparable), Some(&bindings([("T", approx)])));
}

#[test]
fn unknown_root_is_an_error() {
    let mut env = TypeStore::with_minimal_jdk();
    let placeholder = env.intern_class_id("com.example.Missing");
    assert_eq!(
        analyze_root(&env, placeholder, &[]).unwrap_err(),
        GenericsError::UnknownClass(placeholder)
    );
}

#[test]
fn wrong_supertype_arity_is_an_error() {
    let mut env = TypeStore::with_minimal_jdk();
    let string = named(&env, "java.lang.String");
    let map = id(&env, "java.util.Map");
    let bad = env.add_class(
        ClassDef::class("com.example.BadMap").implements(TypeExpr::parameterized(map, vec![string])),
    );

    let err = analyze_root(&env, bad, &[]).unwrap_err();
    assert_eq!(
        err,
        GenericsError::ArityMismatch {
            class: "java.util.Map".to_string(),
            expected: 2,
            found: 1,
        }
    );
}
