use nova_generics::{
    analyze_in_context, analyze_root, format_type, Bindings, ClassDef, ClassId, GenericsError,
    TypeEnv, TypeExpr, TypeStore,
};

use pretty_assertions::assert_eq;

struct Fixture {
    env: TypeStore,
    string: TypeExpr,
    list: ClassId,
    holder: ClassId,
    sub_holder: ClassId,
}

/// ```java
/// class Holder<T> { List<? extends T>[] items; List<T> list; T value; }
/// class SubHolder extends Holder<String> {}
/// ```
fn fixture() -> Fixture {
    let mut env = TypeStore::with_minimal_jdk();
    let object = TypeExpr::named(env.well_known().object);
    let string = TypeExpr::named(env.class_id("java.lang.String").unwrap());
    let list = env.class_id("java.util.List").unwrap();
    let holder = env.add_class(
        ClassDef::class("com.example.Holder")
            .type_param("T", vec![object.clone()])
            .extends(object),
    );
    let sub_holder = env.add_class(
        ClassDef::class("com.example.SubHolder")
            .extends(TypeExpr::parameterized(holder, vec![string.clone()])),
    );
    Fixture {
        env,
        string,
        list,
        holder,
        sub_holder,
    }
}

#[test]
fn field_type_resolves_through_owner_bindings() {
    let f = fixture();
    let info = analyze_root(&f.env, f.sub_holder, &[]).unwrap();
    let ctx = info.context(&f.env, f.holder).unwrap();
    assert_eq!(ctx.current_class(), f.holder);
    assert_eq!(ctx.generic("T"), Some(&f.string));

    // List<? extends T>[] in context T -> String
    let items = TypeExpr::array(TypeExpr::parameterized(
        f.list,
        vec![TypeExpr::wildcard_extends(TypeExpr::var("T"))],
    ));
    let resolved = ctx.resolve_type(&items);
    assert_eq!(
        resolved,
        TypeExpr::array(TypeExpr::parameterized(
            f.list,
            vec![TypeExpr::wildcard_extends(f.string.clone())],
        ))
    );
    assert_eq!(
        format_type(&f.env, &resolved).simple_names().to_string(),
        "List<? extends String>[]"
    );
}

#[test]
fn field_type_hierarchy_is_analyzed_in_context() {
    let f = fixture();
    let info = analyze_root(&f.env, f.sub_holder, &[]).unwrap();
    let ctx = info.context(&f.env, f.holder).unwrap();

    let list_field = TypeExpr::parameterized(f.list, vec![TypeExpr::var("T")]);
    assert_eq!(ctx.resolve_class(&list_field).unwrap(), f.list);

    let field_info = ctx.analyze_type(&list_field, &[]).unwrap();
    assert_eq!(field_info.root_class(), f.list);
    let iterable = f.env.class_id("java.lang.Iterable").unwrap();
    let expected: Bindings = [("T", f.string.clone())].into_iter().collect();
    assert_eq!(field_info.type_generics(iterable), Some(&expected));
}

#[test]
fn variable_field_resolves_to_bound_class() {
    let f = fixture();
    let array_list = f.env.class_id("java.util.ArrayList").unwrap();
    let abstract_list = f.env.class_id("java.util.AbstractList").unwrap();

    // T value; with T -> ArrayList<String>
    let context: Bindings = [(
        "T",
        TypeExpr::parameterized(array_list, vec![f.string.clone()]),
    )]
    .into_iter()
    .collect();
    let info = analyze_in_context(&f.env, &context, &TypeExpr::var("T"), &[]).unwrap();

    assert_eq!(info.root_class(), array_list);
    let expected: Bindings = [("E", f.string.clone())].into_iter().collect();
    assert_eq!(info.type_generics(abstract_list), Some(&expected));
}

#[test]
fn unbound_context_variable_analyzes_top_type() {
    let f = fixture();
    let info = analyze_in_context(&f.env, &Bindings::new(), &TypeExpr::var("T"), &[]).unwrap();
    assert_eq!(info.root_class(), f.env.well_known().object);
    assert_eq!(info.composing_types().len(), 1);
}

#[test]
fn array_typed_context_has_no_class() {
    let f = fixture();
    let err = analyze_in_context(
        &f.env,
        &Bindings::new(),
        &TypeExpr::array(f.string.clone()),
        &[],
    )
    .unwrap_err();
    assert_eq!(
        err,
        GenericsError::NoRawClass {
            ty: "java.lang.String[]".to_string()
        }
    );
}

#[test]
fn unreached_type_is_reported() {
    let f = fixture();
    let info = analyze_root(&f.env, f.holder, &[]).unwrap();
    assert_eq!(info.type_generics(f.sub_holder), None);

    let err = info.context(&f.env, f.sub_holder).unwrap_err();
    assert_eq!(
        err,
        GenericsError::UnknownHierarchyType {
            class: "com.example.SubHolder".to_string()
        }
    );
}

#[test]
fn context_can_switch_between_hierarchy_types() {
    let f = fixture();
    let info = analyze_root(&f.env, f.sub_holder, &[]).unwrap();
    let root_ctx = info.context(&f.env, f.sub_holder).unwrap();
    assert!(root_ctx.generics_map().is_empty());

    let holder_ctx = root_ctx.type_context(f.holder).unwrap();
    assert_eq!(holder_ctx.generic("T"), Some(&f.string));
    assert_eq!(holder_ctx.info(), &info);
}
