//! Type variable substitution.

use crate::env::class_name;
use crate::format::format_type;
use crate::{
    Bindings, ClassId, GenericsError, ParameterizedType, Result, TypeEnv, TypeExpr,
    TypeParamDef, WildcardType,
};

/// Replace every type variable in `ty` with its value from `bindings`.
///
/// Variables without a binding become [`TypeExpr::Unresolved`]; everything else is rebuilt
/// structurally. Owner types of parameterized types are carried over untouched.
pub fn resolve_type(ty: &TypeExpr, bindings: &Bindings) -> TypeExpr {
    match ty {
        TypeExpr::Named(id) => TypeExpr::Named(*id),
        TypeExpr::TypeVar(name) => match bindings.get(name) {
            Some(bound) => bound.clone(),
            None => TypeExpr::Unresolved(name.clone()),
        },
        TypeExpr::Parameterized(p) => TypeExpr::Parameterized(ParameterizedType {
            raw: p.raw,
            args: resolve_all(&p.args, bindings),
            owner: p.owner.clone(),
        }),
        TypeExpr::Array(component) => TypeExpr::Array(Box::new(resolve_type(component, bindings))),
        TypeExpr::Wildcard(w) => TypeExpr::Wildcard(WildcardType {
            upper_bounds: resolve_all(&w.upper_bounds, bindings),
            lower_bounds: resolve_all(&w.lower_bounds, bindings),
        }),
        TypeExpr::Unresolved(name) => TypeExpr::Unresolved(name.clone()),
    }
}

fn resolve_all(types: &[TypeExpr], bindings: &Bindings) -> Vec<TypeExpr> {
    types.iter().map(|ty| resolve_type(ty, bindings)).collect()
}

/// Project `bindings` into the parameter namespace of `ty.raw`.
///
/// For `class A<T> implements I<List<T>>` with `T -> String`, resolving `I<List<T>>` yields
/// `{X -> List<String>}` where `X` is `I`'s declared parameter.
pub fn resolve_parameter_list(
    env: &dyn TypeEnv,
    ty: &ParameterizedType,
    bindings: &Bindings,
) -> Result<Bindings> {
    let def = env.class(ty.raw).ok_or(GenericsError::UnknownClass(ty.raw))?;
    if def.type_params.len() != ty.args.len() {
        return Err(GenericsError::ArityMismatch {
            class: def.name.clone(),
            expected: def.type_params.len(),
            found: ty.args.len(),
        });
    }

    Ok(def
        .type_params
        .iter()
        .zip(&ty.args)
        .map(|(param, arg)| (param.name.clone(), resolve_type(arg, bindings)))
        .collect())
}

/// Bindings for a type used without type arguments: every parameter resolves to its first
/// declared bound.
///
/// Parameters are processed left to right and each bound sees only the parameters bootstrapped
/// before it. `<T extends Number, K extends T>` gives `{T -> Number, K -> Number}`, while a bound
/// mentioning itself or a later parameter leaves [`TypeExpr::Unresolved`] at that occurrence.
pub fn resolve_raw_generics(env: &dyn TypeEnv, params: &[TypeParamDef]) -> Bindings {
    let mut bindings = Bindings::with_capacity(params.len());
    for param in params {
        let resolved = match param.upper_bounds.first() {
            Some(bound) => resolve_type(bound, &bindings),
            None => TypeExpr::Named(env.well_known().object),
        };
        bindings.insert(param.name.clone(), resolved);
    }
    bindings
}

/// Class identity of a type expression.
///
/// Variables (bound or not) and bound-less wildcards fall back to the top type; a wildcard uses
/// its first upper bound. Arrays have no identity in a [`TypeEnv`].
pub fn raw_class(env: &dyn TypeEnv, ty: &TypeExpr) -> Result<ClassId> {
    match ty {
        TypeExpr::Named(id) => Ok(*id),
        TypeExpr::Parameterized(p) => Ok(p.raw),
        TypeExpr::Wildcard(w) => match w.upper_bounds.first() {
            Some(upper) => raw_class(env, upper),
            None => Ok(env.well_known().object),
        },
        TypeExpr::TypeVar(_) | TypeExpr::Unresolved(_) => Ok(env.well_known().object),
        TypeExpr::Array(_) => Err(GenericsError::NoRawClass {
            ty: format_type(env, ty).to_string(),
        }),
    }
}

/// Class identity of a declared supertype (`extends`/`implements` clause).
///
/// Only plain and parameterized class references are valid there.
pub(crate) fn supertype_class(env: &dyn TypeEnv, owner: ClassId, ty: &TypeExpr) -> Result<ClassId> {
    match ty {
        TypeExpr::Named(id) => Ok(*id),
        TypeExpr::Parameterized(p) => Ok(p.raw),
        _ => Err(GenericsError::UnsupportedSupertype {
            owner: class_name(env, owner),
            ty: format_type(env, ty).to_string(),
        }),
    }
}
