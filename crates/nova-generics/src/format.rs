//! Java-like rendering of type expressions for diagnostics and logs.

use std::fmt;

use crate::{Bindings, ClassId, TypeEnv, TypeExpr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Print `ArrayList` instead of `java.util.ArrayList`.
    pub simple_names: bool,
}

pub struct TypeExprDisplay<'a> {
    env: &'a dyn TypeEnv,
    ty: &'a TypeExpr,
    options: FormatOptions,
}

impl TypeExprDisplay<'_> {
    pub fn simple_names(mut self) -> Self {
        self.options.simple_names = true;
        self
    }
}

pub fn format_type<'a>(env: &'a dyn TypeEnv, ty: &'a TypeExpr) -> TypeExprDisplay<'a> {
    TypeExprDisplay {
        env,
        ty,
        options: FormatOptions::default(),
    }
}

pub fn format_type_with<'a>(
    env: &'a dyn TypeEnv,
    ty: &'a TypeExpr,
    options: FormatOptions,
) -> TypeExprDisplay<'a> {
    TypeExprDisplay { env, ty, options }
}

impl fmt::Display for TypeExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(f, self.env, self.ty, self.options)
    }
}

fn write_class(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeEnv,
    id: ClassId,
    options: FormatOptions,
) -> fmt::Result {
    match env.class(id) {
        Some(def) if options.simple_names => f.write_str(def.simple_name()),
        Some(def) => f.write_str(&def.name),
        None => write!(f, "<unknown class #{}>", id.to_raw()),
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeEnv,
    types: &[TypeExpr],
    sep: &str,
    options: FormatOptions,
) -> fmt::Result {
    for (idx, ty) in types.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write_type(f, env, ty, options)?;
    }
    Ok(())
}

fn write_type(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeEnv,
    ty: &TypeExpr,
    options: FormatOptions,
) -> fmt::Result {
    match ty {
        TypeExpr::Named(id) => write_class(f, env, *id, options),
        TypeExpr::Parameterized(p) => {
            match p.owner.as_deref() {
                Some(owner) => {
                    write_type(f, env, owner, options)?;
                    f.write_str(".")?;
                    // Nested names already carry the owner prefix.
                    let name = env
                        .class(p.raw)
                        .map(|def| def.simple_name().to_string())
                        .unwrap_or_else(|| format!("<unknown class #{}>", p.raw.to_raw()));
                    f.write_str(&name)?;
                }
                None => write_class(f, env, p.raw, options)?,
            }
            if !p.args.is_empty() {
                f.write_str("<")?;
                write_list(f, env, &p.args, ", ", options)?;
                f.write_str(">")?;
            }
            Ok(())
        }
        TypeExpr::TypeVar(name) => f.write_str(name),
        TypeExpr::Unresolved(name) => write!(f, "{name}?"),
        TypeExpr::Array(component) => {
            write_type(f, env, component, options)?;
            f.write_str("[]")
        }
        TypeExpr::Wildcard(w) => {
            f.write_str("?")?;
            if !w.lower_bounds.is_empty() {
                f.write_str(" super ")?;
                return write_list(f, env, &w.lower_bounds, " & ", options);
            }
            let object = env.well_known().object;
            let trivial = matches!(w.upper_bounds.as_slice(), [TypeExpr::Named(id)] if *id == object);
            if !w.upper_bounds.is_empty() && !trivial {
                f.write_str(" extends ")?;
                write_list(f, env, &w.upper_bounds, " & ", options)?;
            }
            Ok(())
        }
    }
}

pub struct BindingsDisplay<'a> {
    env: &'a dyn TypeEnv,
    bindings: &'a Bindings,
    options: FormatOptions,
}

/// `{K=java.lang.String, V=java.lang.Integer}`
pub fn format_bindings<'a>(
    env: &'a dyn TypeEnv,
    bindings: &'a Bindings,
    options: FormatOptions,
) -> BindingsDisplay<'a> {
    BindingsDisplay {
        env,
        bindings,
        options,
    }
}

impl fmt::Display for BindingsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, ty)) in self.bindings.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}=")?;
            write_type(f, self.env, ty, self.options)?;
        }
        f.write_str("}")
    }
}
