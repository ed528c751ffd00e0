//! Hierarchy generics resolution for Java-like class models.
//!
//! Given a root type such as `ArrayList<String>`, this crate computes, for every superclass and
//! interface reachable from it, what each declared type parameter resolves to:
//!
//! ```text
//! ArrayList          {E=String}
//! List               {E=String}
//! Collection         {E=String}
//! Iterable           {T=String}
//! AbstractList       {E=String}
//! AbstractCollection {E=String}
//! ```
//!
//! Class metadata comes from a [`TypeEnv`]. Two entry points exist: [`analyze_root`] for a type
//! analyzed on its own (cacheable, see [`GenericsCache`]) and [`analyze_in_context`] for a type
//! referenced from an already resolved generic context (e.g. a field type inside a
//! parameterized owner).

mod analyze;
mod cache;
mod config;
mod env;
mod error;
mod format;
mod info;
mod subst;
mod ty;
mod walker;

pub use analyze::{analyze_in_context, analyze_root, GenericsAnalyzer};
pub use cache::GenericsCache;
pub use config::{ConfigError, GenericsConfig};
pub use env::{class_name, ClassDef, ClassKind, TypeEnv, TypeParamDef, TypeStore, WellKnownTypes};
pub use error::{GenericsError, Result};
pub use format::{
    format_bindings, format_type, format_type_with, BindingsDisplay, FormatOptions,
    TypeExprDisplay,
};
pub use info::{GenericsContext, GenericsInfo};
pub use subst::{raw_class, resolve_parameter_list, resolve_raw_generics, resolve_type};
pub use ty::{Bindings, ClassId, ParameterizedType, TypeExpr, WildcardType};
pub use walker::{walk_hierarchy, HierarchyBuilder, HierarchyTable, WalkOptions, GENERICS_TARGET};
