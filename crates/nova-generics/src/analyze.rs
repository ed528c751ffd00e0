//! Entry points: root analysis and context-sensitive analysis.

use crate::config::GenericsConfig;
use crate::subst::{raw_class, resolve_parameter_list, resolve_raw_generics, resolve_type};
use crate::walker::{walk_hierarchy, WalkOptions, GENERICS_TARGET};
use crate::{Bindings, ClassId, GenericsError, GenericsInfo, Result, TypeEnv, TypeExpr};

/// Analyze the hierarchy of `ty` used as a root class.
///
/// Type parameters declared by `ty` itself are not bound by anyone, so they resolve to their
/// bounds. The result is a pure function of `(ty, ignore)`.
pub fn analyze_root(env: &dyn TypeEnv, ty: ClassId, ignore: &[ClassId]) -> Result<GenericsInfo> {
    analyze_root_with(env, ty, ignore, &[])
}

fn analyze_root_with(
    env: &dyn TypeEnv,
    ty: ClassId,
    ignore: &[ClassId],
    marker_interfaces: &[String],
) -> Result<GenericsInfo> {
    let def = env.class(ty).ok_or(GenericsError::UnknownClass(ty))?;
    let root_bindings = resolve_raw_generics(env, &def.type_params);
    analyze(env, ty, root_bindings, ignore, marker_interfaces)
}

/// Analyze the hierarchy of `ty` as referenced from inside an already resolved generic context
/// (e.g. the declared type of a field, with `context` being the owning class's bindings).
///
/// The result depends on `context` and must not be cached by type identity alone.
pub fn analyze_in_context(
    env: &dyn TypeEnv,
    context: &Bindings,
    ty: &TypeExpr,
    ignore: &[ClassId],
) -> Result<GenericsInfo> {
    analyze_in_context_with(env, context, ty, ignore, &[])
}

pub(crate) fn analyze_in_context_with(
    env: &dyn TypeEnv,
    context: &Bindings,
    ty: &TypeExpr,
    ignore: &[ClassId],
    marker_interfaces: &[String],
) -> Result<GenericsInfo> {
    let actual = resolve_type(ty, context);
    let root = raw_class(env, &actual)?;
    let root_bindings = match &actual {
        TypeExpr::Parameterized(p) => resolve_parameter_list(env, p, context)?,
        _ => Bindings::new(),
    };
    analyze(env, root, root_bindings, ignore, marker_interfaces)
}

fn analyze(
    env: &dyn TypeEnv,
    root: ClassId,
    root_bindings: Bindings,
    ignore: &[ClassId],
    marker_interfaces: &[String],
) -> Result<GenericsInfo> {
    let mut ignored = ignore.to_vec();
    ignored.sort_unstable();
    ignored.dedup();

    let options = WalkOptions {
        ignore: &ignored,
        marker_interfaces,
    };
    let table = walk_hierarchy(env, root, root_bindings, options)?;
    tracing::debug!(
        target: GENERICS_TARGET,
        root = %crate::env::class_name(env, root),
        types = table.len(),
        "analyzed hierarchy generics"
    );
    Ok(GenericsInfo::new(table, ignored, marker_interfaces.to_vec()))
}

/// Runs analyses with the defaults from a [`GenericsConfig`] applied.
///
/// Ignored type names from the config are resolved against the environment once; names that
/// don't resolve are skipped.
pub struct GenericsAnalyzer<'a> {
    env: &'a dyn TypeEnv,
    ignore: Vec<ClassId>,
    marker_interfaces: Vec<String>,
}

impl<'a> GenericsAnalyzer<'a> {
    pub fn new(env: &'a dyn TypeEnv, config: &GenericsConfig) -> Self {
        let mut ignore = Vec::new();
        for name in &config.ignored_types {
            match env.lookup_class(name) {
                Some(id) => ignore.push(id),
                None => tracing::warn!(
                    target: GENERICS_TARGET,
                    class = %name,
                    "ignored type from config is not known to the type environment"
                ),
            }
        }
        Self {
            env,
            ignore,
            marker_interfaces: config.marker_interfaces.clone(),
        }
    }

    pub fn env(&self) -> &'a dyn TypeEnv {
        self.env
    }

    /// Default ignore set (resolved from the config).
    pub fn ignored_types(&self) -> &[ClassId] {
        &self.ignore
    }

    pub fn marker_interfaces(&self) -> &[String] {
        &self.marker_interfaces
    }

    pub fn analyze(&self, ty: ClassId) -> Result<GenericsInfo> {
        self.analyze_with_ignore(ty, &[])
    }

    pub fn analyze_with_ignore(&self, ty: ClassId, extra: &[ClassId]) -> Result<GenericsInfo> {
        let ignore = self.merged_ignore(extra);
        analyze_root_with(self.env, ty, &ignore, &self.marker_interfaces)
    }

    pub fn analyze_in_context(&self, context: &Bindings, ty: &TypeExpr) -> Result<GenericsInfo> {
        analyze_in_context_with(
            self.env,
            context,
            ty,
            &self.ignore,
            &self.marker_interfaces,
        )
    }

    fn merged_ignore(&self, extra: &[ClassId]) -> Vec<ClassId> {
        let mut ignore = self.ignore.clone();
        ignore.extend_from_slice(extra);
        ignore
    }
}
