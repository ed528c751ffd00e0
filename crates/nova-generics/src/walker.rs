//! Hierarchy walk: computes the bindings of every superclass and interface reachable from a
//! root type.
//!
//! At each level the directly implemented interfaces are handled first (in declaration order,
//! recursing into each), then the walk ascends to the superclass. Every supertype's bindings are
//! obtained by substituting its declared type arguments through the bindings of the type that
//! declares it, so renamed variables (`class A<X> implements I<X>`) chain correctly.

use std::collections::HashMap;

use crate::env::class_name;
use crate::format::{format_bindings, FormatOptions};
use crate::subst::{resolve_parameter_list, resolve_raw_generics, supertype_class};
use crate::{Bindings, ClassId, GenericsError, Result, TypeEnv, TypeExpr};

/// Tracing target for hierarchy resolution events.
pub const GENERICS_TARGET: &str = "nova.generics";

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions<'a> {
    /// Supertypes to leave out. An ignored superclass also hides everything above it.
    pub ignore: &'a [ClassId],
    /// Simple names of non-generic marker interfaces that are walked through but not recorded
    /// (e.g. `GroovyObject`, implemented by every Groovy class).
    pub marker_interfaces: &'a [String],
}

/// Frozen result of a hierarchy walk: every reached type and its bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTable {
    root: ClassId,
    types: HashMap<ClassId, Bindings>,
    /// First-recorded order, for deterministic iteration.
    order: Vec<ClassId>,
}

impl HierarchyTable {
    pub fn root(&self) -> ClassId {
        self.root
    }

    pub fn get(&self, id: ClassId) -> Option<&Bindings> {
        self.types.get(&id)
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.types.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Types in the order the walk first reached them, root first.
    pub fn types(&self) -> &[ClassId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Bindings)> + '_ {
        self.order.iter().map(move |id| (*id, &self.types[id]))
    }
}

/// Mutable table used while walking. Interfaces are conflict-checked, superclasses are not
/// (a class has a single superclass chain).
#[derive(Debug)]
pub struct HierarchyBuilder {
    root: ClassId,
    types: HashMap<ClassId, Bindings>,
    order: Vec<ClassId>,
}

impl HierarchyBuilder {
    pub fn new(root: ClassId, root_bindings: Bindings) -> Self {
        let mut builder = HierarchyBuilder {
            root,
            types: HashMap::new(),
            order: Vec::new(),
        };
        builder.insert(root, root_bindings);
        builder
    }

    pub fn get(&self, id: ClassId) -> Option<&Bindings> {
        self.types.get(&id)
    }

    /// Record bindings for an interface reached through some inheritance path.
    ///
    /// Reaching the same interface again is fine as long as the bindings are structurally equal;
    /// otherwise the hierarchy has two truths for one type and resolution fails.
    pub fn record_interface(
        &mut self,
        env: &dyn TypeEnv,
        id: ClassId,
        bindings: Bindings,
    ) -> Result<()> {
        if let Some(existing) = self.types.get(&id) {
            if *existing != bindings {
                let interface = class_name(env, id);
                tracing::debug!(
                    target: GENERICS_TARGET,
                    interface = %interface,
                    existing = %format_bindings(env, existing, FormatOptions::default()),
                    found = %format_bindings(env, &bindings, FormatOptions::default()),
                    "conflicting generics for interface reached through multiple paths"
                );
                return Err(GenericsError::HierarchyConflict { interface });
            }
            return Ok(());
        }
        self.insert(id, bindings);
        Ok(())
    }

    pub fn record_superclass(&mut self, id: ClassId, bindings: Bindings) {
        self.insert(id, bindings);
    }

    fn insert(&mut self, id: ClassId, bindings: Bindings) {
        if self.types.insert(id, bindings).is_none() {
            self.order.push(id);
        }
    }

    pub fn finish(self) -> HierarchyTable {
        HierarchyTable {
            root: self.root,
            types: self.types,
            order: self.order,
        }
    }
}

/// Walk the hierarchy above `root`, starting from `root_bindings`.
pub fn walk_hierarchy(
    env: &dyn TypeEnv,
    root: ClassId,
    root_bindings: Bindings,
    options: WalkOptions<'_>,
) -> Result<HierarchyTable> {
    let mut walker = Walker {
        env,
        options,
        builder: HierarchyBuilder::new(root, root_bindings),
    };
    walker.analyze_type(root)?;
    Ok(walker.builder.finish())
}

struct Walker<'a> {
    env: &'a dyn TypeEnv,
    options: WalkOptions<'a>,
    builder: HierarchyBuilder,
}

impl Walker<'_> {
    fn is_ignored(&self, id: ClassId) -> bool {
        self.options.ignore.contains(&id)
    }

    fn bindings_of(&self, id: ClassId) -> Bindings {
        // Unrecorded marker interfaces are non-generic.
        self.builder.get(id).cloned().unwrap_or_default()
    }

    fn analyze_type(&mut self, ty: ClassId) -> Result<()> {
        let env = self.env;
        let object = env.well_known().object;
        let mut current = ty;
        loop {
            let def = env.class(current).ok_or(GenericsError::UnknownClass(current))?;
            for iface in &def.interfaces {
                self.analyze_interface(current, iface)?;
            }
            if def.is_interface() {
                break;
            }

            let Some(super_class) = &def.super_class else {
                break;
            };
            let next = supertype_class(env, current, super_class)?;
            if next == object || self.is_ignored(next) {
                break;
            }

            let bindings = self.supertype_bindings(current, super_class, next)?;
            self.trace_recorded(next, &bindings);
            self.builder.record_superclass(next, bindings);
            current = next;
        }
        Ok(())
    }

    fn analyze_interface(&mut self, owner: ClassId, iface: &TypeExpr) -> Result<()> {
        let env = self.env;
        let id = supertype_class(env, owner, iface)?;
        if self.is_ignored(id) {
            return Ok(());
        }

        let bindings = self.supertype_bindings(owner, iface, id)?;
        let def = env.class(id).ok_or(GenericsError::UnknownClass(id))?;
        let marker = def.type_params.is_empty()
            && self
                .options
                .marker_interfaces
                .iter()
                .any(|name| name == def.simple_name());
        if marker {
            tracing::trace!(
                target: GENERICS_TARGET,
                interface = %def.name,
                "skipping marker interface"
            );
        } else {
            self.trace_recorded(id, &bindings);
            self.builder.record_interface(env, id, bindings)?;
        }

        self.analyze_type(id)
    }

    /// Bindings of `target` as declared by `owner` through `declared` (`extends`/`implements`).
    fn supertype_bindings(
        &self,
        owner: ClassId,
        declared: &TypeExpr,
        target: ClassId,
    ) -> Result<Bindings> {
        let env = self.env;
        if let TypeExpr::Parameterized(p) = declared {
            return resolve_parameter_list(env, p, &self.bindings_of(owner));
        }
        let def = env.class(target).ok_or(GenericsError::UnknownClass(target))?;
        if def.type_params.is_empty() {
            Ok(Bindings::new())
        } else {
            // Raw usage: the declaring type didn't supply type arguments.
            Ok(resolve_raw_generics(env, &def.type_params))
        }
    }

    fn trace_recorded(&self, id: ClassId, bindings: &Bindings) {
        tracing::trace!(
            target: GENERICS_TARGET,
            class = %class_name(self.env, id),
            generics = %format_bindings(self.env, bindings, FormatOptions { simple_names: true }),
            "resolved supertype generics"
        );
    }
}
