use crate::env::class_name;
use crate::subst::{raw_class, resolve_type};
use crate::walker::HierarchyTable;
use crate::analyze::analyze_in_context_with;
use crate::{Bindings, ClassId, GenericsError, Result, TypeEnv, TypeExpr};

/// Resolved generics of a whole hierarchy: for the root type and every superclass and interface
/// above it, the value of each declared type parameter.
///
/// Results produced by [`crate::analyze_root`] depend only on the root type, the ignore set and
/// the marker interfaces, and may be cached (see [`crate::GenericsCache`]); results of [`crate::analyze_in_context`]
/// depend on the caller's bindings and must not be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericsInfo {
    table: HierarchyTable,
    ignored: Vec<ClassId>,
    marker_interfaces: Vec<String>,
}

impl GenericsInfo {
    pub(crate) fn new(
        table: HierarchyTable,
        ignored: Vec<ClassId>,
        marker_interfaces: Vec<String>,
    ) -> Self {
        Self {
            table,
            ignored,
            marker_interfaces,
        }
    }

    pub fn root_class(&self) -> ClassId {
        self.table.root()
    }

    /// Ignore set the analysis ran with, deduplicated and sorted by id.
    pub fn ignored_types(&self) -> &[ClassId] {
        &self.ignored
    }

    /// Marker interfaces the analysis walked through without recording.
    pub fn marker_interfaces(&self) -> &[String] {
        &self.marker_interfaces
    }

    /// All types of the hierarchy (root included) in walk order.
    pub fn composing_types(&self) -> &[ClassId] {
        self.table.types()
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.table.contains(id)
    }

    /// Bindings of `id`'s declared type parameters, or `None` if the walk never reached `id`.
    pub fn type_generics(&self, id: ClassId) -> Option<&Bindings> {
        self.table.get(id)
    }

    pub fn type_generics_or_err(&self, env: &dyn TypeEnv, id: ClassId) -> Result<&Bindings> {
        self.table
            .get(id)
            .ok_or_else(|| GenericsError::UnknownHierarchyType {
                class: class_name(env, id),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Bindings)> + '_ {
        self.table.iter()
    }

    /// View the hierarchy from `id`: resolve types declared inside `id` (fields, method
    /// signatures) against its bindings.
    pub fn context<'a>(&'a self, env: &'a dyn TypeEnv, id: ClassId) -> Result<GenericsContext<'a>> {
        let bindings = self.type_generics_or_err(env, id)?;
        Ok(GenericsContext {
            env,
            info: self,
            current: id,
            bindings,
        })
    }
}

/// One type of an analyzed hierarchy together with its bindings.
#[derive(Clone, Copy)]
pub struct GenericsContext<'a> {
    env: &'a dyn TypeEnv,
    info: &'a GenericsInfo,
    current: ClassId,
    bindings: &'a Bindings,
}

impl std::fmt::Debug for GenericsContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericsContext")
            .field("current", &self.current)
            .field("bindings", self.bindings)
            .finish_non_exhaustive()
    }
}

impl<'a> GenericsContext<'a> {
    pub fn current_class(&self) -> ClassId {
        self.current
    }

    pub fn info(&self) -> &'a GenericsInfo {
        self.info
    }

    pub fn generics_map(&self) -> &'a Bindings {
        self.bindings
    }

    pub fn generic(&self, name: &str) -> Option<&'a TypeExpr> {
        self.bindings.get(name)
    }

    /// Switch to another type of the same hierarchy.
    pub fn type_context(&self, id: ClassId) -> Result<GenericsContext<'a>> {
        self.info.context(self.env, id)
    }

    pub fn resolve_type(&self, ty: &TypeExpr) -> TypeExpr {
        resolve_type(ty, self.bindings)
    }

    pub fn resolve_class(&self, ty: &TypeExpr) -> Result<ClassId> {
        raw_class(self.env, &self.resolve_type(ty))
    }

    /// Analyze the hierarchy of a type declared inside the current type (e.g. a field's type).
    ///
    /// The nested analysis inherits this hierarchy's ignore set and marker interfaces; `ignore`
    /// adds to them. The result depends on this context's bindings and is not cacheable.
    pub fn analyze_type(&self, ty: &TypeExpr, ignore: &[ClassId]) -> Result<GenericsInfo> {
        let mut merged = self.info.ignored.clone();
        merged.extend_from_slice(ignore);
        analyze_in_context_with(
            self.env,
            self.bindings,
            ty,
            &merged,
            &self.info.marker_interfaces,
        )
    }
}
