use crate::ClassId;

pub type Result<T> = std::result::Result<T, GenericsError>;

/// Errors produced while resolving hierarchy generics.
///
/// Unbound type variables are not errors: they surface as [`crate::TypeExpr::Unresolved`]
/// inside the produced bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenericsError {
    #[error("duplicate interface {interface} declaration in hierarchy: can't properly resolve generics")]
    HierarchyConflict { interface: String },

    #[error("class {0:?} is not known to the type environment")]
    UnknownClass(ClassId),

    #[error("unsupported supertype {ty} declared by {owner}: expected a class or parameterized type")]
    UnsupportedSupertype { owner: String, ty: String },

    #[error("{class} declares {expected} type parameter(s) but {found} type argument(s) were supplied")]
    ArityMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("type {ty} has no class identity")]
    NoRawClass { ty: String },

    #[error("type {class} is not part of the analyzed hierarchy")]
    UnknownHierarchyType { class: String },
}
