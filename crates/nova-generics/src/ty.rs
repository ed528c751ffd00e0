//! Type expressions and binding environments.
//!
//! A [`TypeExpr`] describes a (possibly generic) type reference as it appears in a class
//! declaration: `List<? extends T>[]`, `Map.Entry<K, V>`, `T`, ... Values are immutable and
//! compared structurally, so the same binding rebuilt along two different hierarchy paths
//! compares equal.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stable identity of a class or interface inside a [`crate::TypeEnv`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterizedType {
    pub raw: ClassId,
    /// Type arguments, positionally matching the raw class's declared type parameters.
    pub args: Vec<TypeExpr>,
    /// Enclosing type for member types (`Outer<String>.Inner<Integer>`).
    pub owner: Option<Box<TypeExpr>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WildcardType {
    pub upper_bounds: Vec<TypeExpr>,
    pub lower_bounds: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A concrete class or interface used without type arguments.
    Named(ClassId),
    Parameterized(ParameterizedType),
    /// A reference to a type parameter by name.
    TypeVar(String),
    Wildcard(WildcardType),
    /// Array of a possibly generic component (`T[]`, `List<String>[]`).
    Array(Box<TypeExpr>),
    /// Substitution result for a type variable that had no binding.
    ///
    /// Keeps the variable name so consumers can report what was missing.
    Unresolved(String),
}

impl TypeExpr {
    pub fn named(id: ClassId) -> Self {
        TypeExpr::Named(id)
    }

    pub fn parameterized(raw: ClassId, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Parameterized(ParameterizedType {
            raw,
            args,
            owner: None,
        })
    }

    pub fn parameterized_with_owner(raw: ClassId, args: Vec<TypeExpr>, owner: TypeExpr) -> Self {
        TypeExpr::Parameterized(ParameterizedType {
            raw,
            args,
            owner: Some(Box::new(owner)),
        })
    }

    pub fn var(name: impl Into<String>) -> Self {
        TypeExpr::TypeVar(name.into())
    }

    pub fn array(component: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(component))
    }

    /// `?`
    pub fn wildcard_unbounded() -> Self {
        TypeExpr::Wildcard(WildcardType {
            upper_bounds: Vec::new(),
            lower_bounds: Vec::new(),
        })
    }

    /// `? extends upper`
    pub fn wildcard_extends(upper: TypeExpr) -> Self {
        TypeExpr::Wildcard(WildcardType {
            upper_bounds: vec![upper],
            lower_bounds: Vec::new(),
        })
    }

    /// `? super lower`
    pub fn wildcard_super(lower: TypeExpr) -> Self {
        TypeExpr::Wildcard(WildcardType {
            upper_bounds: Vec::new(),
            lower_bounds: vec![lower],
        })
    }

    /// Returns `true` if no [`TypeExpr::TypeVar`] occurs anywhere in the expression.
    pub fn is_variable_free(&self) -> bool {
        !self.any(&mut |ty| matches!(ty, TypeExpr::TypeVar(_)))
    }

    /// Returns `true` if an unresolved marker occurs anywhere in the expression.
    pub fn contains_unresolved(&self) -> bool {
        self.any(&mut |ty| matches!(ty, TypeExpr::Unresolved(_)))
    }

    fn any(&self, pred: &mut dyn FnMut(&TypeExpr) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            TypeExpr::Named(_) | TypeExpr::TypeVar(_) | TypeExpr::Unresolved(_) => false,
            TypeExpr::Parameterized(p) => {
                p.args.iter().any(|arg| arg.any(pred))
                    || p.owner.as_deref().is_some_and(|owner| owner.any(pred))
            }
            TypeExpr::Wildcard(w) => w
                .upper_bounds
                .iter()
                .chain(w.lower_bounds.iter())
                .any(|bound| bound.any(pred)),
            TypeExpr::Array(component) => component.any(pred),
        }
    }
}

/// Ordered mapping from type parameter name to its resolved type, scoped to one declaring type.
///
/// Iteration order is the declaring type's parameter declaration order, and equality is
/// order-sensitive: callers recombine these maps positionally with declared parameter lists.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    map: IndexMap<String, TypeExpr>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity),
        }
    }

    /// Bind `name`; rebinding an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, ty: TypeExpr) -> Option<TypeExpr> {
        self.map.insert(name.into(), ty)
    }

    pub fn get(&self, name: &str) -> Option<&TypeExpr> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeExpr)> + '_ {
        self.map.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &TypeExpr> + '_ {
        self.map.values()
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        // `IndexMap`'s own equality ignores order.
        self.map.len() == other.map.len() && self.map.iter().eq(other.map.iter())
    }
}

impl Eq for Bindings {}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<N: Into<String>> FromIterator<(N, TypeExpr)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (N, TypeExpr)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(name, ty)| (name.into(), ty)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a TypeExpr);
    type IntoIter = indexmap::map::Iter<'a, String, TypeExpr>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
