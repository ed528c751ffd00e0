//! Memoization of root analyses.
//!
//! Only root analyses are cacheable: they are a pure function of the root type, the ignore set
//! and the marker interfaces. A cache is tied to one [`TypeEnv`] (and one [`GenericsAnalyzer`] when used
//! through it); sharing a cache between environments returns stale results.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::analyze::GenericsAnalyzer;
use crate::walker::GENERICS_TARGET;
use crate::{analyze_root, ClassId, GenericsInfo, Result, TypeEnv};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    root: ClassId,
    /// Sorted and deduplicated, so ignore-set order doesn't split entries.
    ignore: Vec<ClassId>,
    /// Sorted and deduplicated.
    marker_interfaces: Vec<String>,
}

impl CacheKey {
    fn new(root: ClassId, ignore: &[ClassId], marker_interfaces: &[String]) -> Self {
        let mut ignore = ignore.to_vec();
        ignore.sort_unstable();
        ignore.dedup();
        let mut marker_interfaces = marker_interfaces.to_vec();
        marker_interfaces.sort_unstable();
        marker_interfaces.dedup();
        Self {
            root,
            ignore,
            marker_interfaces,
        }
    }
}

#[derive(Debug, Default)]
pub struct GenericsCache {
    entries: RwLock<HashMap<CacheKey, Arc<GenericsInfo>>>,
}

impl GenericsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze_root(
        &self,
        env: &dyn TypeEnv,
        ty: ClassId,
        ignore: &[ClassId],
    ) -> Result<Arc<GenericsInfo>> {
        self.get_or_try_insert(CacheKey::new(ty, ignore, &[]), || {
            analyze_root(env, ty, ignore)
        })
    }

    /// Like [`GenericsAnalyzer::analyze_with_ignore`], memoized.
    pub fn analyze_with(
        &self,
        analyzer: &GenericsAnalyzer<'_>,
        ty: ClassId,
        extra_ignore: &[ClassId],
    ) -> Result<Arc<GenericsInfo>> {
        let mut ignore = analyzer.ignored_types().to_vec();
        ignore.extend_from_slice(extra_ignore);
        let key = CacheKey::new(ty, &ignore, analyzer.marker_interfaces());
        self.get_or_try_insert(key, || {
            analyzer.analyze_with_ignore(ty, extra_ignore)
        })
    }

    /// Errors are returned to the caller and never stored. Two threads missing the same key may
    /// both compute; the first stored value wins and is returned to both.
    fn get_or_try_insert(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<GenericsInfo>,
    ) -> Result<Arc<GenericsInfo>> {
        if let Some(hit) = self.entries.read().get(&key) {
            return Ok(hit.clone());
        }

        let computed = Arc::new(compute()?);
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| {
            tracing::trace!(
                target: GENERICS_TARGET,
                root = ?computed.root_class(),
                "cached hierarchy generics"
            );
            computed.clone()
        });
        Ok(entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
