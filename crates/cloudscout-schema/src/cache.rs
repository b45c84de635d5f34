//! # Composed Schema Cache
//!
//! Memoizes composed documents per [`PlayerSchemaSpec`]. Composition is
//! deterministic and the catalog never changes after startup, so entries
//! never go stale and the cache has no eviction or invalidation.
//!
//! The lock is `parking_lot::RwLock` and is never held while composing:
//! concurrent misses on the same key may both compose, and the first insert
//! wins. Both results are identical.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::compose::PlayerSchemaSpec;

/// Thread-safe, cloneable memo of composed schema documents.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    entries: Arc<RwLock<HashMap<PlayerSchemaSpec, Arc<Value>>>>,
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the document for `spec`, composing it on first use.
    pub fn get_or_compose(&self, spec: &PlayerSchemaSpec) -> Arc<Value> {
        if let Some(document) = self.entries.read().get(spec) {
            return Arc::clone(document);
        }

        tracing::debug!(sport = %spec.sport(), "schema cache miss");
        let composed = Arc::new(spec.build().to_value());

        let mut guard = self.entries.write();
        Arc::clone(guard.entry(spec.clone()).or_insert(composed))
    }

    /// Whether `spec` has been composed already.
    pub fn contains(&self, spec: &PlayerSchemaSpec) -> bool {
        self.entries.read().contains_key(spec)
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been composed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudscout_core::{Sport, StatCatalog, StatGroup};
    use std::thread;

    #[test]
    fn memoizes_per_spec() {
        let cache = SchemaCache::new();
        let catalog = StatCatalog::builtin();
        let spec = PlayerSchemaSpec::from_catalog(&catalog, Sport::Basketball);

        assert!(cache.is_empty());
        let first = cache.get_or_compose(&spec);
        let second = cache.get_or_compose(&spec);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&spec));
    }

    #[test]
    fn group_order_is_part_of_the_key() {
        let cache = SchemaCache::new();
        let a = StatGroup::new(Sport::Basketball, "general", ["points"]).unwrap();
        let b = StatGroup::new(Sport::Basketball, "defense", ["steals"]).unwrap();

        let ab = PlayerSchemaSpec::new(Sport::Basketball, vec![a.clone(), b.clone()]);
        let ba = PlayerSchemaSpec::new(Sport::Basketball, vec![b, a]);
        cache.get_or_compose(&ab);
        cache.get_or_compose(&ba);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cached_document_matches_fresh_composition() {
        let cache = SchemaCache::new();
        let catalog = StatCatalog::builtin();
        let spec = PlayerSchemaSpec::from_catalog(&catalog, Sport::Volleyball);
        assert_eq!(*cache.get_or_compose(&spec), spec.build().to_value());
    }

    #[test]
    fn concurrent_population_yields_one_entry_per_spec() {
        let cache = SchemaCache::new();
        let catalog = Arc::new(StatCatalog::builtin());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || {
                    let sport = Sport::all()[i % Sport::all().len()];
                    let spec = PlayerSchemaSpec::from_catalog(&catalog, sport);
                    cache.get_or_compose(&spec)
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), Sport::all().len());
    }
}
