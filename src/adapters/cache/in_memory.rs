//! In-Memory Result Cache Adapter
//!
//! Keeps results in a process-local map. Useful for repeated evaluations of
//! the same problem and for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::model::DecisionResult;
use crate::ports::{CacheKey, ResultCache};

/// In-memory storage for ranking results
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultCache {
    entries: Arc<RwLock<HashMap<CacheKey, DecisionResult>>>,
}

impl InMemoryResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached results
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl ResultCache for InMemoryResultCache {
    fn get(&self, key: &CacheKey) -> Option<DecisionResult> {
        // A poisoned lock behaves like a miss
        self.entries.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: CacheKey, result: DecisionResult) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key, result);
            }
            Err(_) => tracing::warn!(algorithm = key.algorithm(), "Result cache lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::algorithms::WeightedSum;
    use crate::domain::model::{Criterion, DecisionProblem, ResultMetadata, ScoreOrder};

    fn key() -> CacheKey {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["a", "b"])
            .criterion(Criterion::benefit("c", 1.0).unwrap())
            .row("a", &[1.0])
            .row("b", &[2.0])
            .build()
            .unwrap();
        CacheKey::new("wsm", &WeightedSum::default(), &problem).unwrap()
    }

    fn result() -> DecisionResult {
        DecisionResult::from_scores(
            &["a".to_string(), "b".to_string()],
            &[0.0, 1.0],
            ResultMetadata::new("wsm", ScoreOrder::Descending),
        )
    }

    #[test]
    fn miss_then_hit() {
        let cache = InMemoryResultCache::new();
        assert!(cache.get(&key()).is_none());

        cache.put(key(), result());
        assert_eq!(cache.get(&key()), Some(result()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let cache = InMemoryResultCache::new();
        let other = cache.clone();
        cache.put(key(), result());
        assert!(!other.is_empty());

        other.clear();
        assert!(cache.is_empty());
    }
}
