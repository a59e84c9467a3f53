//! Memoized answer storage.

use dashmap::DashMap;

/// Cache key: the exact argument triple of a custom-model query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerKey {
    input_text: String,
    search_model: String,
    threshold_bits: u64,
}

impl AnswerKey {
    /// Builds a key from the query arguments.
    #[must_use]
    pub fn new(input_text: &str, search_model: &str, threshold: f64) -> Self {
        Self {
            input_text: input_text.to_string(),
            search_model: search_model.to_string(),
            // Exact-equality keying, the same contract as argument
            // memoization.
            threshold_bits: threshold.to_bits(),
        }
    }
}

/// Unbounded memo table for resolved answers.
///
/// Lives as long as the owning service instance; there is no eviction
/// and no invalidation. Tests call [`AnswerCache::clear`] between cases
/// instead of restarting the process.
#[derive(Debug, Default)]
pub struct AnswerCache {
    entries: DashMap<AnswerKey, Option<String>>,
}

impl AnswerCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized outcome for `key`, if any.
    ///
    /// The outer `Option` distinguishes "never resolved" from a
    /// memoized "no result".
    #[must_use]
    pub fn get(&self, key: &AnswerKey) -> Option<Option<String>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Memoizes an outcome.
    pub fn insert(&self, key: AnswerKey, outcome: Option<String>) {
        self.entries.insert(key, outcome);
    }

    /// Number of memoized outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every memoized outcome.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cache = AnswerCache::new();
        let key = AnswerKey::new("q", "model", 25.0);

        assert_eq!(cache.get(&key), None);
        cache.insert(key.clone(), Some("a".to_string()));
        assert_eq!(cache.get(&key), Some(Some("a".to_string())));
    }

    #[test]
    fn test_memoized_miss_is_distinguishable() {
        let cache = AnswerCache::new();
        let key = AnswerKey::new("q", "model", 25.0);

        cache.insert(key.clone(), None);
        assert_eq!(cache.get(&key), Some(None));
    }

    #[test]
    fn test_threshold_is_part_of_the_key() {
        let cache = AnswerCache::new();
        cache.insert(AnswerKey::new("q", "model", 25.0), Some("a".to_string()));

        assert_eq!(cache.get(&AnswerKey::new("q", "model", 30.0)), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let cache = AnswerCache::new();
        cache.insert(AnswerKey::new("q", "model", 25.0), Some("a".to_string()));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
