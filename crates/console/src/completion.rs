//! Prefix completion
//!
//! [`CompletionSource`] is the seam for caller-provided completion. The
//! stock [`VocabularyCompleter`] matches case-insensitively against an
//! ordered vocabulary and memoizes results per prefix.

use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::trace;

/// Default number of memoized prefixes
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Something that can suggest completions for a prefix
pub trait CompletionSource {
    /// Return matches for `prefix`; an empty list means no suggestion
    fn complete(&mut self, prefix: &str) -> Vec<String>;
}

impl<F> CompletionSource for F
where
    F: FnMut(&str) -> Vec<String>,
{
    fn complete(&mut self, prefix: &str) -> Vec<String> {
        self(prefix)
    }
}

/// Completion against a fixed, ordered vocabulary
#[derive(Debug)]
pub struct VocabularyCompleter {
    vocabulary: Vec<String>,
    cache: LruCache<String, Vec<String>>,
}

impl VocabularyCompleter {
    /// Create a completer; a zero capacity falls back to the default
    pub fn new(vocabulary: Vec<String>, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            vocabulary,
            cache: LruCache::new(capacity),
        }
    }

    /// The vocabulary in declared order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Replace the vocabulary and drop memoized results
    pub fn set_vocabulary(&mut self, vocabulary: Vec<String>) {
        self.vocabulary = vocabulary;
        self.cache.clear();
    }

    /// Number of memoized prefixes
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl CompletionSource for VocabularyCompleter {
    fn complete(&mut self, prefix: &str) -> Vec<String> {
        let key = prefix.to_lowercase();
        if let Some(hit) = self.cache.get(&key) {
            trace!(subsystem = "completion", prefix = prefix, "Cache hit");
            return hit.clone();
        }

        let matches: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|term| term.to_lowercase().starts_with(&key))
            .cloned()
            .collect();
        self.cache.put(key, matches.clone());
        matches
    }
}
