//! Bounded memo cache keyed by a dependency tuple.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Entries kept per stage when no capacity is given.
pub const DEFAULT_MEMO_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Remembers values for the most recently used keys.
///
/// Stepping back to a recent seed, output or turn is served from here
/// without calling the engine again.
#[derive(Debug)]
pub struct Memo<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K: Hash + Eq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }
}

impl<K: Hash + Eq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Cached value for `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.put(key, value);
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V
    where
        V: Clone,
    {
        if let Some(value) = self.entries.get(&key) {
            return value.clone();
        }
        let value = compute(&key);
        self.entries.put(key, value.clone());
        value
    }

    /// Fallible variant of [`Memo::get_or_insert_with`]. Errors are not cached.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: K,
        compute: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E>
    where
        V: Clone,
    {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }
        let value = compute(&key)?;
        self.entries.put(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_repeated_key_computes_once() {
        let mut memo = Memo::new();
        let mut calls = 0;
        for _ in 0..3 {
            let value = memo.get_or_insert_with(7u64, |key| {
                calls += 1;
                key * 2
            });
            assert_eq!(value, 14);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_alternating_keys_stay_cached() {
        let mut memo = Memo::new();
        let mut calls = Vec::new();
        for key in [1u64, 2, 1, 2] {
            memo.get_or_insert_with(key, |key| {
                calls.push(*key);
                key + 100
            });
        }
        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let mut memo = Memo::with_capacity(capacity(2));
        memo.insert("a", 1);
        memo.insert("b", 2);
        // Touch "a" so "b" is the oldest.
        assert_eq!(memo.get(&"a"), Some(&1));
        memo.insert("c", 3);
        assert_eq!(memo.get(&"b"), None);
        assert_eq!(memo.get(&"a"), Some(&1));
        assert_eq!(memo.get(&"c"), Some(&3));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut memo: Memo<u8, u8> = Memo::new();
        assert!(memo.try_get_or_insert_with(1, |_| Err("boom")).is_err());
        assert_eq!(memo.get(&1), None);
        assert_eq!(memo.try_get_or_insert_with(1, |_| Ok::<_, &str>(5)), Ok(5));
    }
}
