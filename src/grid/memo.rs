//! Memoized derived state
//!
//! A single-entry cache keyed by the inputs a value was derived from. The
//! engine bumps a revision counter whenever an input changes and passes the
//! revisions as the key, so recomputation happens only when a key differs.

#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    key: K,
    value: V,
    recomputations: usize,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            recomputations: 0,
        }
    }

    /// Recompute the value if `key` differs from the cached key.
    /// Returns whether a recomputation happened.
    pub fn refresh(&mut self, key: K, compute: impl FnOnce() -> V) -> bool {
        if self.key == key {
            return false;
        }
        self.value = compute();
        self.key = key;
        self.recomputations += 1;
        true
    }

    pub fn get(&self) -> &V {
        &self.value
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// How many times the value was recomputed after construction
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
