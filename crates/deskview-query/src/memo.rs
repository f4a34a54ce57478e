//! Explicit single-entry memoization.

/// Caches one computed value together with the key it was computed from.
///
/// The value is recomputed only when the key differs from the cached one.
/// Hits and misses are counted so callers (and tests) can observe reuse.
///
/// ```
/// use deskview_query::Memo;
///
/// let mut memo = Memo::new();
/// assert_eq!(*memo.get_or_compute(3, || 3 * 3), 9);
/// assert_eq!(*memo.get_or_compute(3, || unreachable!()), 9);
/// assert_eq!((memo.hits(), memo.misses()), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Memo::default()
    }

    /// Returns the cached value for `key`, computing it on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.entry = None;
        }
        &self.entry.get_or_insert_with(|| (key, compute())).1
    }

    /// The cached value, if its key equals `key`.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.entry {
            Some((cached, value)) if cached == key => Some(value),
            _ => None,
        }
    }

    /// Drops the cached entry. Counters are kept.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
