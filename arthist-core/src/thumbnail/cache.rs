use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A lookup that may still be running. Cloning it is cheap and every clone
/// resolves to the same value.
pub type SharedLookup<V> = Shared<BoxFuture<'static, V>>;

/// Process-lifetime map from key to a single shared async result.
///
/// The first caller for a key registers its future before anyone awaits it,
/// so concurrent callers for the same key attach to that one future instead
/// of starting their own. Entries are never evicted or replaced.
pub struct KeyedAsyncCache<V: Clone + Send + Sync + 'static> {
    entries: Mutex<HashMap<String, SharedLookup<V>>>,
}

impl<V: Clone + Send + Sync + 'static> Default for KeyedAsyncCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> KeyedAsyncCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached lookup for `key`, or start one with `start` and
    /// cache it. The check and the insert happen under one lock, which is
    /// never held across an await.
    ///
    /// The bool is true when an existing entry was reused.
    pub fn get_or_start<F>(&self, key: &str, start: F) -> (SharedLookup<V>, bool)
    where
        F: FnOnce() -> BoxFuture<'static, V>,
    {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(key) {
            debug!("Lookup cache hit for '{}'", key);
            return (existing.clone(), true);
        }

        debug!("Lookup cache miss for '{}', starting lookup", key);
        let lookup = start().shared();
        entries.insert(key.to_string(), lookup.clone());
        (lookup, false)
    }

    /// The settled value for `key`, if its lookup has finished.
    pub fn settled(&self, key: &str) -> Option<V> {
        self.lock().get(key).and_then(|lookup| lookup.peek().cloned())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SharedLookup<V>>> {
        // Entries are immutable once inserted, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
