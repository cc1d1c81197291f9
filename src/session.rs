//! Session-scoped key-value storage surviving across navigations.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::views::SharedModel;

/// A clearable key-value store with a safe-key allow-list.
///
/// Hosts stash session-scoped singletons here so they survive across
/// navigations. [`abandon`](Self::abandon) implements a logical session
/// reset: every entry is purged except those whose key was previously passed
/// to [`mark_safe`](Self::mark_safe), typically the handful of wiring
/// singletons a host needs to keep across a reset.
///
/// All operations take a single coarse lock.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use crossnav::SessionStore;
///
/// let session = SessionStore::new();
/// session.mark_safe("theme");
/// session.insert("theme", Arc::new("dark".to_string()));
/// session.insert("draft", Arc::new("unsent reply".to_string()));
///
/// session.abandon();
/// assert!(session.contains("theme"));
/// assert!(!session.contains("draft"));
/// ```
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, SharedModel>,
    safe_keys: HashSet<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: SharedModel) {
        self.inner.lock().entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<SharedModel> {
        self.inner.lock().entries.get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<SharedModel> {
        self.inner.lock().entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Add `key` to the allow-list of entries that survive [`abandon`](Self::abandon).
    pub fn mark_safe(&self, key: impl Into<String>) {
        self.inner.lock().safe_keys.insert(key.into());
    }

    /// Purge every entry whose key is not marked safe.
    ///
    /// Idempotent: a second abandon leaves the same surviving set as the
    /// first.
    pub fn abandon(&self) {
        let mut inner = self.inner.lock();
        let Inner { entries, safe_keys } = &mut *inner;
        entries.retain(|key, _| safe_keys.contains(key));
    }
}
