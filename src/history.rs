//! Back-stack of successfully completed navigations.

use parking_lot::Mutex;

use crate::pattern::Params;

/// A stack of (uri, parameters) records, pushed on every successful load.
///
/// Failure paths never touch it, so its length counts successes exactly.
/// Mutation happens under a single coarse lock.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<(String, Params)>>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub(crate) fn push(&self, uri: String, params: Params) {
        self.entries.lock().push((uri, params));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The most recent successful navigation, if any.
    pub fn current(&self) -> Option<(String, Params)> {
        self.entries.lock().last().cloned()
    }

    /// Pop the current entry and the one beneath it, returning the latter as
    /// the back-navigation target. Both pops happen under one lock
    /// acquisition; with fewer than two entries nothing is removed.
    ///
    /// The target is re-pushed through the normal success path when the
    /// back-navigation's load completes.
    pub(crate) fn pop_two_for_back(&self) -> Option<(String, Params)> {
        let mut entries = self.entries.lock();
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.pop()
    }
}
