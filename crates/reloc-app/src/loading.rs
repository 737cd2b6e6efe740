//! Loading-state tracking with guaranteed removal.
//!
//! Every async action holds a [`LoadingGuard`] for its duration; the guard
//! releases its slot on drop, so the indicator clears on every exit path,
//! error and cancellation included.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Tracks which features currently have work in flight, by indicator id.
///
/// The same id can be started more than once (two concurrent searches share
/// the `search` indicator); it stays active until every guard is gone.
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    active: Arc<Mutex<HashMap<String, usize>>>,
}

impl LoadingTracker {
    /// Marks `id` as loading until the returned guard is dropped.
    #[must_use]
    pub fn start(&self, id: &str) -> LoadingGuard {
        *self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.to_owned())
            .or_insert(0) += 1;
        LoadingGuard {
            active: Arc::clone(&self.active),
            id: id.to_owned(),
        }
    }

    #[must_use]
    pub fn is_loading(&self, id: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Whether anything at all is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// RAII handle for one loading indicator.
#[derive(Debug)]
pub struct LoadingGuard {
    active: Arc<Mutex<HashMap<String, usize>>>,
    id: String,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = active.get_mut(&self.id) {
            *count -= 1;
            if *count == 0 {
                active.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_the_indicator_on_drop() {
        let tracker = LoadingTracker::default();
        {
            let _guard = tracker.start("search");
            assert!(tracker.is_loading("search"));
            assert!(tracker.is_busy());
        }
        assert!(!tracker.is_loading("search"));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn shared_indicator_stays_active_until_every_guard_drops() {
        let tracker = LoadingTracker::default();
        let first = tracker.start("export_poll");
        let second = tracker.start("export_poll");
        assert_eq!(tracker.active_count(), 1);

        drop(first);
        assert!(tracker.is_loading("export_poll"));
        drop(second);
        assert!(!tracker.is_loading("export_poll"));
    }

    #[test]
    fn guard_clears_even_when_the_action_errors() {
        let tracker = LoadingTracker::default();
        let result: Result<(), &str> = (|| {
            let _guard = tracker.start("leads");
            Err("backend down")
        })();
        assert!(result.is_err());
        assert!(!tracker.is_loading("leads"));
    }
}
