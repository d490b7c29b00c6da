//! Click guard for items with a request in flight

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::ItemKey;

/// Set of items whose action request has not resolved yet
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<ItemKey>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ItemKey>> {
        self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `key`; `None` while another claim on it is alive
    pub fn try_begin(&self, key: ItemKey) -> Option<InFlightGuard> {
        if self.lock().insert(key.clone()) {
            Some(InFlightGuard {
                keys: Arc::clone(&self.keys),
                key,
            })
        } else {
            None
        }
    }

    pub fn is_pending(&self, key: &ItemKey) -> bool {
        self.lock().contains(key)
    }
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<ItemKey>>>,
    key: ItemKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.key);
    }
}
