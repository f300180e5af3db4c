//! Subscriber registry for state broadcasts.

use crate::state::PlaybackState;
use std::sync::{Mutex, Weak};

type SubscriberFn = Box<dyn Fn(&PlaybackState) + Send + Sync>;

/// Ordered set of state-change callbacks.
///
/// Callbacks are invoked synchronously in registration order on every
/// published state change.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    entries: Vec<(u64, SubscriberFn)>,
}

impl SubscriberRegistry {
    pub(crate) fn insert(&mut self, callback: SubscriberFn) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn notify(&self, state: &PlaybackState) {
        for (_, callback) in &self.entries {
            callback(state);
        }
    }

    /// Invoke a single subscriber, used for replay-on-subscribe.
    pub(crate) fn notify_one(&self, id: u64, state: &PlaybackState) {
        if let Some((_, callback)) = self.entries.iter().find(|(entry_id, _)| *entry_id == id) {
            callback(state);
        }
    }
}

/// Active subscription to session state changes.
///
/// Dropping the subscription unregisters the callback. Must not be dropped
/// from inside a subscriber callback.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<SubscriberRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<Mutex<SubscriberRegistry>>) -> Self {
        Self { id, registry }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.remove(self.id);
            }
        }
    }
}
