//! In-process change observers.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Callback<T> = Box<dyn FnMut(&[T])>;

/// Callbacks notified with the new snapshot after each committed change.
///
/// Callbacks run in subscription order.
pub struct Observers<T> {
    callbacks: BTreeMap<SubscriptionId, Callback<T>>,
    next_id: u64,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            callbacks: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[T]) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.callbacks.insert(id, Box::new(callback));
        id
    }

    /// Removes one callback. Returns `false` for unknown or already removed ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify(&mut self, snapshot: &[T]) {
        for callback in self.callbacks.values_mut() {
            callback(snapshot);
        }
    }
}
