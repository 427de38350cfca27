//! Minimal observable values.
//!
//! The runtime resolver only needs to read the current locale and hear about
//! changes to it. [`Signal`] is that contract; [`LocaleCell`] is a
//! thread-safe implementation that notifies only on actual change.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait Signal<T>: Send + Sync {
    /// Current value.
    fn get(&self) -> T;

    /// Call `listener` with every new value until unsubscribed.
    fn subscribe(&self, listener: Listener<T>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Holds the current locale.
///
/// Listeners may read the cell or subscribe to it, but must not `set` it.
pub struct LocaleCell {
    value: RwLock<String>,
    /// Held across a store and its notifications, so listeners hear changes
    /// in the order they were stored.
    notify: Mutex<()>,
    listeners: Mutex<Vec<(SubscriptionId, Listener<String>)>>,
    next_id: AtomicU64,
}

impl LocaleCell {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(locale.into()),
            notify: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Store `locale` and notify listeners. Setting the current value again
    /// notifies nobody.
    pub fn set(&self, locale: impl Into<String>) {
        let locale = locale.into();
        let _notifying = self.notify.lock().unwrap_or_else(PoisonError::into_inner);
        {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            if *current == locale {
                return;
            }
            current.clone_from(&locale);
        }

        // Listeners run outside the value and listener locks so they can
        // read or subscribe.
        let listeners: Vec<Listener<String>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&locale);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Signal<String> for LocaleCell {
    fn get(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self, listener: Listener<String>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(known, _)| *known != id);
    }
}
