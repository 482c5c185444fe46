//! Current-culture state with synchronous change notification.
//!
//! A [`CultureContext`] is an explicit long-lived object owned by its
//! registry — there is no hidden process-wide global, so independent
//! registries (and their tests) never observe each other's culture.
//!
//! Notification is synchronous: listeners run inline on the thread that
//! performed the mutation, before control returns to the caller. The
//! subscriber list is snapshotted before invocation, so a listener may
//! re-enter the registry (or subscribe) without deadlocking.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Handle returned by [`CultureContext::subscribe`], used to unsubscribe.
pub type SubscriptionId = usize;

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct CultureContext {
    current: RwLock<Option<String>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicUsize,
}

impl CultureContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current culture, if one has been initialized.
    pub fn current(&self) -> Option<String> {
        self.current.read().expect("culture lock poisoned").clone()
    }

    /// Set the initial culture without firing notifications. Used by the
    /// registry at load time, when no culture was previously observable.
    pub(crate) fn init(&self, culture: &str) {
        let mut current = self.current.write().expect("culture lock poisoned");
        *current = Some(culture.to_string());
    }

    /// Switch to `culture`. Setting the already-current value is a no-op
    /// and fires nothing; otherwise the state is updated first and every
    /// listener is invoked synchronously. Returns whether a change fired.
    pub fn set(&self, culture: &str) -> bool {
        {
            let mut current = self.current.write().expect("culture lock poisoned");
            if current.as_deref() == Some(culture) {
                return false;
            }
            *current = Some(culture.to_string());
        }

        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.lock().expect("listener lock poisoned");
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in snapshot {
            listener(culture);
        }
        true
    }

    /// Register a culture-change listener.
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().expect("listener lock poisoned");
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}

impl std::fmt::Debug for CultureContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CultureContext")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
