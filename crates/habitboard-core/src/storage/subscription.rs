//! Change listeners for store snapshots.
//!
//! A store keeps one [`Subscribers`] list per kind of snapshot and calls
//! [`Subscribers::notify`] after every applied write. Callers hold a
//! [`Subscription`]; dropping it or calling [`Subscription::unsubscribe`]
//! removes the listener.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::warn;

use crate::habit::UserId;

type Callback<T> = Arc<dyn Fn(&UserId, &T) + Send + Sync>;

struct Listener<T> {
    id: u64,
    user: UserId,
    callback: Callback<T>,
}

type ListenerList<T> = Mutex<Vec<Listener<T>>>;

/// Lock the list. A lock poisoned by a panicking holder is recovered and
/// cleared; every edit to the list is a single push or retain.
fn lock_listeners<T>(listeners: &ListenerList<T>) -> MutexGuard<'_, Vec<Listener<T>>> {
    listeners.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        warn!("listener list lock was poisoned, recovering");
        let guard = poisoned.into_inner();
        listeners.clear_poison();
        guard
    })
}

/// Listener registry for snapshots of type `T`, filtered by user.
pub struct Subscribers<T> {
    next_id: AtomicU64,
    listeners: Arc<ListenerList<T>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for changes to `user`'s snapshot.
    pub fn subscribe<F>(&self, user: &UserId, callback: F) -> Subscription
    where
        F: Fn(&UserId, &T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock_listeners(&self.listeners).push(Listener {
            id,
            user: user.clone(),
            callback: Arc::new(callback),
        });

        let weak: Weak<ListenerList<T>> = Arc::downgrade(&self.listeners);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    lock_listeners(&listeners).retain(|l| l.id != id);
                }
            })),
        }
    }

    /// Call every listener registered for `user` with the new snapshot.
    ///
    /// Callbacks run outside the lock, so a callback may subscribe or
    /// unsubscribe without deadlocking.
    pub fn notify(&self, user: &UserId, snapshot: &T) {
        let callbacks: Vec<Callback<T>> = lock_listeners(&self.listeners)
            .iter()
            .filter(|l| &l.user == user)
            .map(|l| Arc::clone(&l.callback))
            .collect();
        for callback in callbacks {
            callback(user, snapshot);
        }
    }

    /// Whether anyone is listening to `user`.
    pub fn has_listeners(&self, user: &UserId) -> bool {
        lock_listeners(&self.listeners)
            .iter()
            .any(|l| &l.user == user)
    }

    pub fn len(&self) -> usize {
        lock_listeners(&self.listeners).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle that keeps a listener registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
