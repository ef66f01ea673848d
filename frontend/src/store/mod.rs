//! Stores
//!
//! A store caches backend state in memory and exposes async actions that
//! keep it in sync. Each action follows the same discipline:
//!
//! 1. `loading = true`, `error = None`
//! 2. call the API
//! 3. success: apply the canonical record to the cache
//!    failure: record the server detail (or a fallback message)
//! 4. `loading = false`, whatever happened
//!
//! Write actions hand the error back to the caller; fetch actions only
//! record it. Subscribers are notified after every change.

pub mod auth;
pub mod courses;
pub mod roadmaps;

use crate::error::ApiError;
use merq_shared::{Entity, Id};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use tracing::warn;

// =========================================================
// Subscribers
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn()>;

/// Callbacks run after each state change.
#[derive(Clone, Default)]
pub struct Listeners {
    entries: Rc<RefCell<Vec<(SubscriptionId, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl Listeners {
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id);
    }

    pub fn notify(&self) {
        // listeners may subscribe or read the store while we iterate
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener();
        }
    }
}

// =========================================================
// Store cell
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Shared state of one store. Clones share the same cell.
pub struct Store<S> {
    state: Rc<RefCell<S>>,
    status: Rc<RefCell<StoreStatus>>,
    listeners: Listeners,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            status: Rc::clone(&self.status),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Store<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            status: Rc::new(RefCell::new(StoreStatus::default())),
            listeners: Listeners::default(),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.status.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.status.borrow().error.clone()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.state.borrow_mut());
        self.listeners.notify();
    }

    /// Marks an action as started. Dropping the guard ends it.
    pub(crate) fn begin(&self) -> LoadingGuard<'_, S> {
        {
            let mut status = self.status.borrow_mut();
            status.loading = true;
            status.error = None;
        }
        self.listeners.notify();
        LoadingGuard { store: self }
    }

    pub(crate) fn fail(&self, message: String) {
        self.status.borrow_mut().error = Some(message);
        self.listeners.notify();
    }

    /// Runs a write action: the result is applied on success, recorded and
    /// returned on failure.
    pub(crate) async fn run<T, F>(
        &self,
        action: &'static str,
        fallback: &str,
        request: F,
        apply: impl FnOnce(&mut S, &T),
    ) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let _loading = self.begin();
        match request.await {
            Ok(value) => {
                self.update(|state| apply(state, &value));
                Ok(value)
            }
            Err(err) => {
                warn!(action, error = %err, "store action failed");
                self.fail(err.message_or(fallback));
                Err(err)
            }
        }
    }

    /// Runs a fetch action: failures are recorded, the cache is left as is.
    pub(crate) async fn fetch<T, F>(
        &self,
        action: &'static str,
        fallback: &str,
        request: F,
        apply: impl FnOnce(&mut S, T),
    ) where
        F: Future<Output = Result<T, ApiError>>,
    {
        let _loading = self.begin();
        match request.await {
            Ok(value) => self.update(|state| apply(state, value)),
            Err(err) => {
                warn!(action, error = %err, "store fetch failed");
                self.fail(err.message_or(fallback));
            }
        }
    }
}

pub(crate) struct LoadingGuard<'a, S> {
    store: &'a Store<S>,
}

impl<S> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.store.status.borrow_mut().loading = false;
        self.store.listeners.notify();
    }
}

// =========================================================
// Cache helpers
// =========================================================

/// Inserts `item` at `index`, dropping any stale copy with the same id.
pub(crate) fn upsert_at<T: Entity + Clone>(items: &mut Vec<T>, index: usize, item: &T) {
    items.retain(|existing| existing.id() != item.id());
    let index = index.min(items.len());
    items.insert(index, item.clone());
}

pub(crate) fn push_unique<T: Entity + Clone>(items: &mut Vec<T>, item: &T) {
    items.retain(|existing| existing.id() != item.id());
    items.push(item.clone());
}

/// Replaces the cached entry with the server's copy, in place.
pub(crate) fn replace_by_id<T: Entity + Clone>(items: &mut [T], id: Id, item: &T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == id) {
        *slot = item.clone();
    }
}

pub(crate) fn replace_current<T: Entity + Clone>(slot: &mut Option<T>, id: Id, item: &T) {
    if slot.as_ref().is_some_and(|current| current.id() == id) {
        *slot = Some(item.clone());
    }
}

pub(crate) fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: Id) {
    items.retain(|existing| existing.id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Id,
        name: &'static str,
    }

    impl Entity for Item {
        fn id(&self) -> Id {
            self.id
        }
    }

    fn item(id: Id, name: &'static str) -> Item {
        Item { id, name }
    }

    #[test]
    fn upsert_keeps_ids_unique() {
        let mut items = vec![item(1, "a"), item(2, "b")];
        upsert_at(&mut items, 0, &item(2, "b2"));
        assert_eq!(items, vec![item(2, "b2"), item(1, "a")]);

        push_unique(&mut items, &item(1, "a2"));
        assert_eq!(items, vec![item(2, "b2"), item(1, "a2")]);
    }

    #[test]
    fn replace_ignores_unknown_ids() {
        let mut items = vec![item(1, "a")];
        replace_by_id(&mut items, 9, &item(9, "z"));
        assert_eq!(items, vec![item(1, "a")]);

        let mut current = Some(item(1, "a"));
        replace_current(&mut current, 1, &item(1, "a2"));
        assert_eq!(current, Some(item(1, "a2")));
    }

    #[test]
    fn loading_guard_resets_on_drop() {
        let store: Store<()> = Store::default();
        store.fail("stale".into());
        {
            let _guard = store.begin();
            assert!(store.loading());
            assert_eq!(store.error(), None);
        }
        assert!(!store.loading());
    }

    #[test]
    fn listeners_fire_until_unsubscribed() {
        let store: Store<u32> = Store::default();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = store.subscribe(move || counter.set(counter.get() + 1));

        store.update(|n| *n += 1);
        assert_eq!(hits.get(), 1);

        store.unsubscribe(id);
        store.update(|n| *n += 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(store.snapshot(), 2);
    }
}
