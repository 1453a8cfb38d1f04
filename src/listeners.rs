//! Callback registry with removable subscriptions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(T)>;

struct Registry<T> {
    next_id: u64,
    // Bumped by every `notify`; an outer pass stops once it moves on.
    generation: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A list of callbacks notified with a value.
///
/// Used by [`ThemeStore`](crate::ThemeStore) for its subscribers and by the
/// [`SystemSignal`](crate::SystemSignal) implementations for change events.
/// No borrow is held while a callback runs, so callbacks may add or remove
/// listeners, or trigger a nested notification.
pub struct Listeners<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: Copy + 'static> Listeners<T> {
    /// Creates an empty listener list.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                generation: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers a callback and returns the handle that removes it.
    pub fn add(&self, callback: impl Fn(T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Rc::new(callback)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Calls every registered callback with `value`.
    ///
    /// Callbacks removed by an earlier callback in the same pass are skipped.
    /// If a callback triggers a nested `notify`, the nested pass delivers the
    /// newer value to everyone and the outer pass stops, so no listener is
    /// left holding the older value.
    pub fn notify(&self, value: T) {
        let (generation, snapshot) = {
            let mut registry = self.registry.borrow_mut();
            registry.generation += 1;
            let snapshot: Vec<(u64, Callback<T>)> = registry
                .entries
                .iter()
                .map(|(id, callback)| (*id, Rc::clone(callback)))
                .collect();
            (registry.generation, snapshot)
        };

        for (id, callback) in snapshot {
            let deliver = {
                let registry = self.registry.borrow();
                if registry.generation != generation {
                    return;
                }
                registry.entries.iter().any(|(entry, _)| *entry == id)
            };
            if deliver {
                callback(value);
            }
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Returns true if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy + 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.registry.borrow().entries.len())
            .finish()
    }
}

/// Handle returned by `subscribe`/`on_change` calls.
///
/// Call [`unsubscribe`](Subscription::unsubscribe) to stop receiving
/// callbacks. It may be called any number of times, including after the
/// owner of the listener list has been dropped. Dropping the handle without
/// calling it leaves the callback registered.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    remove: Box<dyn Fn()>,
    active: Cell<bool>,
}

impl Subscription {
    pub(crate) fn new(remove: impl Fn() + 'static) -> Self {
        Self {
            remove: Box::new(remove),
            active: Cell::new(true),
        }
    }

    /// Removes the callback. Later calls do nothing.
    pub fn unsubscribe(&self) {
        if self.active.replace(false) {
            (self.remove)();
        }
    }

    /// Returns false once [`unsubscribe`](Subscription::unsubscribe) has been called.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.active.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl Fn(u32) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_| inner.set(inner.get() + 1))
    }

    #[test]
    fn test_notify_reaches_all_listeners() {
        let listeners = Listeners::new();
        let (a, cb_a) = counter();
        let (b, cb_b) = counter();
        let _sa = listeners.add(cb_a);
        let _sb = listeners.add(cb_b);

        listeners.notify(1);
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_callbacks() {
        let listeners = Listeners::new();
        let (count, cb) = counter();
        let sub = listeners.add(cb);

        sub.unsubscribe();
        listeners.notify(1);
        assert_eq!(count.get(), 0);
        assert!(listeners.is_empty());
        assert!(!sub.is_active());
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let listeners = Listeners::new();
        let (_, cb_a) = counter();
        let (b, cb_b) = counter();
        let sa = listeners.add(cb_a);
        let _sb = listeners.add(cb_b);

        sa.unsubscribe();
        sa.unsubscribe();
        assert_eq!(listeners.len(), 1);
        listeners.notify(7);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_unsubscribe_after_owner_dropped() {
        let listeners = Listeners::<u32>::new();
        let sub = listeners.add(|_| {});
        drop(listeners);
        sub.unsubscribe();
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_removed_mid_pass_is_skipped() {
        let listeners = Rc::new(Listeners::new());
        let (second, cb) = counter();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let victim_ref = Rc::clone(&victim);
        let _first = listeners.add(move |_: u32| {
            if let Some(sub) = victim_ref.borrow().as_ref() {
                sub.unsubscribe();
            }
        });
        *victim.borrow_mut() = Some(listeners.add(cb));

        listeners.notify(1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_callback_may_subscribe_during_notify() {
        let listeners = Rc::new(Listeners::new());
        let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&listeners);
        let added_ref = Rc::clone(&added);
        let _sub = listeners.add(move |_: u32| {
            added_ref.borrow_mut().push(inner.add(|_| {}));
        });

        listeners.notify(1);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_nested_notify_supersedes_outer_pass() {
        let listeners = Rc::new(Listeners::new());
        let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&listeners);
        let _first = listeners.add(move |value: u32| {
            if value == 1 {
                inner.notify(2);
            }
        });
        let seen_ref = Rc::clone(&seen);
        let _second = listeners.add(move |value| seen_ref.borrow_mut().push(value));

        listeners.notify(1);
        assert_eq!(*seen.borrow(), vec![2]);

        listeners.notify(3);
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }
}
