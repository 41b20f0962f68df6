//! Single-threaded multi-listener event bus.
//!
//! DESIGN
//! ======
//! Listeners are detached when their [`Subscription`] is dropped, so an owner
//! that goes away can never be called back. Emission snapshots the listener
//! list first, which lets a listener subscribe or unsubscribe while handling
//! an event.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;
type ListenerList<T> = RefCell<Vec<(u64, Listener<T>)>>;

/// Fan-out of events of type `T` to any number of listeners.
pub struct EventBus<T> {
    listeners: Rc<ListenerList<T>>,
    next_id: Cell<u64>,
}

impl<T: 'static> EventBus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Rc::new(RefCell::new(Vec::new())), next_id: Cell::new(0) }
    }

    /// Register `listener`; it stays attached while the returned handle lives.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        let weak: Weak<ListenerList<T>> = Rc::downgrade(&self.listeners);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener attached at the time of the call.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle keeping a listener attached; dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detach now instead of at drop time.
    pub fn cancel(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
