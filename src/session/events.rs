//! Session lifecycle notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! `HttpClient` never navigates on its own. When the server rejects the
//! session it emits `SessionEvent::Invalidated` here, and the hosting shell
//! (see `shell::install_forced_logout`) turns that into a full-document
//! navigation to the login page. Login/logout are published too so UI state
//! can react without polling the store.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::model::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(Role),
    LoggedOut,
    /// The server answered 401 to an authenticated request; the store has been cleared.
    Invalidated,
}

type Listener = Rc<dyn Fn(&SessionEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle returned by `subscribe`; pass back to `unsubscribe` to stop listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Cheaply cloneable broadcaster. All clones share one listener list.
#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Rc<RefCell<Listeners>>,
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.listeners
            .borrow_mut()
            .entries
            .retain(|(id, _)| *id != subscription.0);
    }

    /// Deliver `event` to every current listener in subscription order.
    pub fn emit(&self, event: &SessionEvent) {
        // Snapshot first: listeners may subscribe, unsubscribe, or emit re-entrantly.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
