//! Durable holder of the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store instance is created by the composition root and shared (as
//! `Rc<dyn SessionStore>`) with the gateway, the HTTP client, and the guard.
//! Only the gateway writes; the HTTP client and guard may clear.
//!
//! Implementations must make `set` all-or-nothing for the credential/role
//! pair and `clear` idempotent.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;

use super::model::{Credential, Role, Session};

pub trait SessionStore {
    fn get(&self) -> Session;

    /// Replace the stored pair. Never observable half-written.
    fn set(&self, credential: Credential, role: Role);

    /// Drop the stored pair. Safe to call on an empty store.
    fn clear(&self);
}

/// In-process store used natively, during SSR, and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RefCell<Session>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { session: RefCell::new(session) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        self.session.borrow().clone()
    }

    fn set(&self, credential: Credential, role: Role) {
        *self.session.borrow_mut() = Session::authenticated(credential, role);
    }

    fn clear(&self) {
        *self.session.borrow_mut() = Session::Anonymous;
    }
}
