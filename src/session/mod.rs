//! Session state: value types, the store seam, and lifecycle events.
//!
//! SYSTEM CONTEXT
//! ==============
//! `model` defines what a session is, `store` defines where it lives, and
//! `events` announces when it changes. The browser-only `local_storage`
//! store is compiled under `hydrate`.

pub mod events;
#[cfg(feature = "hydrate")]
pub mod local_storage;
pub mod model;
pub mod store;

pub use events::{SessionEvent, SessionEvents, Subscription};
#[cfg(feature = "hydrate")]
pub use local_storage::LocalStorageSessionStore;
pub use model::{Credential, Role, Session};
pub use store::{MemorySessionStore, SessionStore};
