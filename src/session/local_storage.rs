//! `localStorage`-backed session store for the browser build.
//!
//! TRADE-OFFS
//! ==========
//! The credential and role live under two separate keys, so a write is two
//! storage calls. The role is written first and any failure removes both
//! keys, which means an interrupted `set` degrades to "logged out" rather
//! than a credential paired with a stale role.

use crate::config::GuardConfig;

use super::model::{Credential, Role, Session};
use super::store::SessionStore;

#[derive(Debug, Clone)]
pub struct LocalStorageSessionStore {
    credential_key: String,
    role_key: String,
}

impl LocalStorageSessionStore {
    #[must_use]
    pub fn new(config: &GuardConfig) -> Self {
        Self {
            credential_key: config.credential_key.clone(),
            role_key: config.role_key.clone(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn remove_both(&self, storage: &web_sys::Storage) {
        for key in [&self.credential_key, &self.role_key] {
            if storage.remove_item(key).is_err() {
                log::warn!("session store: failed to remove key {key}");
            }
        }
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn get(&self) -> Session {
        let Some(storage) = Self::storage() else {
            return Session::Anonymous;
        };
        let Some(credential) = storage
            .get_item(&self.credential_key)
            .ok()
            .flatten()
            .filter(|raw| !raw.is_empty())
        else {
            return Session::Anonymous;
        };
        // A credential without a role parses as `Unknown("")` and is treated as corrupt.
        let role = storage.get_item(&self.role_key).ok().flatten().unwrap_or_default();
        Session::authenticated(Credential::new(credential), Role::parse(&role))
    }

    fn set(&self, credential: Credential, role: Role) {
        let Some(storage) = Self::storage() else {
            log::warn!("session store: localStorage unavailable; session not persisted");
            return;
        };
        let written = storage
            .set_item(&self.role_key, role.as_str())
            .and_then(|()| storage.set_item(&self.credential_key, credential.as_str()));
        if written.is_err() {
            log::warn!("session store: write failed; clearing partial session");
            self.remove_both(&storage);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            self.remove_both(&storage);
        }
    }
}
