//! Composition root: one place that owns the store and hands out the
//! components built over it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store, the event bus, the HTTP client, the gateway and the guard all
//! share state through `Rc`s created here. Hosts build one `Portal` at
//! startup (`Portal::browser` under `hydrate`) and keep it for the page
//! lifetime.

#[cfg(test)]
#[path = "portal_test.rs"]
mod portal_test;

use std::rc::Rc;

use crate::auth::AuthGateway;
use crate::config::GuardConfig;
use crate::net::{HttpClient, Transport};
use crate::routing::{NavigationGuard, RouteTable};
use crate::session::{SessionEvents, SessionStore};

pub struct Portal {
    config: GuardConfig,
    store: Rc<dyn SessionStore>,
    events: SessionEvents,
    http: Rc<HttpClient>,
    gateway: Rc<AuthGateway>,
    guard: Rc<NavigationGuard>,
}

impl Portal {
    pub fn new(
        config: GuardConfig,
        routes: RouteTable,
        store: Rc<dyn SessionStore>,
        transport: Rc<dyn Transport>,
    ) -> Self {
        let events = SessionEvents::new();
        let http = Rc::new(HttpClient::new(&config, transport, Rc::clone(&store), events.clone()));
        let gateway = Rc::new(AuthGateway::new(
            &config,
            Rc::clone(&http),
            Rc::clone(&store),
            events.clone(),
        ));
        let guard = Rc::new(NavigationGuard::new(
            &config,
            Rc::clone(&store),
            Rc::clone(&gateway),
            Rc::new(routes),
        ));
        Self { config, store, events, http, gateway, guard }
    }

    /// Browser wiring: `localStorage` session and `gloo-net` transport over
    /// the stock route table.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` paths collide with the stock routes.
    #[cfg(feature = "hydrate")]
    pub fn browser(config: GuardConfig) -> Result<Self, crate::error::RouteTableError> {
        use crate::net::GlooTransport;
        use crate::session::LocalStorageSessionStore;

        let routes = RouteTable::portal_default(&config)?;
        let store = Rc::new(LocalStorageSessionStore::new(&config));
        Ok(Self::new(config, routes, store, Rc::new(GlooTransport)))
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> Rc<dyn SessionStore> {
        Rc::clone(&self.store)
    }

    #[must_use]
    pub fn events(&self) -> SessionEvents {
        self.events.clone()
    }

    #[must_use]
    pub fn http(&self) -> Rc<HttpClient> {
        Rc::clone(&self.http)
    }

    #[must_use]
    pub fn gateway(&self) -> Rc<AuthGateway> {
        Rc::clone(&self.gateway)
    }

    #[must_use]
    pub fn guard(&self) -> Rc<NavigationGuard> {
        Rc::clone(&self.guard)
    }
}
