//! Per-navigation authorization decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router asks the guard before entering any route. The guard reads the
//! session, re-verifies a stored credential with the server, and answers
//! `Allow` or `RedirectTo(path)`. It never navigates by itself; the shell
//! applies the decision.
//!
//! DESIGN
//! ======
//! Checks run in a fixed order and the first match wins:
//!
//! 1. Login target: a stored session goes to its role home, else allow.
//! 2. Protected target without a session goes to login.
//! 3. A stored session is re-verified. Any failure clears it and goes to login.
//! 4. A role-restricted target the (recognized) role may not enter goes to
//!    that role's home.
//! 5. An unrecognized role is a corrupt session: clear and go to login.
//! 6. Allow.
//!
//! Step 3 is the only await. Each evaluation takes a ticket from a counter;
//! if a newer evaluation started while step 3 was pending the older one
//! resumes as `Superseded` and touches nothing.
//!
//! EDGE CASES
//! ==========
//! - Step 4 skips unrecognized roles. `home_for` maps them to the agent home,
//!   so redirecting there from the agent home itself would loop; step 5
//!   clears them instead.
//! - Paths missing from the table are guarded as protected routes with no
//!   role requirement.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::auth::AuthGateway;
use crate::config::GuardConfig;
use crate::error::AuthError;
use crate::session::{Session, SessionStore};

use super::table::{Resolution, RouteDescriptor, RouteTable, normalize_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(String),
}

/// Outcome of one guard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Decided(GuardDecision),
    /// A newer navigation started while this one was verifying; ignore it.
    Superseded,
}

impl Evaluation {
    /// The decision, unless superseded.
    #[must_use]
    pub fn decision(&self) -> Option<&GuardDecision> {
        match self {
            Self::Decided(decision) => Some(decision),
            Self::Superseded => None,
        }
    }
}

pub struct NavigationGuard {
    store: Rc<dyn SessionStore>,
    gateway: Rc<AuthGateway>,
    routes: Rc<RouteTable>,
    config: GuardConfig,
    latest: Cell<u64>,
}

impl NavigationGuard {
    pub fn new(
        config: &GuardConfig,
        store: Rc<dyn SessionStore>,
        gateway: Rc<AuthGateway>,
        routes: Rc<RouteTable>,
    ) -> Self {
        Self { store, gateway, routes, config: config.clone(), latest: Cell::new(0) }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide whether navigation to `path` may proceed.
    pub async fn evaluate(&self, path: &str) -> Evaluation {
        let ticket = self.next_ticket();
        match self.routes.resolve(path) {
            Resolution::Redirect(to) => {
                log::debug!("guard: {path} is an alias for {to}");
                Evaluation::Decided(GuardDecision::RedirectTo(to.to_owned()))
            }
            Resolution::Route(route) => self.run(ticket, route).await,
            Resolution::Unknown => {
                let fallback = RouteDescriptor::protected(normalize_path(path));
                self.run(ticket, &fallback).await
            }
        }
    }

    /// Decide for an explicit descriptor, bypassing table lookup.
    pub async fn evaluate_route(&self, target: &RouteDescriptor) -> Evaluation {
        let ticket = self.next_ticket();
        self.run(ticket, target).await
    }

    fn next_ticket(&self) -> u64 {
        let ticket = self.latest.get().wrapping_add(1);
        self.latest.set(ticket);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    async fn run(&self, ticket: u64, target: &RouteDescriptor) -> Evaluation {
        let session = self.store.get();

        if target.path == self.routes.login_path() {
            return match session.role() {
                Some(role) => redirect(&target.path, self.config.home_for(role)),
                None => Evaluation::Decided(GuardDecision::Allow),
            };
        }

        if !session.is_authenticated() {
            return if target.requires_auth {
                redirect(&target.path, self.routes.login_path())
            } else {
                Evaluation::Decided(GuardDecision::Allow)
            };
        }

        let verified = self.gateway.authenticate().await;
        if !self.is_current(ticket) {
            log::debug!("guard: dropping stale evaluation for {}", target.path);
            return Evaluation::Superseded;
        }
        let role = match verified {
            Ok(Session::Authenticated { role, .. }) => role,
            Ok(Session::Anonymous) => return self.reject(&target.path, &AuthError::Unauthenticated),
            Err(err) => return self.reject(&target.path, &err),
        };

        if let Some(required) = &target.required_role
            && role.is_recognized()
            && &role != required
        {
            return redirect(&target.path, self.config.home_for(&role));
        }

        if !role.is_recognized() {
            log::warn!("guard: stored role {:?} is not recognized", role.as_str());
            return self.reject(&target.path, &AuthError::CorruptSession);
        }

        Evaluation::Decided(GuardDecision::Allow)
    }

    fn reject(&self, from: &str, reason: &AuthError) -> Evaluation {
        log::info!("guard: {reason}; clearing session");
        self.store.clear();
        redirect(from, self.routes.login_path())
    }
}

fn redirect(from: &str, to: &str) -> Evaluation {
    log::info!("guard: {from} -> {to}");
    Evaluation::Decided(GuardDecision::RedirectTo(to.to_owned()))
}
