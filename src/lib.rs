//! # portal-guard
//!
//! Client-side session and route-authorization guard for the agent/admin
//! portal frontend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation attempt and every outgoing API call in the portal passes
//! through this crate. `session` owns the durable credential + role pair,
//! `auth` talks to the login/verify/register endpoints, `net` decorates and
//! intercepts HTTP traffic, and `routing` decides whether a route transition
//! is allowed. `portal` wires them together as the composition root.
//!
//! Browser bindings (localStorage, `gloo-net`, Leptos router hooks) live
//! behind the `hydrate` feature; everything else runs natively so the
//! decision logic is testable without a browser.

pub mod auth;
pub mod config;
pub mod error;
pub mod net;
pub mod portal;
pub mod routing;
pub mod session;
#[cfg(feature = "hydrate")]
pub mod shell;

#[cfg(test)]
mod test_support;

pub use auth::{AuthGateway, LoginCredentials, RegisterAck};
pub use config::GuardConfig;
pub use error::{ApiError, AuthError, ConfigError, RouteTableError, TransportError};
pub use net::{ApiRequest, ApiResponse, HttpClient, Method, Transport};
pub use portal::Portal;
pub use routing::{Evaluation, GuardDecision, NavigationGuard, Resolution, RouteDescriptor, RouteTable};
pub use session::{
    Credential, MemorySessionStore, Role, Session, SessionEvent, SessionEvents, SessionStore, Subscription,
};
