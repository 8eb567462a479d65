//! Networking: transport seam, session-aware HTTP client, and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines what a request/response is, `http_client` adds the
//! credential and the forced-logout interceptor on top, and `types` holds the
//! auth endpoint schemas. `gloo` is the browser transport (`hydrate` only).

#[cfg(feature = "hydrate")]
pub mod gloo;
pub mod http_client;
pub mod transport;
pub mod types;

#[cfg(feature = "hydrate")]
pub use gloo::GlooTransport;
pub use http_client::HttpClient;
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
