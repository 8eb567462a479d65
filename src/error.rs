//! Error taxonomy for the session guard.
//!
//! ERROR HANDLING
//! ==============
//! Each layer gets its own enum: transports report raw delivery failures,
//! `HttpClient` reports per-request outcomes, and `AuthGateway` folds those
//! into the user-facing auth vocabulary. None of these are fatal; the worst
//! case is the forced-logout path.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A request never produced an HTTP response (offline, CORS, aborted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Outcome of a single call made through `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server rejected the session (401)")]
    Unauthorized,
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// Failures surfaced by `AuthGateway` and the navigation guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Bad login attempt. The session is untouched.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A 2xx response whose body did not carry what the endpoint promises.
    #[error("invalid response from server: {0}")]
    InvalidServerResponse(String),
    /// The stored credential is missing or was rejected on revalidation.
    #[error("session is not authenticated")]
    Unauthenticated,
    #[error("network error: {0}")]
    Network(String),
    /// Stored role is not one the portal recognizes.
    #[error("stored session is corrupt")]
    CorruptSession,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.0)
    }
}

/// Route table rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("route table has no login route `{0}`")]
    MissingLoginRoute(String),
    #[error("login route `{0}` must not require authentication")]
    LoginRequiresAuth(String),
    #[error("route `{0}` is public but only the login route may skip authentication")]
    ExtraPublicRoute(String),
    #[error("route `{0}` requires a role but not authentication")]
    RoleWithoutAuth(String),
    #[error("route `{path}` requires unrecognized role `{role}`")]
    UnrecognizedRole { path: String, role: String },
    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),
    #[error("redirect `{from}` points at unknown route `{to}`")]
    DanglingRedirect { from: String, to: String },
    #[error("route path `{0}` must start with `/`")]
    RelativePath(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid guard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{field}` must be a path starting with `/`, got `{value}`")]
    NotAPath { field: &'static str, value: String },
    #[error("config field `{field}` must not end in `/` or carry a query, got `{value}`")]
    NotNormalized { field: &'static str, value: String },
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
}
