//! Remote login, re-verification, and registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway is the only writer of the session store. It never clears the
//! store on a failed `authenticate()`; deciding when a failed check means
//! "log out" belongs to the navigation guard.
//!
//! ERROR HANDLING
//! ==============
//! Every remote outcome is folded into `AuthError` before it leaves this
//! module, so callers match on auth vocabulary rather than HTTP statuses.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::Serialize;

use crate::config::GuardConfig;
use crate::error::AuthError;
use crate::net::types::{LoginRequest, LoginResponse, VerifyResponse, error_message};
use crate::net::{ApiRequest, ApiResponse, HttpClient};
use crate::session::{Credential, Role, Session, SessionEvent, SessionEvents, SessionStore};

/// What the login form collects.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub identifier: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), password: password.into() }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Acknowledgement of a registration; the body is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAck {
    pub status: u16,
    pub body: serde_json::Value,
}

pub struct AuthGateway {
    http: Rc<HttpClient>,
    store: Rc<dyn SessionStore>,
    events: SessionEvents,
    login_endpoint: String,
    verify_endpoint: String,
    register_endpoint: String,
}

impl AuthGateway {
    pub fn new(
        config: &GuardConfig,
        http: Rc<HttpClient>,
        store: Rc<dyn SessionStore>,
        events: SessionEvents,
    ) -> Self {
        Self {
            http,
            store,
            events,
            login_endpoint: config.login_endpoint.clone(),
            verify_endpoint: config.verify_endpoint.clone(),
            register_endpoint: config.register_endpoint.clone(),
        }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` on 400/401/403.
    /// - `InvalidServerResponse` when a 2xx body lacks `id_token` or a recognized role.
    /// - `Network` when the request never completed.
    /// - `Http` for any other status, unchanged.
    ///
    /// The store is untouched on every error path.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        let body = serde_json::to_value(LoginRequest {
            email: &credentials.identifier,
            password: &credentials.password,
        })
        .map_err(|e| AuthError::Validation(e.to_string()))?;
        let response = self
            .http
            .send(ApiRequest::post(&self.login_endpoint).with_json(body))
            .await?;

        match response.status {
            200..=299 => {}
            400 | 401 | 403 => {
                log::info!("auth: login rejected (status {})", response.status);
                return Err(AuthError::InvalidCredentials);
            }
            status => return Err(http_error(status, &response)),
        }

        let (credential, role) = parse_login(&response)?;
        self.store.set(credential.clone(), role.clone());
        log::info!("auth: login succeeded as {role}");
        self.events.emit(&SessionEvent::LoggedIn(role.clone()));
        Ok(Session::authenticated(credential, role))
    }

    /// Re-verify the stored credential with the server.
    ///
    /// On success the confirmed role (server-reported, else the stored one)
    /// is written back. Failure leaves the store as it is.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when nothing is stored, the server rejects the
    ///   credential with a 4xx, or the session changed while the check was in flight.
    /// - `Network` on transport failure or a 5xx.
    pub async fn authenticate(&self) -> Result<Session, AuthError> {
        let Session::Authenticated { credential, role } = self.store.get() else {
            return Err(AuthError::Unauthenticated);
        };
        let response = self.http.send(ApiRequest::get(&self.verify_endpoint)).await?;

        if !response.is_success() {
            log::info!("auth: verification failed (status {})", response.status);
            return Err(if response.status >= 500 {
                AuthError::Network(format!("verification unavailable: {}", response.status))
            } else {
                AuthError::Unauthenticated
            });
        }

        // Logout or a forced clear may have happened while we were waiting.
        if self.store.get().credential() != Some(&credential) {
            return Err(AuthError::Unauthenticated);
        }

        let verified = response.decode::<Option<VerifyResponse>>().unwrap_or_default();
        let role = verified
            .and_then(|v| v.role)
            .map_or(role, |raw| Role::parse(&raw));
        self.store.set(credential.clone(), role.clone());
        Ok(Session::authenticated(credential, role))
    }

    /// Register a new user. The payload is forwarded as-is.
    ///
    /// # Errors
    ///
    /// - `Validation` on 400/409/422 with the server's message.
    /// - `Network` when the request never completed.
    /// - `Http` for any other non-2xx status.
    pub async fn register<B: Serialize + ?Sized>(&self, user: &B) -> Result<RegisterAck, AuthError> {
        let body = serde_json::to_value(user).map_err(|e| AuthError::Validation(e.to_string()))?;
        let response = self
            .http
            .send(ApiRequest::post(&self.register_endpoint).with_json(body))
            .await?;

        match response.status {
            200..=299 => Ok(RegisterAck {
                status: response.status,
                body: response.decode().unwrap_or(serde_json::Value::Null),
            }),
            400 | 409 | 422 => Err(AuthError::Validation(error_message(&response.body))),
            status => Err(http_error(status, &response)),
        }
    }

    /// Drop the local session. No server-side revocation is attempted.
    pub fn logout(&self) {
        self.store.clear();
        log::info!("auth: logged out");
        self.events.emit(&SessionEvent::LoggedOut);
    }

    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.store.get().role().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_authenticated()
    }
}

fn parse_login(response: &ApiResponse) -> Result<(Credential, Role), AuthError> {
    let body: LoginResponse = response
        .decode::<Option<LoginResponse>>()
        .map_err(|e| AuthError::InvalidServerResponse(e.to_string()))?
        .unwrap_or_default();
    let token = body
        .id_token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| AuthError::InvalidServerResponse("missing id_token".to_owned()))?;
    let raw_role = body
        .role
        .ok_or_else(|| AuthError::InvalidServerResponse("missing role".to_owned()))?;
    let role = Role::parse(&raw_role);
    if !role.is_recognized() {
        log::warn!("auth: login returned unrecognized role {raw_role:?}");
        return Err(AuthError::InvalidServerResponse(format!("unrecognized role `{raw_role}`")));
    }
    Ok((Credential::new(token), role))
}

fn http_error(status: u16, response: &ApiResponse) -> AuthError {
    AuthError::Http { status, message: error_message(&response.body) }
}
