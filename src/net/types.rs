//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! Response fields are all optional at the serde level so a malformed 2xx
//! body decodes successfully and the gateway can report
//! `InvalidServerResponse` with a precise reason instead of a serde error.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/users/login`. The backend keys the identifier as `email`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Success body of the login endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "token")]
    pub id_token: Option<String>,
    #[serde(default, alias = "userRole")]
    pub role: Option<String>,
}

/// Success body of the verify endpoint. Role is optional; the stored one is kept when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default, alias = "userRole")]
    pub role: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// Human-readable message from an error response: `{"error": ..}`,
/// `{"message": ..}`, or the trimmed plain-text body.
#[must_use]
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_owned(),
    }
}
