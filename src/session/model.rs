//! Session value types: the credential, the role, and the pair they form.
//!
//! DESIGN
//! ======
//! `Session` is an enum rather than two optional fields so a credential
//! without a role (or the reverse) cannot be constructed. Unrecognized role
//! strings survive as `Role::Unknown` and are handled as corrupt sessions by
//! the guard instead of leaking through as "no role".

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token issued by the server on login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens end up in log lines through `{:?}` on sessions; keep them out.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Coarse authorization category attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Agent,
    /// Raw value that matched neither known role.
    Unknown(String),
}

impl Role {
    /// Parse the wire/storage representation. Matching is exact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Admin" => Self::Admin,
            "Agent" => Self::Agent,
            other => Self::Unknown(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Agent => "Agent",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single piece of cross-cutting client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { credential: Credential, role: Role },
}

impl Session {
    #[must_use]
    pub fn authenticated(credential: Credential, role: Role) -> Self {
        Self::Authenticated { credential, role }
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { credential, .. } => Some(credential),
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { role, .. } => Some(role),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Credential present but the role is not one the portal knows.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        self.role().is_some_and(|role| !role.is_recognized())
    }
}
