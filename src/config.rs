//! Guard configuration: endpoints, storage keys, and destination paths.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosting shell builds one `GuardConfig` at startup (usually `Default`,
//! optionally overridden from a JSON blob embedded in the page) and hands it
//! to `Portal`. Nothing reads configuration after that.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::routing::table::normalize_path;
use crate::session::Role;

pub const DEFAULT_LOGIN_ENDPOINT: &str = "/api/users/login";
pub const DEFAULT_VERIFY_ENDPOINT: &str = "/api/users/authenticate";
pub const DEFAULT_REGISTER_ENDPOINT: &str = "/api/users";
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";
pub const DEFAULT_ROLE_KEY: &str = "userRole";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_ADMIN_HOME: &str = "/admin-dashboard";
pub const DEFAULT_AGENT_HOME: &str = "/agent-dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Origin or prefix prepended to every request path. Empty means same-origin.
    pub api_base: String,
    pub login_endpoint: String,
    pub verify_endpoint: String,
    pub register_endpoint: String,
    /// localStorage key holding the bearer credential.
    pub credential_key: String,
    /// localStorage key holding the role name.
    pub role_key: String,
    pub login_path: String,
    pub admin_home: String,
    pub agent_home: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_owned(),
            verify_endpoint: DEFAULT_VERIFY_ENDPOINT.to_owned(),
            register_endpoint: DEFAULT_REGISTER_ENDPOINT.to_owned(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_owned(),
            role_key: DEFAULT_ROLE_KEY.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            admin_home: DEFAULT_ADMIN_HOME.to_owned(),
            agent_home: DEFAULT_AGENT_HOME.to_owned(),
        }
    }
}

impl GuardConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.api_base = config.api_base.trim_end_matches('/').to_owned();
        for path in [&mut config.login_path, &mut config.admin_home, &mut config.agent_home] {
            if path.starts_with('/') {
                *path = normalize_path(path).to_owned();
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that every path-like field is an absolute path, destination paths
    /// are in route-table form (no trailing slash, query, or fragment), and
    /// keys are non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("login_endpoint", &self.login_endpoint),
            ("verify_endpoint", &self.verify_endpoint),
            ("register_endpoint", &self.register_endpoint),
            ("login_path", &self.login_path),
            ("admin_home", &self.admin_home),
            ("agent_home", &self.agent_home),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::NotAPath { field, value: value.clone() });
            }
        }
        for (field, value) in [
            ("login_path", &self.login_path),
            ("admin_home", &self.admin_home),
            ("agent_home", &self.agent_home),
        ] {
            if normalize_path(value) != value.as_str() {
                return Err(ConfigError::NotNormalized { field, value: value.clone() });
            }
        }
        if self.credential_key.is_empty() {
            return Err(ConfigError::Empty("credential_key"));
        }
        if self.role_key.is_empty() {
            return Err(ConfigError::Empty("role_key"));
        }
        Ok(())
    }

    /// Landing page for a role. Anything that is not `Admin` lands on the agent dashboard.
    #[must_use]
    pub fn home_for(&self, role: &Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::Agent | Role::Unknown(_) => &self.agent_home,
        }
    }

    /// Absolute request URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
