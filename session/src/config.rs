//! Typed configuration for the session core and the browser client.
//!
//! DESIGN
//! ======
//! All values are plain serde data so the SSR host can build them from its
//! environment and hand them to the hydrated client as JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_MIN_VALIDITY_SECS: u64 = 60;
pub const DEFAULT_CLIENT_ID: &str = "quarkus-api";
pub const DEFAULT_ADMIN_ROLE: &str = "admin";
pub const DEFAULT_ADMIN_LANDING: &str = "/users-management";

/// Session lifecycle and navigation policy settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Period of the background token refresh loop.
    pub refresh_interval_secs: u64,
    /// Minimum remaining token lifetime requested on each refresh.
    pub min_validity_secs: u64,
    /// Client whose roles `has_client_role` checks when no client is named.
    pub default_client_id: String,
    /// Realm role that unlocks the admin area.
    pub admin_role: String,
    /// Redirect target for unauthenticated route access.
    pub home_path: String,
    /// Redirect target for insufficient roles.
    pub not_found_path: String,
    /// Where an admin lands right after logging in.
    pub admin_landing: String,
    /// Paths an admin may already be on without being moved to the landing
    /// view. A `*` segment matches any single path segment.
    pub admin_destinations: Vec<String>,
    /// Query parameters left behind by the authorization-code exchange.
    pub auth_params: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            min_validity_secs: DEFAULT_MIN_VALIDITY_SECS,
            default_client_id: DEFAULT_CLIENT_ID.to_owned(),
            admin_role: DEFAULT_ADMIN_ROLE.to_owned(),
            home_path: "/".to_owned(),
            not_found_path: "/404".to_owned(),
            admin_landing: DEFAULT_ADMIN_LANDING.to_owned(),
            admin_destinations: vec![
                DEFAULT_ADMIN_LANDING.to_owned(),
                "/movies/new".to_owned(),
                "/movies/*/edit".to_owned(),
            ],
            auth_params: vec!["code".to_owned(), "state".to_owned(), "session_state".to_owned()],
        }
    }
}

impl SessionConfig {
    /// Refresh loop period. Zero is not a period and falls back to the default.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        match self.refresh_interval_secs {
            0 => Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    #[must_use]
    pub fn min_validity(&self) -> Duration {
        Duration::from_secs(self.min_validity_secs)
    }

    /// Whether `path` is one of the configured admin destinations.
    #[must_use]
    pub fn is_admin_destination(&self, path: &str) -> bool {
        self.admin_destinations
            .iter()
            .any(|pattern| path_matches(pattern, path))
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    let pattern = pattern.trim_end_matches('/');
    let mut want = pattern.split('/');
    let mut got = path.split('/');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some("*"), Some(seg)) if !seg.is_empty() => {}
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }
    }
}

/// Connection settings for the Keycloak realm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityProviderConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    /// Location of the keycloak-js UMD bundle loaded by the page shell.
    pub script_url: String,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_owned(),
            realm: "cinema".to_owned(),
            client_id: "cinema-frontend".to_owned(),
            script_url: "https://cdn.jsdelivr.net/npm/keycloak-js@24.0.5/dist/keycloak.min.js".to_owned(),
        }
    }
}

/// Everything the hydrated client needs at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub identity: IdentityProviderConfig,
    /// Base URL of the movies REST API (including its `/api` prefix).
    pub movies_api_url: String,
    /// Base URL of the auth admin service; empty means same origin.
    pub auth_api_url: String,
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity: IdentityProviderConfig::default(),
            movies_api_url: "http://127.0.0.1:5000/api".to_owned(),
            auth_api_url: String::new(),
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a client config embedded by the SSR shell.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `raw` is not valid config JSON.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        serde_json::from_str(raw).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Serialize for embedding in the page shell.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }
}
