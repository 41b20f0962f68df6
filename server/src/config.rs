//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything deployment-specific lives here. The identity provider and API
//! locations are not used by the server itself; they are folded into the
//! [`ClientConfig`] embedded in every rendered page.

use session::{ClientConfig, IdentityProviderConfig, SessionConfig};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse as the expected type.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    /// A duration variable was set to zero.
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional (defaults from [`ClientConfig::default`]):
    /// - `PORT`: default 3000
    /// - `KEYCLOAK_URL`, `KEYCLOAK_REALM`, `KEYCLOAK_CLIENT_ID`
    /// - `KEYCLOAK_JS_URL`: keycloak-js bundle loaded by the shell
    /// - `MOVIES_API_URL`, `AUTH_API_URL`
    /// - `SESSION_REFRESH_SECS`: default 30
    /// - `SESSION_MIN_VALIDITY_SECS`: default 60
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let defaults = ClientConfig::default();
        let identity = IdentityProviderConfig {
            url: var("KEYCLOAK_URL").map_or(defaults.identity.url, |v| v.trim_end_matches('/').to_owned()),
            realm: var("KEYCLOAK_REALM").unwrap_or(defaults.identity.realm),
            client_id: var("KEYCLOAK_CLIENT_ID").unwrap_or(defaults.identity.client_id),
            script_url: var("KEYCLOAK_JS_URL").unwrap_or(defaults.identity.script_url),
        };
        let session = SessionConfig {
            refresh_interval_secs: env_parse_secs(
                "SESSION_REFRESH_SECS",
                var("SESSION_REFRESH_SECS"),
                defaults.session.refresh_interval_secs,
            )?,
            min_validity_secs: env_parse_secs(
                "SESSION_MIN_VALIDITY_SECS",
                var("SESSION_MIN_VALIDITY_SECS"),
                defaults.session.min_validity_secs,
            )?,
            ..defaults.session
        };

        Ok(Self {
            port,
            client: ClientConfig {
                identity,
                movies_api_url: var("MOVIES_API_URL")
                    .map_or(defaults.movies_api_url, |v| v.trim_end_matches('/').to_owned()),
                auth_api_url: var("AUTH_API_URL").map_or(defaults.auth_api_url, |v| v.trim_end_matches('/').to_owned()),
                session,
            },
        })
    }

    /// Config handed to every rendered page.
    pub fn to_client_config(&self) -> ClientConfig {
        self.client.clone()
    }
}

fn env_parse_secs(name: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Zero { var: name }),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError::Invalid { var: name, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
