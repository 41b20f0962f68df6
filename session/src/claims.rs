//! Parsed bearer-token claims and role predicates.
//!
//! The identity provider hands us its decoded token payload; only the
//! identity and role fields are kept.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Identity and role information carried by the access token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: Option<String>,
    pub realm_roles: BTreeSet<String>,
    pub client_roles: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawClaims {
    preferred_username: Option<String>,
    #[serde(default)]
    realm_access: Option<RawRoles>,
    #[serde(default)]
    resource_access: BTreeMap<String, RawRoles>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRoles {
    #[serde(default)]
    roles: Vec<String>,
}

impl TokenClaims {
    /// Build claims from a Keycloak token payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload shape does not match the expected claim types.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw = RawClaims::deserialize(payload)?;
        Ok(Self {
            username: raw.preferred_username,
            realm_roles: raw
                .realm_access
                .map(|r| r.roles.into_iter().collect())
                .unwrap_or_default(),
            client_roles: raw
                .resource_access
                .into_iter()
                .map(|(client, r)| (client, r.roles.into_iter().collect()))
                .collect(),
        })
    }

    /// Parse claims from a JSON-encoded token payload.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Initialize`] when the payload is not valid JSON claims.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SessionError::Initialize(format!("token payload: {e}")))?;
        Self::from_payload(&value).map_err(|e| SessionError::Initialize(format!("token claims: {e}")))
    }

    #[must_use]
    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_roles.contains(role)
    }

    #[must_use]
    pub fn has_client_role(&self, role: &str, client_id: &str) -> bool {
        self.client_roles
            .get(client_id)
            .is_some_and(|roles| roles.contains(role))
    }
}

/// Realm role check over optional claims; absent claims never hold a role.
#[must_use]
pub fn has_realm_role(claims: Option<&TokenClaims>, role: &str) -> bool {
    claims.is_some_and(|c| c.has_realm_role(role))
}

/// Client role check over optional claims; absent claims never hold a role.
#[must_use]
pub fn has_client_role(claims: Option<&TokenClaims>, role: &str, client_id: &str) -> bool {
    claims.is_some_and(|c| c.has_client_role(role, client_id))
}
