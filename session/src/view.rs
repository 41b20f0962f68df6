//! Session record and the read-only view published to the UI.
//!
//! DESIGN
//! ======
//! [`Session`] is only written by the provider. Its setters uphold two rules:
//! `ready` never reverts once set, and `authenticated` is only ever stored
//! together with a token and its claims.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::claims::{self, TokenClaims};

/// Mutable session record owned by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    ready: bool,
    authenticated: bool,
    token: Option<String>,
    claims: Option<TokenClaims>,
}

impl Session {
    #[must_use]
    pub fn ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Flip `ready` on. Returns `true` only for the first call.
    pub fn mark_ready(&mut self) -> bool {
        let first = !self.ready;
        self.ready = true;
        first
    }

    /// Record the store's current credentials.
    ///
    /// A missing token or missing claims leaves the session unauthenticated.
    pub fn set_credentials(&mut self, authenticated: bool, token: Option<String>, claims: Option<TokenClaims>) {
        if authenticated && token.is_some() && claims.is_some() {
            self.authenticated = true;
            self.token = token;
            self.claims = claims;
        } else {
            self.clear_credentials();
        }
    }

    pub fn clear_credentials(&mut self) {
        self.authenticated = false;
        self.token = None;
        self.claims = None;
    }

    #[must_use]
    pub fn view(&self, default_client_id: &str) -> SessionView {
        SessionView {
            ready: self.ready,
            authenticated: self.authenticated,
            token: self.token.clone(),
            claims: self.claims.clone(),
            default_client_id: default_client_id.to_owned(),
        }
    }
}

/// Snapshot of the session handed to components and guards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionView {
    pub ready: bool,
    pub authenticated: bool,
    pub token: Option<String>,
    pub claims: Option<TokenClaims>,
    /// Client used by [`SessionView::has_client_role`] when none is given.
    pub default_client_id: String,
}

impl SessionView {
    /// Display name of the signed-in user.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.claims.as_ref().and_then(|c| c.username.as_deref())
    }

    #[must_use]
    pub fn has_realm_role(&self, role: &str) -> bool {
        claims::has_realm_role(self.claims.as_ref(), role)
    }

    #[must_use]
    pub fn has_client_role(&self, role: &str, client_id: Option<&str>) -> bool {
        let client_id = client_id.unwrap_or(&self.default_client_id);
        claims::has_client_role(self.claims.as_ref(), role, client_id)
    }

    /// Authenticated and holding the realm-wide `admin_role`.
    #[must_use]
    pub fn is_admin(&self, admin_role: &str) -> bool {
        self.authenticated && self.has_realm_role(admin_role)
    }
}
