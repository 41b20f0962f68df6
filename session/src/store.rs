//! Identity-provider adapter contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser implementation wraps keycloak-js; tests use an in-memory fake.
//! The provider only ever talks to the identity provider through this trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::claims::TokenClaims;
use crate::error::SessionError;
use crate::events::EventBus;

/// Lifecycle notifications raised by the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The adapter finished initializing.
    Ready,
    /// A login completed and a token is held.
    Success,
    /// The login flow or token validation failed.
    Error,
    /// A refresh produced a new token.
    RefreshSuccess,
    /// A refresh was rejected.
    RefreshError,
    /// The session ended at the identity provider.
    Logout,
    /// The held token reached its expiry.
    TokenExpired,
}

/// Imperative surface of the identity provider client.
#[async_trait(?Send)]
pub trait TokenStore {
    /// Run the initial handshake and report whether a session exists.
    async fn initialize(&self) -> Result<bool, SessionError>;

    /// Start the interactive login flow. Control usually leaves the page.
    fn login(&self);

    /// Start the interactive logout flow. Control usually leaves the page.
    fn logout(&self);

    /// Make sure the token stays valid for at least `min_validity`.
    ///
    /// Resolves to `true` when a new token was issued.
    async fn refresh_token(&self, min_validity: Duration) -> Result<bool, SessionError>;

    fn is_authenticated(&self) -> bool;

    fn token(&self) -> Option<String>;

    fn claims(&self) -> Option<TokenClaims>;

    /// Lifecycle events raised by the identity provider.
    fn events(&self) -> &EventBus<AuthEvent>;
}
