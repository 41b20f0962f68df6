//! Error type shared by the session core and its adapters.

/// Failures surfaced by the session layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Session state was requested outside of the provider subtree.
    #[error("session context is not mounted; wrap the view in <AuthProvider>")]
    NotMounted,
    /// The identity provider handshake failed.
    #[error("identity provider initialization failed: {0}")]
    Initialize(String),
    /// The identity provider rejected a token refresh.
    #[error("token refresh rejected: {0}")]
    Refresh(String),
    /// Client configuration could not be parsed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}
