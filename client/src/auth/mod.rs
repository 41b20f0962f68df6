//! Browser side of the identity session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` mounts the `session` core into the Leptos tree, `guards` turn
//! guard decisions into navigation, and the hydrate-only `keycloak` and
//! `browser` modules supply the identity provider, runtime and address bar.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod guards;
#[cfg(feature = "hydrate")]
pub mod keycloak;
pub mod provider;
