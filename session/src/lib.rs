//! Client-side identity session core for the cinema frontend.
//!
//! This crate owns the session state machine shared by the Leptos `client`
//! and its tests. It knows nothing about the DOM: the identity provider, the
//! address bar and the async runtime are reached through small traits so the
//! whole lifecycle can be driven from native unit tests.
//!
//! ARCHITECTURE
//! ============
//! `store` adapts the identity provider, `provider` is the single writer of
//! session state, `claims`/`view` expose authorization predicates, and
//! `guard`/`nav` are pure navigation decisions executed by the UI layer.

pub mod address;
pub mod claims;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod nav;
pub mod provider;
pub mod runtime;
pub mod store;
pub mod view;

pub use claims::TokenClaims;
pub use config::{ClientConfig, IdentityProviderConfig, SessionConfig};
pub use error::SessionError;
pub use events::{EventBus, Subscription};
pub use guard::{GuardDecision, Location, Redirect, ResumeState, RoleRequirement, RoleScope};
pub use provider::SessionProvider;
pub use runtime::Runtime;
pub use store::{AuthEvent, TokenStore};
pub use view::SessionView;
