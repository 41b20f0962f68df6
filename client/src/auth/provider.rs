//! Leptos binding of the session provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` wraps the application. In the browser it builds the
//! keycloak-js store, boots a [`SessionProvider`] once and mirrors every
//! published [`SessionView`] into a signal that components read through
//! [`use_session`]. During server rendering no identity provider exists, so
//! the session stays in its initial not-ready state.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use leptos::prelude::*;
use session::{ClientConfig, SessionError, SessionView};
#[cfg(feature = "hydrate")]
use session::SessionProvider;

/// Copyable handle to the mounted session.
#[derive(Clone, Copy)]
pub struct SessionContext {
    view: RwSignal<SessionView>,
    config: StoredValue<ClientConfig>,
    #[cfg(feature = "hydrate")]
    provider: StoredValue<Option<SessionProvider>, LocalStorage>,
}

impl SessionContext {
    /// Context that is never booted. Server rendering and tests use it.
    pub fn detached(config: ClientConfig) -> Self {
        Self {
            view: RwSignal::new(SessionView {
                default_client_id: config.session.default_client_id.clone(),
                ..SessionView::default()
            }),
            config: StoredValue::new(config),
            #[cfg(feature = "hydrate")]
            provider: StoredValue::new_local(None),
        }
    }

    /// Reactive read of the current session.
    pub fn view(&self) -> SessionView {
        self.view.get()
    }

    pub fn ready(&self) -> bool {
        self.view.with(|v| v.ready)
    }

    pub fn authenticated(&self) -> bool {
        self.view.with(|v| v.authenticated)
    }

    pub fn username(&self) -> Option<String> {
        self.view.with(|v| v.username().map(str::to_owned))
    }

    pub fn has_realm_role(&self, role: &str) -> bool {
        self.view.with(|v| v.has_realm_role(role))
    }

    pub fn has_client_role(&self, role: &str, client_id: Option<&str>) -> bool {
        self.view.with(|v| v.has_client_role(role, client_id))
    }

    /// Authenticated and holding the configured admin realm role.
    pub fn is_admin(&self) -> bool {
        let role = self.config.with_value(|c| c.session.admin_role.clone());
        self.view.with(|v| v.is_admin(&role))
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn login(&self) {
        #[cfg(feature = "hydrate")]
        self.provider.with_value(|p| {
            if let Some(p) = p {
                p.login();
            }
        });
    }

    pub fn logout(&self) {
        #[cfg(feature = "hydrate")]
        self.provider.with_value(|p| {
            if let Some(p) = p {
                p.logout();
            }
        });
    }

    /// Token to attach to an outgoing request, refreshed when close to expiry.
    pub async fn bearer_token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let provider = self.provider.try_get_value().flatten()?;
            provider.bearer_token().await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.view.with_untracked(|v| v.token.clone())
        }
    }

    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn publish(&self, next: SessionView) {
        self.view.set(next);
    }
}

/// The mounted session.
///
/// # Panics
///
/// Panics with [`SessionError::NotMounted`] when called outside an
/// [`AuthProvider`]. A component reading the session without a provider is
/// wired incorrectly and must not silently see an anonymous session.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| panic!("{}", SessionError::NotMounted))
}

/// Provide the session to `children` and boot it in the browser.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Children) -> impl IntoView {
    let ctx = SessionContext::detached(config);
    provide_context(ctx);

    #[cfg(feature = "hydrate")]
    mount_browser_session(ctx);

    children()
}

#[cfg(feature = "hydrate")]
fn mount_browser_session(ctx: SessionContext) {
    use std::rc::Rc;

    use crate::auth::browser::{BrowserAddressBar, BrowserRuntime};
    use crate::auth::keycloak::KeycloakStore;

    let config = ctx.config();
    let store = match KeycloakStore::new(&config.identity) {
        Ok(store) => store,
        Err(e) => {
            // Without an identity provider the app still renders anonymously.
            log::error!("{e}");
            ctx.publish(SessionView { ready: true, ..ctx.view.get_untracked() });
            return;
        }
    };
    let provider = SessionProvider::new(
        Rc::new(store),
        Rc::new(BrowserRuntime),
        Rc::new(BrowserAddressBar),
        config.session,
    );
    let subscription = provider.subscribe(move |next| ctx.publish(next.clone()));
    let subscription = StoredValue::new_local(Some(subscription));
    ctx.provider.set_value(Some(provider.clone()));

    leptos::task::spawn_local(async move {
        provider.boot().await;
    });

    on_cleanup(move || {
        drop(subscription.try_update_value(Option::take));
        if let Some(Some(provider)) = ctx.provider.try_get_value() {
            provider.teardown();
        }
    });
}
