//! keycloak-js adapter implementing [`TokenStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The page shell loads the keycloak-js UMD bundle, which defines a global
//! `Keycloak` class. This module binds the handful of members the session
//! core needs and exposes them through the `TokenStore` trait.
//!
//! DESIGN
//! ======
//! keycloak-js offers one callback slot per lifecycle hook. The adapter owns
//! those slots: it installs a forwarding closure into each once and fans the
//! calls out through an [`EventBus`], so any number of listeners can attach
//! and detach independently. The slots are cleared again on drop.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use session::{AuthEvent, EventBus, IdentityProviderConfig, SessionError, TokenClaims, TokenStore};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    type Keycloak;

    #[wasm_bindgen(constructor)]
    fn new(config: &JsValue) -> Keycloak;

    #[wasm_bindgen(method)]
    fn init(this: &Keycloak, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, catch)]
    fn login(this: &Keycloak) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn logout(this: &Keycloak) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = updateToken)]
    fn update_token(this: &Keycloak, min_validity_secs: f64) -> js_sys::Promise;

    #[wasm_bindgen(method, getter)]
    fn authenticated(this: &Keycloak) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn token(this: &Keycloak) -> Option<String>;

    #[wasm_bindgen(method, getter, js_name = tokenParsed)]
    fn token_parsed(this: &Keycloak) -> JsValue;
}

/// Callback slots on the keycloak-js instance and the event each one raises.
const HOOKS: [(&str, AuthEvent); 7] = [
    ("onReady", AuthEvent::Ready),
    ("onAuthSuccess", AuthEvent::Success),
    ("onAuthError", AuthEvent::Error),
    ("onAuthRefreshSuccess", AuthEvent::RefreshSuccess),
    ("onAuthRefreshError", AuthEvent::RefreshError),
    ("onAuthLogout", AuthEvent::Logout),
    ("onTokenExpired", AuthEvent::TokenExpired),
];

pub struct KeycloakStore {
    kc: Keycloak,
    events: Rc<EventBus<AuthEvent>>,
    hooks: Vec<Closure<dyn Fn()>>,
}

impl KeycloakStore {
    /// Create the keycloak-js instance and take over its callback slots.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Initialize`] when the keycloak-js bundle is
    /// missing or rejects the configuration.
    pub fn new(config: &IdentityProviderConfig) -> Result<Self, SessionError> {
        let raw = serde_json::json!({
            "url": config.url,
            "realm": config.realm,
            "clientId": config.client_id,
        });
        let options = to_js(&raw)?;
        let global = js_sys::global();
        let defined = js_sys::Reflect::has(&global, &JsValue::from_str("Keycloak")).unwrap_or(false);
        if !defined {
            return Err(SessionError::Initialize("keycloak-js is not loaded".to_owned()));
        }
        let kc = Keycloak::new(&options);

        let events = Rc::new(EventBus::new());
        let mut hooks = Vec::with_capacity(HOOKS.len());
        for (slot, event) in HOOKS {
            let bus = Rc::clone(&events);
            let hook = Closure::<dyn Fn()>::new(move || bus.emit(&event));
            js_sys::Reflect::set(&kc, &JsValue::from_str(slot), hook.as_ref())
                .map_err(|e| SessionError::Initialize(describe(&e)))?;
            hooks.push(hook);
        }

        Ok(Self { kc, events, hooks })
    }
}

impl Drop for KeycloakStore {
    fn drop(&mut self) {
        for (slot, _) in HOOKS {
            let _ = js_sys::Reflect::set(&self.kc, &JsValue::from_str(slot), &JsValue::UNDEFINED);
        }
        self.hooks.clear();
    }
}

#[async_trait(?Send)]
impl TokenStore for KeycloakStore {
    async fn initialize(&self) -> Result<bool, SessionError> {
        let options = to_js(&serde_json::json!({
            "onLoad": "check-sso",
            "pkceMethod": "S256",
            "checkLoginIframe": false,
        }))?;
        let outcome = JsFuture::from(self.kc.init(&options))
            .await
            .map_err(|e| SessionError::Initialize(describe(&e)))?;
        Ok(outcome.as_bool().unwrap_or(false))
    }

    fn login(&self) {
        settle("login", self.kc.login());
    }

    fn logout(&self) {
        settle("logout", self.kc.logout());
    }

    async fn refresh_token(&self, min_validity: Duration) -> Result<bool, SessionError> {
        #[allow(clippy::cast_precision_loss)]
        let secs = min_validity.as_secs() as f64;
        let refreshed = JsFuture::from(self.kc.update_token(secs))
            .await
            .map_err(|e| SessionError::Refresh(describe(&e)))?;
        Ok(refreshed.as_bool().unwrap_or(false))
    }

    fn is_authenticated(&self) -> bool {
        self.kc.authenticated().unwrap_or(false)
    }

    fn token(&self) -> Option<String> {
        self.kc.token()
    }

    fn claims(&self) -> Option<TokenClaims> {
        let parsed = self.kc.token_parsed();
        if parsed.is_undefined() || parsed.is_null() {
            return None;
        }
        let raw = js_sys::JSON::stringify(&parsed).ok()?.as_string()?;
        match TokenClaims::from_json(&raw) {
            Ok(claims) => Some(claims),
            Err(e) => {
                log::warn!("unreadable token claims: {e}");
                None
            }
        }
    }

    fn events(&self) -> &EventBus<AuthEvent> {
        &self.events
    }
}

/// Log a redirect call that threw or whose promise rejected.
fn settle(action: &'static str, call: Result<js_sys::Promise, JsValue>) {
    match call {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("keycloak {action} rejected: {}", describe(&e));
            }
        }),
        Err(e) => log::warn!("keycloak {action} failed: {}", describe(&e)),
    }
}

fn to_js(value: &serde_json::Value) -> Result<JsValue, SessionError> {
    js_sys::JSON::parse(&value.to_string()).map_err(|e| SessionError::Initialize(describe(&e)))
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
