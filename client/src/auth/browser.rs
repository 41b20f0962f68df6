//! `Runtime` and `AddressBar` backed by the browser.

use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use session::Runtime;
use session::address::AddressBar;

/// Spawns on the wasm-bindgen microtask queue and sleeps with `setTimeout`.
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}

/// `window.location` for reads and `history.replaceState` for writes.
pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    fn current(&self) -> Option<String> {
        let location = web_sys::window()?.location();
        let mut address = location.pathname().ok()?;
        address.push_str(&location.search().unwrap_or_default());
        address.push_str(&location.hash().unwrap_or_default());
        Some(address)
    }

    fn replace(&self, address: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(history) = window.history() else {
            return;
        };
        // Keep the router's history state so resume locations survive.
        let state = history.state().unwrap_or(wasm_bindgen::JsValue::NULL);
        if let Err(e) = history.replace_state_with_url(&state, "", Some(address)) {
            log::warn!("replaceState failed: {e:?}");
        }
    }
}
