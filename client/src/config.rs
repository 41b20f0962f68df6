//! Startup configuration handed from the SSR shell to the hydrated client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server serializes a [`ClientConfig`] into a `<meta>` tag of the page
//! shell. The browser reads it back before the session provider boots, so the
//! WASM bundle carries no deployment-specific URLs.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use leptos::prelude::*;
use session::ClientConfig;

/// `name` attribute of the meta tag carrying the serialized config.
pub const CONFIG_META_NAME: &str = "cinema-config";

/// Parse the embedded config, falling back to defaults on bad input.
pub fn parse_embedded(raw: Option<&str>) -> ClientConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        leptos::logging::warn!("no embedded client config; using defaults");
        return ClientConfig::default();
    };
    ClientConfig::from_json(raw).unwrap_or_else(|e| {
        leptos::logging::warn!("{e}; using default client config");
        ClientConfig::default()
    })
}

/// Read the config the server embedded in the current document.
pub fn from_document() -> ClientConfig {
    #[cfg(feature = "hydrate")]
    {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| {
                doc.query_selector(&format!("meta[name=\"{CONFIG_META_NAME}\"]"))
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"));
        parse_embedded(raw.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        ClientConfig::default()
    }
}

/// Config provided by the server render context, or read from the document.
pub fn current() -> ClientConfig {
    use_context::<ClientConfig>().unwrap_or_else(from_document)
}
