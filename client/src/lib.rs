//! # client
//!
//! Leptos + WASM frontend for the cinema booking application.
//!
//! This crate contains the page shell, routed pages, navigation components,
//! the REST helpers for the movies and auth admin services, and the browser
//! bindings that plug keycloak-js into the `session` core. Session state,
//! authorization predicates and guard decisions live in `session`; this crate
//! only renders them and carries out the navigation they ask for.

#![recursion_limit = "256"]

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
