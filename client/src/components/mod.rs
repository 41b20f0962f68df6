//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application chrome while reading the session and UI
//! state from Leptos context providers.

pub mod app_layout;
pub mod nav_bar;
