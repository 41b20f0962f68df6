//! Networking modules for the REST backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues authorized HTTP calls to the movies and auth admin services,
//! and `types` defines their wire schema.

pub mod api;
pub mod types;
