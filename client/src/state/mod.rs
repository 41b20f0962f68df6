//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain structs held in `RwSignal`s by pages and components. Session state is
//! not here: it is owned by the `session` crate and exposed through
//! `auth::provider`.

pub mod movie_form;
pub mod ui;
pub mod users;
