//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped data loading and delegates session checks to
//! the guards that wrap it in `app`.

pub mod catalog;
pub mod movie_detail;
pub mod movie_form;
pub mod movie_list;
pub mod not_found;
pub mod users_management;
