//! Session-driven navigation shell policy.
//!
//! DESIGN
//! ======
//! Redirects decided here are conveniences, not security boundaries: the
//! route guards still protect every admin view. Each redirect fires only on a
//! session transition so re-rendering the shell can never loop.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::SessionConfig;
use crate::guard::{Location, ResumeState};
use crate::view::SessionView;

/// Which session controls the navigation bar shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavAffordances {
    pub show_login: bool,
    pub show_account: bool,
    pub show_admin: bool,
}

/// Nothing is offered until the identity provider handshake has settled.
#[must_use]
pub fn affordances(session: &SessionView, config: &SessionConfig) -> NavAffordances {
    if !session.ready {
        return NavAffordances::default();
    }
    NavAffordances {
        show_login: !session.authenticated,
        show_account: session.authenticated,
        show_admin: session.is_admin(&config.admin_role),
    }
}

/// Single uppercase letter for the avatar bubble.
///
/// Uses the local part of e-mail style usernames and `?` when unknown.
#[must_use]
pub fn avatar_initial(username: Option<&str>) -> String {
    let Some(name) = username.map(str::trim).filter(|n| !n.is_empty()) else {
        return "?".to_owned();
    };
    let local = name.split('@').next().map(str::trim).unwrap_or_default();
    let base = if local.is_empty() { name } else { local };
    base.chars()
        .next()
        .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
}

/// Admin landing redirect applied right after an admin signs in.
///
/// Skipped when an explicit resume location is attached or the user is
/// already on an admin destination.
#[must_use]
pub fn post_login_redirect(
    previous: &SessionView,
    current: &SessionView,
    location: &Location,
    resume: Option<&ResumeState>,
    config: &SessionConfig,
) -> Option<String> {
    let role = &config.admin_role;
    if !current.is_admin(role) || previous.is_admin(role) {
        return None;
    }
    if resume.is_some() || config.is_admin_destination(&location.pathname) {
        return None;
    }
    Some(config.admin_landing.clone())
}

/// Return to the location a guard redirected away from once a login completes.
#[must_use]
pub fn resume_redirect(
    previous: &SessionView,
    current: &SessionView,
    location: &Location,
    resume: Option<&ResumeState>,
) -> Option<String> {
    if previous.authenticated || !current.authenticated {
        return None;
    }
    let target = resume?.from.href();
    (target != location.href()).then_some(target)
}
