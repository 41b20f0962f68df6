//! Route authorization decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Leptos guard components evaluate these on every render and then carry
//! out the returned decision. Nothing here navigates or logs in by itself.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::view::SessionView;

/// The router location a guard is evaluated against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hash: String,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), ..Self::default() }
    }

    /// Path, query and fragment joined back into a navigable href.
    #[must_use]
    pub fn href(&self) -> String {
        let mut href = self.pathname.clone();
        if !self.search.is_empty() {
            if !self.search.starts_with('?') {
                href.push('?');
            }
            href.push_str(&self.search);
        }
        if !self.hash.is_empty() {
            if !self.hash.starts_with('#') {
                href.push('#');
            }
            href.push_str(&self.hash);
        }
        href
    }

    /// Copy with `params` removed from the query.
    ///
    /// The address bar is cleaned behind the router's back, so router
    /// locations can still carry the authorization callback params.
    #[must_use]
    pub fn without_params(&self, params: &[String]) -> Self {
        let query = format!("?{}", self.search.trim_start_matches('?'));
        match crate::address::strip_auth_params(&query, params) {
            Some(clean) => Self { search: clean.trim_start_matches('?').to_owned(), ..self.clone() },
            None => self.clone(),
        }
    }
}

/// Navigation state recording where the user was headed before a redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeState {
    pub from: Location,
}

impl ResumeState {
    /// Parse resume state stored in the history entry, if it has one.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A redirect chosen by a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub resume: ResumeState,
    /// Start the identity provider login flow alongside the redirect.
    pub login: bool,
}

/// Outcome of evaluating a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not ready yet: render nothing and do not redirect.
    Pending,
    /// Render the protected content.
    Allow,
    /// Leave the route.
    Redirect(Redirect),
}

/// Which role namespace a requirement is checked against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoleScope {
    /// Roles granted across the whole realm.
    #[default]
    Realm,
    /// Roles of a given client; `None` means the configured default client.
    Client(Option<String>),
}

/// Role a route requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRequirement {
    pub role: String,
    pub scope: RoleScope,
}

impl RoleRequirement {
    #[must_use]
    pub fn realm(role: impl Into<String>) -> Self {
        Self { role: role.into(), scope: RoleScope::Realm }
    }

    #[must_use]
    pub fn client(role: impl Into<String>, client_id: Option<String>) -> Self {
        Self { role: role.into(), scope: RoleScope::Client(client_id) }
    }

    #[must_use]
    pub fn is_met_by(&self, session: &SessionView) -> bool {
        match &self.scope {
            RoleScope::Realm => session.has_realm_role(&self.role),
            RoleScope::Client(client_id) => session.has_client_role(&self.role, client_id.as_deref()),
        }
    }
}

fn redirect(to: &str, location: &Location, login: bool) -> GuardDecision {
    GuardDecision::Redirect(Redirect {
        to: to.to_owned(),
        resume: ResumeState { from: location.clone() },
        login,
    })
}

/// Require a signed-in user; anonymous visitors are sent home and asked to log in.
#[must_use]
pub fn require_auth(session: &SessionView, location: &Location, config: &SessionConfig) -> GuardDecision {
    if !session.ready {
        return GuardDecision::Pending;
    }
    if !session.authenticated {
        return redirect(&config.home_path, location, true);
    }
    GuardDecision::Allow
}

/// Require `requirement` on top of authentication.
///
/// A missing role lands on the not-found view so protected routes look
/// exactly like routes that do not exist.
#[must_use]
pub fn require_role(
    session: &SessionView,
    requirement: &RoleRequirement,
    location: &Location,
    config: &SessionConfig,
) -> GuardDecision {
    if !session.ready {
        return GuardDecision::Pending;
    }
    if !session.authenticated {
        return redirect(&config.home_path, location, false);
    }
    if !requirement.is_met_by(session) {
        return redirect(&config.not_found_path, location, false);
    }
    GuardDecision::Allow
}
