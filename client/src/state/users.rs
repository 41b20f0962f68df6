//! Users management page state.
//!
//! DESIGN
//! ======
//! The page mirrors the server's user list locally and patches it only after
//! the server confirms a change. Role exclusivity between `admin` and
//! `Customer` is enforced by the promote endpoint; the local patch reflects
//! what the server already did.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::collections::BTreeSet;

use crate::net::types::ManagedUser;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "Customer";

/// Realm roles shown in the roles column. Everything else is a system role.
pub const VISIBLE_ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_CUSTOMER];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<ManagedUser>,
    pub loading: bool,
    pub search: String,
    /// Users with a request in flight; their row actions are disabled.
    pub busy: BTreeSet<String>,
    pub error: Option<String>,
}

impl UsersState {
    /// Users matching the search text on username or email, case-insensitively.
    pub fn filtered(&self) -> Vec<ManagedUser> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.users.clone();
        }
        self.users
            .iter()
            .filter(|u| {
                [&u.username, &u.email]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn is_busy(&self, user_id: &str) -> bool {
        self.busy.contains(user_id)
    }

    pub fn set_busy(&mut self, user_id: &str, busy: bool) {
        if busy {
            self.busy.insert(user_id.to_owned());
        } else {
            self.busy.remove(user_id);
        }
    }

    /// Record a confirmed enable/disable.
    pub fn apply_enabled(&mut self, user_id: &str, enabled: bool) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.enabled = enabled;
        }
    }

    /// Record a confirmed promotion: gains `admin`, loses `Customer`.
    pub fn apply_promotion(&mut self, user_id: &str) {
        let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) else {
            return;
        };
        let mut roles: BTreeSet<String> = user.realm_roles.take().unwrap_or_default().into_iter().collect();
        roles.insert(ROLE_ADMIN.to_owned());
        roles.remove(ROLE_CUSTOMER);
        user.realm_roles = Some(roles.into_iter().collect());
    }

    /// Append a freshly created user.
    pub fn apply_created(&mut self, user: ManagedUser) {
        self.users.retain(|u| u.id != user.id);
        self.users.push(user);
    }
}

/// Admins can neither be toggled nor promoted again.
pub fn can_manage(user: &ManagedUser) -> bool {
    !user.has_realm_role(ROLE_ADMIN)
}

/// Roles to display for `user`, in a stable order.
pub fn visible_roles(user: &ManagedUser) -> Vec<&str> {
    VISIBLE_ROLES.into_iter().filter(|role| user.has_realm_role(role)).collect()
}

/// Badge modifier class for a role chip.
pub fn role_badge_class(role: &str) -> &'static str {
    match role {
        ROLE_ADMIN => "role-badge role-badge--admin",
        ROLE_CUSTOMER => "role-badge role-badge--customer",
        _ => "role-badge",
    }
}
