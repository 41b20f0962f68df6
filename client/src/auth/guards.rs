//! Route guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes wrap their page in these components. Each one evaluates
//! the matching `session::guard` decision on every session or location change
//! and only renders its children once the decision is `Allow`. While the
//! session is not ready nothing is rendered and nothing navigates.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use session::{GuardDecision, RoleRequirement, RoleScope, guard};

use crate::auth::provider::use_session;
use crate::util::auth::{current_location, follow_redirect};

/// Render `children` only for signed-in users.
///
/// Anonymous visitors are sent home with their destination attached and the
/// identity provider login is started.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();
    let config = session.config().session;

    let decision = Memo::new(move |_| {
        let here = current_location(&location).without_params(&config.auth_params);
        guard::require_auth(&session.view(), &here, &config)
    });

    Effect::new(move || {
        if let GuardDecision::Redirect(redirect) = decision.get() {
            if redirect.login {
                session.login();
            }
            follow_redirect(&redirect, &navigate);
        }
    });

    view! {
        <Show when=move || decision.get() == GuardDecision::Allow>
            {children()}
        </Show>
    }
}

/// Render `children` only for users holding `role`.
///
/// `scope` defaults to realm roles; pass `RoleScope::Client(..)` to check a
/// client's roles instead. Signed-in users without the role land on the
/// not-found view.
#[component]
pub fn RequireRole(
    #[prop(into)] role: String,
    #[prop(optional)] scope: RoleScope,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();
    let config = session.config().session;
    let requirement = RoleRequirement { role, scope };

    let decision = Memo::new(move |_| {
        let here = current_location(&location).without_params(&config.auth_params);
        guard::require_role(&session.view(), &requirement, &here, &config)
    });

    Effect::new(move || {
        if let GuardDecision::Redirect(redirect) = decision.get() {
            follow_redirect(&redirect, &navigate);
        }
    });

    view! {
        <Show when=move || decision.get() == GuardDecision::Allow>
            {children()}
        </Show>
    }
}
