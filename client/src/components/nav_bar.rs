//! Top navigation bar with session controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every page. Shows a login button to anonymous visitors and an
//! avatar menu to signed-in users, and applies the post-login redirects
//! decided by `session::nav` whenever the session changes.

use leptos::ev;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{SessionView, nav};

use crate::auth::provider::use_session;
use crate::state::ui::{UiState, closes_menu};
use crate::util::auth::{current_location_untracked, current_resume_state};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let location = use_location();
    let navigate = use_navigate();
    let config = session.config().session;

    let affordances = {
        let config = config.clone();
        Memo::new(move |_| nav::affordances(&session.view(), &config))
    };
    let initial = move || nav::avatar_initial(session.username().as_deref());

    // Close the menu whenever the route changes.
    Effect::new(move || {
        location.pathname.track();
        ui.update(UiState::close_user_menu);
    });

    let escape = window_event_listener(ev::keydown, move |ev| {
        if closes_menu(&ev.key()) {
            ui.update(UiState::close_user_menu);
        }
    });
    on_cleanup(move || escape.remove());

    // Post-login redirects fire on session transitions only.
    let previous = StoredValue::new(SessionView::default());
    Effect::new(move || {
        let current = session.view();
        let before = previous.get_value();
        previous.set_value(current.clone());

        let here = current_location_untracked(&location).without_params(&config.auth_params);
        let resume = current_resume_state();
        let target = nav::resume_redirect(&before, &current, &here, resume.as_ref())
            .or_else(|| nav::post_login_redirect(&before, &current, &here, resume.as_ref(), &config));
        if let Some(target) = target {
            navigate(&target, NavigateOptions::default());
        }
    });

    let landing = StoredValue::new(session.config().session.admin_landing);

    view! {
        <nav class="nav-bar">
            <a href="/" class="nav-bar__brand">"Cinema"</a>
            <a href="/movies" class="nav-bar__link">"Movies"</a>

            <span class="nav-bar__spacer"></span>

            <Show when=move || affordances.get().show_login>
                <button class="btn nav-bar__login" on:click=move |_| session.login()>
                    "Login"
                </button>
            </Show>

            <Show when=move || affordances.get().show_account>
                <div class="nav-bar__account">
                    <button
                        class="nav-bar__avatar"
                        title=move || session.username().unwrap_or_default()
                        on:click=move |_| ui.update(UiState::toggle_user_menu)
                    >
                        {initial}
                    </button>
                    <Show when=move || ui.get().user_menu_open>
                        <div class="nav-bar__menu" role="menu">
                            <span class="nav-bar__username">
                                {move || session.username().unwrap_or_default()}
                            </span>
                            <Show when=move || affordances.get().show_admin>
                                <a class="nav-bar__menu-item" href=move || landing.get_value()>
                                    "Manage Users"
                                </a>
                            </Show>
                            <button
                                class="nav-bar__menu-item"
                                on:click=move |_| {
                                    ui.update(UiState::close_user_menu);
                                    session.logout();
                                }
                            >
                                "Logout"
                            </button>
                        </div>
                    </Show>
                </div>
            </Show>
        </nav>
    }
}
