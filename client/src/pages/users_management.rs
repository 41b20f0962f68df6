//! Admin panel for realm users: search, enable/disable, promote, create.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind the authentication and `admin` role guards. Every action
//! goes to the auth admin API with the session's bearer token; the local list
//! is patched only after the server confirms.

use leptos::prelude::*;

use crate::auth::provider::use_session;
use crate::net::types::{ManagedUser, NewUser};
use crate::state::users::{UsersState, can_manage, role_badge_class, visible_roles};

#[component]
pub fn UsersManagementPage() -> impl IntoView {
    let session = use_session();
    let state = RwSignal::new(UsersState::default());
    let new_user = RwSignal::new(NewUser::default());
    let notice = RwSignal::new(None::<String>);

    let fetch_users = move || {
        state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let search = state.with_untracked(|s| s.search.clone());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_users_detailed(session, &search).await;
            state.update(|s| {
                match result {
                    Ok(users) => s.users = users,
                    Err(e) => s.error = Some(format!("Could not load users: {e}")),
                }
                s.loading = false;
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = search;
    };

    // The guards only mount this page for a signed-in admin.
    Effect::new(move || {
        if session.authenticated() {
            fetch_users();
        }
    });

    let toggle_enabled = move |user: ManagedUser| {
        if !can_manage(&user) || state.with_untracked(|s| s.is_busy(&user.id)) {
            return;
        }
        state.update(|s| s.set_busy(&user.id, true));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let next = !user.enabled;
            let result = crate::net::api::set_user_enabled(session, &user.id, next).await;
            state.update(|s| {
                match result {
                    Ok(()) => s.apply_enabled(&user.id, next),
                    Err(e) => s.error = Some(e),
                }
                s.set_busy(&user.id, false);
            });
        });
    };

    let make_admin = move |user: ManagedUser| {
        if !can_manage(&user) || state.with_untracked(|s| s.is_busy(&user.id)) {
            return;
        }
        state.update(|s| s.set_busy(&user.id, true));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::promote_to_admin(session, &user.id).await;
            state.update(|s| {
                match result {
                    Ok(()) => s.apply_promotion(&user.id),
                    Err(e) => s.error = Some(e),
                }
                s.set_busy(&user.id, false);
            });
        });
    };

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        fetch_users();
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = new_user.get();
        if draft.username.trim().is_empty() || draft.email.trim().is_empty() || draft.password.is_empty() {
            notice.set(Some("Username, email and password are required.".to_owned()));
            return;
        }
        notice.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_user(session, &draft).await {
                Ok(id) => {
                    let detail = crate::net::api::get_user(session, &id).await;
                    let created = detail.unwrap_or(ManagedUser {
                        id,
                        username: Some(draft.username.clone()),
                        email: Some(draft.email.clone()),
                        enabled: true,
                        ..ManagedUser::default()
                    });
                    state.update(|s| s.apply_created(created));
                    new_user.set(NewUser::default());
                    notice.set(Some(format!("User {} created.", draft.username)));
                }
                Err(e) => notice.set(Some(format!("Could not create user: {e}"))),
            }
        });
    };

    view! {
        <section class="users-management">
            <header class="users-management__header">
                <h1>"Users Management"</h1>
                <button class="btn" on:click=move |_| fetch_users() disabled=move || state.with(|s| s.loading)>
                    {move || if state.with(|s| s.loading) { "Loading…" } else { "Refresh" }}
                </button>
            </header>

            <form class="users-management__search" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search by username or email…"
                    prop:value=move || state.with(|s| s.search.clone())
                    on:input=move |ev| state.update(|s| s.search = event_target_value(&ev))
                />
                <button class="btn btn--danger" type="submit">"Search"</button>
            </form>

            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="users-management__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <table class="users-management__table">
                <thead>
                    <tr>
                        <th>"User"</th>
                        <th>"Email"</th>
                        <th>"State"</th>
                        <th>"Roles"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || state.with(|s| s.loading)>
                        <tr><td colspan="5">"Loading users…"</td></tr>
                    </Show>
                    <Show when=move || state.with(|s| !s.loading && s.filtered().is_empty())>
                        <tr><td colspan="5">"There are no users matching your search."</td></tr>
                    </Show>
                    <For
                        each=move || state.with(UsersState::filtered)
                        key=|u: &ManagedUser| (u.id.clone(), u.enabled, u.realm_roles.clone())
                        children=move |user: ManagedUser| {
                            let manageable = can_manage(&user);
                            let id = StoredValue::new(user.id.clone());
                            let busy = move || state.with(|s| id.with_value(|id| s.is_busy(id)));
                            let roles: Vec<String> = visible_roles(&user).into_iter().map(str::to_owned).collect();
                            let toggle_target = user.clone();
                            let promote_target = user.clone();
                            view! {
                                <tr>
                                    <td>{user.username.clone().unwrap_or_default()}</td>
                                    <td>{user.email.clone().unwrap_or_default()}</td>
                                    <td>
                                        <span class=if user.enabled { "status status--active" } else { "status status--inactive" }>
                                            {if user.enabled { "Active" } else { "Inactive" }}
                                        </span>
                                    </td>
                                    <td>
                                        {roles
                                            .into_iter()
                                            .map(|role| view! { <span class=role_badge_class(&role)>{role.clone()}</span> })
                                            .collect_view()}
                                    </td>
                                    <td class="users-management__actions">
                                        <button
                                            class="btn btn--small"
                                            disabled=move || busy() || !manageable
                                            title=if manageable { "" } else { "You cannot enable/disable an administrator." }
                                            on:click=move |_| toggle_enabled(toggle_target.clone())
                                        >
                                            {if user.enabled { "Deactivate" } else { "Activate" }}
                                        </button>
                                        <button
                                            class="btn btn--small"
                                            disabled=move || busy() || !manageable
                                            title=if manageable { "Promote to admin" } else { "Already admin" }
                                            on:click=move |_| make_admin(promote_target.clone())
                                        >
                                            "Make Admin"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <form class="users-management__create" on:submit=on_create>
                <h2>"New user"</h2>
                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || new_user.with(|u| u.username.clone())
                    on:input=move |ev| new_user.update(|u| u.username = event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || new_user.with(|u| u.email.clone())
                    on:input=move |ev| new_user.update(|u| u.email = event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || new_user.with(|u| u.password.clone())
                    on:input=move |ev| new_user.update(|u| u.password = event_target_value(&ev))
                />
                <button class="btn" type="submit">"Create user"</button>
                <Show when=move || notice.get().is_some()>
                    <p class="users-management__notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
            </form>
        </section>
    }
}
