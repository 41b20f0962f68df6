//! Page chrome shared by every routed view.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::auth::provider::use_session;
use crate::components::nav_bar::NavBar;

/// Navigation bar plus the routed page.
///
/// The page area shows a loading state until the session is ready, so no
/// page or guard runs before the identity handshake has settled.
#[component]
pub fn AppLayout() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="app-layout">
            <NavBar/>
            <main class="app-layout__content">
                <Show
                    when=move || session.ready()
                    fallback=|| view! { <p class="app-layout__loading">"Loading…"</p> }
                >
                    <Outlet/>
                </Show>
            </main>
        </div>
    }
}
