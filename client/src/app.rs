//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment, WildcardSegment,
    components::{ParentRoute, Route, Router, Routes},
};
use session::ClientConfig;

use crate::auth::guards::{RequireAuth, RequireRole};
use crate::auth::provider::AuthProvider;
use crate::components::app_layout::AppLayout;
use crate::config::CONFIG_META_NAME;
use crate::pages::{
    catalog::CatalogPage, movie_detail::MovieDetailPage, movie_form::MovieFormPage, movie_list::MovieListPage,
    not_found::NotFoundPage, users_management::UsersManagementPage,
};
use crate::state::ui::UiState;

/// HTML shell rendered on the server for SSR + hydration.
///
/// `config` is embedded for the browser and the identity provider adapter
/// script is loaded before the WASM bundle boots the session.
pub fn shell(options: LeptosOptions, config: ClientConfig) -> impl IntoView {
    let embedded = config.to_json();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=CONFIG_META_NAME content=embedded/>
                <script src=config.identity.script_url></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Admin-only page: signed in first, then the admin realm role.
fn admin_only(page: fn() -> AnyView) -> impl IntoView {
    let role = crate::config::current().session.admin_role;
    view! {
        <RequireAuth>
            <RequireRole role=role.clone()>{page()}</RequireRole>
        </RequireAuth>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = crate::config::current();
    provide_context(RwSignal::new(UiState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/cinema.css"/>
        <Title text="Cinema"/>

        <AuthProvider config>
            <Router>
                <Routes fallback=NotFoundPage>
                    <ParentRoute path=StaticSegment("") view=AppLayout>
                        <Route path=StaticSegment("") view=CatalogPage/>
                        <Route path=StaticSegment("movies") view=MovieListPage/>
                        <Route
                            path=(StaticSegment("movies"), StaticSegment("new"))
                            view=|| admin_only(|| view! { <MovieFormPage/> }.into_any())
                        />
                        <Route
                            path=(StaticSegment("movies"), ParamSegment("id"), StaticSegment("edit"))
                            view=|| admin_only(|| view! { <MovieFormPage/> }.into_any())
                        />
                        <Route path=(StaticSegment("movies"), ParamSegment("id")) view=MovieDetailPage/>
                        <Route
                            path=StaticSegment("users-management")
                            view=|| admin_only(|| view! { <UsersManagementPage/> }.into_any())
                        />
                        <Route path=StaticSegment("404") view=NotFoundPage/>
                        <Route path=WildcardSegment("any") view=NotFoundPage/>
                    </ParentRoute>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
