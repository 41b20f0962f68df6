//! Movie list with title/genre filters and admin actions.

use leptos::prelude::*;

use crate::auth::provider::use_session;
use crate::net::types::{Movie, MovieFilters};

#[component]
pub fn MovieListPage() -> impl IntoView {
    let session = use_session();
    let movies = RwSignal::new(Vec::<Movie>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let title_filter = RwSignal::new(String::new());
    let genre_filter = RwSignal::new(String::new());

    let load = move |filters: MovieFilters| {
        loading.set(true);
        error.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list_movies(session, &filters).await {
                Ok(list) => movies.set(list),
                Err(e) => error.set(Some(format!("Could not load movies: {e}"))),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = filters;
    };

    load(MovieFilters::default());

    let on_filter = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load(MovieFilters { title: title_filter.get(), genre: genre_filter.get() });
    };

    let on_clear = move |_| {
        title_filter.set(String::new());
        genre_filter.set(String::new());
        load(MovieFilters::default());
    };

    let on_delete = move |id: i64| {
        if !crate::util::browser::confirm("Are you sure you want to delete this movie?") {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_movie(session, id).await {
                Ok(()) => load(MovieFilters { title: title_filter.get_untracked(), genre: genre_filter.get_untracked() }),
                Err(e) => error.set(Some(format!("Could not delete movie: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    view! {
        <section class="movie-list">
            <header class="movie-list__header">
                <h1>"Movies"</h1>
                <Show when=move || session.is_admin()>
                    <a class="btn" href="/movies/new">"Add Movie"</a>
                </Show>
            </header>

            <form class="movie-list__filters" on:submit=on_filter>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || title_filter.get()
                    on:input=move |ev| title_filter.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Genre"
                    prop:value=move || genre_filter.get()
                    on:input=move |ev| genre_filter.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Filter"</button>
                <button class="btn btn--ghost" type="button" on:click=on_clear>"Clear"</button>
            </form>

            <Show when=move || error.get().is_some()>
                <p class="movie-list__error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <table class="movie-list__table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Genre"</th>
                        <th>"Duration"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || loading.get()>
                        <tr><td colspan="4">"Loading…"</td></tr>
                    </Show>
                    <Show when=move || !loading.get() && movies.with(Vec::is_empty)>
                        <tr><td colspan="4">"No movies found."</td></tr>
                    </Show>
                    <For
                        each=move || movies.get()
                        key=|m: &Movie| m.id
                        children=move |m: Movie| {
                            let id = m.id;
                            view! {
                                <tr>
                                    <td><a href=format!("/movies/{id}")>{m.title.clone()}</a></td>
                                    <td>{m.genre.clone()}</td>
                                    <td>{format!("{} min", m.duration)}</td>
                                    <td class="movie-list__actions">
                                        <Show when=move || session.is_admin()>
                                            <a class="btn btn--small" href=format!("/movies/{id}/edit")>"Edit"</a>
                                            <button class="btn btn--small btn--danger" on:click=move |_| on_delete(id)>
                                                "Delete"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
