//! Public catalog of movies now showing.

use leptos::prelude::*;

use crate::auth::provider::use_session;
use crate::net::types::Movie;

#[component]
pub fn CatalogPage() -> impl IntoView {
    let session = use_session();
    let movies = RwSignal::new(Vec::<Movie>::new());
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let filters = crate::net::types::MovieFilters::default();
        match crate::net::api::list_movies(session, &filters).await {
            Ok(list) => movies.set(list),
            Err(e) => {
                leptos::logging::warn!("catalog load failed: {e}");
                movies.set(Vec::new());
            }
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! {
        <section class="catalog">
            <h1 class="catalog__title">"Now Showing"</h1>
            <Show
                when=move || !movies.with(Vec::is_empty)
                fallback=move || {
                    view! {
                        <p class="catalog__empty">
                            {move || if loading.get() { "Loading movies…" } else { "No movies available right now." }}
                        </p>
                    }
                }
            >
                <div class="catalog__grid">
                    <For
                        each=move || movies.get()
                        key=|m: &Movie| m.id
                        children=move |m: Movie| {
                            view! {
                                <article class="movie-card">
                                    <h2 class="movie-card__title">{m.title.clone()}</h2>
                                    <p class="movie-card__genre">{m.genre.clone()}</p>
                                    <p class="movie-card__duration">{format!("{} min", m.duration)}</p>
                                    <a class="btn movie-card__details" href=format!("/movies/{}", m.id)>
                                        "View Details"
                                    </a>
                                </article>
                            }
                        }
                    />
                </div>
            </Show>
        </section>
    }
}
