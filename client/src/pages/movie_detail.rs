//! Single movie view with admin edit/delete actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::auth::provider::use_session;
use crate::net::types::Movie;
use crate::state::movie_form::parse_movie_id;

#[component]
pub fn MovieDetailPage() -> impl IntoView {
    let session = use_session();
    let params = use_params_map();
    let navigate = use_navigate();
    let movie = RwSignal::new(None::<Movie>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let deleted = RwSignal::new(false);

    let movie_id = Memo::new(move |_| params.with(|p| parse_movie_id(p.get("id").as_deref())));

    Effect::new(move || {
        let Some(id) = movie_id.get() else {
            error.set(Some("Unknown movie.".to_owned()));
            loading.set(false);
            return;
        };
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::get_movie(session, id).await {
                Ok(found) => movie.set(Some(found)),
                Err(e) => error.set(Some(format!("Failed to load movie data: {e}"))),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    Effect::new(move || {
        if deleted.get() {
            navigate("/movies", NavigateOptions::default());
        }
    });

    let on_delete = move |_: leptos::ev::MouseEvent| {
        let Some(id) = movie_id.get_untracked() else {
            return;
        };
        if !crate::util::browser::confirm("Are you sure you want to delete this movie?") {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_movie(session, id).await {
                Ok(()) => deleted.set(true),
                Err(e) => error.set(Some(format!("Failed to delete movie: {e}"))),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    view! {
        <section class="movie-detail">
            <a class="movie-detail__back" href="/movies">"← Back to movies"</a>
            <Show when=move || loading.get()>
                <p>"Loading…"</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="movie-detail__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                movie
                    .get()
                    .map(|m| {
                        let id = m.id;
                        view! {
                            <article class="movie-detail__card">
                                <h1>{m.title}</h1>
                                <span class="chip">{m.genre}</span>
                                <p>{format!("Duration: {} minutes", m.duration)}</p>
                                <Show when=move || session.is_admin()>
                                    <div class="movie-detail__actions">
                                        <a class="btn" href=format!("/movies/{id}/edit")>"Edit"</a>
                                        <button class="btn btn--danger" on:click=on_delete>"Delete"</button>
                                    </div>
                                </Show>
                            </article>
                        }
                    })
            }}
        </section>
    }
}
