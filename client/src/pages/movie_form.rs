//! Create and edit form for movies. Admin only.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::auth::provider::use_session;
use crate::state::movie_form::{MovieForm, parse_movie_id};

#[component]
pub fn MovieFormPage() -> impl IntoView {
    let session = use_session();
    let params = use_params_map();
    let navigate = use_navigate();
    let form = RwSignal::new(MovieForm::default());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);

    let movie_id = Memo::new(move |_| params.with(|p| parse_movie_id(p.get("id").as_deref())));
    let editing = move || movie_id.get().is_some();

    Effect::new(move || {
        let Some(id) = movie_id.get() else {
            return;
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::get_movie(session, id).await {
                Ok(movie) => form.set(MovieForm::from_movie(&movie)),
                Err(e) => error.set(Some(format!("Failed to load movie data: {e}"))),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    Effect::new(move || {
        if saved.get() {
            navigate("/movies", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match form.with(MovieForm::validate) {
            Ok(draft) => draft,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let id = movie_id.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match id {
                Some(id) => crate::net::api::update_movie(session, id, &draft).await,
                None => crate::net::api::create_movie(session, &draft).await.map(|_| ()),
            };
            match result {
                Ok(()) => saved.set(true),
                Err(e) => error.set(Some(format!("Failed to save movie: {e}"))),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (draft, id);
    };

    view! {
        <section class="movie-form">
            <h1>{move || if editing() { "Edit Movie" } else { "Add New Movie" }}</h1>
            <Show when=move || error.get().is_some()>
                <p class="movie-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <form on:submit=on_submit>
                <label>
                    "Movie Title"
                    <input
                        type="text"
                        required
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Genre"
                    <input
                        type="text"
                        required
                        prop:value=move || form.with(|f| f.genre.clone())
                        on:input=move |ev| form.update(|f| f.genre = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Duration (minutes)"
                    <input
                        type="number"
                        min="1"
                        required
                        prop:value=move || form.with(|f| f.duration.clone())
                        on:input=move |ev| form.update(|f| f.duration = event_target_value(&ev))
                    />
                </label>
                <div class="movie-form__actions">
                    <a class="btn btn--ghost" href="/movies">"Cancel"</a>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        {move || if editing() { "Update" } else { "Create" }}
                    </button>
                </div>
            </form>
        </section>
    }
}
