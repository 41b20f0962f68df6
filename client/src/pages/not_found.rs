//! Not-found view, also the landing spot for role-guard rejections.

use leptos::prelude::*;

use crate::util::auth::current_resume_state;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    // Guards attach the rejected location; show it when present.
    let attempted = current_resume_state().map(|resume| resume.from.pathname);

    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            {attempted.map(|path| view! { <p class="not-found__path"><code>{path}</code></p> })}
            <a class="btn" href="/">"Back to catalog"</a>
        </section>
    }
}
