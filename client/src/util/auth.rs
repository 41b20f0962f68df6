//! Shared navigation helpers for session-driven redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards and the navigation bar apply identical redirect behavior: the
//! router replaces the current entry and the resume location rides along in
//! the history state so a later login can return to it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::location::State;
use session::{Location, Redirect, ResumeState};

/// Router location as the plain [`Location`] guards evaluate.
pub fn current_location(location: &leptos_router::location::Location) -> Location {
    Location {
        pathname: location.pathname.get(),
        search: location.search.get(),
        hash: location.hash.get(),
    }
}

/// Same as [`current_location`] without subscribing to changes.
pub fn current_location_untracked(location: &leptos_router::location::Location) -> Location {
    Location {
        pathname: location.pathname.get_untracked(),
        search: location.search.get_untracked(),
        hash: location.hash.get_untracked(),
    }
}

/// Options for a guard redirect: replace the entry and carry the resume state.
pub fn redirect_options(resume: &ResumeState) -> NavigateOptions {
    NavigateOptions {
        replace: true,
        state: history_state(resume),
        ..NavigateOptions::default()
    }
}

fn history_state(resume: &ResumeState) -> State {
    #[cfg(feature = "hydrate")]
    {
        State::new(Some(wasm_bindgen::JsValue::from_str(&resume.to_json())))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = resume;
        State::default()
    }
}

/// Navigate as a guard decided.
pub fn follow_redirect<F>(redirect: &Redirect, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    navigate(&redirect.to, redirect_options(&redirect.resume));
}

/// Resume state attached to the current history entry, if any.
pub fn current_resume_state() -> Option<ResumeState> {
    #[cfg(feature = "hydrate")]
    {
        let state = web_sys::window()?.history().ok()?.state().ok()?;
        ResumeState::from_json(&state.as_string()?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
