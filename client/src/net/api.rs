//! REST helpers for the movies API and the auth admin API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each carrying the
//! session's bearer token fetched right before the request is sent.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` outputs instead of panics so failed fetches
//! degrade page behavior without crashing hydration. There is no retry: a
//! failed call is reported and the user can try again.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ManagedUser, Movie, MovieDraft, MovieFilters, NewUser};
use crate::auth::provider::SessionContext;

#[cfg(any(test, feature = "hydrate"))]
fn movies_endpoint(base: &str) -> String {
    format!("{}/movies", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn movie_endpoint(base: &str, id: i64) -> String {
    format!("{}/{id}", movies_endpoint(base))
}

#[cfg(any(test, feature = "hydrate"))]
fn users_endpoint(base: &str) -> String {
    format!("{}/api/auth/users", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(base: &str, user_id: &str) -> String {
    format!("{}/{user_id}", users_endpoint(base))
}

#[cfg(any(test, feature = "hydrate"))]
fn user_enabled_endpoint(base: &str, user_id: &str) -> String {
    format!("{}/enabled", user_endpoint(base, user_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn promote_admin_endpoint(base: &str, user_id: &str) -> String {
    format!("{}/promote-admin", user_endpoint(base, user_id))
}

/// Query pairs for the non-blank movie filters.
#[cfg(any(test, feature = "hydrate"))]
fn movie_filter_query(filters: &MovieFilters) -> Vec<(&'static str, String)> {
    [("genre", &filters.genre), ("title", &filters.title)]
        .into_iter()
        .map(|(key, value)| (key, value.trim().to_owned()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

#[cfg(any(test, feature = "hydrate"))]
fn users_query(search: &str) -> Vec<(&'static str, String)> {
    let search = search.trim();
    if search.is_empty() {
        Vec::new()
    } else {
        vec![("q", search.to_owned())]
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(action: &str, status: u16) -> String {
    format!("{action} failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn set_enabled_failed_message(status: u16) -> String {
    if status == 403 {
        "administrators cannot be enabled or disabled".to_owned()
    } else {
        request_failed_message("update user", status)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn promote_failed_message(status: u16) -> String {
    if status == 409 {
        "user is already an admin".to_owned()
    } else {
        request_failed_message("promote user", status)
    }
}

/// Attach the current bearer token, if the session holds one.
#[cfg(feature = "hydrate")]
async fn authorized(
    session: SessionContext,
    builder: gloo_net::http::RequestBuilder,
) -> gloo_net::http::RequestBuilder {
    match session.bearer_token().await {
        Some(token) => builder.header("Authorization", &bearer_header(&token)),
        None => builder,
    }
}

/// Fetch movies from `GET {movies_api}/movies`, filtered by genre and title.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn list_movies(session: SessionContext, filters: &MovieFilters) -> Result<Vec<Movie>, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = movies_endpoint(&session.config().movies_api_url);
        let builder = gloo_net::http::Request::get(&url).query(movie_filter_query(filters));
        let resp = authorized(session, builder)
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("load movies", resp.status()));
        }
        resp.json::<Vec<Movie>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, filters);
        Err("not available on server".to_owned())
    }
}

/// Fetch one movie from `GET {movies_api}/movies/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn get_movie(session: SessionContext, id: i64) -> Result<Movie, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = movie_endpoint(&session.config().movies_api_url, id);
        let resp = authorized(session, gloo_net::http::Request::get(&url))
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("load movie", resp.status()));
        }
        resp.json::<Movie>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, id);
        Err("not available on server".to_owned())
    }
}

/// Create a movie via `POST {movies_api}/movies`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn create_movie(session: SessionContext, draft: &MovieDraft) -> Result<Movie, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = movies_endpoint(&session.config().movies_api_url);
        let resp = authorized(session, gloo_net::http::Request::post(&url))
            .await
            .json(draft)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("create movie", resp.status()));
        }
        resp.json::<Movie>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, draft);
        Err("not available on server".to_owned())
    }
}

/// Replace a movie via `PUT {movies_api}/movies/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn update_movie(session: SessionContext, id: i64, draft: &MovieDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = movie_endpoint(&session.config().movies_api_url, id);
        let resp = authorized(session, gloo_net::http::Request::put(&url))
            .await
            .json(draft)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("update movie", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, id, draft);
        Err("not available on server".to_owned())
    }
}

/// Delete a movie via `DELETE {movies_api}/movies/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn delete_movie(session: SessionContext, id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = movie_endpoint(&session.config().movies_api_url, id);
        let resp = authorized(session, gloo_net::http::Request::delete(&url))
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("delete movie", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, id);
        Err("not available on server".to_owned())
    }
}

/// List realm users via `GET /api/auth/users?q=`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn list_users(session: SessionContext, search: &str) -> Result<Vec<ManagedUser>, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = users_endpoint(&session.config().auth_api_url);
        let builder = gloo_net::http::Request::get(&url).query(users_query(search));
        let resp = authorized(session, builder)
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("load users", resp.status()));
        }
        resp.json::<Vec<ManagedUser>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, search);
        Err("not available on server".to_owned())
    }
}

/// Fetch a user's detail record (with realm roles) via `GET /api/auth/users/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn get_user(session: SessionContext, user_id: &str) -> Result<ManagedUser, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = user_endpoint(&session.config().auth_api_url, user_id);
        let resp = authorized(session, gloo_net::http::Request::get(&url))
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("load user", resp.status()));
        }
        resp.json::<ManagedUser>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, user_id);
        Err("not available on server".to_owned())
    }
}

/// List users and merge each one with its detail record.
///
/// A user whose detail request fails keeps its list entry.
///
/// # Errors
///
/// Returns an error string if the list request itself fails.
pub async fn list_users_detailed(session: SessionContext, search: &str) -> Result<Vec<ManagedUser>, String> {
    let listed = list_users(session, search).await?;
    #[cfg(feature = "hydrate")]
    {
        let details = futures::future::join_all(listed.iter().map(|u| get_user(session, &u.id))).await;
        Ok(listed
            .into_iter()
            .zip(details)
            .map(|(user, detail)| match detail {
                Ok(detail) => user.merge(detail),
                Err(e) => {
                    log::warn!("user detail {} unavailable: {e}", user.id);
                    user
                }
            })
            .collect())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Ok(listed)
    }
}

/// Create a user via `POST /api/auth/users`. Returns the new user id.
///
/// # Errors
///
/// Returns an error string if the request fails or the server responds with a non-OK status.
pub async fn create_user(session: SessionContext, user: &NewUser) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = users_endpoint(&session.config().auth_api_url);
        let resp = authorized(session, gloo_net::http::Request::post(&url))
            .await
            .json(user)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("create user", resp.status()));
        }
        let created: super::types::CreatedUser = resp.json().await.map_err(|e| e.to_string())?;
        Ok(created.id)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, user);
        Err("not available on server".to_owned())
    }
}

/// Enable or disable a user via `PUT /api/auth/users/{id}/enabled`.
///
/// # Errors
///
/// Returns an error string if the request fails or the server refuses the change
/// (administrators cannot be toggled).
pub async fn set_user_enabled(session: SessionContext, user_id: &str, enabled: bool) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = user_enabled_endpoint(&session.config().auth_api_url, user_id);
        let payload = serde_json::json!({ "enabled": enabled });
        let resp = authorized(session, gloo_net::http::Request::put(&url))
            .await
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(set_enabled_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, user_id, enabled);
        Err("not available on server".to_owned())
    }
}

/// Grant the admin role via `POST /api/auth/users/{id}/promote-admin`.
///
/// The server also removes the `Customer` role in the same operation.
///
/// # Errors
///
/// Returns an error string if the request fails or the user is already an admin.
pub async fn promote_to_admin(session: SessionContext, user_id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = promote_admin_endpoint(&session.config().auth_api_url, user_id);
        let resp = authorized(session, gloo_net::http::Request::post(&url))
            .await
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(promote_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session, user_id);
        Err("not available on server".to_owned())
    }
}
