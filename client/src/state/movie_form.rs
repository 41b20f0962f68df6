//! Movie create/edit form state and validation.

#[cfg(test)]
#[path = "movie_form_test.rs"]
mod movie_form_test;

use crate::net::types::{Movie, MovieDraft};

/// Raw form input, kept as typed so partial edits survive re-renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub duration: String,
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            duration: movie.duration.to_string(),
        }
    }

    /// Validate into a request body.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first invalid field.
    pub fn validate(&self) -> Result<MovieDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_owned());
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err("Genre is required.".to_owned());
        }
        let duration = parse_duration(&self.duration).ok_or_else(|| "Duration must be a positive number of minutes.".to_owned())?;
        Ok(MovieDraft { title: title.to_owned(), genre: genre.to_owned(), duration })
    }
}

/// Minutes from user input; `None` for blank, zero or non-numeric text.
pub fn parse_duration(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|minutes| *minutes > 0)
}

/// Route id parameter as a movie id.
pub fn parse_movie_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}
