//! Wire DTOs for the movies API and the auth admin API.
//!
//! DESIGN
//! ======
//! Field names follow the JSON each service emits (`realmRoles`, `firstName`)
//! via serde renames, so pages work with idiomatic Rust names while requests
//! and responses stay byte-compatible with the backends.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A movie as returned by the movies API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub title: String,
    pub genre: String,
    /// Running time in minutes.
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub duration: u32,
}

/// Body of movie create and update requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub duration: u32,
}

impl From<&Movie> for MovieDraft {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            duration: movie.duration,
        }
    }
}

/// Optional list filters; blank values are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieFilters {
    pub title: String,
    pub genre: String,
}

/// A realm user as exposed by the auth admin API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    /// Only present on the detail endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_roles: Option<Vec<String>>,
}

impl ManagedUser {
    /// Overlay the detail record on a list entry, keeping list values the
    /// detail does not carry.
    #[must_use]
    pub fn merge(self, detail: ManagedUser) -> ManagedUser {
        ManagedUser {
            id: self.id,
            username: detail.username.or(self.username),
            email: detail.email.or(self.email),
            first_name: detail.first_name.or(self.first_name),
            last_name: detail.last_name.or(self.last_name),
            enabled: detail.enabled,
            realm_roles: detail.realm_roles.or(self.realm_roles),
        }
    }

    #[must_use]
    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_roles.as_deref().unwrap_or_default().iter().any(|r| r == role)
    }
}

/// Body of `POST /api/auth/users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response of `POST /api/auth/users`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreatedUser {
    pub id: String,
}

fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_i64_from_number(deserializer)?;
    u32::try_from(value).map_err(|_| D::Error::custom(format!("value {value} out of range for u32")))
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        // Some backends serialize numeric ids as strings.
        serde_json::Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer, got {text:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}
