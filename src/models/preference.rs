use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieId;

/// A single user's rating of a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub user_id: String,
    pub movie_id: MovieId,
    pub rating: f64,
    pub updated_at: DateTime<Utc>,
}

impl UserPreference {
    /// Creates a preference stamped with the current time
    pub fn new(user_id: impl Into<String>, movie_id: MovieId, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            movie_id,
            rating,
            updated_at: Utc::now(),
        }
    }
}

/// Preference as returned by `GET /preferences/:user_id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub movie_id: MovieId,
    pub rating: f64,
}

impl From<&UserPreference> for RatingEntry {
    fn from(pref: &UserPreference) -> Self {
        Self {
            movie_id: pref.movie_id,
            rating: pref.rating,
        }
    }
}

/// Request body for saving a preference
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePreferenceRequest {
    pub user_id: String,
    pub movie_id: MovieId,
    pub rating: f64,
}
