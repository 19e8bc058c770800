use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{MovieId, UserPreference},
};

/// Storage for per-user movie ratings
///
/// Saving a rating for a movie the user already rated replaces it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Inserts or replaces the user's rating for a movie
    async fn upsert(
        &self,
        user_id: &str,
        movie_id: MovieId,
        rating: f64,
    ) -> AppResult<UserPreference>;

    /// All of a user's ratings, ordered by movie id
    async fn list(&self, user_id: &str) -> AppResult<Vec<UserPreference>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Preference store that lives for the lifetime of the process
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    users: RwLock<HashMap<String, BTreeMap<MovieId, UserPreference>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn upsert(
        &self,
        user_id: &str,
        movie_id: MovieId,
        rating: f64,
    ) -> AppResult<UserPreference> {
        let preference = UserPreference::new(user_id, movie_id, rating);

        let mut users = self.users.write().await;
        users
            .entry(user_id.to_string())
            .or_default()
            .insert(movie_id, preference.clone());

        Ok(preference)
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<UserPreference>> {
        let users = self.users.read().await;
        Ok(users
            .get(user_id)
            .map(|prefs| prefs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
