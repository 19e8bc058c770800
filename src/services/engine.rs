use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::models::{Movie, MovieId};

use super::similarity::{genre_set, jaccard, GenreSet};

/// Upper end of the user rating scale; ratings are divided by this to get a weight
pub const RATING_SCALE: f64 = 5.0;

/// Number of movies returned when the user has not rated anything yet
pub const COLD_START_LIMIT: usize = 3;

/// User ratings keyed by movie id
pub type Ratings = BTreeMap<MovieId, f64>;

/// Error types for the recommendation engine
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid catalog: {0}")]
    InvalidInput(String),
}

/// Immutable snapshot of a catalog and one user's ratings
///
/// Engines are never modified after construction. [`add_rating`] returns a new
/// engine that shares the catalog with its parent, so any number of derived
/// engines can be queried from different threads without coordination.
///
/// [`add_rating`]: RecommendationEngine::add_rating
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    movies: Arc<[Movie]>,
    /// Movie id -> position in `movies`; later duplicates win
    index: Arc<HashMap<MovieId, usize>>,
    ratings: Ratings,
}

struct ScoredMovie<'a> {
    movie: &'a Movie,
    score: f64,
}

impl RecommendationEngine {
    /// Creates an engine from a catalog and an initial set of ratings
    ///
    /// Both inputs are copied into the engine. If the same movie id is rated
    /// more than once, the last rating wins.
    pub fn new<M, R>(movies: M, ratings: R) -> Self
    where
        M: IntoIterator<Item = Movie>,
        R: IntoIterator<Item = (MovieId, f64)>,
    {
        let movies: Arc<[Movie]> = movies.into_iter().collect();
        let index = movies
            .iter()
            .enumerate()
            .map(|(position, movie)| (movie.id, position))
            .collect();

        Self {
            movies,
            index: Arc::new(index),
            ratings: ratings.into_iter().collect(),
        }
    }

    /// Creates an engine with no ratings
    pub fn from_catalog<M>(movies: M) -> Self
    where
        M: IntoIterator<Item = Movie>,
    {
        Self::new(movies, Ratings::new())
    }

    /// Creates an engine from an untyped JSON catalog
    ///
    /// The catalog must be a JSON array of movies. Anything else is rejected
    /// with [`EngineError::InvalidInput`].
    pub fn from_json<R>(catalog: Value, ratings: R) -> Result<Self, EngineError>
    where
        R: IntoIterator<Item = (MovieId, f64)>,
    {
        let entries = match catalog {
            Value::Array(entries) => entries,
            other => {
                return Err(EngineError::InvalidInput(format!(
                    "expected an array of movies, got {}",
                    json_kind(&other)
                )))
            }
        };

        let movies = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                serde_json::from_value::<Movie>(entry).map_err(|e| {
                    EngineError::InvalidInput(format!("entry {}: {}", position, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(movies, ratings))
    }

    /// Returns a new engine with `movie_id` rated `rating`
    ///
    /// Any previous rating for the same movie is replaced. The receiver is left
    /// untouched. The rating is not range-checked.
    #[must_use]
    pub fn add_rating(&self, movie_id: MovieId, rating: f64) -> Self {
        let mut ratings = self.ratings.clone();
        ratings.insert(movie_id, rating);

        Self {
            movies: Arc::clone(&self.movies),
            index: Arc::clone(&self.index),
            ratings,
        }
    }

    /// The catalog in its original order
    pub fn catalog(&self) -> &[Movie] {
        &self.movies
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    /// Looks up a catalog movie by id
    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.index.get(&movie_id).map(|&position| &self.movies[position])
    }

    /// Ranks unrated movies by predicted affinity
    ///
    /// Without ratings this falls back to the [`COLD_START_LIMIT`] most popular
    /// movies. Otherwise every unrated movie is scored by the rating-weighted
    /// mean of its genre similarity to each rated movie, and the full list is
    /// returned best first. Ties keep catalog order.
    pub fn recommendations(&self) -> Vec<&Movie> {
        if self.ratings.is_empty() {
            tracing::debug!(catalog_size = self.movies.len(), "No ratings, using cold start");
            return self.most_popular(COLD_START_LIMIT);
        }

        // Rated ids missing from the catalog have no genres to compare against
        let rated: Vec<(GenreSet<'_>, f64)> = self
            .ratings
            .iter()
            .filter_map(|(&movie_id, &rating)| {
                self.get(movie_id)
                    .map(|movie| (genre_set(&movie.genres), rating / RATING_SCALE))
            })
            .collect();

        let mut scored: Vec<ScoredMovie<'_>> = self
            .movies
            .iter()
            .filter(|movie| !self.ratings.contains_key(&movie.id))
            .map(|movie| ScoredMovie {
                movie,
                score: score_candidate(movie, &rated),
            })
            .collect();

        tracing::debug!(
            candidates = scored.len(),
            rated = rated.len(),
            "Scored recommendation candidates"
        );

        scored.sort_by(|a, b| descending(a.score, b.score));
        scored.into_iter().map(|s| s.movie).collect()
    }

    fn most_popular(&self, limit: usize) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.iter().collect();
        movies.sort_by(|a, b| descending(a.rating, b.rating));
        movies.truncate(limit);
        movies
    }
}

/// Weighted mean similarity of a candidate to the rated movies
fn score_candidate(candidate: &Movie, rated: &[(GenreSet<'_>, f64)]) -> f64 {
    let genres = genre_set(&candidate.genres);
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for (rated_genres, weight) in rated {
        total_score += jaccard(&genres, rated_genres) * weight;
        total_weight += weight;
    }

    if total_weight != 0.0 {
        total_score / total_weight
    } else {
        0.0
    }
}

/// Orders higher values first; `sort_by` keeps equal values in input order
fn descending(a: f64, b: f64) -> Ordering {
    rank_key(b).total_cmp(&rank_key(a))
}

// NaN ranks as zero and -0.0 ties with 0.0
fn rank_key(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value + 0.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
