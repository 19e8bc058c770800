/// TMDB catalog provider
///
/// Builds the catalog from TMDB's popular movies list.
///
/// API Flow:
/// 1. Genres: /genre/movie/list → genre id to name table
/// 2. Movies: /movie/popular → first page of popular movies with genre ids
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Movie, TmdbGenreList, TmdbMovie, TmdbPage},
    services::providers::CatalogProvider,
};

const CATALOG_CACHE_TTL: u64 = 3600; // 1 hour

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    cache: Option<Cache>,
}

impl TmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        cache: Option<Cache>,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
            cache,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_genres(&self) -> AppResult<HashMap<u32, String>> {
        let list: TmdbGenreList = self.get_json("/genre/movie/list").await?;
        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    async fn fetch_uncached(&self) -> AppResult<Vec<Movie>> {
        let (genres, page) = tokio::try_join!(
            self.fetch_genres(),
            self.get_json::<TmdbPage>("/movie/popular")
        )?;

        let movies: Vec<Movie> = page
            .results
            .into_iter()
            .map(|movie| self.to_movie(movie, &genres))
            .collect();

        tracing::info!(
            movies = movies.len(),
            genres = genres.len(),
            provider = "tmdb",
            "Catalog fetched"
        );

        Ok(movies)
    }

    /// Converts a TMDB record; genre ids missing from the table are dropped
    fn to_movie(&self, movie: TmdbMovie, genres: &HashMap<u32, String>) -> Movie {
        Movie {
            id: movie.id,
            title: movie.title,
            genres: movie
                .genre_ids
                .iter()
                .filter_map(|id| genres.get(id).cloned())
                .collect(),
            description: movie.overview.unwrap_or_default(),
            image_url: movie
                .poster_path
                .map(|path| format!("{}{}", self.image_base_url, path))
                .unwrap_or_default(),
            rating: movie.vote_average,
            year: release_year(movie.release_date.as_deref()),
        }
    }
}

impl TmdbProvider {
    /// Redis key the fetched catalog is stored under
    fn cache_key(&self) -> CacheKey {
        CacheKey::Catalog(self.name().to_string())
    }
}

/// Year of a `YYYY-MM-DD` date, 0 when absent or malformed
fn release_year(release_date: Option<&str>) -> i32 {
    release_date
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.year())
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_movies(&self) -> AppResult<Vec<Movie>> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                self.cache_key(),
                CATALOG_CACHE_TTL,
                self.fetch_uncached()
            ),
            None => self.fetch_uncached().await,
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            api_url.to_string(),
            "https://image.tmdb.org/t/p/w500".to_string(),
            None,
        )
    }

    fn genre_table() -> HashMap<u32, String> {
        HashMap::from([(28, "Action".to_string()), (18, "Drama".to_string())])
    }

    /// Serves a minimal fake TMDB API and returns its base URL
    async fn spawn_fake_tmdb() -> String {
        async fn genres(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
            if params.get("api_key").map(String::as_str) != Some("test_key") {
                return (StatusCode::UNAUTHORIZED, Json(json!({ "status_code": 7 })));
            }
            (
                StatusCode::OK,
                Json(json!({ "genres": [{ "id": 28, "name": "Action" }, { "id": 80, "name": "Crime" }] })),
            )
        }

        async fn popular() -> Json<Value> {
            Json(json!({
                "page": 1,
                "results": [
                    {
                        "id": 155,
                        "title": "The Dark Knight",
                        "overview": "Batman raises the stakes.",
                        "poster_path": "/dk.jpg",
                        "vote_average": 8.5,
                        "release_date": "2008-07-16",
                        "genre_ids": [28, 80]
                    },
                    {
                        "id": 680,
                        "title": "Pulp Fiction",
                        "overview": null,
                        "poster_path": null,
                        "vote_average": 8.5,
                        "release_date": "",
                        "genre_ids": [80, 53]
                    }
                ]
            }))
        }

        let app = Router::new()
            .route("/genre/movie/list", get(genres))
            .route("/movie/popular", get(popular));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_to_movie_maps_fields() {
        let provider = create_test_provider("http://test.local");
        let movie = provider.to_movie(
            TmdbMovie {
                id: 949,
                title: "Heat".to_string(),
                overview: Some("A group of professional bank robbers.".to_string()),
                poster_path: Some("/heat.jpg".to_string()),
                vote_average: 7.9,
                release_date: Some("1995-12-15".to_string()),
                genre_ids: vec![28, 18, 9999],
            },
            &genre_table(),
        );

        assert_eq!(movie.id, 949);
        assert_eq!(movie.genres, vec!["Action", "Drama"]);
        assert_eq!(movie.image_url, "https://image.tmdb.org/t/p/w500/heat.jpg");
        assert_eq!(movie.rating, 7.9);
        assert_eq!(movie.year, 1995);
    }

    #[test]
    fn test_to_movie_without_optional_fields() {
        let provider = create_test_provider("http://test.local");
        let movie = provider.to_movie(
            TmdbMovie {
                id: 1,
                title: "Untitled".to_string(),
                overview: None,
                poster_path: None,
                vote_average: 0.0,
                release_date: None,
                genre_ids: vec![],
            },
            &genre_table(),
        );

        assert_eq!(movie.description, "");
        assert_eq!(movie.image_url, "");
        assert_eq!(movie.year, 0);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("2010-07-15")), 2010);
        assert_eq!(release_year(Some("")), 0);
        assert_eq!(release_year(Some("2010")), 0);
        assert_eq!(release_year(None), 0);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = create_test_provider("https://api.themoviedb.org/3/");
        assert_eq!(provider.api_url, "https://api.themoviedb.org/3");
    }

    #[tokio::test]
    async fn test_fetch_movies_from_api() {
        let base_url = spawn_fake_tmdb().await;
        let provider = create_test_provider(&base_url);

        let movies = provider.fetch_movies().await.unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "The Dark Knight");
        assert_eq!(movies[0].genres, vec!["Action", "Crime"]);
        assert_eq!(movies[0].year, 2008);
        assert_eq!(movies[1].genres, vec!["Crime"]);
        assert_eq!(movies[1].image_url, "");
    }

    #[tokio::test]
    async fn test_fetch_movies_bad_key() {
        let base_url = spawn_fake_tmdb().await;
        let provider = TmdbProvider::new(
            "wrong".to_string(),
            base_url,
            "https://image.tmdb.org/t/p/w500".to_string(),
            None,
        );

        let result = provider.fetch_movies().await;
        assert!(matches!(result, Err(AppError::ExternalApi(msg)) if msg.contains("401")));
    }

    #[test]
    fn test_catalog_cache_key() {
        let provider = create_test_provider("http://localhost");
        assert_eq!(provider.cache_key().to_string(), "catalog:tmdb");
    }
}
