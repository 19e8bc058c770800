use serde::{Deserialize, Serialize};

/// Catalog identifier for a movie
pub type MovieId = i64;

/// A movie in the catalog, as served to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Genre tags; order does not matter for scoring and duplicates are ignored
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Baseline popularity rating, only used to order cold-start recommendations
    pub rating: f64,
    #[serde(default)]
    pub year: i32,
}

impl Movie {
    /// Creates a movie with the fields the recommendation engine reads
    pub fn new(id: MovieId, title: impl Into<String>, genres: &[&str], rating: f64) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            description: String::new(),
            image_url: String::new(),
            rating,
            year: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_serializes_camel_case() {
        let mut movie = Movie::new(1, "Inception", &["Sci-Fi", "Action"], 8.8);
        movie.image_url = "https://example.com/inception.jpg".to_string();
        movie.year = 2010;

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/inception.jpg");
        assert_eq!(json["genres"][1], "Action");
        assert_eq!(json["year"], 2010);
    }

    #[test]
    fn test_movie_deserializes_with_missing_optional_fields() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 7, "title": "Heat", "rating": 8.3}"#).unwrap();
        assert_eq!(movie.id, 7);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.description, "");
        assert_eq!(movie.year, 0);
    }
}
