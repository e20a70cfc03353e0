use serde::Serialize;

use super::movie::{backdrop_url, Movie, MovieDetails, MovieId};

const CAST_LIMIT: usize = 8;
const RECOMMENDATION_LIMIT: usize = 8;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CastCredit {
    pub id: u64,
    pub name: String,
    pub role: String,
}

/// What the details modal renders. Missing data is already defaulted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailsView {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub rating: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub backdrop_url: String,
    pub trailer_key: Option<String>,
    pub cast: Vec<CastCredit>,
    pub recommendations: Vec<Movie>,
}

impl DetailsView {
    /// `fallback` is the list item the modal was opened from
    pub fn new(details: &MovieDetails, fallback: Option<&Movie>) -> Self {
        let title = details
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| fallback.map(|m| m.display_title().to_string()))
            .unwrap_or_else(|| "Untitled".to_string());

        let overview = details
            .overview
            .clone()
            .or_else(|| fallback.and_then(|m| m.overview.clone()))
            .unwrap_or_default();

        let rating = details
            .vote_average
            .or_else(|| fallback.and_then(|m| m.vote_average))
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "N/A".to_string());

        let runtime = details
            .runtime
            .map(|r| r.to_string())
            .unwrap_or_else(|| "—".to_string());

        Self {
            id: details.id,
            title,
            overview,
            rating,
            runtime,
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            backdrop_url: backdrop_url(details.backdrop_path.as_deref()),
            trailer_key: details.trailer_key().map(str::to_string),
            cast: details
                .credits
                .cast
                .iter()
                .take(CAST_LIMIT)
                .map(|c| CastCredit {
                    id: c.id,
                    name: c.name.clone(),
                    role: c.role().to_string(),
                })
                .collect(),
            recommendations: details
                .recommendations
                .results
                .iter()
                .take(RECOMMENDATION_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::BACKDROP_PLACEHOLDER;

    #[test]
    fn test_sparse_details_get_placeholders() {
        let details: MovieDetails = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        let view = DetailsView::new(&details, None);

        assert_eq!(view.title, "Untitled");
        assert_eq!(view.rating, "N/A");
        assert_eq!(view.runtime, "—");
        assert_eq!(view.backdrop_url, BACKDROP_PLACEHOLDER);
        assert_eq!(view.trailer_key, None);
    }

    #[test]
    fn test_fallback_movie_fills_gaps() {
        let details: MovieDetails = serde_json::from_str(r#"{"id": 12, "runtime": 142}"#).unwrap();
        let movie = Movie {
            id: 12,
            title: Some("Heat".to_string()),
            overview: Some("Cops and robbers".to_string()),
            vote_average: Some(7.94),
            ..Default::default()
        };
        let view = DetailsView::new(&details, Some(&movie));

        assert_eq!(view.title, "Heat");
        assert_eq!(view.overview, "Cops and robbers");
        assert_eq!(view.rating, "7.9");
        assert_eq!(view.runtime, "142");
    }

    #[test]
    fn test_cast_and_recommendations_are_capped() {
        let cast: Vec<_> = (0..12)
            .map(|i| serde_json::json!({"id": i, "name": format!("Actor {}", i), "character": "X"}))
            .collect();
        let recs: Vec<_> = (0..10).map(|i| serde_json::json!({"id": 100 + i})).collect();
        let json = serde_json::json!({
            "id": 1,
            "credits": {"cast": cast},
            "recommendations": {"results": recs}
        });
        let details: MovieDetails = serde_json::from_value(json).unwrap();
        let view = DetailsView::new(&details, None);

        assert_eq!(view.cast.len(), 8);
        assert_eq!(view.cast[0].role, "X");
        assert_eq!(view.recommendations.len(), 8);
    }
}
