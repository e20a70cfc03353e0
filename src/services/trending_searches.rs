use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{Movie, MovieId},
    storage::{Storage, StorageKey},
};

pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// How often a title was opened from a search or discover result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCount {
    pub movie_id: MovieId,
    pub search_term: String,
    pub title: String,
    pub poster_url: String,
    pub count: u64,
}

/// Counters keyed by `movie_{id}`
type Counters = BTreeMap<String, SearchCount>;

#[derive(Clone)]
pub struct TrendingSearches {
    storage: Storage,
}

impl TrendingSearches {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Bumps the counter for `movie`. Failures are logged, never returned.
    pub async fn record(&self, search_term: &str, movie: &Movie) {
        if let Err(e) = self.try_record(search_term, movie).await {
            tracing::error!(movie_id = movie.id, error = %e, "Error updating search count");
        }
    }

    async fn try_record(&self, search_term: &str, movie: &Movie) -> AppResult<()> {
        let mut counters: Counters = self
            .storage
            .load(&StorageKey::SearchCounts)
            .await?
            .unwrap_or_default();

        let term = search_term.trim();
        counters
            .entry(format!("movie_{}", movie.id))
            .and_modify(|c| c.count += 1)
            .or_insert_with(|| SearchCount {
                movie_id: movie.id,
                search_term: if term.is_empty() { "discover" } else { term }.to_string(),
                title: movie.display_title().to_string(),
                poster_url: movie.poster_url(),
                count: 1,
            });

        self.storage.save(&StorageKey::SearchCounts, &counters).await
    }

    /// Most opened titles first
    pub async fn top(&self, limit: usize) -> Vec<SearchCount> {
        let counters: Counters = self.storage.load_or_default(&StorageKey::SearchCounts).await;

        let mut ranked: Vec<SearchCount> = counters.into_values().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.movie_id.cmp(&b.movie_id)));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::POSTER_PLACEHOLDER;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: Some(format!("Movie {}", id)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_counts_accumulate_per_movie() {
        let trending = TrendingSearches::new(Storage::in_memory());
        trending.record("heat", &movie(1)).await;
        trending.record("heat", &movie(2)).await;
        trending.record("", &movie(2)).await;

        let top = trending.top(DEFAULT_TRENDING_LIMIT).await;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].movie_id, 2);
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].count, 1);
    }

    #[tokio::test]
    async fn test_first_search_term_is_kept_and_blank_means_discover() {
        let trending = TrendingSearches::new(Storage::in_memory());
        trending.record("  ", &movie(3)).await;
        trending.record("later", &movie(3)).await;

        let top = trending.top(1).await;
        assert_eq!(top[0].search_term, "discover");
        assert_eq!(top[0].poster_url, POSTER_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_limit() {
        let trending = TrendingSearches::new(Storage::in_memory());
        for id in 0..5 {
            trending.record("q", &movie(id)).await;
        }
        assert_eq!(trending.top(3).await.len(), 3);
    }
}
