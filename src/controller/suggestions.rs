use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::{models::Suggestion, services::CatalogService};

use super::debounce::Debouncer;

/// Shorter trimmed queries never reach the network
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SuggestionState {
    /// Query the items were fetched for
    pub query: String,
    pub items: Vec<Suggestion>,
}

/// Debounced search-box suggestions.
///
/// Every keystroke supersedes the previous fetch, so a slow response for an
/// old query can never replace the items of a newer one.
pub struct SuggestionFeed {
    catalog: CatalogService,
    debouncer: Debouncer,
    latest: Arc<watch::Sender<SuggestionState>>,
}

impl SuggestionFeed {
    pub fn new(catalog: CatalogService, delay: Duration) -> Self {
        let (latest, _) = watch::channel(SuggestionState::default());
        Self {
            catalog,
            debouncer: Debouncer::new(delay),
            latest: Arc::new(latest),
        }
    }

    pub fn update(&mut self, query: &str) {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            self.debouncer.cancel();
            self.latest.send_replace(SuggestionState {
                query: query.to_string(),
                items: Vec::new(),
            });
            return;
        }

        let catalog = self.catalog.clone();
        let latest = self.latest.clone();
        let query = query.to_string();

        self.debouncer.schedule(move |generation| async move {
            match catalog.suggestions(&query).await {
                Ok(items) if generation.is_current() => {
                    tracing::debug!(query = %query, count = items.len(), "Suggestions updated");
                    latest.send_replace(SuggestionState { query, items });
                }
                Ok(_) => {
                    tracing::debug!(query = %query, "Discarding superseded suggestions");
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Suggestion fetch failed");
                }
            }
        });
    }

    /// Closes the list, e.g. after a suggestion was picked
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.latest.send_modify(|state| state.items.clear());
    }

    pub fn current(&self) -> SuggestionState {
        self.latest.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ResponseCache, DEFAULT_TTL};
    use crate::services::tmdb::MockCatalogTransport;
    use crate::storage::Storage;
    use serde_json::json;

    const DEBOUNCE: Duration = Duration::from_millis(250);

    fn feed(mock: MockCatalogTransport) -> SuggestionFeed {
        let cache = ResponseCache::new(Arc::new(mock), Storage::in_memory(), DEFAULT_TTL);
        let catalog = CatalogService::new(Arc::new(cache), "https://api.test/3");
        SuggestionFeed::new(catalog, DEBOUNCE)
    }

    fn answer(url: &str) -> serde_json::Value {
        let title = if url.contains("query=bat") { "Batman" } else { "Other" };
        json!({"results": [{"id": 1, "media_type": "movie", "title": title}]})
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_fetches_once() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("query=bat"))
            .times(1)
            .returning(|url| Ok(answer(url)));

        let mut feed = feed(mock);
        feed.update("ba");
        tokio::time::sleep(Duration::from_millis(50)).await;
        feed.update("bat");

        tokio::time::sleep(DEBOUNCE * 2).await;
        let state = feed.current();
        assert_eq!(state.query, "bat");
        assert_eq!(state.items[0].label(), "Batman");
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_without_fetching() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json().times(0);

        let mut feed = feed(mock);
        feed.update(" b ");
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(feed.current().items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_cancels_pending_fetch() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json().times(0);

        let mut feed = feed(mock);
        feed.update("batman");
        feed.update("b");
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert!(feed.current().items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_previous_items() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("query=bat"))
            .returning(|url| Ok(answer(url)));
        mock.expect_get_json().returning(|_| {
            Err(crate::error::AppError::ExternalApi(
                "TMDB request failed: 500".to_string(),
            ))
        });

        let mut feed = feed(mock);
        feed.update("bat");
        tokio::time::sleep(DEBOUNCE * 2).await;
        feed.update("zzz");
        tokio::time::sleep(DEBOUNCE * 2).await;

        let state = feed.current();
        assert_eq!(state.query, "bat");
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_empties_items() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json().returning(|url| Ok(answer(url)));

        let mut feed = feed(mock);
        feed.update("bat");
        tokio::time::sleep(DEBOUNCE * 2).await;
        assert_eq!(feed.current().items.len(), 1);

        feed.clear();
        assert!(feed.current().items.is_empty());
    }
}
