use std::collections::HashSet;

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{
        CatalogRow, DetailsView, DiscoverFilters, DiscoverRequest, Genre, LibraryEntry, Movie,
        MovieId, RowKey, Suggestion, View,
    },
    services::{SearchCount, DEFAULT_TRENDING_LIMIT},
};

use super::{AppController, MIN_QUERY_LEN};

const HERO_COUNT: usize = 5;
const TOP_TEN: usize = 10;
const NOTIFICATION_COUNT: usize = 2;
const BROWSE_PREVIEW: usize = 12;

/// Landing page model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub hero: Vec<Movie>,
    pub top10: Vec<Movie>,
    pub rows: Vec<CatalogRow>,
    pub notifications: Vec<String>,
    pub continue_watching: Vec<LibraryEntry>,
    pub browse: Vec<Movie>,
}

/// Content of one navigation tab
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPage {
    pub view: View,
    pub label: &'static str,
    pub rows: Vec<CatalogRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<Movie>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watchlist: Vec<LibraryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<LibraryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommended: Vec<Movie>,
}

/// The accumulated discover or search results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
}

impl AppController {
    /// Home rows, the genre list and the first catalog page.
    ///
    /// Each part keeps its previous value when its fetch fails. Only a home
    /// row failure is reported.
    pub async fn load_initial(&mut self) -> AppResult<()> {
        let request = self.discover_request(1);
        let (rows, genres, catalog) = tokio::join!(
            self.catalog.home_rows(1),
            self.catalog.genres(),
            self.catalog.discover(&request),
        );

        match genres {
            Ok(genres) => self.genres = genres,
            Err(e) => tracing::warn!(error = %e, "Failed to load genres"),
        }
        match catalog {
            Ok(data) => self.apply_catalog_page(1, data.results, data.total_pages),
            Err(e) => tracing::warn!(error = %e, "Failed to load catalog"),
        }

        let rows = rows?;
        tracing::info!(rows = rows.len(), genres = self.genres.len(), "Initial data loaded");
        self.rows = rows;
        Ok(())
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Appends the next page of one row. A row on its last page is returned
    /// unchanged.
    pub async fn load_more_row(&mut self, key: RowKey) -> AppResult<CatalogRow> {
        let row = self
            .rows
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| AppError::NotFound(format!("Row {} is not loaded", key.label())))?;

        if !row.has_more() {
            return Ok(row.clone());
        }

        let next = self.catalog.row(key, row.page + 1).await?;
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| AppError::NotFound(format!("Row {} is not loaded", key.label())))?;

        row.movies.extend(next.movies);
        row.page = next.page;
        row.total_pages = next.total_pages;

        tracing::info!(row = ?key, page = row.page, movies = row.movies.len(), "Row extended");
        Ok(row.clone())
    }

    fn discover_request(&self, page: u32) -> DiscoverRequest {
        DiscoverRequest {
            query: self.query.clone(),
            filters: self.filters.clone(),
            page,
            kids_mode: self.kids_mode,
        }
    }

    fn apply_catalog_page(&mut self, page: u32, movies: Vec<Movie>, total_pages: u32) {
        if page <= 1 {
            self.catalog_items = movies;
        } else {
            self.catalog_items.extend(movies);
        }
        self.discover_page = page.max(1);
        self.catalog_total_pages = total_pages.max(1);
    }

    async fn fetch_catalog_page(&mut self, page: u32) -> AppResult<()> {
        let data = self.catalog.discover(&self.discover_request(page)).await?;
        self.apply_catalog_page(page, data.results, data.total_pages);
        tracing::info!(
            page = self.discover_page,
            total_pages = self.catalog_total_pages,
            items = self.catalog_items.len(),
            "Catalog page loaded"
        );
        Ok(())
    }

    /// Called whenever query, filters or kids mode change. Pagination starts
    /// over even if the following page-1 fetch fails.
    pub(super) fn reset_pagination(&mut self) {
        self.discover_page = 1;
        self.catalog_total_pages = 1;
    }

    /// Refetches page 1 for the current query, filters and kids mode
    pub async fn refresh_catalog(&mut self) -> AppResult<()> {
        self.fetch_catalog_page(1).await
    }

    /// Background variant of [`AppController::refresh_catalog`]
    pub(super) async fn reload_catalog(&mut self) {
        if let Err(e) = self.refresh_catalog().await {
            tracing::warn!(error = %e, "Catalog reload failed, keeping previous results");
        }
    }

    /// Appends the next catalog page. Returns false once the last page is
    /// loaded.
    pub async fn load_more_catalog(&mut self) -> AppResult<bool> {
        if self.discover_page >= self.catalog_total_pages {
            return Ok(false);
        }
        self.fetch_catalog_page(self.discover_page + 1).await?;
        Ok(true)
    }

    pub fn catalog_items(&self) -> &[Movie] {
        &self.catalog_items
    }

    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage {
            items: self.catalog_items.clone(),
            page: self.discover_page,
            total_pages: self.catalog_total_pages,
            has_more: self.discover_page < self.catalog_total_pages,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the search box. Suggestions follow after the debounce; a
    /// query long enough to search switches to the Movies tab.
    pub async fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.suggestions.update(query);

        if query.trim().chars().count() >= MIN_QUERY_LEN {
            self.active_view = View::Movies;
        }
        self.reset_pagination();
        self.reload_catalog().await;
    }

    pub fn suggestions(&self) -> super::SuggestionState {
        self.suggestions.current()
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Searches for the picked suggestion directly
    pub async fn pick_suggestion(&mut self, suggestion: &Suggestion) {
        self.query = suggestion.label().to_string();
        self.suggestions.clear();
        self.active_view = View::Movies;
        self.reset_pagination();
        self.reload_catalog().await;
    }

    pub async fn set_filters(&mut self, filters: DiscoverFilters) {
        self.filters = filters;
        self.reset_pagination();
        self.reload_catalog().await;
    }

    pub async fn set_kids_mode(&mut self, enabled: bool) {
        if self.kids_mode == enabled {
            return;
        }
        self.kids_mode = enabled;
        tracing::info!(kids_mode = enabled, "Kids mode changed");
        self.reset_pagination();
        self.reload_catalog().await;
    }

    pub fn set_view(&mut self, view: View) {
        self.active_view = view;
    }

    fn row(&self, key: RowKey) -> Option<&CatalogRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    fn trending_head(&self, count: usize) -> Vec<Movie> {
        self.row(RowKey::Trending)
            .map(|row| row.movies.iter().take(count).cloned().collect())
            .unwrap_or_default()
    }

    /// Rows shown under a tab
    pub fn view_rows(&self, view: View) -> Vec<CatalogRow> {
        let keep = |row: &&CatalogRow| match view {
            View::Home => true,
            View::Movies => !row.key.is_tv_style(),
            View::Tv => row.key.is_tv_style(),
            View::NewPopular => row.key == RowKey::NewReleases,
            View::MyList => false,
        };
        self.rows.iter().filter(keep).cloned().collect()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.row(RowKey::NewReleases)
            .map(|row| {
                row.movies
                    .iter()
                    .take(NOTIFICATION_COUNT)
                    .map(|m| format!("{} just dropped", m.display_title()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn home(&self) -> HomeView {
        if self.row(RowKey::Trending).is_none() {
            tracing::warn!("Trending row missing, hero and top 10 are empty");
        }

        HomeView {
            hero: self.trending_head(HERO_COUNT),
            top10: self.trending_head(TOP_TEN),
            rows: self.view_rows(View::Home),
            notifications: self.notifications(),
            continue_watching: self.continue_watching(),
            browse: self.catalog_items.iter().take(BROWSE_PREVIEW).cloned().collect(),
        }
    }

    pub fn view_page(&self, view: View) -> ViewPage {
        let mut page = ViewPage {
            view,
            label: view.label(),
            rows: self.view_rows(view),
            catalog: Vec::new(),
            watchlist: Vec::new(),
            history: Vec::new(),
            recommended: Vec::new(),
        };

        match view {
            View::Movies => page.catalog = self.catalog_items.clone(),
            View::MyList => {
                page.watchlist = self.watchlist.clone();
                page.history = self.history.clone();
            }
            View::NewPopular => page.recommended = self.recommended(),
            View::Home | View::Tv => {}
        }
        page
    }

    /// Every movie currently on screen, catalog first, without duplicates
    pub(super) fn known_movies(&self) -> Vec<Movie> {
        let mut seen = HashSet::new();
        self.catalog_items
            .iter()
            .chain(self.rows.iter().flat_map(|r| r.movies.iter()))
            .filter(|m| seen.insert(m.id))
            .cloned()
            .collect()
    }

    /// Details modal for a title. Opening a catalog result counts towards
    /// trending searches.
    pub async fn open_details(&mut self, id: MovieId) -> AppResult<DetailsView> {
        let details = self.catalog.movie_details(id).await?;

        let from_catalog = self.catalog_items.iter().find(|m| m.id == id).cloned();
        if let Some(movie) = &from_catalog {
            self.trending.record(&self.query, movie).await;
        }

        let fallback =
            from_catalog.or_else(|| self.known_movies().into_iter().find(|m| m.id == id));
        Ok(DetailsView::new(&details, fallback.as_ref()))
    }

    pub async fn trailer(&self, id: MovieId) -> AppResult<Option<String>> {
        self.catalog.trailer(id).await
    }

    pub async fn trending_searches(&self, limit: Option<usize>) -> Vec<SearchCount> {
        self.trending.top(limit.unwrap_or(DEFAULT_TRENDING_LIMIT)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::SortBy;
    use crate::services::tmdb::MockCatalogTransport;
    use crate::storage::Storage;
    use serde_json::json;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_load_initial_fills_rows_genres_and_catalog() {
        let mut controller = controller();
        assert_ok!(controller.load_initial().await);

        assert_eq!(controller.rows().len(), RowKey::ALL.len());
        assert_eq!(controller.genres().len(), 2);
        assert_eq!(controller.catalog_items().len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_row_merges_only_that_row() {
        let mut controller = controller();
        assert_ok!(controller.load_initial().await);

        let row = controller.load_more_row(RowKey::Horror).await.unwrap();
        assert_eq!(row.page, 2);
        assert_eq!(row.movies.len(), 4);
        assert_eq!(row.movies[2].id, 21);

        let popular = controller.rows().iter().find(|r| r.key == RowKey::Popular).unwrap();
        assert_eq!(popular.page, 1);
        assert_eq!(popular.movies.len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_row_stops_at_last_page() {
        let mut controller = controller();
        assert_ok!(controller.load_initial().await);
        assert_ok!(controller.load_more_row(RowKey::Action).await);
        assert_ok!(controller.load_more_row(RowKey::Action).await);

        let row = controller.load_more_row(RowKey::Action).await.unwrap();
        assert_eq!(row.page, 3);
        assert_eq!(row.movies.len(), 6);
    }

    #[tokio::test]
    async fn test_load_more_row_requires_loaded_row() {
        let err = controller().load_more_row(RowKey::Drama).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_catalog_pagination_appends_then_stops() {
        let mut controller = controller();
        assert_ok!(controller.refresh_catalog().await);

        assert!(controller.load_more_catalog().await.unwrap());
        assert!(controller.load_more_catalog().await.unwrap());
        assert!(!controller.load_more_catalog().await.unwrap());

        assert_eq!(controller.catalog_items().len(), 6);
        assert_eq!(controller.snapshot().discover_page, 3);
    }

    #[tokio::test]
    async fn test_filter_change_resets_to_first_page() {
        let mut controller = controller();
        assert_ok!(controller.refresh_catalog().await);
        assert_ok!(controller.load_more_catalog().await);

        controller
            .set_filters(DiscoverFilters {
                sort_by: SortBy::Rating,
                ..Default::default()
            })
            .await;

        assert_eq!(controller.snapshot().discover_page, 1);
        assert_eq!(controller.catalog_items().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_more_keeps_previous_page() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("page=2"))
            .returning(|_| Err(AppError::ExternalApi("TMDB request failed: 503".to_string())));
        mock.expect_get_json().returning(|url| Ok(canned(url)));

        let mut controller = controller_with(mock, Storage::in_memory());
        assert_ok!(controller.refresh_catalog().await);
        assert!(controller.load_more_catalog().await.is_err());

        assert_eq!(controller.snapshot().discover_page, 1);
        assert_eq!(controller.catalog_items().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_filter_change_still_restarts_pagination() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("with_genres=99"))
            .returning(|_| Err(AppError::ExternalApi("TMDB request failed: 503".to_string())));
        mock.expect_get_json().returning(|url| Ok(canned(url)));

        let mut controller = controller_with(mock, Storage::in_memory());
        assert_ok!(controller.refresh_catalog().await);
        assert_ok!(controller.load_more_catalog().await);

        controller
            .set_filters(DiscoverFilters {
                genre: Some(99),
                ..Default::default()
            })
            .await;

        let page = controller.catalog_page();
        assert_eq!(page.page, 1);
        assert!(!page.has_more);
        assert!(!controller.load_more_catalog().await.unwrap());

        let ids: Vec<_> = controller.catalog_items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![11, 12, 21, 22]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_switches_to_movies_and_fetches_suggestions() {
        let mut controller = controller();
        controller.set_query("h").await;
        assert_eq!(controller.snapshot().active_view, View::Home);

        controller.set_query("he").await;
        assert_eq!(controller.snapshot().active_view, View::Movies);

        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        assert_eq!(controller.suggestions().items.len(), 1);
    }

    #[tokio::test]
    async fn test_pick_suggestion_searches_for_its_label() {
        let mut controller = controller();
        let picked: Suggestion =
            serde_json::from_value(json!({"id": 9, "media_type": "person", "name": "Al Pacino"}))
                .unwrap();

        controller.pick_suggestion(&picked).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.query, "Al Pacino");
        assert_eq!(snapshot.active_view, View::Movies);
        assert!(snapshot.suggestions.items.is_empty());
    }

    #[tokio::test]
    async fn test_home_view_models() {
        let mut controller = controller();
        assert_ok!(controller.load_initial().await);

        let home = controller.home();
        assert_eq!(home.hero.len(), 2);
        assert_eq!(home.top10.len(), 2);
        assert_eq!(
            home.notifications,
            vec!["Movie 11 just dropped", "Movie 12 just dropped"]
        );

        let tv: Vec<_> = controller.view_rows(View::Tv).iter().map(|r| r.key).collect();
        assert_eq!(tv, vec![RowKey::Drama, RowKey::Comedy, RowKey::Romance]);
        assert_eq!(controller.view_rows(View::Movies).len(), 6);
        assert!(controller.view_rows(View::MyList).is_empty());
    }

    #[tokio::test]
    async fn test_open_details_counts_catalog_opens() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("/movie/11?"))
            .returning(|_| Ok(json!({"id": 11, "runtime": 120})));
        mock.expect_get_json().returning(|url| Ok(canned(url)));

        let storage = Storage::in_memory();
        let mut controller = controller_with(mock, storage);
        assert_ok!(controller.refresh_catalog().await);

        let view = controller.open_details(11).await.unwrap();
        assert_eq!(view.title, "Movie 11");
        assert_eq!(view.runtime, "120");

        let trending = controller.trending_searches(None).await;
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].search_term, "discover");
    }

    #[tokio::test]
    async fn test_kids_mode_toggle_refetches_with_certification() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|url| url.contains("certification.lte=PG"))
            .times(1)
            .returning(|url| Ok(canned(url)));
        mock.expect_get_json().returning(|url| Ok(canned(url)));

        let mut controller = controller_with(mock, Storage::in_memory());
        controller.set_kids_mode(true).await;
        controller.set_kids_mode(true).await;
        assert!(controller.snapshot().kids_mode);
    }

    #[tokio::test]
    async fn test_known_movies_are_deduplicated() {
        let mut controller = controller();
        assert_ok!(controller.load_initial().await);

        let ids: Vec<_> = controller.known_movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }
}
