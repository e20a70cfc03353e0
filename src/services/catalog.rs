use std::sync::Arc;

use reqwest::Url;

use crate::{
    cache::ResponseCache,
    error::{AppError, AppResult},
    models::{
        CatalogRow, DiscoverRequest, Genre, GenreList, Movie, MovieDetails, MovieId, Paged,
        RowKey, SortBy, Suggestion,
    },
};

const SUGGESTION_LIMIT: usize = 6;
const DETAILS_APPENDS: &str = "videos,credits,recommendations,similar";

/// Builds catalog requests and maps TMDB responses into view models.
/// All reads go through the shared [`ResponseCache`].
#[derive(Clone)]
pub struct CatalogService {
    cache: Arc<ResponseCache>,
    api_url: String,
}

impl CatalogService {
    pub fn new(cache: Arc<ResponseCache>, api_url: impl Into<String>) -> Self {
        Self {
            cache,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full request URL. Parameter order is kept so equal requests share a
    /// cache key.
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> AppResult<String> {
        let base = format!("{}{}", self.api_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, params)
        };
        let url = parsed
            .map_err(|e| AppError::Internal(format!("Invalid catalog URL {}: {}", base, e)))?;
        Ok(url.to_string())
    }

    fn row_url(&self, key: RowKey, page: u32) -> AppResult<String> {
        let page = page.to_string();
        match key.genre() {
            Some(genre) => self.url(
                "/discover/movie",
                &[
                    ("with_genres", genre.to_string()),
                    ("sort_by", SortBy::Popularity.as_str().to_string()),
                    ("page", page),
                ],
            ),
            None => {
                let path = match key {
                    RowKey::Trending => "/trending/movie/week",
                    RowKey::Popular => "/movie/popular",
                    RowKey::NewReleases => "/movie/now_playing",
                    _ => "/movie/top_rated",
                };
                self.url(path, &[("page", page)])
            }
        }
    }

    /// One page of a named row
    pub async fn row(&self, key: RowKey, page: u32) -> AppResult<CatalogRow> {
        let url = self.row_url(key, page)?;
        let data: Paged<Movie> = self.cache.fetch(&url).await?;

        Ok(CatalogRow {
            key,
            label: key.label().to_string(),
            movies: data.results,
            page: data.page,
            total_pages: data.total_pages,
        })
    }

    /// The same page of every home row, fetched in parallel.
    ///
    /// Rows that fail are logged and left out; an error is returned only when
    /// no row could be loaded.
    pub async fn home_rows(&self, page: u32) -> AppResult<Vec<CatalogRow>> {
        let mut tasks = Vec::new();

        for key in RowKey::ALL {
            let service = self.clone();
            let task = tokio::spawn(async move { service.row(key, page).await });
            tasks.push((key, task));
        }

        let mut rows = Vec::new();
        let mut error_count = 0;

        for (key, task) in tasks {
            match task.await {
                Ok(Ok(row)) => rows.push(row),
                Ok(Err(e)) => {
                    tracing::error!(row = ?key, error = %e, "Row fetch failed");
                    error_count += 1;
                }
                Err(e) => {
                    tracing::error!(row = ?key, error = %e, "Task join error");
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = rows.len(),
                error_count = error_count,
                "Partial home row fetch failure"
            );
        }

        if rows.is_empty() {
            return Err(AppError::ExternalApi(
                "Failed to fetch any home rows".to_string(),
            ));
        }

        tracing::info!(rows = rows.len(), page = page, "Home rows fetched");
        Ok(rows)
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        let url = self.url("/genre/movie/list", &[])?;
        let list: GenreList = self.cache.fetch(&url).await?;
        Ok(list.genres)
    }

    /// Search when a query is present, otherwise filtered discovery.
    ///
    /// A query overrides every other filter, kids mode included.
    pub async fn discover(&self, request: &DiscoverRequest) -> AppResult<Paged<Movie>> {
        let url = self.discover_url(request)?;
        self.cache.fetch(&url).await
    }

    pub fn discover_url(&self, request: &DiscoverRequest) -> AppResult<String> {
        let page = request.page.max(1).to_string();
        let query = request.query.trim();

        if !query.is_empty() {
            return self.url(
                "/search/movie",
                &[("query", query.to_string()), ("page", page)],
            );
        }

        let filters = &request.filters;
        let mut params = vec![
            ("sort_by", filters.sort_by.as_str().to_string()),
            ("page", page),
        ];
        if let Some(genre) = filters.genre {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = filters.year {
            params.push(("primary_release_year", year.to_string()));
        }
        if let Some(min_rating) = filters.min_rating {
            params.push(("vote_average.gte", min_rating.to_string()));
        }
        if request.kids_mode {
            params.push(("certification_country", "US".to_string()));
            params.push(("certification.lte", "PG".to_string()));
        }

        self.url("/discover/movie", &params)
    }

    /// Movie and person matches for the search box, at most six
    pub async fn suggestions(&self, query: &str) -> AppResult<Vec<Suggestion>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.url(
            "/search/multi",
            &[("query", query.to_string()), ("page", "1".to_string())],
        )?;
        let data: Paged<Suggestion> = self.cache.fetch(&url).await?;

        Ok(data
            .results
            .into_iter()
            .filter(Suggestion::is_movie_or_person)
            .take(SUGGESTION_LIMIT)
            .collect())
    }

    pub async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        let url = self.url(
            &format!("/movie/{}", id),
            &[("append_to_response", DETAILS_APPENDS.to_string())],
        )?;
        self.cache.fetch(&url).await
    }

    /// YouTube key of the first trailer or teaser
    pub async fn trailer(&self, id: MovieId) -> AppResult<Option<String>> {
        let details = self.movie_details(id).await?;
        Ok(details.trailer_key().map(str::to_string))
    }
}
