pub mod auth;
pub mod catalog;
pub mod recommendations;
pub mod tmdb;
pub mod trending_searches;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use tmdb::{CatalogTransport, TmdbClient};
pub use trending_searches::{SearchCount, TrendingSearches, DEFAULT_TRENDING_LIMIT};
