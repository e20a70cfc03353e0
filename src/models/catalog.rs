use serde::{Deserialize, Serialize};

use super::movie::{GenreId, Movie};

/// The fixed set of home rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RowKey {
    Trending,
    Popular,
    #[serde(rename = "new")]
    NewReleases,
    #[serde(rename = "top")]
    TopRated,
    Action,
    Drama,
    Comedy,
    Horror,
    Romance,
}

impl RowKey {
    pub const ALL: [RowKey; 9] = [
        RowKey::Trending,
        RowKey::Popular,
        RowKey::NewReleases,
        RowKey::TopRated,
        RowKey::Action,
        RowKey::Drama,
        RowKey::Comedy,
        RowKey::Horror,
        RowKey::Romance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RowKey::Trending => "Trending Now",
            RowKey::Popular => "Popular",
            RowKey::NewReleases => "New Releases",
            RowKey::TopRated => "Top Rated",
            RowKey::Action => "Action",
            RowKey::Drama => "Drama",
            RowKey::Comedy => "Comedy",
            RowKey::Horror => "Horror",
            RowKey::Romance => "Romance",
        }
    }

    /// Genre behind a discover-backed row
    pub fn genre(&self) -> Option<GenreId> {
        match self {
            RowKey::Action => Some(28),
            RowKey::Drama => Some(18),
            RowKey::Comedy => Some(35),
            RowKey::Horror => Some(27),
            RowKey::Romance => Some(10749),
            _ => None,
        }
    }

    /// Rows grouped under the TV Shows tab
    pub fn is_tv_style(&self) -> bool {
        matches!(self, RowKey::Drama | RowKey::Comedy | RowKey::Romance)
    }
}

/// A named, paginated slice of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    pub key: RowKey,
    pub label: String,
    pub movies: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
}

impl CatalogRow {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    #[serde(rename = "popularity.desc")]
    Popularity,
    #[serde(rename = "release_date.desc")]
    Newest,
    #[serde(rename = "vote_average.desc")]
    Rating,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Popularity => "popularity.desc",
            SortBy::Newest => "release_date.desc",
            SortBy::Rating => "vote_average.desc",
        }
    }
}

/// Structured discover filters. Ignored while a search query is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverFilters {
    #[serde(default)]
    pub genre: Option<GenreId>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Everything a catalog fetch depends on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverRequest {
    pub query: String,
    pub filters: DiscoverFilters,
    pub page: u32,
    pub kids_mode: bool,
}

/// Navigation tabs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Movies,
    Tv,
    MyList,
    NewPopular,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Movies,
        View::Tv,
        View::MyList,
        View::NewPopular,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Movies => "Movies",
            View::Tv => "TV Shows",
            View::MyList => "My List",
            View::NewPopular => "New & Popular",
        }
    }
}
