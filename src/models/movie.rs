use serde::{Deserialize, Serialize};

pub type MovieId = u64;
pub type GenreId = u32;

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";
pub const BACKDROP_PLACEHOLDER: &str = "/movieposter.png.png";

const UNTITLED: &str = "Untitled";

/// Builds a poster URL, or the placeholder image when the API has none
pub fn poster_url(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}{}", POSTER_BASE_URL, path),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

pub fn backdrop_url(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}{}", BACKDROP_BASE_URL, path),
        _ => BACKDROP_PLACEHOLDER.to_string(),
    }
}

// ============================================================================
// TMDB list types
// ============================================================================

/// A movie as returned by TMDB list endpoints (rows, discover, search)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    /// TV-style results carry `name` instead of `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Movie {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    pub fn poster_url(&self) -> String {
        poster_url(self.poster_path.as_deref())
    }
}

/// One page of a paginated TMDB listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paged<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

// ============================================================================
// Search suggestions (/search/multi)
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Person,
    Tv,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl Suggestion {
    pub fn is_movie_or_person(&self) -> bool {
        matches!(
            self.media_type,
            Some(MediaType::Movie) | Some(MediaType::Person)
        )
    }

    /// Text that replaces the query when the suggestion is picked
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

// ============================================================================
// Movie details (/movie/{id}?append_to_response=...)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && matches!(self.kind.as_str(), "Trailer" | "Teaser")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

impl CastMember {
    /// Character played, or the department for crew-like credits
    pub fn role(&self) -> &str {
        self.character
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.known_for_department.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub videos: ResultList<Video>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub recommendations: ResultList<Movie>,
    #[serde(default)]
    pub similar: ResultList<Movie>,
}

impl MovieDetails {
    pub fn trailer_key(&self) -> Option<&str> {
        self.videos
            .results
            .iter()
            .find(|v| v.is_youtube_trailer())
            .map(|v| v.key.as_str())
    }
}
