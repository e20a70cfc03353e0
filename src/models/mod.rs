pub mod account;
pub mod catalog;
pub mod details;
pub mod library;
pub mod movie;

pub use account::{Profile, Session, User, DEFAULT_PROFILE_ID};
pub use catalog::{CatalogRow, DiscoverFilters, DiscoverRequest, RowKey, SortBy, View};
pub use details::{CastCredit, DetailsView};
pub use library::{
    clamp_progress, LibraryEntry, LibraryList, HISTORY_CAP, LIKES_CAP, WATCHLIST_CAP,
};
pub use movie::{
    backdrop_url, poster_url, CastMember, Credits, Genre, GenreId, GenreList, MediaType, Movie,
    MovieDetails, MovieId, Paged, ResultList, Suggestion, Video, BACKDROP_PLACEHOLDER,
    POSTER_PLACEHOLDER,
};
