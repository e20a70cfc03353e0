use std::fmt::Display;

/// Composite owner of per-profile library data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileScope {
    pub email: String,
    pub profile_id: String,
}

impl ProfileScope {
    pub fn new(email: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            profile_id: profile_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Users,
    Session,
    SearchCounts,
    Profiles(String),
    Watchlist(ProfileScope),
    Likes(ProfileScope),
    History(ProfileScope),
    /// Cached catalog response, keyed by its full request URL
    Response(String),
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Users => write!(f, "hdmovies_users"),
            StorageKey::Session => write!(f, "hdmovies_session"),
            StorageKey::SearchCounts => write!(f, "hd_search_counts"),
            StorageKey::Profiles(email) => write!(f, "hd_profile_{}", email),
            StorageKey::Watchlist(scope) => {
                write!(f, "hd_watchlist_{}_{}", scope.email, scope.profile_id)
            }
            StorageKey::Likes(scope) => {
                write!(f, "hd_watchlist_{}_{}_likes", scope.email, scope.profile_id)
            }
            StorageKey::History(scope) => {
                write!(f, "hd_history_{}_{}", scope.email, scope.profile_id)
            }
            StorageKey::Response(url) => write!(f, "{}", url),
        }
    }
}
