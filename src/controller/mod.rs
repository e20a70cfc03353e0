//! Per-session application state: who is signed in, which profile is
//! active, what the catalog shows and what the profile has saved.
//!
//! The controller is owned by [`crate::state::AppState`] behind an async
//! mutex. Every mutation that touches storage persists before returning.

use std::time::Duration;

use serde::Serialize;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        CatalogRow, DiscoverFilters, Genre, LibraryEntry, Movie, Profile, Session, View,
    },
    services::{AuthService, CatalogService, TrendingSearches},
    storage::{ProfileScope, Storage, StorageKey},
};

pub mod browse;
mod debounce;
pub mod library;
pub mod suggestions;

pub use browse::{CatalogPage, HomeView, ViewPage};
pub use debounce::{Debouncer, Generation};
pub use suggestions::{SuggestionFeed, SuggestionState, MIN_QUERY_LEN};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    NoUser,
    Authenticated { user: Session },
    ProfileActive { user: Session, profile: Profile },
}

impl SessionState {
    pub fn user(&self) -> Option<&Session> {
        match self {
            SessionState::NoUser => None,
            SessionState::Authenticated { user } | SessionState::ProfileActive { user, .. } => {
                Some(user)
            }
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SessionState::ProfileActive { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn scope(&self) -> Option<ProfileScope> {
        match self {
            SessionState::ProfileActive { user, profile } => {
                Some(ProfileScope::new(&user.email, &profile.id))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub suggestion_debounce: Duration,
    pub progress_debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            suggestion_debounce: Duration::from_millis(250),
            progress_debounce: Duration::from_millis(200),
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            suggestion_debounce: config.suggestion_debounce(),
            progress_debounce: config.progress_debounce(),
        }
    }
}

/// Serializable summary of the controller for the front end
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub session: SessionState,
    pub profiles: Vec<Profile>,
    pub kids_mode: bool,
    pub active_view: View,
    pub query: String,
    pub filters: DiscoverFilters,
    pub discover_page: u32,
    pub catalog_total_pages: u32,
    pub suggestions: SuggestionState,
}

pub struct AppController {
    auth: AuthService,
    catalog: CatalogService,
    trending: TrendingSearches,
    storage: Storage,

    state: SessionState,
    profiles: Vec<Profile>,
    kids_mode: bool,
    active_view: View,

    rows: Vec<CatalogRow>,
    genres: Vec<Genre>,
    query: String,
    filters: DiscoverFilters,
    discover_page: u32,
    catalog_items: Vec<Movie>,
    catalog_total_pages: u32,

    watchlist: Vec<LibraryEntry>,
    likes: Vec<LibraryEntry>,
    history: Vec<LibraryEntry>,

    suggestions: SuggestionFeed,
    progress_writer: Debouncer,
}

impl AppController {
    pub fn new(storage: Storage, catalog: CatalogService, settings: ControllerSettings) -> Self {
        Self {
            auth: AuthService::new(storage.clone()),
            trending: TrendingSearches::new(storage.clone()),
            suggestions: SuggestionFeed::new(catalog.clone(), settings.suggestion_debounce),
            progress_writer: Debouncer::new(settings.progress_debounce),
            catalog,
            storage,
            state: SessionState::NoUser,
            profiles: Vec::new(),
            kids_mode: false,
            active_view: View::Home,
            rows: Vec::new(),
            genres: Vec::new(),
            query: String::new(),
            filters: DiscoverFilters::default(),
            discover_page: 1,
            catalog_items: Vec::new(),
            catalog_total_pages: 1,
            watchlist: Vec::new(),
            likes: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session: self.state.clone(),
            profiles: self.profiles.clone(),
            kids_mode: self.kids_mode,
            active_view: self.active_view,
            query: self.query.clone(),
            filters: self.filters.clone(),
            discover_page: self.discover_page,
            catalog_total_pages: self.catalog_total_pages,
            suggestions: self.suggestions.current(),
        }
    }

    /// Picks up a session persisted by an earlier run
    pub async fn restore(&mut self) -> AppResult<()> {
        if let Some(session) = self.auth.current_user().await? {
            tracing::info!(email = %session.email, "Restored session");
            self.enter_user(session).await?;
        }
        Ok(())
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> AppResult<Session> {
        let session = self.auth.register(name, email, password).await?;
        self.enter_user(session.clone()).await?;
        Ok(session)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<Session> {
        let session = self.auth.login(email, password).await?;
        self.enter_user(session.clone()).await?;
        Ok(session)
    }

    pub async fn logout(&mut self) -> AppResult<()> {
        self.leave_profile().await;
        self.auth.logout().await?;
        self.state = SessionState::NoUser;
        self.profiles.clear();
        Ok(())
    }

    async fn enter_user(&mut self, session: Session) -> AppResult<()> {
        self.leave_profile().await;
        self.profiles = self.load_profiles(&session).await?;
        self.state = SessionState::Authenticated { user: session };
        Ok(())
    }

    /// Stored profiles, or the implicit default one
    async fn load_profiles(&self, session: &Session) -> AppResult<Vec<Profile>> {
        let stored: Option<Vec<Profile>> = self
            .storage
            .load(&StorageKey::Profiles(session.email.clone()))
            .await?;

        Ok(match stored {
            Some(profiles) if !profiles.is_empty() => profiles,
            _ => vec![Profile::default_for(session)],
        })
    }

    /// Writes pending progress and drops the active profile's library
    async fn leave_profile(&mut self) {
        if let Err(e) = self.flush_progress().await {
            tracing::error!(error = %e, "Failed to persist playback progress");
        }
        self.watchlist.clear();
        self.likes.clear();
        self.history.clear();
        if let Some(user) = self.state.user().cloned() {
            self.state = SessionState::Authenticated { user };
        }
    }

    fn require_user(&self) -> AppResult<Session> {
        self.state.user().cloned().ok_or(AppError::NotAuthenticated)
    }

    pub async fn create_profile(&mut self, name: &str, is_kids: bool) -> AppResult<Profile> {
        let user = self.require_user()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Profile name is required".to_string()));
        }

        let profile = Profile::new(name.to_string(), is_kids);
        let mut next = self.profiles.clone();
        next.push(profile.clone());

        self.storage
            .save(&StorageKey::Profiles(user.email.clone()), &next)
            .await?;
        self.profiles = next;

        tracing::info!(email = %user.email, profile_id = %profile.id, "Profile created");
        Ok(profile)
    }

    /// Activates a profile and loads its library. The catalog is refetched
    /// when the profile's kids setting differs from the current one.
    pub async fn select_profile(&mut self, profile_id: &str) -> AppResult<Profile> {
        let user = self.require_user()?;
        let profile = self
            .profiles
            .iter()
            .find(|p| p.id == profile_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", profile_id)))?;

        self.leave_profile().await;

        let scope = ProfileScope::new(&user.email, &profile.id);
        self.watchlist = self
            .storage
            .load_or_default(&StorageKey::Watchlist(scope.clone()))
            .await;
        self.likes = self
            .storage
            .load_or_default(&StorageKey::Likes(scope.clone()))
            .await;
        self.history = self
            .storage
            .load_or_default(&StorageKey::History(scope))
            .await;

        tracing::info!(
            profile_id = %profile.id,
            watchlist = self.watchlist.len(),
            history = self.history.len(),
            "Profile selected"
        );

        let kids_changed = self.kids_mode != profile.is_kids;
        self.state = SessionState::ProfileActive {
            user,
            profile: profile.clone(),
        };

        if kids_changed {
            self.kids_mode = profile.is_kids;
            self.reset_pagination();
            self.reload_catalog().await;
        }

        Ok(profile)
    }
}
