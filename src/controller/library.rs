use crate::{
    error::{AppError, AppResult},
    models::{
        clamp_progress, LibraryEntry, LibraryList, Movie, MovieId, HISTORY_CAP, LIKES_CAP,
        WATCHLIST_CAP,
    },
    services::recommendations::{recommend, RECOMMENDATION_LIMIT},
    storage::{ProfileScope, StorageKey},
};

use super::AppController;

impl AppController {
    fn active_scope(&self) -> AppResult<ProfileScope> {
        self.state.scope().ok_or(AppError::NoActiveProfile)
    }

    pub fn watchlist(&self) -> &[LibraryEntry] {
        &self.watchlist
    }

    pub fn likes(&self) -> &[LibraryEntry] {
        &self.likes
    }

    pub fn history(&self) -> &[LibraryEntry] {
        &self.history
    }

    /// Adds or removes a title. Returns whether it is now on the watchlist.
    pub async fn toggle_watchlist(&mut self, movie: &Movie) -> AppResult<bool> {
        let scope = self.active_scope()?;
        let mut next = self.watchlist.clone();
        let added = next.toggle(LibraryEntry::from(movie), WATCHLIST_CAP);

        self.storage.save(&StorageKey::Watchlist(scope), &next).await?;
        self.watchlist = next;

        tracing::info!(movie_id = movie.id, added = added, "Watchlist toggled");
        Ok(added)
    }

    pub async fn toggle_like(&mut self, movie: &Movie) -> AppResult<bool> {
        let scope = self.active_scope()?;
        let mut next = self.likes.clone();
        let liked = next.toggle(LibraryEntry::from(movie), LIKES_CAP);

        self.storage.save(&StorageKey::Likes(scope), &next).await?;
        self.likes = next;

        tracing::info!(movie_id = movie.id, liked = liked, "Like toggled");
        Ok(liked)
    }

    /// Puts a title at the front of the history and stamps it as watched now.
    ///
    /// Without an explicit progress the previous one, if any, is kept.
    pub async fn add_history(
        &mut self,
        movie: &Movie,
        progress: Option<f64>,
    ) -> AppResult<LibraryEntry> {
        let scope = self.active_scope()?;

        let mut entry = LibraryEntry::from(movie);
        entry.watched_at = Some(chrono::Utc::now().timestamp_millis());
        entry.progress = progress.map(clamp_progress).or_else(|| {
            self.history
                .iter()
                .find(|e| e.id == movie.id)
                .and_then(|e| e.progress)
        });

        let mut next = self.history.clone();
        next.push_front_unique(entry.clone(), HISTORY_CAP);

        // the full list is written now, a pending progress write would be older
        self.progress_writer.cancel();
        self.storage.save(&StorageKey::History(scope), &next).await?;
        self.history = next;

        tracing::info!(movie_id = movie.id, history = self.history.len(), "History updated");
        Ok(entry)
    }

    /// Records playback progress for a title in the history.
    ///
    /// Memory is updated at once; storage follows after the progress
    /// debounce so scrubbing does not write on every tick.
    pub fn set_progress(&mut self, id: MovieId, progress: f64) -> AppResult<LibraryEntry> {
        let scope = self.active_scope()?;
        let entry = self
            .history
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Title {} is not in history", id)))?;

        entry.progress = Some(clamp_progress(progress));
        let updated = entry.clone();

        let storage = self.storage.clone();
        let key = StorageKey::History(scope);
        let snapshot = self.history.clone();
        self.progress_writer.schedule(move |generation| async move {
            if !generation.is_current() {
                return;
            }
            match storage.save(&key, &snapshot).await {
                Ok(()) => tracing::debug!(key = %key, "Progress persisted"),
                Err(e) => tracing::warn!(key = %key, error = %e, "Failed to persist progress"),
            }
        });

        Ok(updated)
    }

    /// Writes a pending progress update right away
    pub async fn flush_progress(&mut self) -> AppResult<()> {
        if !self.progress_writer.is_pending() {
            return Ok(());
        }
        self.progress_writer.cancel();

        if let Some(scope) = self.state.scope() {
            self.storage
                .save(&StorageKey::History(scope), &self.history)
                .await?;
        }
        Ok(())
    }

    /// Started but unfinished titles, most recent first
    pub fn continue_watching(&self) -> Vec<LibraryEntry> {
        self.history
            .iter()
            .filter(|e| e.is_in_progress())
            .cloned()
            .collect()
    }

    pub fn recommended(&self) -> Vec<Movie> {
        recommend(&self.history, &self.known_movies(), RECOMMENDATION_LIMIT)
    }
}
