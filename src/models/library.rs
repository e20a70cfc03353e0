use serde::{Deserialize, Serialize};

use super::movie::{GenreId, Movie, MovieId};

pub const WATCHLIST_CAP: usize = 100;
pub const HISTORY_CAP: usize = 20;
pub const LIKES_CAP: usize = 200;

/// Clamps playback progress to a percentage. Non-finite input counts as 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// A title saved to a profile's watchlist, likes or history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryEntry {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<GenreId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "watchedAt", default, skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<i64>,
}

impl From<&Movie> for LibraryEntry {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.display_title().to_string(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            release_date: movie.release_date.clone(),
            genre_ids: movie.genre_ids.clone(),
            progress: None,
            watched_at: None,
        }
    }
}

impl LibraryEntry {
    /// Started but not finished
    pub fn is_in_progress(&self) -> bool {
        matches!(self.progress, Some(p) if p > 0.0 && p < 100.0)
    }
}

/// Most-recent-first list of entries with a size cap
pub trait LibraryList {
    fn contains_movie(&self, id: MovieId) -> bool;

    /// Removes the title if present, otherwise puts it first.
    /// Returns whether the title is now in the list.
    fn toggle(&mut self, entry: LibraryEntry, cap: usize) -> bool;

    /// Moves the title to the front, replacing any earlier entry
    fn push_front_unique(&mut self, entry: LibraryEntry, cap: usize);
}

impl LibraryList for Vec<LibraryEntry> {
    fn contains_movie(&self, id: MovieId) -> bool {
        self.iter().any(|e| e.id == id)
    }

    fn toggle(&mut self, entry: LibraryEntry, cap: usize) -> bool {
        if self.contains_movie(entry.id) {
            self.retain(|e| e.id != entry.id);
            false
        } else {
            self.insert(0, entry);
            self.truncate(cap);
            true
        }
    }

    fn push_front_unique(&mut self, entry: LibraryEntry, cap: usize) {
        self.retain(|e| e.id != entry.id);
        self.insert(0, entry);
        self.truncate(cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: MovieId) -> LibraryEntry {
        LibraryEntry {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            vote_average: None,
            release_date: None,
            genre_ids: vec![],
            progress: None,
            watched_at: None,
        }
    }

    #[test]
    fn test_toggle_twice_restores_list() {
        let mut list = vec![entry(1), entry(2)];
        let original = list.clone();

        assert!(list.toggle(entry(3), WATCHLIST_CAP));
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, 3);

        assert!(!list.toggle(entry(3), WATCHLIST_CAP));
        assert_eq!(list, original);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut list = Vec::new();
        for id in 0..(WATCHLIST_CAP as u64 + 5) {
            list.toggle(entry(id), WATCHLIST_CAP);
        }
        assert_eq!(list.len(), WATCHLIST_CAP);
        assert_eq!(list[0].id, WATCHLIST_CAP as u64 + 4);
        assert!(!list.contains_movie(0));
        assert!(!list.contains_movie(4));
        assert!(list.contains_movie(5));
    }

    #[test]
    fn test_push_front_unique_moves_existing_title() {
        let mut list = vec![entry(1), entry(2), entry(3)];
        list.push_front_unique(entry(3), HISTORY_CAP);
        let ids: Vec<_> = list.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_rewatching_old_title_keeps_it_under_cap() {
        let mut list = Vec::new();
        for id in 0..HISTORY_CAP as u64 {
            list.push_front_unique(entry(id), HISTORY_CAP);
        }
        list.push_front_unique(entry(0), HISTORY_CAP);
        assert_eq!(list.len(), HISTORY_CAP);
        assert_eq!(list[0].id, 0);
        assert!(list.contains_movie(1));
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5.0), 0.0);
        assert_eq!(clamp_progress(42.5), 42.5);
        assert_eq!(clamp_progress(180.0), 100.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_in_progress() {
        let mut e = entry(1);
        assert!(!e.is_in_progress());
        e.progress = Some(0.0);
        assert!(!e.is_in_progress());
        e.progress = Some(40.0);
        assert!(e.is_in_progress());
        e.progress = Some(100.0);
        assert!(!e.is_in_progress());
    }

    #[test]
    fn test_storage_shape_uses_watched_at() {
        let mut e = entry(7);
        e.watched_at = Some(1_700_000_000_000);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["watchedAt"], 1_700_000_000_000i64);
        assert!(json.get("progress").is_none());
    }
}
