use std::collections::{HashMap, HashSet};

use crate::models::{GenreId, LibraryEntry, Movie, MovieId};

pub const RECOMMENDATION_LIMIT: usize = 12;
const TOP_GENRE_COUNT: usize = 2;

/// Most frequent genres across watched titles, highest count first.
///
/// Genres come from the history entry itself, or from the matching catalog
/// item for entries saved without them. Ties go to the lower genre id.
pub fn top_genres(history: &[LibraryEntry], catalog: &[Movie]) -> Vec<GenreId> {
    let mut counts: HashMap<GenreId, usize> = HashMap::new();

    for entry in history {
        let genres = if entry.genre_ids.is_empty() {
            catalog
                .iter()
                .find(|m| m.id == entry.id)
                .map(|m| m.genre_ids.as_slice())
                .unwrap_or_default()
        } else {
            entry.genre_ids.as_slice()
        };

        for genre in genres {
            *counts.entry(*genre).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(GenreId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(TOP_GENRE_COUNT)
        .map(|(genre, _)| genre)
        .collect()
}

/// Personalized picks from `catalog` for a viewing history.
///
/// Unseen titles sharing a top genre win. Without a genre signal, or when no
/// unseen title matches, any unseen title is returned instead.
pub fn recommend(history: &[LibraryEntry], catalog: &[Movie], limit: usize) -> Vec<Movie> {
    let seen: HashSet<MovieId> = history.iter().map(|e| e.id).collect();
    let unseen = || catalog.iter().filter(|m| !seen.contains(&m.id));

    let genres = top_genres(history, catalog);
    if !genres.is_empty() {
        let matching: Vec<Movie> = unseen()
            .filter(|m| m.genre_ids.iter().any(|g| genres.contains(g)))
            .take(limit)
            .cloned()
            .collect();
        if !matching.is_empty() {
            return matching;
        }
    }

    unseen().take(limit).cloned().collect()
}
