use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Id of the seeded "Watch Later" list.
pub const WATCH_LATER_LIST_ID: &str = "watchlist";
/// Id of the seeded "Watched" list; the profile's watched count reads it.
pub const WATCHED_LIST_ID: &str = "watched";

/// A single catalog entry. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: u32,
    pub title: String,
    pub year: u16,
    pub poster: String,
    #[serde(rename = "imdbRating")]
    pub rating: f64,
    pub runtime: String,
    pub content_rating: String,
    pub description: String,
    pub director: String,
    #[serde(rename = "genre", default)]
    pub genres: Vec<String>,
}

/// The part of a movie stored inside a list. Copied so lists survive
/// catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: u32,
    pub title: String,
    pub year: u16,
    pub poster: String,
    #[serde(rename = "imdbRating")]
    pub rating: f64,
}

impl From<&MovieRecord> for ListEntry {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            poster: movie.poster.clone(),
            rating: movie.rating,
        }
    }
}

/// A named, ordered collection of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieList {
    pub id: String,
    pub name: String,
    #[serde(rename = "movies", default)]
    pub entries: Vec<ListEntry>,
    #[serde(default)]
    pub is_default: bool,
}

impl MovieList {
    pub fn contains(&self, movie_id: u32) -> bool {
        self.entries.iter().any(|e| e.id == movie_id)
    }

    fn seeded(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            entries: Vec::new(),
            is_default: true,
        }
    }
}

/// The two lists every fresh collection starts with.
pub fn default_lists() -> Vec<MovieList> {
    vec![
        MovieList::seeded(WATCH_LATER_LIST_ID, "Watch Later"),
        MovieList::seeded(WATCHED_LIST_ID, "Watched"),
    ]
}

/// Outcome of a membership toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    Removed,
}

/// Why a list could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRejected {
    NotFound,
    DefaultList,
}

/// Aggregates shown on the profile screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_movies: usize,
    pub watched_movies: usize,
    pub list_count: usize,
}

/// In-memory list collection. Knows nothing about persistence; the
/// controller saves after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    lists: Vec<MovieList>,
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(default_lists())
    }
}

impl Watchlist {
    pub fn new(lists: Vec<MovieList>) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &[MovieList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, list_id: &str) -> Option<&MovieList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    fn get_mut(&mut self, list_id: &str) -> Option<&mut MovieList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    /// Append a new, empty list. Returns `None` when the trimmed name is empty.
    pub fn create_list(&mut self, name: &str) -> Option<&MovieList> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut id = new_list_id();
        while self.get(&id).is_some() {
            id = new_list_id();
        }
        self.lists.push(MovieList {
            id,
            name: name.to_string(),
            entries: Vec::new(),
            is_default: false,
        });
        self.lists.last()
    }

    /// Add the movie to the list if absent, remove it if present.
    /// Returns `None` when no list has `list_id`.
    pub fn toggle_membership(&mut self, movie: &MovieRecord, list_id: &str) -> Option<Membership> {
        let list = self.get_mut(list_id)?;
        if let Some(pos) = list.entries.iter().position(|e| e.id == movie.id) {
            list.entries.remove(pos);
            Some(Membership::Removed)
        } else {
            list.entries.push(ListEntry::from(movie));
            Some(Membership::Added)
        }
    }

    /// Drop the entry with `movie_id` from the list. Returns whether anything changed.
    pub fn remove_entry(&mut self, movie_id: u32, list_id: &str) -> bool {
        match self.get_mut(list_id) {
            Some(list) => {
                let before = list.entries.len();
                list.entries.retain(|e| e.id != movie_id);
                list.entries.len() != before
            }
            None => false,
        }
    }

    /// Remove a user-created list. Default lists stay.
    pub fn delete_list(&mut self, list_id: &str) -> Result<MovieList, DeleteRejected> {
        let pos = self
            .lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or(DeleteRejected::NotFound)?;
        if self.lists[pos].is_default {
            return Err(DeleteRejected::DefaultList);
        }
        Ok(self.lists.remove(pos))
    }

    /// Replace everything with the two seeded lists.
    pub fn reset(&mut self) {
        self.lists = default_lists();
    }

    /// For each list, whether it holds `movie_id`.
    pub fn lists_containing(&self, movie_id: u32) -> Vec<(&MovieList, bool)> {
        self.lists
            .iter()
            .map(|l| (l, l.contains(movie_id)))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        let mut total = HashSet::new();
        let mut watched = HashSet::new();
        for list in &self.lists {
            for entry in &list.entries {
                total.insert(entry.id);
                if list.id == WATCHED_LIST_ID {
                    watched.insert(entry.id);
                }
            }
        }
        Stats {
            total_movies: total.len(),
            watched_movies: watched.len(),
            list_count: self.lists.len(),
        }
    }
}

fn new_list_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}
