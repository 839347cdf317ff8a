use crate::model::MovieRecord;
use std::time::{Duration, Instant};

/// Delay between the last keystroke and the search running.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Movies whose title, director or any genre contains `query`,
/// ignoring case. A blank query returns the whole catalog in order.
pub fn filter<'a>(query: &str, catalog: &'a [MovieRecord]) -> Vec<&'a MovieRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.iter().collect();
    }
    catalog
        .iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&needle)
                || movie.director.to_lowercase().contains(&needle)
                || movie.genres.iter().any(|g| g.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Heading above the browse grid.
pub fn section_title(query: &str) -> String {
    if query.trim().is_empty() {
        "Popular Movies".to_string()
    } else {
        format!("Results for \"{}\"", query)
    }
}

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due: Instant,
}

/// Trailing-edge debouncer. Each `schedule` cancels the pending query and
/// restarts the delay; the caller polls `take_due` from its event loop.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            due: now + self.delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending query, if its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }

    /// The pending query regardless of its deadline.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.query)
    }

    /// How long the event loop may sleep before the pending query is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}
