use crate::model::{MovieList, MovieRecord, Stats, Watchlist};
use crate::search::{self, Debouncer};
use crate::storage::ListStorage;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Which top-level screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Screen {
    Home,
    Lists,
    Profile,
    Settings,
}

impl Screen {
    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Lists,
            Self::Lists => Self::Profile,
            Self::Profile => Self::Settings,
            Self::Settings => Self::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Home => Self::Settings,
            Self::Lists => Self::Home,
            Self::Profile => Self::Lists,
            Self::Settings => Self::Profile,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Lists => "Lists",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
        }
    }

    pub const ALL: [Screen; 4] = [Self::Home, Self::Lists, Self::Profile, Self::Settings];
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Destructive actions waiting for a yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteList(String),
    ClearAll,
}

/// Dialogs drawn over the active screen. The last one has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    MovieDetail { movie_id: u32 },
    ListPicker { movie_id: u32, selected: usize },
    CreateList { name: String, movie_to_add: Option<u32> },
    Confirm(ConfirmAction),
}

/// Rows of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Export,
    ClearAll,
}

impl SettingsItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Export => "Export data",
            Self::ClearAll => "Clear all data",
        }
    }

    pub const ALL: [SettingsItem; 2] = [Self::Export, Self::ClearAll];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

pub const TOAST_TTL: Duration = Duration::from_millis(2500);

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub show_help: bool,

    pub catalog: Vec<MovieRecord>,
    pub watchlist: Watchlist,
    pub(crate) storage: ListStorage,
    pub stats: Stats,

    // Search
    pub search_input: String,
    pub query: String,
    pub input_mode: InputMode,
    pub debouncer: Debouncer,

    // Cursor state per screen
    pub browse_selected: usize,
    pub lists_selected: usize,
    pub selected_list: Option<String>,
    pub detail_selected: usize,
    pub settings_selected: usize,

    pub modals: Vec<Modal>,
    pub toast: Option<Toast>,
    pub export_dir: PathBuf,
}

impl App {
    /// Build the state from a loaded catalog and the persisted lists.
    pub fn new(catalog: Vec<MovieRecord>, storage: ListStorage, debouncer: Debouncer, export_dir: PathBuf) -> Self {
        let watchlist = Watchlist::new(storage.load());
        let stats = watchlist.stats();
        Self {
            should_quit: false,
            screen: Screen::Home,
            show_help: false,

            catalog,
            watchlist,
            storage,
            stats,

            search_input: String::new(),
            query: String::new(),
            input_mode: InputMode::Normal,
            debouncer,

            browse_selected: 0,
            lists_selected: 0,
            selected_list: None,
            detail_selected: 0,
            settings_selected: 0,

            modals: Vec::new(),
            toast: None,
            export_dir,
        }
    }

    /// Catalog entries matching the applied query.
    pub fn visible_movies(&self) -> Vec<&MovieRecord> {
        search::filter(&self.query, &self.catalog)
    }

    pub fn movie(&self, id: u32) -> Option<&MovieRecord> {
        self.catalog.iter().find(|m| m.id == id)
    }

    /// The list shown in list-detail, if one is selected and still exists.
    pub fn current_list(&self) -> Option<&MovieList> {
        self.selected_list
            .as_deref()
            .and_then(|id| self.watchlist.get(id))
    }

    pub fn top_modal(&self) -> Option<&Modal> {
        self.modals.last()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Write the collection through to storage and refresh derived stats.
    /// A failed write is logged; the in-memory state stays authoritative.
    pub(crate) fn persist(&mut self) -> bool {
        let saved = match self.storage.save(self.watchlist.lists()) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "error saving lists");
                self.notify(e.user_message(), ToastKind::Error);
                false
            }
        };
        self.refresh_stats();
        saved
    }

    pub fn refresh_stats(&mut self) {
        self.stats = self.watchlist.stats();
    }

    /// Time-driven work: fire a due search and expire the toast.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.take_due(now) {
            self.apply_search(query);
        }
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.debouncer.time_until_due(now) {
            Some(due) => due.min(idle),
            None => idle,
        }
    }

    pub(crate) fn apply_search(&mut self, query: String) {
        self.query = query.trim().to_string();
        self.browse_selected = 0;
        tracing::debug!(query = %self.query, "search applied");
    }

    // ── Cursor movement ──

    pub fn select_next(&mut self) {
        let len = self.current_len();
        if let Some(cursor) = self.cursor_mut() {
            if *cursor + 1 < len {
                *cursor += 1;
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(cursor) = self.cursor_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn select_first(&mut self) {
        if let Some(cursor) = self.cursor_mut() {
            *cursor = 0;
        }
    }

    pub fn select_last(&mut self) {
        let len = self.current_len();
        if let Some(cursor) = self.cursor_mut() {
            *cursor = len.saturating_sub(1);
        }
    }

    /// Number of rows under the cursor that currently has focus.
    fn current_len(&self) -> usize {
        if let Some(Modal::ListPicker { .. }) = self.top_modal() {
            // Every list plus "Create New List".
            return self.watchlist.len() + 1;
        }
        match self.screen {
            Screen::Home => self.visible_movies().len(),
            Screen::Lists => match self.current_list() {
                Some(list) => list.entries.len(),
                None => self.watchlist.len(),
            },
            Screen::Profile => 0,
            Screen::Settings => SettingsItem::ALL.len(),
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        if !self.modals.is_empty() {
            return match self.modals.last_mut() {
                Some(Modal::ListPicker { selected, .. }) => Some(selected),
                _ => None,
            };
        }
        match self.screen {
            Screen::Home => Some(&mut self.browse_selected),
            Screen::Lists => {
                if self.current_list().is_some() {
                    Some(&mut self.detail_selected)
                } else {
                    Some(&mut self.lists_selected)
                }
            }
            Screen::Profile => None,
            Screen::Settings => Some(&mut self.settings_selected),
        }
    }

    /// Keep cursors inside their collections after a removal.
    pub(crate) fn clamp_cursors(&mut self) {
        self.lists_selected = self.lists_selected.min(self.watchlist.len().saturating_sub(1));
        let entries = self.current_list().map_or(0, |l| l.entries.len());
        self.detail_selected = self.detail_selected.min(entries.saturating_sub(1));
        let visible = self.visible_movies().len();
        self.browse_selected = self.browse_selected.min(visible.saturating_sub(1));
    }

    pub fn selected_movie(&self) -> Option<&MovieRecord> {
        self.visible_movies().get(self.browse_selected).copied()
    }
}
