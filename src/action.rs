use crate::app::{App, ConfirmAction, Modal, Screen, ToastKind};
use crate::export;
use crate::model::{DeleteRejected, Membership};

/// Everything the user can ask for. Key handling only produces these and
/// moves cursors; all state changes go through [`App::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Screen),
    OpenList(String),
    CloseList,
    OpenMovie(u32),
    OpenListPicker(u32),
    ToggleMembership { movie_id: u32, list_id: String },
    OpenCreateList { movie_to_add: Option<u32> },
    SubmitCreateList,
    RemoveEntry { movie_id: u32, list_id: String },
    RequestDeleteList(String),
    RequestClearAll,
    Confirm,
    CloseModal,
    CloseAllModals,
    ApplySearch(String),
    ClearSearch,
    Export,
    Quit,
}

impl App {
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Navigate(screen) => self.navigate_to(screen),
            Action::OpenList(list_id) => {
                if self.watchlist.get(&list_id).is_some() {
                    self.selected_list = Some(list_id);
                    self.detail_selected = 0;
                }
            }
            Action::CloseList => {
                self.selected_list = None;
                self.clamp_cursors();
            }
            Action::OpenMovie(movie_id) => {
                if self.movie(movie_id).is_some() {
                    self.modals.push(Modal::MovieDetail { movie_id });
                }
            }
            Action::OpenListPicker(movie_id) => {
                if self.movie(movie_id).is_some() {
                    self.modals.push(Modal::ListPicker { movie_id, selected: 0 });
                }
            }
            Action::ToggleMembership { movie_id, list_id } => {
                if let Some((name, saved)) = self.toggle_membership(movie_id, &list_id) {
                    self.modals.clear();
                    if saved {
                        self.notify(format!("Updated \"{}\"", name), ToastKind::Success);
                    }
                }
            }
            Action::OpenCreateList { movie_to_add } => {
                // Replaces the picker it was opened from; the movie dialog stays underneath.
                if matches!(self.top_modal(), Some(Modal::ListPicker { .. })) {
                    self.modals.pop();
                }
                self.modals.push(Modal::CreateList {
                    name: String::new(),
                    movie_to_add,
                });
            }
            Action::SubmitCreateList => self.submit_create_list(),
            Action::RemoveEntry { movie_id, list_id } => {
                if self.watchlist.remove_entry(movie_id, &list_id) {
                    let saved = self.persist();
                    self.clamp_cursors();
                    if saved {
                        self.notify("Movie removed", ToastKind::Success);
                    }
                }
            }
            Action::RequestDeleteList(list_id) => {
                match self.watchlist.get(&list_id).map(|l| l.is_default) {
                    Some(true) => {
                        self.notify("Default lists cannot be deleted", ToastKind::Error);
                    }
                    Some(false) => self.modals.push(Modal::Confirm(ConfirmAction::DeleteList(list_id))),
                    None => {}
                }
            }
            Action::RequestClearAll => self.modals.push(Modal::Confirm(ConfirmAction::ClearAll)),
            Action::Confirm => {
                if let Some(Modal::Confirm(confirm)) = self.top_modal().cloned() {
                    self.modals.pop();
                    self.run_confirmed(confirm);
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::CloseAllModals => self.modals.clear(),
            Action::ApplySearch(query) => {
                self.debouncer.cancel();
                self.apply_search(query);
            }
            Action::ClearSearch => {
                self.search_input.clear();
                self.debouncer.cancel();
                self.apply_search(String::new());
            }
            Action::Export => self.export(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switch screens. Leaving or re-entering always drops the list-detail sub-state.
    fn navigate_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.selected_list = None;
        self.detail_selected = 0;
        self.clamp_cursors();
        if screen == Screen::Profile {
            self.refresh_stats();
        }
    }

    /// Returns the list name and whether the write went through, when something changed.
    fn toggle_membership(&mut self, movie_id: u32, list_id: &str) -> Option<(String, bool)> {
        let movie = self.movie(movie_id)?.clone();
        let outcome = self.watchlist.toggle_membership(&movie, list_id)?;
        tracing::debug!(movie_id, list_id, ?outcome, "membership toggled");
        let saved = self.persist();
        if outcome == Membership::Removed {
            self.clamp_cursors();
        }
        let name = self.watchlist.get(list_id).map(|l| l.name.clone())?;
        Some((name, saved))
    }

    fn submit_create_list(&mut self) {
        let Some(Modal::CreateList { name, movie_to_add }) = self.top_modal().cloned() else {
            return;
        };
        let Some(list_id) = self.watchlist.create_list(&name).map(|l| l.id.clone()) else {
            return;
        };
        let mut saved = self.persist();
        tracing::info!(list_id = %list_id, "list created");

        if let Some(movie_id) = movie_to_add {
            if let Some((_, added)) = self.toggle_membership(movie_id, &list_id) {
                saved &= added;
            }
            self.modals.clear();
        } else {
            self.modals.pop();
        }
        if saved {
            self.notify(format!("\"{}\" created", name.trim()), ToastKind::Success);
        }
    }

    fn run_confirmed(&mut self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::DeleteList(list_id) => match self.watchlist.delete_list(&list_id) {
                Ok(list) => {
                    tracing::info!(list_id = %list.id, name = %list.name, "list deleted");
                    let saved = self.persist();
                    self.selected_list = None;
                    self.clamp_cursors();
                    if saved {
                        self.notify("List deleted", ToastKind::Success);
                    }
                }
                Err(DeleteRejected::DefaultList) => {
                    self.notify("Default lists cannot be deleted", ToastKind::Error);
                }
                Err(DeleteRejected::NotFound) => {}
            },
            ConfirmAction::ClearAll => {
                self.watchlist.reset();
                let saved = self.persist();
                self.selected_list = None;
                self.clamp_cursors();
                tracing::info!("all lists cleared");
                if saved {
                    self.notify("All data cleared", ToastKind::Success);
                }
            }
        }
    }

    fn export(&mut self) {
        match export::export_to_dir(self.watchlist.lists(), &self.export_dir, chrono::Utc::now()) {
            Ok(path) => self.notify(
                format!("Data exported to {}", path.display()),
                ToastKind::Success,
            ),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.notify(e.user_message(), ToastKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::model::{WATCH_LATER_LIST_ID, WATCHED_LIST_ID, default_lists};
    use crate::storage::{LISTS_KEY, ListStorage};

    fn stored_lists(store: &crate::storage::MemoryStore) -> Vec<crate::model::MovieList> {
        serde_json::from_str(&store.raw(LISTS_KEY).unwrap()).unwrap()
    }

    #[test]
    fn test_toggle_from_picker_persists_and_closes_dialogs() {
        let (mut app, store) = test_app();
        app.dispatch(Action::OpenMovie(1));
        app.dispatch(Action::OpenListPicker(1));
        assert_eq!(app.modals.len(), 2);

        app.dispatch(Action::ToggleMembership {
            movie_id: 1,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        assert!(app.modals.is_empty());
        assert_eq!(app.toast.as_ref().unwrap().message, "Updated \"Watched\"");
        assert_eq!(app.stats.watched_movies, 1);
        assert_eq!(stored_lists(&store), app.watchlist.lists());
    }

    #[test]
    fn test_toggle_twice_restores_persisted_state() {
        let (mut app, store) = test_app();
        let toggle = Action::ToggleMembership {
            movie_id: 2,
            list_id: WATCH_LATER_LIST_ID.to_string(),
        };
        app.dispatch(toggle.clone());
        app.dispatch(toggle);
        assert_eq!(stored_lists(&store), default_lists());
    }

    #[test]
    fn test_open_unknown_movie_is_ignored() {
        let (mut app, _) = test_app();
        app.dispatch(Action::OpenMovie(999));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_create_list_with_pending_movie() {
        let (mut app, store) = test_app();
        app.dispatch(Action::OpenMovie(3));
        app.dispatch(Action::OpenListPicker(3));
        app.dispatch(Action::OpenCreateList { movie_to_add: Some(3) });
        assert_eq!(app.modals.len(), 2);
        if let Some(Modal::CreateList { name, .. }) = app.modals.last_mut() {
            name.push_str(" Korean Cinema ");
        }
        app.dispatch(Action::SubmitCreateList);

        assert!(app.modals.is_empty());
        let created = app.watchlist.lists().last().unwrap();
        assert_eq!(created.name, "Korean Cinema");
        assert!(created.contains(3));
        assert_eq!(app.toast.as_ref().unwrap().message, "\"Korean Cinema\" created");
        assert_eq!(stored_lists(&store).len(), 3);
    }

    #[test]
    fn test_create_list_blank_name_is_skipped() {
        let (mut app, store) = test_app();
        app.dispatch(Action::OpenCreateList { movie_to_add: None });
        if let Some(Modal::CreateList { name, .. }) = app.modals.last_mut() {
            name.push_str("   ");
        }
        app.dispatch(Action::SubmitCreateList);
        assert_eq!(app.watchlist.len(), 2);
        assert_eq!(app.modals.len(), 1);
        assert!(store.raw(LISTS_KEY).is_none());
    }

    #[test]
    fn test_delete_default_list_is_rejected_without_confirm() {
        let (mut app, _) = test_app();
        app.dispatch(Action::RequestDeleteList(WATCHED_LIST_ID.to_string()));
        assert!(app.modals.is_empty());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
        assert_eq!(app.watchlist.len(), 2);
    }

    #[test]
    fn test_delete_user_list_after_confirm() {
        let (mut app, store) = test_app();
        app.dispatch(Action::Navigate(Screen::Lists));
        let id = app.watchlist.create_list("Short-lived").unwrap().id.clone();
        app.dispatch(Action::OpenList(id.clone()));
        app.dispatch(Action::RequestDeleteList(id.clone()));
        assert_eq!(app.top_modal(), Some(&Modal::Confirm(ConfirmAction::DeleteList(id.clone()))));

        app.dispatch(Action::Confirm);
        assert!(app.watchlist.get(&id).is_none());
        assert!(app.selected_list.is_none());
        assert_eq!(stored_lists(&store), default_lists());
    }

    #[test]
    fn test_cancel_confirm_keeps_list() {
        let (mut app, _) = test_app();
        let id = app.watchlist.create_list("Keep me").unwrap().id.clone();
        app.dispatch(Action::RequestDeleteList(id.clone()));
        app.dispatch(Action::CloseModal);
        assert!(app.watchlist.get(&id).is_some());
    }

    #[test]
    fn test_remove_entry_persists() {
        let (mut app, store) = test_app();
        app.dispatch(Action::ToggleMembership {
            movie_id: 1,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        app.dispatch(Action::RemoveEntry {
            movie_id: 1,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        assert_eq!(app.stats.total_movies, 0);
        assert_eq!(app.toast.as_ref().unwrap().message, "Movie removed");
        assert_eq!(stored_lists(&store), default_lists());
    }

    #[test]
    fn test_navigation_clears_selected_list() {
        let (mut app, _) = test_app();
        app.dispatch(Action::Navigate(Screen::Lists));
        app.dispatch(Action::OpenList(WATCHED_LIST_ID.to_string()));
        assert!(app.current_list().is_some());
        app.dispatch(Action::Navigate(Screen::Profile));
        app.dispatch(Action::Navigate(Screen::Lists));
        assert!(app.current_list().is_none());
    }

    #[test]
    fn test_clear_all_resets_to_defaults() {
        let (mut app, store) = test_app();
        app.watchlist.create_list("Gone soon");
        app.dispatch(Action::RequestClearAll);
        app.dispatch(Action::Confirm);
        assert_eq!(app.watchlist.lists(), default_lists().as_slice());
        assert_eq!(stored_lists(&store), default_lists());
        assert_eq!(app.toast.as_ref().unwrap().message, "All data cleared");
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let (mut app, store) = test_app();
        store.set_fail_writes(true);
        app.dispatch(Action::ToggleMembership {
            movie_id: 2,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        assert!(app.watchlist.get(WATCHED_LIST_ID).unwrap().contains(2));
        assert!(store.raw(LISTS_KEY).is_none());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
        let reloaded = ListStorage::new(store).load();
        assert_eq!(reloaded, default_lists());
    }

    #[test]
    fn test_search_actions() {
        let (mut app, _) = test_app();
        app.dispatch(Action::ApplySearch("  NOLAN ".to_string()));
        assert_eq!(app.visible_movies().len(), 1);
        app.search_input = "nolan".to_string();
        app.dispatch(Action::ClearSearch);
        assert!(app.search_input.is_empty());
        assert_eq!(app.visible_movies().len(), 3);
    }

    #[test]
    fn test_export_writes_backup() {
        let (mut app, _) = test_app();
        let dir = tempfile::tempdir().unwrap();
        app.export_dir = dir.path().to_path_buf();
        app.dispatch(Action::Export);
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }
}
