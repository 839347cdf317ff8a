use crate::action::Action;
use crate::app::{App, InputMode, Modal, Screen, SettingsItem};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Translate one key press into cursor moves and actions.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.dispatch(Action::Quit);
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if let Some(modal) = app.top_modal().cloned() {
        handle_modal_key(app, modal, key);
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key, now);
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('q') => {
            app.dispatch(Action::Quit);
            return;
        }
        KeyCode::Char('1') => return app.dispatch(Action::Navigate(Screen::Home)),
        KeyCode::Char('2') => return app.dispatch(Action::Navigate(Screen::Lists)),
        KeyCode::Char('3') => return app.dispatch(Action::Navigate(Screen::Profile)),
        KeyCode::Char('4') => return app.dispatch(Action::Navigate(Screen::Settings)),
        KeyCode::Tab => return app.dispatch(Action::Navigate(app.screen.next())),
        KeyCode::BackTab => return app.dispatch(Action::Navigate(app.screen.prev())),
        KeyCode::Down | KeyCode::Char('j') => return app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => return app.select_prev(),
        KeyCode::Char('g') => return app.select_first(),
        KeyCode::Char('G') => return app.select_last(),
        _ => {}
    }

    match app.screen {
        Screen::Home => handle_home_key(app, key),
        Screen::Lists => {
            if app.current_list().is_some() {
                handle_list_detail_key(app, key);
            } else {
                handle_lists_key(app, key);
            }
        }
        Screen::Profile => {}
        Screen::Settings => handle_settings_key(app, key),
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent, now: Instant) {
    let mut changed = false;
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            // Run a pending search right away instead of waiting out the delay.
            if app.debouncer.flush().is_some() {
                app.dispatch(Action::ApplySearch(app.search_input.clone()));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            changed = true;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(Action::ClearSearch);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            changed = true;
        }
        _ => {}
    }

    if changed {
        app.debouncer.schedule(app.search_input.clone(), now);
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = app.selected_movie().map(|m| m.id) {
                app.dispatch(Action::OpenMovie(id));
            }
        }
        KeyCode::Esc => {
            if !app.search_input.is_empty() || !app.query.is_empty() {
                app.dispatch(Action::ClearSearch);
            }
        }
        _ => {}
    }
}

fn handle_lists_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = app.watchlist.lists().get(app.lists_selected).map(|l| l.id.clone()) {
                app.dispatch(Action::OpenList(id));
            }
        }
        KeyCode::Char('n') => app.dispatch(Action::OpenCreateList { movie_to_add: None }),
        _ => {}
    }
}

fn handle_list_detail_key(app: &mut App, key: KeyEvent) {
    let Some(list) = app.current_list() else {
        return;
    };
    let list_id = list.id.clone();
    let entry_id = list.entries.get(app.detail_selected).map(|e| e.id);

    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            app.dispatch(Action::CloseList);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(movie_id) = entry_id {
                app.dispatch(Action::OpenMovie(movie_id));
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(movie_id) = entry_id {
                app.dispatch(Action::RemoveEntry { movie_id, list_id });
            }
        }
        KeyCode::Char('D') => app.dispatch(Action::RequestDeleteList(list_id)),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    if let KeyCode::Enter | KeyCode::Char(' ') = key.code {
        match SettingsItem::ALL.get(app.settings_selected) {
            Some(SettingsItem::Export) => app.dispatch(Action::Export),
            Some(SettingsItem::ClearAll) => app.dispatch(Action::RequestClearAll),
            None => {}
        }
    }
}

fn handle_modal_key(app: &mut App, modal: Modal, key: KeyEvent) {
    match modal {
        Modal::MovieDetail { movie_id } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.dispatch(Action::CloseAllModals),
            KeyCode::Char('a') | KeyCode::Enter => app.dispatch(Action::OpenListPicker(movie_id)),
            _ => {}
        },
        Modal::ListPicker { movie_id, selected } => match key.code {
            KeyCode::Esc => app.dispatch(Action::CloseAllModals),
            KeyCode::Char('q') => app.dispatch(Action::CloseModal),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Char('g') => app.select_first(),
            KeyCode::Char('G') => app.select_last(),
            KeyCode::Char('n') => app.dispatch(Action::OpenCreateList {
                movie_to_add: Some(movie_id),
            }),
            KeyCode::Enter | KeyCode::Char(' ') => {
                match app.watchlist.lists().get(selected).map(|l| l.id.clone()) {
                    Some(list_id) => app.dispatch(Action::ToggleMembership { movie_id, list_id }),
                    None => app.dispatch(Action::OpenCreateList {
                        movie_to_add: Some(movie_id),
                    }),
                }
            }
            _ => {}
        },
        Modal::CreateList { .. } => match key.code {
            KeyCode::Esc => app.dispatch(Action::CloseAllModals),
            KeyCode::Enter => app.dispatch(Action::SubmitCreateList),
            KeyCode::Backspace => {
                if let Some(Modal::CreateList { name, .. }) = app.modals.last_mut() {
                    name.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(Modal::CreateList { name, .. }) = app.modals.last_mut() {
                    name.push(c);
                }
            }
            _ => {}
        },
        Modal::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.dispatch(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.dispatch(Action::CloseModal),
            _ => {}
        },
    }
}
