mod browse;
mod help;
mod lists;
mod modals;
mod profile;
mod settings;

use crate::app::{App, InputMode, Screen, ToastKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: nav(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_nav(app, frame, chunks[0]);

    match app.screen {
        Screen::Home => browse::render(app, frame, chunks[1]),
        Screen::Lists => match app.current_list() {
            Some(list) => lists::render_detail(app, list, frame, chunks[1]),
            None => lists::render_overview(app, frame, chunks[1]),
        },
        Screen::Profile => profile::render(app, frame, chunks[1]),
        Screen::Settings => settings::render(app, frame, chunks[1]),
    }

    render_status(app, frame, chunks[2]);

    for modal in &app.modals {
        modals::render(app, modal, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_nav(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.label())))
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Watchlist "),
        )
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![key(" ↑↓"), Span::raw(" Navigate  ")];
    if !app.modals.is_empty() {
        spans.extend([key("Enter"), Span::raw(" Select  "), key("Esc"), Span::raw(" Close  ")]);
    } else if app.input_mode == InputMode::Editing {
        spans = vec![key(" Enter"), Span::raw(" Search now  "), key("Esc"), Span::raw(" Done  ")];
    } else {
        match app.screen {
            Screen::Home => spans.extend([key("/"), Span::raw(" Search  "), key("Enter"), Span::raw(" Details  ")]),
            Screen::Lists if app.current_list().is_some() => spans.extend([
                key("x"),
                Span::raw(" Remove  "),
                key("D"),
                Span::raw(" Delete list  "),
                key("Esc"),
                Span::raw(" Back  "),
            ]),
            Screen::Lists => spans.extend([key("Enter"), Span::raw(" Open  "), key("n"), Span::raw(" New list  ")]),
            Screen::Profile => {}
            Screen::Settings => spans.extend([key("Enter"), Span::raw(" Run  ")]),
        }
        spans.extend([key("?"), Span::raw(" Help  "), key("q"), Span::raw(" Quit  ")]);
    }

    if let Some(toast) = &app.toast {
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✓", Color::Green),
            ToastKind::Error => ("!", Color::Red),
        };
        spans.push(Span::styled(
            format!("{} {}", icon, toast.message),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::app::tests::test_app;
    use crate::app::Modal;
    use crate::model::WATCHED_LIST_ID;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Heat", 10), "Heat");
        assert_eq!(truncate_str("The Dark Knight", 8), "The Dar…");
    }

    #[test]
    fn test_browse_shows_catalog() {
        let (app, _) = test_app();
        let screen = draw(&app);
        assert!(screen.contains("Popular Movies"));
        assert!(screen.contains("Spirited Away"));
    }

    #[test]
    fn test_browse_empty_state() {
        let (mut app, _) = test_app();
        app.dispatch(Action::ApplySearch("zzz".to_string()));
        let screen = draw(&app);
        assert!(screen.contains("No movies found"));
        assert!(screen.contains("Results for \"zzz\""));
    }

    #[test]
    fn test_lists_overview_and_detail() {
        let (mut app, _) = test_app();
        app.dispatch(Action::Navigate(Screen::Lists));
        let screen = draw(&app);
        assert!(screen.contains("Watch Later"));
        assert!(screen.contains("0 movies"));

        app.dispatch(Action::OpenList(WATCHED_LIST_ID.to_string()));
        assert!(draw(&app).contains("No movies yet"));

        app.dispatch(Action::ToggleMembership {
            movie_id: 3,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        assert!(draw(&app).contains("Parasite"));
    }

    #[test]
    fn test_profile_shows_stats() {
        let (mut app, _) = test_app();
        app.dispatch(Action::ToggleMembership {
            movie_id: 1,
            list_id: WATCHED_LIST_ID.to_string(),
        });
        app.dispatch(Action::Navigate(Screen::Profile));
        let screen = draw(&app);
        assert!(screen.contains("Movies tracked"));
        assert!(screen.contains("Lists"));
    }

    #[test]
    fn test_modals_render() {
        let (mut app, _) = test_app();
        app.dispatch(Action::OpenMovie(2));
        let screen = draw(&app);
        assert!(screen.contains("Hayao Miyazaki"));

        app.dispatch(Action::OpenListPicker(2));
        assert!(draw(&app).contains("Create New List"));

        app.dispatch(Action::OpenCreateList { movie_to_add: Some(2) });
        assert!(matches!(app.top_modal(), Some(Modal::CreateList { .. })));
        assert!(draw(&app).contains("New List"));
    }

    #[test]
    fn test_help_and_settings_render() {
        let (mut app, _) = test_app();
        app.dispatch(Action::Navigate(Screen::Settings));
        assert!(draw(&app).contains("Export data"));
        app.show_help = true;
        assert!(draw(&app).contains("Keybindings"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let (mut app, _) = test_app();
        app.dispatch(Action::OpenMovie(1));
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
