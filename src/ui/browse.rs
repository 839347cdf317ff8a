use super::truncate_str;
use crate::app::{App, InputMode};
use crate::search::section_title;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    // Layout: search(3) + grid(min)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let label = if app.input_mode == InputMode::Editing {
        " Search (Enter to apply, Esc to stop typing): "
    } else {
        " Search (/): "
    };
    let pending = if app.debouncer.is_pending() { " …" } else { "" };
    let search_bar = Paragraph::new(format!("{}{}{}", label, app.search_input, pending))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search movies, directors, genres "),
        );
    frame.render_widget(search_bar, chunks[0]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[0].x + 1 + label.chars().count() as u16 + app.search_input.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
    }

    // ── Movie grid ──
    let movies = app.visible_movies();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", section_title(&app.query)))
        .title_bottom(Line::from(format!(" {} movies ", movies.len())).alignment(Alignment::Right));

    if movies.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No movies found",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try a different search term",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let title_width = (area.width as usize).saturating_sub(24);
    let items: Vec<ListItem> = movies
        .iter()
        .map(|movie| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("★ {:>3.1} ", movie.rating),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(truncate_str(&movie.title, title_width)),
                Span::styled(
                    format!("  {}", movie.year),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.browse_selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
