use super::truncate_str;
use crate::app::App;
use crate::model::MovieList;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

fn movie_count(n: usize) -> String {
    format!("{} movie{}", n, if n == 1 { "" } else { "s" })
}

fn empty_state(title: &str, text: &str, block: Block<'static>) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(block)
}

pub fn render_overview(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" My Lists ");

    if app.watchlist.is_empty() {
        let empty = empty_state(
            "No lists yet",
            "Create a list to start organizing your movies",
            block,
        );
        frame.render_widget(empty, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(30);
    let items: Vec<ListItem> = app
        .watchlist
        .lists()
        .iter()
        .map(|list| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<width$}", truncate_str(&list.name, name_width), width = name_width.min(40)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {}", movie_count(list.entries.len())),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if list.is_default {
                spans.push(Span::styled("  default", Style::default().fg(Color::Blue)));
            }
            ListItem::new(Line::from(spans))
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
    state.select(Some(app.lists_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_detail(app: &App, list: &MovieList, frame: &mut Frame, area: Rect) {
    let hint = if list.is_default { " Esc back " } else { " Esc back · D delete " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" ‹ {} ", list.name))
        .title_bottom(Line::from(hint).alignment(Alignment::Right));

    if list.entries.is_empty() {
        let empty = empty_state(
            "No movies yet",
            "Browse movies and add them to this list",
            block,
        );
        frame.render_widget(empty, area);
        return;
    }

    let title_width = (area.width as usize).saturating_sub(28);
    let items: Vec<ListItem> = list
        .entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(truncate_str(&entry.title, title_width)),
                Span::styled(
                    format!("  {} · {:.1} IMDb", entry.year, entry.rating),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.detail_selected));
    frame.render_stateful_widget(widget, area, &mut state);
}
