use crate::app::{App, SettingsItem};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .map(|item| {
            let (detail, color) = match item {
                SettingsItem::Export => (
                    format!("  writes a JSON backup to {}", app.export_dir.display()),
                    Color::White,
                ),
                SettingsItem::ClearAll => (
                    "  removes every list and entry, cannot be undone".to_string(),
                    Color::Red,
                ),
            };
            ListItem::new(Line::from(vec![
                Span::styled(item.label(), Style::default().fg(color)),
                Span::styled(detail, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Settings · Data "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.settings_selected));
    frame.render_stateful_widget(list, area, &mut state);
}
