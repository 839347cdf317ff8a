use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("1-4 / Tab", "Home, Lists, Profile, Settings"),
            ("↑/k ↓/j", "Move selection"),
            ("g/G", "Jump to first/last"),
            ("q", "Quit application"),
        ],
    ),
    (
        "Home",
        &[
            ("/", "Search titles, directors and genres"),
            ("Enter", "Open movie details"),
            ("Esc", "Clear search"),
        ],
    ),
    (
        "Movie details",
        &[
            ("a", "Add to / remove from a list"),
            ("n", "Create a new list (in the picker)"),
            ("Esc", "Close"),
        ],
    ),
    (
        "Lists",
        &[
            ("Enter", "Open list"),
            ("n", "New list"),
            ("x", "Remove movie from list"),
            ("D", "Delete list (not Watch Later / Watched)"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (section, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", section),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (key, what) in keys.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help · Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
