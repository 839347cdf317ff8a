use super::centered_rect;
use crate::app::{App, ConfirmAction, Modal};
use crate::model::MovieRecord;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn render(app: &App, modal: &Modal, frame: &mut Frame) {
    match modal {
        Modal::MovieDetail { movie_id } => {
            if let Some(movie) = app.movie(*movie_id) {
                render_movie(movie, frame);
            }
        }
        Modal::ListPicker { movie_id, selected } => render_picker(app, *movie_id, *selected, frame),
        Modal::CreateList { name, movie_to_add } => render_create_list(app, name, *movie_to_add, frame),
        Modal::Confirm(confirm) => render_confirm(app, confirm, frame),
    }
}

fn dialog(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_movie(movie: &MovieRecord, frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = dialog(format!(" {} ", movie.title), Color::Cyan)
        .title_bottom(Line::from(" a Add to List · Esc Close ").style(Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let meta = Line::from(vec![
        Span::styled(movie.year.to_string(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(&movie.runtime, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", movie.content_rating),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(
            format!("★ {:.1}", movie.rating),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(meta), chunks[0]);

    let genres: Vec<Span> = movie
        .genres
        .iter()
        .flat_map(|g| {
            [
                Span::styled(format!(" {} ", g), Style::default().bg(Color::DarkGray).fg(Color::White)),
                Span::raw(" "),
            ]
        })
        .collect();

    let body = vec![
        Line::from(movie.description.as_str()),
        Line::from(""),
        Line::from(Span::styled("Director", Style::default().fg(Color::DarkGray))),
        Line::from(movie.director.as_str()),
        Line::from(""),
        Line::from(Span::styled("Genres", Style::default().fg(Color::DarkGray))),
        Line::from(genres),
    ];
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[1]);
}

fn render_picker(app: &App, movie_id: u32, selected: usize, frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, area);

    let mut items: Vec<ListItem> = app
        .watchlist
        .lists_containing(movie_id)
        .into_iter()
        .map(|(list, has_movie)| {
            let (mark, style) = if has_movie {
                ("✓ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(list.name.clone(), style),
            ]))
        })
        .collect();
    items.push(ListItem::new(Line::from(Span::styled(
        "+ Create New List",
        Style::default().fg(Color::Cyan),
    ))));

    let title = match app.movie(movie_id) {
        Some(movie) => format!(" Add \"{}\" to List ", movie.title),
        None => " Add to List ".to_string(),
    };
    let list = List::new(items)
        .block(dialog(title, Color::Cyan))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_create_list(app: &App, name: &str, movie_to_add: Option<u32>, frame: &mut Frame) {
    let area = fixed_height(centered_rect(50, 100, frame.area()), 6);
    frame.render_widget(Clear, area);

    let block = dialog(" New List ".to_string(), Color::Yellow)
        .title_bottom(Line::from(" Enter Create · Esc Cancel ").style(Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = match movie_to_add.and_then(|id| app.movie(id)) {
        Some(movie) => format!("\"{}\" will be added to it", movie.title),
        None => "Give your list a name".to_string(),
    };
    let prompt = "Name: ";
    let text = vec![
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(text), inner);

    if inner.height > 0 {
        let x = inner.x + (prompt.len() + name.chars().count()) as u16;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn render_confirm(app: &App, confirm: &ConfirmAction, frame: &mut Frame) {
    let area = fixed_height(centered_rect(50, 100, frame.area()), 5);
    frame.render_widget(Clear, area);

    let question = match confirm {
        ConfirmAction::DeleteList(id) => {
            let name = app.watchlist.get(id).map_or("this list", |l| l.name.as_str());
            format!("Delete \"{}\"? This cannot be undone.", name)
        }
        ConfirmAction::ClearAll => {
            "Are you sure you want to delete all your data? This cannot be undone.".to_string()
        }
    };

    let text = vec![
        Line::from(question),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ];
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(dialog(" Confirm ".to_string(), Color::Red));
    frame.render_widget(widget, area);
}

/// Shrink `area` to `height` rows, vertically centered.
fn fixed_height(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}
