//! HTML projection of the application state.
//!
//! Every function here is pure: it takes model values and returns an
//! escaped fragment. `render` picks the fragments for the current screen
//! and stacks any open dialogs after it.

use crate::app::{App, ConfirmAction, Modal, Screen};
use crate::model::{MovieList, MovieRecord, Stats};
use crate::search;
use std::fmt::Write;

/// Posters shown on a list card before the remaining slots are left empty.
const CARD_POSTERS: usize = 4;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn empty_state(title: &str, text: &str) -> String {
    format!(
        "<div class=\"empty-state\"><h3 class=\"empty-state-title\">{}</h3><p class=\"empty-state-text\">{}</p></div>",
        title, text
    )
}

fn movie_count(n: usize) -> String {
    format!("{} movie{}", n, if n == 1 { "" } else { "s" })
}

pub fn movie_grid(query: &str, movies: &[&MovieRecord]) -> String {
    let mut html = format!(
        "<h2 class=\"section-title\">{}</h2><div class=\"movie-grid\">",
        escape_html(&search::section_title(query))
    );
    if movies.is_empty() {
        html.push_str(&empty_state("No movies found", "Try a different search term"));
    }
    for movie in movies {
        let title = escape_html(&movie.title);
        let _ = write!(
            html,
            "<article class=\"movie-card\" data-movie-id=\"{id}\" aria-label=\"View details for {title}\">\
             <div class=\"movie-poster\"><img src=\"{poster}\" alt=\"{title}\" loading=\"lazy\">\
             <div class=\"movie-rating-badge\">{rating}</div></div>\
             <div class=\"movie-info\"><h3 class=\"movie-title-card\">{title}</h3>\
             <p class=\"movie-year\">{year}</p></div></article>",
            id = movie.id,
            poster = escape_html(&movie.poster),
            rating = movie.rating,
            year = movie.year,
        );
    }
    html.push_str("</div>");
    html
}

pub fn movie_detail(movie: &MovieRecord) -> String {
    let genres: String = movie
        .genres
        .iter()
        .map(|g| format!("<span class=\"genre-tag\">{}</span>", escape_html(g)))
        .collect();
    format!(
        "<div class=\"movie-detail\"><div class=\"movie-detail-header\">\
         <div class=\"movie-detail-poster\"><img src=\"{poster}\" alt=\"{title}\"></div>\
         <div class=\"movie-detail-info\"><h2 class=\"movie-detail-title\">{title}</h2>\
         <div class=\"movie-detail-meta\"><span>{year}</span><span>{runtime}</span>\
         <span class=\"movie-detail-badge\">{content_rating}</span>\
         <span class=\"movie-detail-badge rating\">{rating}</span></div></div></div>\
         <p class=\"movie-detail-description\">{description}</p>\
         <div class=\"movie-detail-section\"><h3 class=\"movie-detail-section-title\">Director</h3><p>{director}</p></div>\
         <div class=\"movie-detail-section\"><h3 class=\"movie-detail-section-title\">Genres</h3>\
         <div class=\"movie-genres\">{genres}</div></div>\
         <button type=\"button\" class=\"btn btn-primary btn-full\" data-movie-id=\"{id}\">Add to List</button></div>",
        poster = escape_html(&movie.poster),
        title = escape_html(&movie.title),
        year = movie.year,
        runtime = escape_html(&movie.runtime),
        content_rating = escape_html(&movie.content_rating),
        rating = movie.rating,
        description = escape_html(&movie.description),
        director = escape_html(&movie.director),
        genres = genres,
        id = movie.id,
    )
}

/// Every list as an option, marked when it already holds `movie_id`.
pub fn list_picker(lists: &[(&MovieList, bool)]) -> String {
    let mut html = String::from("<div class=\"list-options\">");
    for (list, has_movie) in lists {
        let _ = write!(
            html,
            "<button type=\"button\" class=\"list-option{}\" data-list-id=\"{}\">\
             <span class=\"list-option-name\">{}</span>{}</button>",
            if *has_movie { " selected" } else { "" },
            escape_html(&list.id),
            escape_html(&list.name),
            if *has_movie { "<span class=\"list-option-check\">✓</span>" } else { "" },
        );
    }
    html.push_str(
        "<button type=\"button\" class=\"list-option new\"><span class=\"list-option-name\">Create New List</span></button></div>",
    );
    html
}

pub fn create_list_form(name: &str) -> String {
    format!(
        "<form class=\"create-list-form\"><label for=\"list-name\">List name</label>\
         <input type=\"text\" id=\"list-name\" value=\"{}\" required>\
         <button type=\"submit\" class=\"btn btn-primary\">Create</button></form>",
        escape_html(name)
    )
}

pub fn lists_overview(lists: &[MovieList]) -> String {
    if lists.is_empty() {
        return empty_state("No lists yet", "Create a list to start organizing your movies");
    }
    let mut html = String::new();
    for list in lists {
        let mut posters: String = list
            .entries
            .iter()
            .take(CARD_POSTERS)
            .map(|e| format!("<img src=\"{}\" alt=\"\">", escape_html(&e.poster)))
            .collect();
        for _ in list.entries.len().min(CARD_POSTERS)..CARD_POSTERS {
            posters.push_str("<div class=\"list-card-poster-empty\"></div>");
        }
        let _ = write!(
            html,
            "<article class=\"list-card\" data-list-id=\"{}\"><div class=\"list-card-posters\">{}</div>\
             <div class=\"list-card-info\"><h3 class=\"list-card-name\">{}</h3>\
             <p class=\"list-card-count\">{}</p></div></article>",
            escape_html(&list.id),
            posters,
            escape_html(&list.name),
            movie_count(list.entries.len()),
        );
    }
    html
}

pub fn list_detail(list: &MovieList) -> String {
    let mut html = format!(
        "<div class=\"list-detail-header\"><button type=\"button\" class=\"back-btn\">Back</button>\
         <h2 class=\"list-detail-title\">{}</h2>",
        escape_html(&list.name)
    );
    if !list.is_default {
        html.push_str("<button type=\"button\" class=\"btn-icon\" id=\"delete-list-btn\">Delete list</button>");
    }
    html.push_str("</div>");

    if list.entries.is_empty() {
        html.push_str(&empty_state("No movies yet", "Browse movies and add them to this list"));
        return html;
    }

    html.push_str("<div class=\"list-movies\">");
    for entry in &list.entries {
        let title = escape_html(&entry.title);
        let _ = write!(
            html,
            "<article class=\"list-movie-item\" data-movie-id=\"{id}\">\
             <div class=\"list-movie-poster\"><img src=\"{poster}\" alt=\"{title}\"></div>\
             <div class=\"list-movie-info\"><h3 class=\"list-movie-title\">{title}</h3>\
             <p class=\"list-movie-meta\">{year} · {rating} IMDb</p></div>\
             <button type=\"button\" class=\"list-movie-remove\" data-movie-id=\"{id}\" aria-label=\"Remove {title} from list\">Remove</button>\
             </article>",
            id = entry.id,
            poster = escape_html(&entry.poster),
            year = entry.year,
            rating = entry.rating,
        );
    }
    html.push_str("</div>");
    html
}

pub fn profile(stats: &Stats) -> String {
    let card = |value: usize, label: &str| {
        format!(
            "<div class=\"stat-card\"><span class=\"stat-value\">{}</span><span class=\"stat-label\">{}</span></div>",
            value, label
        )
    };
    format!(
        "<div class=\"profile-stats\">{}{}{}</div>",
        card(stats.total_movies, "Movies"),
        card(stats.watched_movies, "Watched"),
        card(stats.list_count, "Lists"),
    )
}

fn settings() -> String {
    "<div class=\"settings\"><button type=\"button\" id=\"export-data\">Export data</button>\
     <button type=\"button\" id=\"clear-data\" class=\"danger\">Clear all data</button></div>"
        .to_string()
}

pub fn confirm(message: &str) -> String {
    format!(
        "<div class=\"confirm-dialog\" role=\"alertdialog\"><p>{}</p>\
         <button type=\"button\" class=\"btn btn-danger\">Yes</button>\
         <button type=\"button\" class=\"btn\">No</button></div>",
        escape_html(message)
    )
}

fn modal(app: &App, modal: &Modal) -> String {
    let body = match modal {
        Modal::MovieDetail { movie_id } => app.movie(*movie_id).map(movie_detail).unwrap_or_default(),
        Modal::ListPicker { movie_id, .. } => list_picker(&app.watchlist.lists_containing(*movie_id)),
        Modal::CreateList { name, .. } => create_list_form(name),
        Modal::Confirm(ConfirmAction::DeleteList(id)) => {
            let name = app.watchlist.get(id).map_or("this list", |l| l.name.as_str());
            confirm(&format!("Delete \"{}\"? This cannot be undone.", name))
        }
        Modal::Confirm(ConfirmAction::ClearAll) => {
            confirm("Are you sure you want to delete all your data? This cannot be undone.")
        }
    };
    format!("<div class=\"modal active\" role=\"dialog\">{}</div>", body)
}

/// The whole view: active screen followed by open dialogs, bottom first.
pub fn render(app: &App) -> String {
    let mut html = match app.screen {
        Screen::Home => movie_grid(&app.query, &app.visible_movies()),
        Screen::Lists => match app.current_list() {
            Some(list) => list_detail(list),
            None => lists_overview(app.watchlist.lists()),
        },
        Screen::Profile => profile(&app.stats),
        Screen::Settings => settings(),
    };
    for m in &app.modals {
        html.push_str(&modal(app, m));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::app::tests::{sample_catalog, test_app};
    use crate::model::{MovieList, WATCHED_LIST_ID};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_movie_grid_empty_state() {
        let html = movie_grid("zzz", &[]);
        assert!(html.contains("Results for &quot;zzz&quot;"));
        assert!(html.contains("No movies found"));
    }

    #[test]
    fn test_movie_grid_escapes_titles() {
        let mut movie = sample_catalog().remove(0);
        movie.title = "<script>".to_string();
        let html = movie_grid("", &[&movie]);
        assert!(html.contains("Popular Movies"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_lists_overview_fills_empty_poster_slots() {
        let catalog = sample_catalog();
        let list = MovieList {
            id: "x".to_string(),
            name: "Mine".to_string(),
            entries: vec![(&catalog[0]).into()],
            is_default: false,
        };
        let html = lists_overview(&[list]);
        assert_eq!(html.matches("list-card-poster-empty").count(), 3);
        assert!(html.contains("1 movie<"));
        assert_eq!(lists_overview(&[]), empty_state("No lists yet", "Create a list to start organizing your movies"));
    }

    #[test]
    fn test_list_detail_delete_button_only_for_custom_lists() {
        let (app, _) = test_app();
        let watched = app.watchlist.get(WATCHED_LIST_ID).unwrap();
        let html = list_detail(watched);
        assert!(!html.contains("delete-list-btn"));
        assert!(html.contains("No movies yet"));

        let custom = MovieList {
            is_default: false,
            ..watched.clone()
        };
        assert!(list_detail(&custom).contains("delete-list-btn"));
    }

    #[test]
    fn test_render_stacks_modals_over_screen() {
        let (mut app, _) = test_app();
        app.dispatch(Action::OpenMovie(2));
        app.dispatch(Action::OpenListPicker(2));
        let html = render(&app);
        assert!(html.contains("movie-grid"));
        assert!(html.contains("Hayao Miyazaki"));
        assert!(html.contains("Create New List"));
        assert_eq!(html.matches("class=\"modal active\"").count(), 2);
    }

    #[test]
    fn test_profile_counts() {
        let stats = Stats {
            total_movies: 3,
            watched_movies: 2,
            list_count: 2,
        };
        let html = profile(&stats);
        assert!(html.contains("<span class=\"stat-value\">3</span><span class=\"stat-label\">Movies</span>"));
        assert!(html.contains("<span class=\"stat-value\">2</span><span class=\"stat-label\">Watched</span>"));
    }

    #[test]
    fn test_rating_printed_the_same_everywhere() {
        let mut movie = sample_catalog().remove(0);
        movie.rating = 9.0;
        let list = MovieList {
            id: "x".to_string(),
            name: "Mine".to_string(),
            entries: vec![(&movie).into()],
            is_default: false,
        };
        assert!(movie_grid("", &[&movie]).contains("<div class=\"movie-rating-badge\">9</div>"));
        assert!(movie_detail(&movie).contains("<span class=\"movie-detail-badge rating\">9</span>"));
        assert!(list_detail(&list).contains(" · 9 IMDb</p>"));

        movie.rating = 8.6;
        assert!(movie_grid("", &[&movie]).contains(">8.6<"));
        assert!(movie_detail(&movie).contains(">8.6<"));
    }
}
