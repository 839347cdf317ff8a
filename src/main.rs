mod action;
mod app;
mod catalog;
mod config;
mod error;
mod export;
mod input;
mod logging;
mod markup;
mod model;
mod search;
mod storage;
mod ui;

use action::Action;
use app::{App, Screen};
use clap::{Parser, Subcommand};
use config::{Config, GlobalArgs};
use crossterm::event::{self, Event, KeyEventKind};
use search::Debouncer;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use storage::{FileStore, ListStorage};

/// Browse a movie catalog, search it, and keep your own watchlists
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal UI (default)
    Run,
    /// Write a JSON backup of every list
    Export {
        /// Directory for the backup file (defaults to the download directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace the saved lists with those in a backup file
    Import {
        /// Backup file written by `export`
        file: PathBuf,
    },
    /// Delete every list and start over with Watch Later and Watched
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the HTML for a screen
    Render {
        #[arg(value_enum)]
        screen: Screen,
        /// List to open (lists screen only)
        #[arg(long)]
        list: Option<String>,
        /// Movie whose detail dialog is shown on top
        #[arg(long)]
        movie: Option<u32>,
        /// Search query applied to the home screen
        #[arg(long)]
        query: Option<String>,
    },
}

/// Longest the event loop blocks when no search is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli.global).map_err(|e| e.user_message())?;
    let command = cli.command.unwrap_or(Commands::Run);

    // The terminal UI owns stderr, so it logs to a file.
    let log_file = matches!(command, Commands::Run).then_some(config.log_file.as_path());
    logging::init(config.verbose, log_file)?;

    let mut storage = ListStorage::new(FileStore::new(&config.data_dir));

    match command {
        Commands::Run => {
            tracing::info!(data_dir = %config.data_dir.display(), catalog = %config.catalog, "starting");
            let movies = catalog::fetch_catalog(&config.catalog).await;
            let mut app = App::new(movies, storage, Debouncer::new(config.debounce), config.export_dir);

            let mut terminal = ratatui::init();
            let result = run_app(&mut terminal, &mut app);
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "terminal loop failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Export { out } => {
            let dir = out.unwrap_or(config.export_dir);
            let path = export::export_to_dir(&storage.load(), &dir, chrono::Utc::now())?;
            eprintln!("Data exported to {}", path.display());
        }
        Commands::Import { file } => {
            let lists = export::import_from_file(&file, &mut storage)?;
            eprintln!("Imported {} lists from {}", lists.len(), file.display());
        }
        Commands::Clear { yes } => {
            if !yes && !confirm("Are you sure you want to delete all your data? This cannot be undone.")? {
                eprintln!("Aborted.");
                return Ok(());
            }
            storage.save(&model::default_lists())?;
            tracing::info!("all data cleared");
            eprintln!("All data cleared");
        }
        Commands::Render { screen, list, movie, query } => {
            let movies = catalog::fetch_catalog(&config.catalog).await;
            let mut app = App::new(movies, storage, Debouncer::new(config.debounce), config.export_dir);
            app.dispatch(Action::Navigate(screen));
            if let Some(list_id) = list {
                app.dispatch(Action::OpenList(list_id));
            }
            if let Some(query) = query {
                app.dispatch(Action::ApplySearch(query));
            }
            if let Some(movie_id) = movie {
                app.dispatch(Action::OpenMovie(movie_id));
            }
            println!("{}", markup::render(&app));
        }
    }

    Ok(())
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Wake up early when a debounced search is about to fire
        if event::poll(app.poll_timeout(Instant::now(), IDLE_POLL))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key(app, key, Instant::now());
                }
            }
        }
        app.tick(Instant::now());
    }
}

fn confirm(question: &str) -> std::io::Result<bool> {
    eprint!("{} [y/N] ", question);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
