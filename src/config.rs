use crate::catalog::CatalogSource;
use crate::error::ConfigError;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory holding the saved lists (defaults to the platform data dir)
    #[arg(long, global = true, env = "WATCHLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Catalog to browse: a JSON file path or an http(s) URL
    #[arg(long, global = true, env = "WATCHLIST_CATALOG", default_value = "data/movies.json")]
    pub catalog: String,

    /// Delay between the last keystroke and the search running
    #[arg(long, global = true, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Write logs here instead of <data-dir>/logs/watchlist.log
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Runtime settings after defaults are filled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog: CatalogSource,
    pub debounce: Duration,
    pub log_file: PathBuf,
    pub export_dir: PathBuf,
    pub verbose: u8,
}

impl Config {
    pub fn resolve(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => directories::ProjectDirs::from("com", "watchlist", "watchlist")
                .ok_or(ConfigError::NoHomeDirectory)?
                .data_dir()
                .to_path_buf(),
        };
        let log_file = args
            .log_file
            .clone()
            .unwrap_or_else(|| data_dir.join("logs").join("watchlist.log"));

        Ok(Self {
            catalog: CatalogSource::parse(&args.catalog),
            debounce: Duration::from_millis(args.debounce_ms),
            log_file,
            export_dir: default_export_dir(),
            verbose: args.verbose,
            data_dir,
        })
    }
}

/// The user's download directory, else the current directory.
pub fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
