use thiserror::Error;

/// Failures talking to the persistent key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not replace stored value: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Short message suitable for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            StorageError::Io(e) => format!("Could not save lists: {}", e),
            StorageError::Serialization(_) => "Could not save lists: invalid data".to_string(),
            StorageError::Persist(e) => format!("Could not save lists: {}", e.error),
            StorageError::Unavailable(msg) => format!("Storage unavailable: {}", msg),
        }
    }
}

/// Failures reading the movie catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching catalog")]
    Status { status: u16 },

    #[error("Catalog format error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Io(e) => format!("Could not read the movie catalog: {}", e),
            CatalogError::Http(e) => format!("Could not download the movie catalog: {}", e),
            CatalogError::Status { status } => {
                format!("Catalog server answered with HTTP {}", status)
            }
            CatalogError::Parse(_) => "Movie catalog is not valid JSON".to_string(),
        }
    }
}

/// Failures writing or reading a backup document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backup format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ExportError {
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Io(e) => format!("Export failed: {}", e),
            ExportError::Format(e) => format!("Backup is not valid: {}", e),
            ExportError::Storage(e) => e.user_message(),
        }
    }
}

/// Failures resolving runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoHomeDirectory => {
                "Could not determine home directory; pass --data-dir or set WATCHLIST_DATA_DIR".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_user_message() {
        let error = StorageError::Unavailable("quota exceeded".to_string());
        assert!(error.user_message().contains("quota exceeded"));
    }

    #[test]
    fn test_export_error_wraps_storage_message() {
        let error = ExportError::from(StorageError::Unavailable("read-only".to_string()));
        assert_eq!(error.user_message(), "Storage unavailable: read-only");
    }

    #[test]
    fn test_catalog_error_user_message() {
        let error = CatalogError::Status { status: 404 };
        assert_eq!(error.user_message(), "Catalog server answered with HTTP 404");
        let parse = serde_json::from_str::<u32>("x").unwrap_err();
        assert_eq!(CatalogError::from(parse).user_message(), "Movie catalog is not valid JSON");
    }

    #[test]
    fn test_config_error_points_at_override() {
        assert!(ConfigError::NoHomeDirectory.user_message().contains("--data-dir"));
    }
}
