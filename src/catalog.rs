use crate::error::CatalogError;
use crate::model::MovieRecord;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` values are fetched, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    movies: Vec<MovieRecord>,
}

/// Load the catalog once. Any failure degrades to an empty catalog.
pub async fn fetch_catalog(source: &CatalogSource) -> Vec<MovieRecord> {
    match try_fetch(source).await {
        Ok(movies) => {
            tracing::info!(%source, count = movies.len(), "catalog loaded");
            movies
        }
        Err(e) => {
            tracing::error!(%source, error = %e, "{}", e.user_message());
            Vec::new()
        }
    }
}

async fn try_fetch(source: &CatalogSource) -> Result<Vec<MovieRecord>, CatalogError> {
    let body = match source {
        CatalogSource::Path(path) => tokio::fs::read_to_string(path).await?,
        CatalogSource::Url(url) => {
            let response = reqwest::get(url).await?;
            if !response.status().is_success() {
                return Err(CatalogError::Status {
                    status: response.status().as_u16(),
                });
            }
            response.text().await?
        }
    };
    parse_catalog(&body)
}

pub fn parse_catalog(body: &str) -> Result<Vec<MovieRecord>, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(body)?;
    Ok(doc.movies)
}
