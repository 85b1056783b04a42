//! Catalog loaders.
//!
//! The session engine only sees the [`CatalogLoader`] trait; the binary
//! picks the HTTP or file-backed implementation at startup.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Movie;

use super::catalog::PopularMovies;

/// Failure fetching or decoding the movie catalog.
///
/// Recoverable by a user-triggered restart with reload; carries no retry
/// policy of its own.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog service error: {0}")]
    Api(String),
}

/// Source of the movie list. At most one load is in flight per invocation.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load_catalog(&self) -> Result<Vec<Movie>, CatalogError>;
}

fn check_payload(payload: PopularMovies) -> Result<Vec<Movie>, CatalogError> {
    if !payload.error_message.is_empty() {
        return Err(CatalogError::Api(payload.error_message));
    }
    Ok(payload.into_movies())
}

/// Fetches the catalog from a remote popular-movies endpoint.
pub struct HttpCatalogLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogLoader for HttpCatalogLoader {
    async fn load_catalog(&self) -> Result<Vec<Movie>, CatalogError> {
        let payload: PopularMovies = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        check_payload(payload)
    }
}

/// Reads a catalog payload from a local JSON file, for offline play.
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogLoader for FileCatalogLoader {
    async fn load_catalog(&self) -> Result<Vec<Movie>, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        let payload: PopularMovies = serde_json::from_str(&json)?;
        check_payload(payload)
    }
}
