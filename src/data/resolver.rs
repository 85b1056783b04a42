//! Poster resolution.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Movie;

/// Failure materializing a movie's poster bytes.
///
/// Recovered by picking another question; never charged against the
/// player's statistics.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("poster request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Turns a movie's poster reference into bytes. Called at most once per
/// question request.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, movie: &Movie) -> Result<Vec<u8>, ResolveError>;
}

/// Fetches the resized poster over HTTP.
pub struct HttpImageResolver {
    client: reqwest::Client,
}

impl HttpImageResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageResolver for HttpImageResolver {
    async fn resolve(&self, movie: &Movie) -> Result<Vec<u8>, ResolveError> {
        let bytes = self
            .client
            .get(movie.resized_poster_url())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
