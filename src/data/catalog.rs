//! Wire models for the popular-movies catalog payload.

use serde::Deserialize;

use crate::models::Movie;

/// Top-level catalog response.
///
/// The API reports some failures in-band: a 200 response whose
/// `errorMessage` is non-empty carries no usable items.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularMovies {
    #[serde(default, rename = "errorMessage")]
    pub error_message: String,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// One catalog entry as delivered on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "imDbRating")]
    pub rating: String,
    #[serde(rename = "image")]
    pub poster_url: String,
}

impl PopularMovies {
    /// Convert the payload into domain movies, parsing ratings.
    pub fn into_movies(self) -> Vec<Movie> {
        self.items.into_iter().map(Movie::from).collect()
    }
}

impl From<CatalogItem> for Movie {
    fn from(item: CatalogItem) -> Self {
        let rating = Movie::parse_rating(&item.rating);
        Movie {
            id: item.id,
            title: item.title,
            rating,
            poster_url: item.poster_url,
        }
    }
}
