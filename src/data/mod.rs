//! Catalog payload parsing and the external data collaborators:
//! catalog loaders and the poster resolver.

mod catalog;
mod loader;
mod resolver;

pub use catalog::{CatalogItem, PopularMovies};
pub use loader::{CatalogError, CatalogLoader, FileCatalogLoader, HttpCatalogLoader};
pub use resolver::{HttpImageResolver, ImageResolver, ResolveError};
