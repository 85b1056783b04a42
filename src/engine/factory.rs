//! Question factory: turns the loaded catalog into one quiz question at a
//! time.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::mpsc;

use crate::data::{CatalogLoader, ImageResolver};
use crate::models::{Movie, QuizQuestion};

use super::events::EngineMsg;

/// Inclusive range the rating threshold is drawn from.
const THRESHOLD_RANGE: std::ops::RangeInclusive<u32> = 7..=9;

/// Produces questions asynchronously and reports completions into the
/// engine's inbox. Never blocks the caller: catalog loads and poster
/// resolution run as spawned tasks.
pub struct QuestionFactory {
    movies: Vec<Movie>,
    loader: Arc<dyn CatalogLoader>,
    resolver: Arc<dyn ImageResolver>,
    inbox: mpsc::UnboundedSender<EngineMsg>,
}

impl QuestionFactory {
    pub fn new(
        loader: Arc<dyn CatalogLoader>,
        resolver: Arc<dyn ImageResolver>,
        inbox: mpsc::UnboundedSender<EngineMsg>,
    ) -> Self {
        Self {
            movies: Vec::new(),
            loader,
            resolver,
            inbox,
        }
    }

    /// Kick off a catalog load. The result comes back through the inbox;
    /// failures propagate unchanged, retry is the engine's restart path.
    pub fn load_catalog(&self) {
        let loader = Arc::clone(&self.loader);
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            let msg = match loader.load_catalog().await {
                Ok(movies) => EngineMsg::CatalogLoaded(movies),
                Err(err) => EngineMsg::CatalogLoadFailed(err),
            };
            let _ = inbox.send(msg);
        });
    }

    /// Install the freshly loaded catalog.
    pub fn set_catalog(&mut self, movies: Vec<Movie>) {
        log::info!("catalog loaded: {} movies", movies.len());
        self.movies = movies;
    }

    /// Request the next question for a movie picked uniformly at random.
    ///
    /// An empty catalog reports no question rather than crashing; a poster
    /// that cannot be resolved goes out as `QuestionUnavailable` and the
    /// suggested remediation is simply asking again.
    pub fn request_next(&self) {
        let Some(movie) = self.pick_movie() else {
            log::warn!("question requested with an empty catalog");
            let _ = self.inbox.send(EngineMsg::QuestionReady(None));
            return;
        };

        let resolver = Arc::clone(&self.resolver);
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            let msg = match resolver.resolve(&movie).await {
                Ok(image) => {
                    let threshold = rand::rng().random_range(THRESHOLD_RANGE);
                    EngineMsg::QuestionReady(Some(build_question(&movie, image, threshold)))
                }
                Err(err) => {
                    log::warn!("failed to resolve poster for {}: {}", movie.title, err);
                    EngineMsg::QuestionUnavailable(err)
                }
            };
            let _ = inbox.send(msg);
        });
    }

    fn pick_movie(&self) -> Option<Movie> {
        if self.movies.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.movies.len());
        Some(self.movies[index].clone())
    }
}

/// Build the round's question against a drawn threshold. The comparison is
/// strict: a rating exactly equal to the threshold answers "no".
fn build_question(movie: &Movie, image: Vec<u8>, threshold: u32) -> QuizQuestion {
    QuizQuestion {
        image,
        text: format!("Is this movie's rating higher than {threshold}?"),
        correct_answer: movie.rating > f64::from(threshold),
    }
}
