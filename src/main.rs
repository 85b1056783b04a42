use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use movie_quiz::app;
use movie_quiz::data::{CatalogLoader, FileCatalogLoader, HttpCatalogLoader, HttpImageResolver};
use movie_quiz::engine::{QuestionFactory, SessionEngine};
use movie_quiz::stats::{JsonFileStorage, StatisticsService};

const DEFAULT_CATALOG_URL: &str = "https://tv-api.com/en/API/MostPopularMovies/k_zcuw1ytf";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Popular-movies endpoint to load the catalog from
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,

    /// Load the catalog from a local JSON file instead of the network
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Where game statistics are persisted
    #[arg(long, default_value = "movie-quiz-stats.json")]
    stats_file: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let loader: Arc<dyn CatalogLoader> = match args.catalog_file {
        Some(path) => Arc::new(FileCatalogLoader::new(path)),
        None => Arc::new(HttpCatalogLoader::new(args.catalog_url)),
    };
    let resolver = Arc::new(HttpImageResolver::new());
    let stats = StatisticsService::new(JsonFileStorage::open(args.stats_file));

    let (engine, handle, inbox, events) =
        SessionEngine::new(move |tx| QuestionFactory::new(loader, resolver, tx), stats);
    tokio::spawn(engine.run(inbox));

    if let Err(e) = app::run(handle, events).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
