use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use movie_rater::backends::{FavoritesStore, TmdbClient};
use movie_rater::constants::DEFAULT_POSTER_SIZE;
use movie_rater::db::SqliteFavoritesStore;
use movie_rater::models::CategorySelector;
use movie_rater::{CatalogSession, Config};

const PREFETCH_WAIT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_rater=info")),
        )
        .init();

    info!("Starting movie-rater");

    let config = Config::load()?;
    let client = Arc::new(TmdbClient::from_config(&config.catalog)?);

    let store: Option<Arc<dyn FavoritesStore>> =
        match SqliteFavoritesStore::from_config(&config).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("Favorites unavailable: {:#}", e);
                None
            }
        };

    let session = CatalogSession::from_config(&config, client, store);
    let category = std::env::args()
        .nth(1)
        .map(|name| CategorySelector::from_name(&name))
        .unwrap_or_else(|| session.default_category());

    let catalog = session.catalog();
    let (listing, configuration) =
        tokio::join!(catalog.load_category(category), catalog.load_configuration());
    listing.context("Failed to load movies")?;
    let configuration = configuration.ok();

    if let Some(favorites) = session.favorites()
        && let Err(e) = favorites.refresh(session.user()).await
    {
        warn!("Could not read favorites: {}", e);
    }

    let movies = catalog.movies().get_sync();
    let images = session.images();
    let started = Instant::now();
    while started.elapsed() < PREFETCH_WAIT && movies.iter().any(|m| !images.contains(m.id)) {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    println!("{} ({} movies)", category.display_name(), movies.len());
    for movie in &movies {
        let favorite = session
            .favorites()
            .is_some_and(|favorites| favorites.contains(movie.id));
        let poster = images
            .get(movie.id)
            .and_then(|i| i.posters.into_iter().next())
            .or_else(|| movie.poster_path.clone());
        let poster_url = match (&configuration, poster) {
            (Some(configuration), Some(path)) => {
                configuration.poster_url(&path, DEFAULT_POSTER_SIZE)
            }
            (None, Some(path)) => path,
            (_, None) => "-".to_string(),
        };

        println!(
            "{} {:<40} {:>4.1}  {}",
            if favorite { "*" } else { " " },
            movie.title,
            movie.vote_average,
            poster_url
        );
    }

    Ok(())
}
