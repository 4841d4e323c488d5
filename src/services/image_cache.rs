use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::backends::RemoteCatalogClient;
use crate::core::{Coalescer, Operation, Property};
use crate::models::{MovieId, MovieImages};
use crate::utils::{CatalogError, CatalogResult};

/// Owns the movie id → images map for one session.
///
/// Entries are never evicted; a failed fetch leaves its key absent so a
/// later `ensure` can retry.
pub struct ImageCacheController {
    client: Arc<dyn RemoteCatalogClient>,
    images: Property<HashMap<MovieId, MovieImages>>,
    fetches: Coalescer<MovieId, MovieImages>,
}

impl ImageCacheController {
    pub fn new(client: Arc<dyn RemoteCatalogClient>) -> Self {
        Self {
            client,
            images: Property::new(HashMap::new(), "movie_images"),
            fetches: Coalescer::new("movie_images"),
        }
    }

    /// Make sure images for `movie_id` are cached, fetching at most once
    /// however many callers ask while the fetch is running.
    pub async fn ensure(&self, movie_id: MovieId) -> CatalogResult<()> {
        let images = self.images.clone();
        let client = self.client.clone();

        self.fetches
            .run(
                movie_id,
                || self.get(movie_id),
                move || async move {
                    let fetched = client
                        .fetch_images(movie_id)
                        .await
                        .map_err(|e| CatalogError::fetch(Operation::FetchImages(movie_id), e))?;

                    debug!(
                        "Cached {} posters / {} backdrops for movie {}",
                        fetched.posters.len(),
                        fetched.backdrops.len(),
                        movie_id
                    );
                    images.update(|map| {
                        map.insert(movie_id, fetched.clone());
                    });
                    Ok(fetched)
                },
            )
            .await
            .map(|_| ())
            .inspect_err(|e| warn!("{}", e))
    }

    pub fn get(&self, movie_id: MovieId) -> Option<MovieImages> {
        self.images.with(|map| map.get(&movie_id).cloned())
    }

    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.images.with(|map| map.contains_key(&movie_id))
    }

    pub fn len(&self) -> usize {
        self.images.with(|map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn is_fetching(&self, movie_id: MovieId) -> bool {
        self.fetches.is_in_flight(&movie_id).await
    }

    pub fn images(&self) -> Property<HashMap<MovieId, MovieImages>> {
        self.images.clone()
    }
}
