use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::image_cache::ImageCacheController;
use super::lookup::MovieLookup;
use crate::backends::RemoteCatalogClient;
use crate::core::{Coalescer, LoadState, Operation, Property};
use crate::models::{CategorySelector, Configuration, MovieId, MovieSummary};
use crate::utils::{CatalogError, CatalogResult};

/// Owns the current category listing and the session's configuration, and
/// kicks off image prefetch for every listed movie.
///
/// `movies`, `category` and `state` are published together by one
/// completion at a time, so once a load settles they always describe the
/// same listing. A reader woken between two of those updates may still see
/// a mix; read after `state` changes for a consistent view.
pub struct CatalogController {
    client: Arc<dyn RemoteCatalogClient>,
    images: Arc<ImageCacheController>,
    movies: Property<Vec<MovieSummary>>,
    category: Property<Option<CategorySelector>>,
    configuration: Property<Option<Configuration>>,
    configuration_fetch: Coalescer<(), Configuration>,
    state: Property<LoadState>,
    prefetch_limit: Option<Arc<Semaphore>>,
    publish: Mutex<()>,
}

impl CatalogController {
    pub fn new(client: Arc<dyn RemoteCatalogClient>, images: Arc<ImageCacheController>) -> Self {
        Self {
            client,
            images,
            movies: Property::new(Vec::new(), "movies"),
            category: Property::new(None, "category"),
            configuration: Property::new(None, "configuration"),
            configuration_fetch: Coalescer::new("configuration"),
            state: Property::new(LoadState::Idle, "catalog_state"),
            prefetch_limit: None,
            publish: Mutex::new(()),
        }
    }

    /// Cap how many image fetches a listing load may have running at once.
    pub fn with_prefetch_limit(mut self, max_concurrent: usize) -> Self {
        self.prefetch_limit = Some(Arc::new(Semaphore::new(max_concurrent.max(1))));
        self
    }

    /// Fetch `selector`'s listing and publish it as a whole.
    ///
    /// On failure the previous listing stays published. Image prefetch is
    /// started for every movie but not awaited.
    pub async fn load_category(&self, selector: CategorySelector) -> CatalogResult<()> {
        let operation = Operation::LoadCategory(selector);
        self.state.set(LoadState::Loading(operation.clone()));
        info!("Loading {} movies", selector);

        match self.client.fetch_by_category(selector).await {
            Ok(movies) => {
                let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();
                info!("Loaded {} {} movies", movies.len(), selector);

                {
                    let _publishing = self.publish.lock().unwrap_or_else(|e| e.into_inner());
                    self.movies.set(movies);
                    self.category.set(Some(selector));
                    self.state.set(LoadState::Loaded(operation));
                }
                self.prefetch_images(ids);
                Ok(())
            }
            Err(e) => {
                let error = CatalogError::fetch(operation, e);
                warn!("{}", error);
                {
                    let _publishing = self.publish.lock().unwrap_or_else(|e| e.into_inner());
                    self.state.set(LoadState::Failed(error.clone()));
                }
                Err(error)
            }
        }
    }

    /// `load_category` for a user-facing name; unknown names load `Popular`.
    pub async fn load_category_named(&self, name: &str) -> CatalogResult<()> {
        self.load_category(CategorySelector::from_name(name)).await
    }

    /// Fetch the configuration once per session. Concurrent callers share
    /// one request; after success every call returns the cached value.
    pub async fn load_configuration(&self) -> CatalogResult<Configuration> {
        let client = self.client.clone();
        let configuration = self.configuration.clone();

        self.configuration_fetch
            .run(
                (),
                || self.configuration.get_sync(),
                move || async move {
                    let fetched = client
                        .fetch_configuration()
                        .await
                        .map_err(|e| CatalogError::fetch(Operation::LoadConfiguration, e))?;
                    debug!("Configuration loaded");
                    configuration.set(Some(fetched.clone()));
                    Ok(fetched)
                },
            )
            .await
            .inspect_err(|e| warn!("{}", e))
    }

    fn prefetch_images(&self, ids: Vec<MovieId>) {
        debug!("Prefetching images for {} movies", ids.len());

        for id in ids {
            let images = self.images.clone();
            let limit = self.prefetch_limit.clone();

            tokio::spawn(async move {
                let _permit = match limit {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(_) => return,
                    },
                    None => None,
                };
                // Failures are logged by the cache and retried on next ensure
                let _ = images.ensure(id).await;
            });
        }
    }

    pub fn find_by_id(&self, movie_id: MovieId) -> Option<MovieSummary> {
        self.movies
            .with(|movies| movies.iter().find(|m| m.id == movie_id).cloned())
    }

    pub fn find_by_title(&self, title: &str) -> Option<MovieSummary> {
        self.movies
            .with(|movies| movies.iter().find(|m| m.title == title).cloned())
    }

    pub fn movies(&self) -> Property<Vec<MovieSummary>> {
        self.movies.clone()
    }

    pub fn category(&self) -> Property<Option<CategorySelector>> {
        self.category.clone()
    }

    pub fn configuration(&self) -> Property<Option<Configuration>> {
        self.configuration.clone()
    }

    pub fn state(&self) -> Property<LoadState> {
        self.state.clone()
    }

    pub fn image_cache(&self) -> &Arc<ImageCacheController> {
        &self.images
    }
}

impl MovieLookup for CatalogController {
    fn find_by_id(&self, movie_id: MovieId) -> Option<MovieSummary> {
        CatalogController::find_by_id(self, movie_id)
    }

    fn find_by_title(&self, title: &str) -> Option<MovieSummary> {
        CatalogController::find_by_title(self, title)
    }
}
