use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::backends::{FavoritesStore, RemoteCatalogClient};
use crate::config::Config;
use crate::models::{CategorySelector, UserId};
use crate::services::{
    CatalogController, FavoritesController, ImageCacheController, MovieLookup, SelectionState,
};
use crate::utils::CatalogResult;

/// One user's browsing session: the catalog, its image cache, the
/// selection and, when a store is attached, favorites.
pub struct CatalogSession {
    user: UserId,
    default_category: CategorySelector,
    catalog: Arc<CatalogController>,
    images: Arc<ImageCacheController>,
    favorites: Option<FavoritesController>,
    selection: SelectionState,
}

impl CatalogSession {
    pub fn builder(client: Arc<dyn RemoteCatalogClient>) -> CatalogSessionBuilder {
        CatalogSessionBuilder::new(client)
    }

    /// Session for the configured user, default category and prefetch cap.
    pub fn from_config(
        config: &Config,
        client: Arc<dyn RemoteCatalogClient>,
        store: Option<Arc<dyn FavoritesStore>>,
    ) -> Self {
        let mut builder = Self::builder(client)
            .user(config.user())
            .default_category(config.default_category());
        if let Some(max_concurrent) = config.prefetch.max_concurrent {
            builder = builder.prefetch_limit(max_concurrent);
        }
        if let Some(store) = store {
            builder = builder.favorites(store);
        }
        builder.build()
    }

    /// Load the default category and the configuration concurrently.
    ///
    /// Both run to completion; the first failure, if any, is returned.
    pub async fn start(&self) -> CatalogResult<()> {
        info!(
            "Starting session for {} with {}",
            self.user, self.default_category
        );
        let (listing, configuration) = tokio::join!(
            self.catalog.load_category(self.default_category),
            self.catalog.load_configuration()
        );
        listing?;
        configuration?;
        Ok(())
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn default_category(&self) -> CategorySelector {
        self.default_category
    }

    pub fn catalog(&self) -> &Arc<CatalogController> {
        &self.catalog
    }

    pub fn images(&self) -> &Arc<ImageCacheController> {
        &self.images
    }

    pub fn favorites(&self) -> Option<&FavoritesController> {
        self.favorites.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

impl fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSession")
            .field("user", &self.user)
            .field("default_category", &self.default_category)
            .field("favorites", &self.favorites.is_some())
            .finish()
    }
}

pub struct CatalogSessionBuilder {
    client: Arc<dyn RemoteCatalogClient>,
    user: UserId,
    default_category: CategorySelector,
    favorites: Option<Arc<dyn FavoritesStore>>,
    prefetch_limit: Option<usize>,
    lookup: Option<Arc<dyn MovieLookup>>,
}

impl CatalogSessionBuilder {
    fn new(client: Arc<dyn RemoteCatalogClient>) -> Self {
        Self {
            client,
            user: UserId::new(crate::constants::DEFAULT_USER),
            default_category: CategorySelector::default(),
            favorites: None,
            prefetch_limit: None,
            lookup: None,
        }
    }

    pub fn user(mut self, user: UserId) -> Self {
        self.user = user;
        self
    }

    pub fn default_category(mut self, category: CategorySelector) -> Self {
        self.default_category = category;
        self
    }

    pub fn favorites(mut self, store: Arc<dyn FavoritesStore>) -> Self {
        self.favorites = Some(store);
        self
    }

    pub fn prefetch_limit(mut self, max_concurrent: usize) -> Self {
        self.prefetch_limit = Some(max_concurrent);
        self
    }

    /// Select movies from `lookup` instead of the live listing.
    pub fn lookup(mut self, lookup: Arc<dyn MovieLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn build(self) -> CatalogSession {
        let images = Arc::new(ImageCacheController::new(self.client.clone()));

        let mut catalog = CatalogController::new(self.client.clone(), images.clone());
        if let Some(max_concurrent) = self.prefetch_limit {
            catalog = catalog.with_prefetch_limit(max_concurrent);
        }
        let catalog = Arc::new(catalog);

        let lookup = self
            .lookup
            .unwrap_or_else(|| catalog.clone() as Arc<dyn MovieLookup>);

        CatalogSession {
            user: self.user,
            default_category: self.default_category,
            selection: SelectionState::new(self.client, lookup),
            favorites: self.favorites.map(FavoritesController::new),
            catalog,
            images,
        }
    }
}
