use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::backends::FavoritesStore;
use crate::core::{LoadState, Operation, Property};
use crate::models::{FavoriteRecord, MovieId, MovieSummary, UserId};
use crate::utils::{CatalogError, CatalogResult};

/// Write-through view of one user's favorites.
///
/// The published list only ever changes by re-reading the store, so it
/// cannot disagree with what the store last confirmed. `favorites` and
/// `user` are updated together by one completion at a time.
pub struct FavoritesController {
    store: Arc<dyn FavoritesStore>,
    favorites: Property<Vec<FavoriteRecord>>,
    user: Property<Option<UserId>>,
    state: Property<LoadState>,
    publish: Mutex<()>,
}

impl FavoritesController {
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        Self {
            store,
            favorites: Property::new(Vec::new(), "favorites"),
            user: Property::new(None, "favorites_user"),
            state: Property::new(LoadState::Idle, "favorites_state"),
            publish: Mutex::new(()),
        }
    }

    /// Re-read `user`'s favorites and publish them.
    pub async fn refresh(&self, user: &UserId) -> CatalogResult<()> {
        let operation = Operation::RefreshFavorites(user.clone());
        self.tracked(operation.clone(), self.republish(user, &operation))
            .await
    }

    pub async fn add(
        &self,
        movie: &MovieSummary,
        user: &UserId,
        file_path: Option<&str>,
    ) -> CatalogResult<()> {
        let operation = Operation::AddFavorite {
            user: user.clone(),
            movie_id: movie.id,
        };
        let record = FavoriteRecord::from_summary(movie, user, file_path);

        self.tracked(operation.clone(), async {
            self.store
                .insert(&record)
                .await
                .map_err(|e| CatalogError::store(operation.clone(), e))?;
            info!("Added movie {} to favorites of {}", movie.id, user);
            self.republish(user, &operation).await
        })
        .await
    }

    pub async fn remove(&self, movie_id: MovieId, user: &UserId) -> CatalogResult<()> {
        let operation = Operation::RemoveFavorite {
            user: user.clone(),
            movie_id,
        };

        self.tracked(operation.clone(), async {
            self.store
                .delete(user, movie_id)
                .await
                .map_err(|e| CatalogError::store(operation.clone(), e))?;
            info!("Removed movie {} from favorites of {}", movie_id, user);
            self.republish(user, &operation).await
        })
        .await
    }

    /// Membership according to the store, not the published list.
    pub async fn is_favorite(&self, movie_id: MovieId, user: &UserId) -> CatalogResult<bool> {
        let records = self.store.list(user).await.map_err(|e| {
            CatalogError::store(
                Operation::CheckFavorite {
                    user: user.clone(),
                    movie_id,
                },
                e,
            )
        })?;
        Ok(records.iter().any(|r| r.movie_id == movie_id))
    }

    /// Add or remove `movie` depending on current membership. Returns
    /// whether it is a favorite afterwards.
    pub async fn toggle(
        &self,
        movie: &MovieSummary,
        user: &UserId,
        file_path: Option<&str>,
    ) -> CatalogResult<bool> {
        if self.is_favorite(movie.id, user).await? {
            self.remove(movie.id, user).await?;
            Ok(false)
        } else {
            self.add(movie, user, file_path).await?;
            Ok(true)
        }
    }

    /// Membership according to the last published list.
    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.favorites
            .with(|records| records.iter().any(|r| r.movie_id == movie_id))
    }

    pub fn favorites(&self) -> Property<Vec<FavoriteRecord>> {
        self.favorites.clone()
    }

    pub fn user(&self) -> Property<Option<UserId>> {
        self.user.clone()
    }

    pub fn state(&self) -> Property<LoadState> {
        self.state.clone()
    }

    async fn republish(&self, user: &UserId, operation: &Operation) -> CatalogResult<()> {
        let records = self
            .store
            .list(user)
            .await
            .map_err(|e| CatalogError::store(operation.clone(), e))?;

        debug!("Publishing {} favorites for {}", records.len(), user);
        let _publishing = self.publish.lock().unwrap_or_else(|e| e.into_inner());
        self.favorites.set(records);
        self.user.set(Some(user.clone()));
        Ok(())
    }

    async fn tracked<Fut>(&self, operation: Operation, work: Fut) -> CatalogResult<()>
    where
        Fut: Future<Output = CatalogResult<()>>,
    {
        self.state.set(LoadState::Loading(operation.clone()));
        match work.await {
            Ok(()) => {
                self.state.set(LoadState::Loaded(operation));
                Ok(())
            }
            Err(error) => {
                error!("{}", error);
                self.state.set(LoadState::Failed(error.clone()));
                Err(error)
            }
        }
    }
}
