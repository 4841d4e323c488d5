use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
    CategorySelector, Configuration, FavoriteRecord, MovieDetail, MovieId, MovieImages,
    MovieSummary, Review, UserId,
};

/// Remote movie catalog. Implementations own transport concerns such as
/// timeouts and retries; an `Err` is always a real failure, never an empty
/// result in disguise.
#[async_trait]
pub trait RemoteCatalogClient: Send + Sync + std::fmt::Debug {
    async fn fetch_by_category(&self, category: CategorySelector) -> Result<Vec<MovieSummary>>;

    async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail>;

    async fn fetch_images(&self, movie_id: MovieId) -> Result<MovieImages>;

    async fn fetch_reviews(&self, movie_id: MovieId) -> Result<Vec<Review>>;

    async fn fetch_configuration(&self) -> Result<Configuration>;
}

/// Durable per-user favorites.
///
/// The store enforces `(user, movie)` uniqueness: inserting an existing pair
/// replaces it. Listing an unknown user yields an empty list.
#[async_trait]
pub trait FavoritesStore: Send + Sync + std::fmt::Debug {
    async fn list(&self, user: &UserId) -> Result<Vec<FavoriteRecord>>;

    async fn insert(&self, record: &FavoriteRecord) -> Result<()>;

    async fn delete(&self, user: &UserId, movie_id: MovieId) -> Result<()>;
}
