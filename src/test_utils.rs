#![cfg(test)]

use crate::models::{MovieId, MovieSummary};

pub fn movie(id: MovieId, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: format!("Overview of {}", title),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        vote_average: 6.5,
    }
}

/// The two-movie listing used by most scenarios: `[{1, "A"}, {2, "B"}]`.
pub fn sample_movies() -> Vec<MovieSummary> {
    vec![movie(1, "A"), movie(2, "B")]
}

/// Common test utilities
pub mod common {
    use std::future::Future;
    use std::time::Duration;
    use tokio::time::sleep;

    /// Wait for an async condition to become true
    pub async fn wait_for_async<F, Fut>(mut condition: F, max_wait: Duration) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        let start = std::time::Instant::now();

        while start.elapsed() < max_wait {
            if condition().await {
                return true;
            }
            sleep(Duration::from_millis(5)).await;
        }

        false
    }
}

/// Scriptable catalog and store doubles
pub mod mock_catalog {
    use crate::backends::{FavoritesStore, RemoteCatalogClient};
    use crate::db::MemoryFavoritesStore;
    use crate::models::*;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::watch;

    /// In-memory catalog with call counters and failure injection.
    pub struct MockCatalogClient {
        listings: Mutex<HashMap<CategorySelector, Vec<MovieSummary>>>,
        delays: Mutex<HashMap<CategorySelector, Duration>>,
        detail_delays: Mutex<HashMap<MovieId, Duration>>,
        details: Mutex<HashMap<MovieId, MovieDetail>>,
        reviews: Mutex<HashMap<MovieId, Vec<Review>>>,
        configuration: Configuration,
        configuration_delay: Duration,
        error_mode: Mutex<Option<String>>,
        failing_images: Mutex<HashSet<MovieId>>,
        image_gate: watch::Sender<bool>,
        calls: Mutex<HashMap<String, usize>>,
    }

    impl MockCatalogClient {
        pub fn new() -> Self {
            let (image_gate, _) = watch::channel(true);
            Self {
                listings: Mutex::new(HashMap::new()),
                delays: Mutex::new(HashMap::new()),
                detail_delays: Mutex::new(HashMap::new()),
                details: Mutex::new(HashMap::new()),
                reviews: Mutex::new(HashMap::new()),
                configuration: Configuration {
                    images: ImagesConfiguration {
                        base_url: "http://img.test/t/p/".to_string(),
                        secure_base_url: "https://img.test/t/p/".to_string(),
                        poster_sizes: vec!["w500".to_string()],
                        backdrop_sizes: vec!["w780".to_string()],
                    },
                },
                configuration_delay: Duration::ZERO,
                error_mode: Mutex::new(None),
                failing_images: Mutex::new(HashSet::new()),
                image_gate,
                calls: Mutex::new(HashMap::new()),
            }
        }

        pub fn with_listing(self, category: CategorySelector, movies: Vec<MovieSummary>) -> Self {
            self.listings.lock().unwrap().insert(category, movies);
            self
        }

        pub fn with_delay(self, category: CategorySelector, delay: Duration) -> Self {
            self.delays.lock().unwrap().insert(category, delay);
            self
        }

        pub fn with_detail_delay(self, movie_id: MovieId, delay: Duration) -> Self {
            self.detail_delays.lock().unwrap().insert(movie_id, delay);
            self
        }

        pub fn with_detail(self, detail: MovieDetail) -> Self {
            self.details.lock().unwrap().insert(detail.id(), detail);
            self
        }

        pub fn with_reviews(self, movie_id: MovieId, reviews: Vec<Review>) -> Self {
            self.reviews.lock().unwrap().insert(movie_id, reviews);
            self
        }

        pub fn with_configuration_delay(mut self, delay: Duration) -> Self {
            self.configuration_delay = delay;
            self
        }

        pub fn inject_error(&self, error: &str) {
            *self.error_mode.lock().unwrap() = Some(error.to_string());
        }

        pub fn clear_error(&self) {
            *self.error_mode.lock().unwrap() = None;
        }

        pub fn fail_images_for(&self, movie_id: MovieId) {
            self.failing_images.lock().unwrap().insert(movie_id);
        }

        pub fn heal_images_for(&self, movie_id: MovieId) {
            self.failing_images.lock().unwrap().remove(&movie_id);
        }

        /// Park image fetches until `release_images` is called.
        pub fn hold_images(&self) {
            self.image_gate.send_replace(false);
        }

        pub fn release_images(&self) {
            self.image_gate.send_replace(true);
        }

        pub fn calls(&self, key: &str) -> usize {
            self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
        }

        pub fn image_fetches(&self, movie_id: MovieId) -> usize {
            self.calls(&format!("images:{}", movie_id))
        }

        pub fn category_fetches(&self, category: CategorySelector) -> usize {
            self.calls(&format!("category:{}", category))
        }

        pub fn review_fetches(&self, movie_id: MovieId) -> usize {
            self.calls(&format!("reviews:{}", movie_id))
        }

        pub fn configuration_fetches(&self) -> usize {
            self.calls("configuration")
        }

        pub fn images_for(movie_id: MovieId) -> MovieImages {
            MovieImages {
                id: movie_id,
                posters: vec![format!("/poster-{}.jpg", movie_id)],
                backdrops: vec![format!("/backdrop-{}.jpg", movie_id)],
            }
        }

        fn record(&self, key: String) {
            *self.calls.lock().unwrap().entry(key).or_insert(0) += 1;
        }

        fn check_error(&self) -> Result<()> {
            if let Some(error) = self.error_mode.lock().unwrap().clone() {
                bail!(error);
            }
            Ok(())
        }
    }

    impl std::fmt::Debug for MockCatalogClient {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockCatalogClient").finish()
        }
    }

    #[async_trait]
    impl RemoteCatalogClient for MockCatalogClient {
        async fn fetch_by_category(
            &self,
            category: CategorySelector,
        ) -> Result<Vec<MovieSummary>> {
            self.record(format!("category:{}", category));
            let delay = self.delays.lock().unwrap().get(&category).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.check_error()?;
            Ok(self
                .listings
                .lock()
                .unwrap()
                .get(&category)
                .cloned()
                .unwrap_or_default())
        }

        async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail> {
            self.record(format!("detail:{}", movie_id));
            let delay = self.detail_delays.lock().unwrap().get(&movie_id).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.check_error()?;
            match self.details.lock().unwrap().get(&movie_id) {
                Some(detail) => Ok(detail.clone()),
                None => bail!("movie {} not found", movie_id),
            }
        }

        async fn fetch_images(&self, movie_id: MovieId) -> Result<MovieImages> {
            self.record(format!("images:{}", movie_id));
            let mut gate = self.image_gate.subscribe();
            if gate.wait_for(|open| *open).await.is_err() {
                bail!("image gate closed");
            }
            self.check_error()?;
            if self.failing_images.lock().unwrap().contains(&movie_id) {
                bail!("images for {} unavailable", movie_id);
            }
            Ok(Self::images_for(movie_id))
        }

        async fn fetch_reviews(&self, movie_id: MovieId) -> Result<Vec<Review>> {
            self.record(format!("reviews:{}", movie_id));
            self.check_error()?;
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .get(&movie_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn fetch_configuration(&self) -> Result<Configuration> {
            self.record("configuration".to_string());
            if !self.configuration_delay.is_zero() {
                tokio::time::sleep(self.configuration_delay).await;
            }
            self.check_error()?;
            Ok(self.configuration.clone())
        }
    }

    /// Wraps a memory store and fails every call while `failing` is set.
    #[derive(Debug, Default)]
    pub struct FailingFavoritesStore {
        inner: MemoryFavoritesStore,
        failing: AtomicBool,
    }

    impl FailingFavoritesStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                bail!("disk I/O error");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl FavoritesStore for FailingFavoritesStore {
        async fn list(&self, user: &UserId) -> Result<Vec<FavoriteRecord>> {
            self.check()?;
            self.inner.list(user).await
        }

        async fn insert(&self, record: &FavoriteRecord) -> Result<()> {
            self.check()?;
            self.inner.insert(record).await
        }

        async fn delete(&self, user: &UserId, movie_id: MovieId) -> Result<()> {
            self.check()?;
            self.inner.delete(user, movie_id).await
        }
    }
}
