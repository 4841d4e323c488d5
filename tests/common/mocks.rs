use anyhow::{Result, bail};
use async_trait::async_trait;
use movie_rater::backends::RemoteCatalogClient;
use movie_rater::models::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::fixtures::images_for;

#[derive(Debug, Default)]
pub struct MockCatalog {
    pub listings: HashMap<CategorySelector, Vec<MovieSummary>>,
    pub error_mode: Arc<Mutex<Option<String>>>,
    pub image_calls: Arc<Mutex<HashMap<MovieId, usize>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, category: CategorySelector, movies: Vec<MovieSummary>) -> Self {
        self.listings.insert(category, movies);
        self
    }

    pub fn inject_error(&self, error: String) {
        *self.error_mode.lock().unwrap() = Some(error);
    }

    pub fn clear_error(&self) {
        *self.error_mode.lock().unwrap() = None;
    }

    pub fn image_calls(&self, movie_id: MovieId) -> usize {
        self.image_calls
            .lock()
            .unwrap()
            .get(&movie_id)
            .copied()
            .unwrap_or(0)
    }

    fn check_error(&self) -> Result<()> {
        if let Some(error) = self.error_mode.lock().unwrap().clone() {
            bail!(error);
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCatalogClient for MockCatalog {
    async fn fetch_by_category(&self, category: CategorySelector) -> Result<Vec<MovieSummary>> {
        self.check_error()?;
        Ok(self.listings.get(&category).cloned().unwrap_or_default())
    }

    async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail> {
        self.check_error()?;
        bail!("no detail for {}", movie_id)
    }

    async fn fetch_images(&self, movie_id: MovieId) -> Result<MovieImages> {
        *self.image_calls.lock().unwrap().entry(movie_id).or_insert(0) += 1;
        // Stagger completions so the two prefetches finish out of order
        let delay = if movie_id == 1 { 15 } else { 1 };
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        self.check_error()?;
        Ok(images_for(movie_id))
    }

    async fn fetch_reviews(&self, _movie_id: MovieId) -> Result<Vec<Review>> {
        self.check_error()?;
        Ok(Vec::new())
    }

    async fn fetch_configuration(&self) -> Result<Configuration> {
        self.check_error()?;
        Ok(Configuration {
            images: ImagesConfiguration {
                base_url: "http://images.test/".to_string(),
                secure_base_url: "https://images.test/".to_string(),
                poster_sizes: vec!["w500".to_string()],
                backdrop_sizes: Vec::new(),
            },
        })
    }
}
