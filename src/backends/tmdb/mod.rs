mod types;


use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use self::types::{TmdbConfiguration, TmdbImages, TmdbMovie, TmdbMovieDetail, TmdbPage, TmdbReview};
use super::traits::RemoteCatalogClient;
use crate::config::CatalogConfig;
use crate::models::{
    CategorySelector, Configuration, MovieDetail, MovieId, MovieImages, MovieSummary, Review,
};

/// `RemoteCatalogClient` backed by a TMDB v3 style REST API.
#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        // Url::join drops the last path segment unless the base ends with '/'
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).with_context(|| format!("Invalid API URL {}", base))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("No catalog API key configured"))?;
        Self::new(
            &config.base_url,
            api_key,
            &config.language,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path {}", path))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("language", &self.language);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {}", path);

        let response = self
            .client
            .get(url)
            .send()
            .await
            // The URL carries the API key
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("GET {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GET {} returned {}: {}", path, status, body);
            return Err(anyhow!("GET {} returned {}: {}", path, status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to decode {} response", path))
    }
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RemoteCatalogClient for TmdbClient {
    async fn fetch_by_category(&self, category: CategorySelector) -> Result<Vec<MovieSummary>> {
        let page: TmdbPage<TmdbMovie> = self.get_json(category.listing_path()).await?;
        debug!(
            "{}: page {} of {} with {} movies",
            category,
            page.page,
            page.total_pages,
            page.results.len()
        );
        Ok(page.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail> {
        let detail: TmdbMovieDetail = self.get_json(&format!("movie/{}", movie_id)).await?;
        Ok(detail.into())
    }

    async fn fetch_images(&self, movie_id: MovieId) -> Result<MovieImages> {
        let images: TmdbImages = self
            .get_json(&format!("movie/{}/images", movie_id))
            .await?;
        Ok(images.into())
    }

    async fn fetch_reviews(&self, movie_id: MovieId) -> Result<Vec<Review>> {
        let page: TmdbPage<TmdbReview> = self
            .get_json(&format!("movie/{}/reviews", movie_id))
            .await?;
        Ok(page.results.into_iter().map(Review::from).collect())
    }

    async fn fetch_configuration(&self) -> Result<Configuration> {
        let config: TmdbConfiguration = self.get_json("configuration").await?;
        Ok(config.into())
    }
}
