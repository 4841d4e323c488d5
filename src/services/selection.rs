use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::lookup::MovieLookup;
use crate::backends::RemoteCatalogClient;
use crate::core::{LoadState, Operation, Property};
use crate::models::{MovieDetail, MovieId, MovieSummary, Review, ReviewId};
use crate::utils::{CatalogError, CatalogResult};

/// What the user is currently looking at: a movie from the listing, its
/// detail and its reviews.
pub struct SelectionState {
    client: Arc<dyn RemoteCatalogClient>,
    lookup: Arc<dyn MovieLookup>,
    selected_movie_id: Property<Option<MovieId>>,
    selected_detail: Property<Option<MovieDetail>>,
    reviews: Property<Vec<Review>>,
    selected_review: Property<Option<Review>>,
    state: Property<LoadState>,
}

impl SelectionState {
    pub fn new(client: Arc<dyn RemoteCatalogClient>, lookup: Arc<dyn MovieLookup>) -> Self {
        Self {
            client,
            lookup,
            selected_movie_id: Property::new(None, "selected_movie_id"),
            selected_detail: Property::new(None, "selected_detail"),
            reviews: Property::new(Vec::new(), "reviews"),
            selected_review: Property::new(None, "selected_review"),
            state: Property::new(LoadState::Idle, "selection_state"),
        }
    }

    /// Select the movie titled `title`, or clear the selection when the
    /// current list has no such movie.
    pub fn select_movie(&self, title: &str) -> Option<MovieSummary> {
        let found = self.lookup.find_by_title(title);
        if found.is_none() {
            debug!("No movie titled {:?} in the current list", title);
        }
        self.selected_movie_id.set(found.as_ref().map(|m| m.id));
        found
    }

    pub fn select_movie_by_id(&self, movie_id: MovieId) -> Option<MovieSummary> {
        let found = self.lookup.find_by_id(movie_id);
        self.selected_movie_id.set(found.as_ref().map(|m| m.id));
        found
    }

    /// The selected movie as it appears in the current list.
    pub fn selected_movie(&self) -> Option<MovieSummary> {
        self.selected_movie_id
            .get_sync()
            .and_then(|id| self.lookup.find_by_id(id))
    }

    /// Fetch and publish the detail for `movie_id`, replacing any previous
    /// detail. A failure leaves the previous detail in place.
    pub async fn select_detail(&self, movie_id: MovieId) -> CatalogResult<()> {
        let operation = Operation::SelectDetail(movie_id);
        let client = self.client.clone();

        let detail = self
            .tracked(operation.clone(), async move {
                client
                    .fetch_detail(movie_id)
                    .await
                    .map_err(|e| CatalogError::fetch(operation, e))
            })
            .await?;

        self.selected_detail.set(Some(detail));
        Ok(())
    }

    /// Fetch `movie_id`'s reviews and publish the one with `review_id`, or
    /// clear the selected review when it is not there. Always fetches.
    pub async fn select_review_by_id(
        &self,
        movie_id: MovieId,
        review_id: &ReviewId,
    ) -> CatalogResult<()> {
        let operation = Operation::SelectReview {
            movie_id,
            review_id: review_id.clone(),
        };
        let client = self.client.clone();

        let reviews = self
            .tracked(operation.clone(), async move {
                client
                    .fetch_reviews(movie_id)
                    .await
                    .map_err(|e| CatalogError::fetch(operation, e))
            })
            .await?;

        let found = reviews.into_iter().find(|r| &r.id == review_id);
        if found.is_none() {
            debug!("Movie {} has no review {}", movie_id, review_id);
        }
        self.selected_review.set(found);
        Ok(())
    }

    /// Fetch and publish every review of `movie_id`.
    pub async fn load_reviews(&self, movie_id: MovieId) -> CatalogResult<()> {
        let operation = Operation::LoadReviews(movie_id);
        let client = self.client.clone();

        let reviews = self
            .tracked(operation.clone(), async move {
                client
                    .fetch_reviews(movie_id)
                    .await
                    .map_err(|e| CatalogError::fetch(operation, e))
            })
            .await?;

        debug!("Loaded {} reviews for movie {}", reviews.len(), movie_id);
        self.reviews.set(reviews);
        Ok(())
    }

    /// Select from the published review list without fetching.
    pub fn select_review(&self, review_id: &ReviewId) -> Option<Review> {
        let found = self
            .reviews
            .with(|reviews| reviews.iter().find(|r| &r.id == review_id).cloned());
        self.selected_review.set(found.clone());
        found
    }

    pub fn clear(&self) {
        self.selected_movie_id.set(None);
        self.selected_detail.set(None);
        self.reviews.set(Vec::new());
        self.selected_review.set(None);
        self.state.set(LoadState::Idle);
    }

    pub fn selected_movie_id(&self) -> Property<Option<MovieId>> {
        self.selected_movie_id.clone()
    }

    pub fn selected_detail(&self) -> Property<Option<MovieDetail>> {
        self.selected_detail.clone()
    }

    pub fn reviews(&self) -> Property<Vec<Review>> {
        self.reviews.clone()
    }

    pub fn selected_review(&self) -> Property<Option<Review>> {
        self.selected_review.clone()
    }

    pub fn state(&self) -> Property<LoadState> {
        self.state.clone()
    }

    async fn tracked<T, Fut>(&self, operation: Operation, work: Fut) -> CatalogResult<T>
    where
        Fut: Future<Output = CatalogResult<T>>,
    {
        self.state.set(LoadState::Loading(operation.clone()));
        match work.await {
            Ok(value) => {
                self.state.set(LoadState::Loaded(operation));
                Ok(value)
            }
            Err(error) => {
                warn!("{}", error);
                self.state.set(LoadState::Failed(error.clone()));
                Err(error)
            }
        }
    }
}
