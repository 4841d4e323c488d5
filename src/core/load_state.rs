use std::fmt;

use crate::models::{CategorySelector, MovieId, ReviewId, UserId};
use crate::utils::CatalogError;

/// Identity of an asynchronous controller operation, attached to every
/// state transition and failure so callers can tell what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    LoadCategory(CategorySelector),
    LoadConfiguration,
    FetchImages(MovieId),
    RefreshFavorites(UserId),
    AddFavorite { user: UserId, movie_id: MovieId },
    RemoveFavorite { user: UserId, movie_id: MovieId },
    CheckFavorite { user: UserId, movie_id: MovieId },
    SelectDetail(MovieId),
    LoadReviews(MovieId),
    SelectReview { movie_id: MovieId, review_id: ReviewId },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::LoadCategory(category) => write!(f, "load category {}", category),
            Operation::LoadConfiguration => write!(f, "load configuration"),
            Operation::FetchImages(id) => write!(f, "fetch images for movie {}", id),
            Operation::RefreshFavorites(user) => write!(f, "refresh favorites for {}", user),
            Operation::AddFavorite { user, movie_id } => {
                write!(f, "add favorite {} for {}", movie_id, user)
            }
            Operation::RemoveFavorite { user, movie_id } => {
                write!(f, "remove favorite {} for {}", movie_id, user)
            }
            Operation::CheckFavorite { user, movie_id } => {
                write!(f, "check favorite {} for {}", movie_id, user)
            }
            Operation::SelectDetail(id) => write!(f, "select detail for movie {}", id),
            Operation::LoadReviews(id) => write!(f, "load reviews for movie {}", id),
            Operation::SelectReview {
                movie_id,
                review_id,
            } => write!(f, "select review {} of movie {}", review_id, movie_id),
        }
    }
}

/// `Idle → Loading → {Loaded | Failed}` for one controller.
///
/// A new call while `Loading` simply moves to `Loading` again; whichever
/// call completes last decides the final state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(Operation),
    Loaded(Operation),
    Failed(CatalogError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<&Operation> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading(op) | LoadState::Loaded(op) => Some(op),
            LoadState::Failed(error) => Some(error.operation()),
        }
    }
}
