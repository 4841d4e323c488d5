mod category;
mod identifiers;

pub use category::CategorySelector;
pub use identifiers::{MovieId, ReviewId, UserId};

use serde::{Deserialize, Serialize};

/// One entry of a category listing. Replaced wholesale when its category is
/// fetched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Drill-down data for the selected movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub release_date: Option<String>,
    pub tagline: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_count: Option<u32>,
}

impl MovieDetail {
    pub fn id(&self) -> MovieId {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

/// Image file paths available for one movie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovieImages {
    pub id: MovieId,
    pub posters: Vec<String>,
    pub backdrops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagesConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    pub poster_sizes: Vec<String>,
    pub backdrop_sizes: Vec<String>,
}

/// Server-supplied image locations. Loaded once per session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Configuration {
    pub images: ImagesConfiguration,
}

impl Configuration {
    pub fn poster_url(&self, file_path: &str, size: &str) -> String {
        self.image_url(file_path, size, &self.images.poster_sizes)
    }

    pub fn backdrop_url(&self, file_path: &str, size: &str) -> String {
        self.image_url(file_path, size, &self.images.backdrop_sizes)
    }

    fn image_url(&self, file_path: &str, size: &str, offered: &[String]) -> String {
        let base = if self.images.secure_base_url.is_empty() {
            &self.images.base_url
        } else {
            &self.images.secure_base_url
        };
        let size = if offered.iter().any(|s| s == size) {
            size
        } else {
            "original"
        };
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            size,
            file_path.trim_start_matches('/')
        )
    }
}

/// A movie the user marked as favorite. Identity is `(user_id, movie_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    /// Locally saved poster, empty when none was saved.
    pub file_path: String,
}

impl FavoriteRecord {
    pub fn from_summary(movie: &MovieSummary, user: &UserId, file_path: Option<&str>) -> Self {
        Self {
            user_id: user.clone(),
            movie_id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            file_path: file_path.unwrap_or_default().to_string(),
        }
    }

    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.movie_id,
            title: self.title.clone(),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.vote_average,
        }
    }
}
