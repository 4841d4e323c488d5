use serde::{Deserialize, Deserializer};

use crate::models::{
    Configuration, Genre, ImagesConfiguration, MovieDetail, MovieImages, MovieSummary, Review,
    ReviewId,
};

// TMDB sends "" instead of null for some optional strings
fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        MovieSummary {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            poster_path: movie.poster_path,
            vote_average: movie.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetail {
    #[serde(flatten)]
    pub movie: TmdbMovie,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub backdrop_path: Option<String>,
    pub vote_count: Option<u32>,
}

impl From<TmdbMovieDetail> for MovieDetail {
    fn from(detail: TmdbMovieDetail) -> Self {
        MovieDetail {
            summary: detail.movie.into(),
            runtime: detail.runtime,
            genres: detail
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            release_date: detail.release_date,
            tagline: detail.tagline,
            backdrop_path: detail.backdrop_path,
            vote_count: detail.vote_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbImage {
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbImages {
    pub id: i64,
    #[serde(default)]
    pub posters: Vec<TmdbImage>,
    #[serde(default)]
    pub backdrops: Vec<TmdbImage>,
}

impl From<TmdbImages> for MovieImages {
    fn from(images: TmdbImages) -> Self {
        MovieImages {
            id: images.id,
            posters: images.posters.into_iter().map(|i| i.file_path).collect(),
            backdrops: images.backdrops.into_iter().map(|i| i.file_path).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbReview {
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

impl From<TmdbReview> for Review {
    fn from(review: TmdbReview) -> Self {
        Review {
            id: ReviewId::new(review.id),
            author: review.author,
            content: review.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbImagesConfiguration {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub secure_base_url: String,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbConfiguration {
    pub images: TmdbImagesConfiguration,
}

impl From<TmdbConfiguration> for Configuration {
    fn from(config: TmdbConfiguration) -> Self {
        Configuration {
            images: ImagesConfiguration {
                base_url: config.images.base_url,
                secure_base_url: config.images.secure_base_url,
                poster_sizes: config.images.poster_sizes,
                backdrop_sizes: config.images.backdrop_sizes,
            },
        }
    }
}
