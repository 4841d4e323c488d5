use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Movie listing the catalog can be browsed by.
///
/// Parsing never fails: any name that is not recognised resolves to
/// [`CategorySelector::Popular`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategorySelector {
    #[default]
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl CategorySelector {
    pub const ALL: [CategorySelector; 4] = [
        CategorySelector::Popular,
        CategorySelector::TopRated,
        CategorySelector::NowPlaying,
        CategorySelector::Upcoming,
    ];

    /// Resolve a user-facing category name, falling back to `Popular`.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "popular" => CategorySelector::Popular,
            "toprated" => CategorySelector::TopRated,
            "nowplaying" => CategorySelector::NowPlaying,
            "upcoming" => CategorySelector::Upcoming,
            _ => {
                tracing::debug!("Unknown category {:?}, using Popular", name);
                CategorySelector::Popular
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategorySelector::Popular => "Popular",
            CategorySelector::TopRated => "Top Rated",
            CategorySelector::NowPlaying => "Now Playing",
            CategorySelector::Upcoming => "Upcoming",
        }
    }

    /// Path of the listing endpoint, relative to the API root.
    pub fn listing_path(&self) -> &'static str {
        match self {
            CategorySelector::Popular => "movie/popular",
            CategorySelector::TopRated => "movie/top_rated",
            CategorySelector::NowPlaying => "movie/now_playing",
            CategorySelector::Upcoming => "movie/upcoming",
        }
    }
}

impl FromStr for CategorySelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
