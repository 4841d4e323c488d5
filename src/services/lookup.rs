use crate::models::{MovieId, MovieSummary};

/// Read access to a list of movies for selection.
pub trait MovieLookup: Send + Sync {
    fn find_by_id(&self, movie_id: MovieId) -> Option<MovieSummary>;

    fn find_by_title(&self, title: &str) -> Option<MovieSummary>;
}

/// A fixed list handed over at construction, e.g. bundled sample data.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    movies: Vec<MovieSummary>,
}

impl StaticCatalog {
    pub fn new(movies: Vec<MovieSummary>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }
}

impl MovieLookup for StaticCatalog {
    fn find_by_id(&self, movie_id: MovieId) -> Option<MovieSummary> {
        self.movies.iter().find(|m| m.id == movie_id).cloned()
    }

    fn find_by_title(&self, title: &str) -> Option<MovieSummary> {
        self.movies.iter().find(|m| m.title == title).cloned()
    }
}
