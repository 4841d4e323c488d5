use movie_rater::models::{MovieId, MovieImages, MovieSummary};

pub fn movie(id: MovieId, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: Some(format!("/{}.jpg", id)),
        vote_average: 7.0,
    }
}

pub fn popular_movies() -> Vec<MovieSummary> {
    vec![movie(1, "A"), movie(2, "B")]
}

pub fn images_for(movie_id: MovieId) -> MovieImages {
    MovieImages {
        id: movie_id,
        posters: vec![format!("/poster-{}.jpg", movie_id)],
        backdrops: vec![format!("/backdrop-{}.jpg", movie_id)],
    }
}
