// Defaults shared by the config layer and the binary

pub const APP_DIR_NAME: &str = "movie-rater";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const FAVORITES_DB_FILE_NAME: &str = "favorites.db";

// === Catalog API ===
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const API_KEY_ENV_VAR: &str = "MOVIE_RATER_API_KEY";

// === Session ===
pub const DEFAULT_USER: &str = "guest";
pub const DEFAULT_POSTER_SIZE: &str = "w500";
