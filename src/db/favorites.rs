use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::debug;

use super::connection;
use crate::backends::FavoritesStore;
use crate::config::Config;
use crate::models::{FavoriteRecord, MovieId, UserId};

/// Favorites persisted in SQLite, one row per `(user, movie)`.
#[derive(Debug, Clone)]
pub struct SqliteFavoritesStore {
    pool: SqlitePool,
}

impl SqliteFavoritesStore {
    pub async fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            pool: connection::connect(path).await?,
        })
    }

    /// Open the database configured in `config`. A missing data directory
    /// is an error like any other open failure.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let path = config.database_path()?;
        Self::open(&path).await
    }

    pub async fn in_memory() -> Result<Self> {
        Ok(Self {
            pool: connection::connect_in_memory().await?,
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn record_from_row(row: &SqliteRow) -> Result<FavoriteRecord> {
        Ok(FavoriteRecord {
            user_id: UserId::new(row.try_get::<String, _>("user_name")?),
            movie_id: row.try_get("movie_id")?,
            title: row.try_get("title")?,
            overview: row.try_get("overview")?,
            poster_path: row.try_get("poster_path")?,
            vote_average: row.try_get("vote_average")?,
            file_path: row.try_get("file_path")?,
        })
    }
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn list(&self, user: &UserId) -> Result<Vec<FavoriteRecord>> {
        let rows = sqlx::query(
            "SELECT user_name, movie_id, title, overview, poster_path, vote_average, file_path \
             FROM favorite_movies WHERE user_name = ? ORDER BY rowid",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list favorites for {}", user))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn insert(&self, record: &FavoriteRecord) -> Result<()> {
        debug!(
            "Saving favorite {} for {}",
            record.movie_id, record.user_id
        );
        sqlx::query(
            "INSERT OR REPLACE INTO favorite_movies \
             (user_name, movie_id, title, overview, poster_path, vote_average, file_path) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.user_id.as_str())
        .bind(record.movie_id)
        .bind(&record.title)
        .bind(&record.overview)
        .bind(record.poster_path.as_deref())
        .bind(record.vote_average)
        .bind(&record.file_path)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save favorite {}", record.movie_id))?;
        Ok(())
    }

    async fn delete(&self, user: &UserId, movie_id: MovieId) -> Result<()> {
        let result = sqlx::query("DELETE FROM favorite_movies WHERE user_name = ? AND movie_id = ?")
            .bind(user.as_str())
            .bind(movie_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete favorite {}", movie_id))?;

        debug!(
            "Deleted {} favorite row(s) for {} / {}",
            result.rows_affected(),
            user,
            movie_id
        );
        Ok(())
    }
}
