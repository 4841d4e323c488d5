use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backends::FavoritesStore;
use crate::models::{FavoriteRecord, MovieId, UserId};

/// Process-local favorites, for sessions that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    records: RwLock<HashMap<UserId, Vec<FavoriteRecord>>>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = FavoriteRecord>) -> Self {
        let mut by_user: HashMap<UserId, Vec<FavoriteRecord>> = HashMap::new();
        for record in records {
            let entries = by_user.entry(record.user_id.clone()).or_default();
            entries.retain(|r| r.movie_id != record.movie_id);
            entries.push(record);
        }
        Self {
            records: RwLock::new(by_user),
        }
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn list(&self, user: &UserId) -> Result<Vec<FavoriteRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(&self, record: &FavoriteRecord) -> Result<()> {
        let mut records = self.records.write().await;
        let entries = records.entry(record.user_id.clone()).or_default();
        entries.retain(|r| r.movie_id != record.movie_id);
        entries.push(record.clone());
        Ok(())
    }

    async fn delete(&self, user: &UserId, movie_id: MovieId) -> Result<()> {
        if let Some(entries) = self.records.write().await.get_mut(user) {
            entries.retain(|r| r.movie_id != movie_id);
        }
        Ok(())
    }
}
