#[cfg(test)]
mod session_flow_tests {
    use crate::common::eventually;
    use crate::common::fixtures::{images_for, movie, popular_movies};
    use crate::common::mocks::MockCatalog;
    use movie_rater::models::CategorySelector;
    use movie_rater::{CatalogSession, LoadState, Operation};
    use std::sync::Arc;
    use std::time::Duration;

    async fn started_session(client: Arc<MockCatalog>) -> CatalogSession {
        let session = CatalogSession::builder(client).build();
        session.start().await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_listing_then_images_without_cross_contamination() {
        let client = Arc::new(
            MockCatalog::new().with_listing(CategorySelector::Popular, popular_movies()),
        );
        let session = started_session(client.clone()).await;

        assert_eq!(session.catalog().movies().get_sync(), popular_movies());

        let images = session.images().clone();
        let both_cached = eventually(
            || {
                let images = images.clone();
                async move { images.contains(1) && images.contains(2) }
            },
            Duration::from_secs(1),
        )
        .await;
        assert!(both_cached, "prefetch should fill both entries");

        assert_eq!(images.get(1), Some(images_for(1)));
        assert_eq!(images.get(2), Some(images_for(2)));
        assert_eq!(client.image_calls(1), 1);
        assert_eq!(client.image_calls(2), 1);
    }

    #[tokio::test]
    async fn test_select_movie_after_load() {
        let client = Arc::new(
            MockCatalog::new().with_listing(CategorySelector::Popular, popular_movies()),
        );
        let session = started_session(client).await;
        let selection = session.selection();

        selection.select_movie("B");
        assert_eq!(selection.selected_movie(), Some(movie(2, "B")));

        selection.select_movie("Z");
        assert_eq!(selection.selected_movie_id().get_sync(), None);
        assert!(selection.selected_movie().is_none());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_listing_and_reports_operation() {
        let client = Arc::new(
            MockCatalog::new()
                .with_listing(CategorySelector::Popular, popular_movies())
                .with_listing(CategorySelector::TopRated, vec![movie(3, "C")]),
        );
        let session = started_session(client.clone()).await;
        let mut changes = session.catalog().state().subscribe();

        client.inject_error("503 Service Unavailable".to_string());
        let result = session.catalog().load_category(CategorySelector::TopRated).await;

        assert!(result.is_err());
        assert_eq!(session.catalog().movies().get_sync(), popular_movies());
        match session.catalog().state().get_sync() {
            LoadState::Failed(error) => {
                assert_eq!(
                    error.operation(),
                    &Operation::LoadCategory(CategorySelector::TopRated)
                );
                assert!(error.message().contains("503"));
            }
            other => panic!("expected failed state, got {:?}", other),
        }
        assert!(changes.try_recv());

        client.clear_error();
        session
            .catalog()
            .load_category(CategorySelector::TopRated)
            .await
            .unwrap();
        assert_eq!(session.catalog().movies().get_sync(), vec![movie(3, "C")]);
    }

    #[tokio::test]
    async fn test_bogus_category_name_matches_popular() {
        let client = Arc::new(
            MockCatalog::new().with_listing(CategorySelector::Popular, popular_movies()),
        );
        let session = CatalogSession::builder(client).build();

        session
            .catalog()
            .load_category_named("bogus-category")
            .await
            .unwrap();

        assert_eq!(session.catalog().movies().get_sync(), popular_movies());
        assert_eq!(
            session.catalog().category().get_sync(),
            Some(CategorySelector::Popular)
        );
    }
}
