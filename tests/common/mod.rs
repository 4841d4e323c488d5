pub mod fixtures;
pub mod mocks;

use std::future::Future;
use std::time::Duration;

/// Poll `condition` until it holds or `max_wait` elapses.
pub async fn eventually<F, Fut>(mut condition: F, max_wait: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = std::time::Instant::now();
    while start.elapsed() < max_wait {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}
