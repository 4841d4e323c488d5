use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::utils::CatalogResult;

type SharedFetch<V> = Shared<BoxFuture<'static, CatalogResult<V>>>;

/// Keeps at most one fetch in flight per key; later callers attach to it.
///
/// The fetch future is expected to publish its own result into whatever
/// cache the caller owns. It is deregistered only after it has resolved, so
/// a caller arriving afterwards finds the value through the `cached` probe.
pub struct Coalescer<K, V> {
    pending: Arc<Mutex<HashMap<K, SharedFetch<V>>>>,
    name: &'static str,
}

impl<K, V> Coalescer<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            name,
        }
    }

    /// Resolve `key` from `cached`, an in-flight fetch, or a new fetch built by `fetch`.
    pub async fn run<C, F, Fut>(&self, key: K, cached: C, fetch: F) -> CatalogResult<V>
    where
        C: FnOnce() -> Option<V>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<V>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock().await;

            if let Some(value) = cached() {
                trace!("{}: {:?} already cached", self.name, key);
                return Ok(value);
            }

            match pending.get(&key) {
                Some(in_flight) => {
                    debug!("{}: joining in-flight fetch for {:?}", self.name, key);
                    in_flight.clone()
                }
                None => {
                    debug!("{}: starting fetch for {:?}", self.name, key);
                    let registry = self.pending.clone();
                    let registered_key = key.clone();
                    let fut = fetch();
                    let shared = async move {
                        let result = fut.await;
                        registry.lock().await.remove(&registered_key);
                        result
                    }
                    .boxed()
                    .shared();
                    pending.insert(key, shared.clone());
                    shared
                }
            }
        };

        shared.await
    }

    pub async fn in_flight(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_in_flight(&self, key: &K) -> bool {
        self.pending.lock().await.contains_key(key)
    }
}
