//! Filter-bound query subscription.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use super::{FilterParameter, QueryHandle, RecordQueryService, ResultSnapshot};

struct Binding {
    handle: Option<QueryHandle>,
    next_generation: u64,
}

/// Holds the current filter and the latest result snapshot for it.
///
/// Every `set_parameter` issues a fresh query. `refresh` re-runs the bound
/// query in place, so receivers from [`QuerySubscription::subscribe`] keep
/// observing the same channel. Nothing is cancelled: whichever response
/// arrives last becomes the snapshot.
pub struct QuerySubscription {
    service: Arc<dyn RecordQueryService>,
    binding: Mutex<Binding>,
    snapshot: watch::Sender<Arc<ResultSnapshot>>,
}

impl QuerySubscription {
    pub fn new(service: Arc<dyn RecordQueryService>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(ResultSnapshot::Pending));
        Self {
            service,
            binding: Mutex::new(Binding {
                handle: None,
                next_generation: 1,
            }),
            snapshot,
        }
    }

    /// Bind a new filter and fetch for it.
    pub async fn set_parameter(&self, filter: FilterParameter) -> Arc<ResultSnapshot> {
        let handle = {
            let mut binding = self.binding.lock().unwrap_or_else(PoisonError::into_inner);
            let handle = QueryHandle::new(binding.next_generation, filter);
            binding.next_generation += 1;
            binding.handle = Some(handle.clone());
            handle
        };
        debug!(filter = %handle.filter(), generation = handle.generation(), "issuing query");

        let result = self.service.query(handle.filter()).await;
        self.replace(result.into())
    }

    /// Re-execute the bound query. Returns `None` when no filter was ever bound.
    pub async fn refresh(&self) -> Option<Arc<ResultSnapshot>> {
        let handle = self.handle()?;
        debug!(filter = %handle.filter(), generation = handle.generation(), "re-running query");

        let result = self.service.requery(&handle).await;
        Some(self.replace(result.into()))
    }

    pub fn snapshot(&self) -> Arc<ResultSnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ResultSnapshot>> {
        self.snapshot.subscribe()
    }

    pub fn handle(&self) -> Option<QueryHandle> {
        self.binding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle
            .clone()
    }

    pub fn filter(&self) -> Option<FilterParameter> {
        self.handle().map(|h| h.filter().clone())
    }

    fn replace(&self, snapshot: ResultSnapshot) -> Arc<ResultSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.snapshot.send_replace(Arc::clone(&snapshot));
        snapshot
    }
}
