use async_trait::async_trait;

use super::FilterParameter;
use crate::error::ErrorInfo;
use crate::record::Record;

/// The query binding a subscription currently holds.
///
/// A new handle (next generation) is minted every time the filter changes;
/// refreshing re-runs the same handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHandle {
    generation: u64,
    filter: FilterParameter,
}

impl QueryHandle {
    pub(crate) fn new(generation: u64, filter: FilterParameter) -> Self {
        Self { generation, filter }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &FilterParameter {
        &self.filter
    }
}

/// Remote record source consumed by the query subscription.
#[async_trait]
pub trait RecordQueryService: Send + Sync {
    /// Fetch every record in scope of `filter`.
    async fn query(&self, filter: &FilterParameter) -> Result<Vec<Record>, ErrorInfo>;

    /// Re-run a previously issued query, bypassing any client-side cache.
    ///
    /// Default implementation re-issues `query` with the handle's filter.
    async fn requery(&self, handle: &QueryHandle) -> Result<Vec<Record>, ErrorInfo> {
        self.query(handle.filter()).await
    }
}
