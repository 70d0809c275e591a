use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::error::ErrorInfo;
use crate::record::{DraftBatch, Fields, RecordId};

/// Remote record writer consumed by the committer.
#[async_trait]
pub trait RecordUpdateService: Send + Sync {
    /// Apply a partial field update to one record.
    async fn update(&self, id: &RecordId, fields: &Fields) -> Result<(), ErrorInfo>;
}

/// Aggregate result of one batch commit.
///
/// The batch is one unit: there is no per-row partial outcome. Rows that were
/// written before another row failed stay written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    AllSucceeded,
    Failed(ErrorInfo),
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommitOutcome::AllSucceeded)
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            CommitOutcome::Failed(error) => Some(error),
            CommitOutcome::AllSucceeded => None,
        }
    }
}

/// Submits a draft batch as independent concurrent updates.
pub struct EditBatchCommitter {
    service: Arc<dyn RecordUpdateService>,
}

impl EditBatchCommitter {
    pub fn new(service: Arc<dyn RecordUpdateService>) -> Self {
        Self { service }
    }

    /// Issue one update per edit, all at once, and wait for every one to settle.
    ///
    /// A failure does not stop the others. The reported error is the first one
    /// to settle, not the first in batch order. No retries.
    pub async fn submit(&self, batch: &DraftBatch) -> CommitOutcome {
        let mut pending: FuturesUnordered<_> = batch
            .iter()
            .map(|edit| {
                let service = Arc::clone(&self.service);
                async move {
                    let result = service.update(&edit.id, &edit.fields).await;
                    (edit, result)
                }
            })
            .collect();

        let mut first_failure = None;
        let mut failed = 0usize;
        while let Some((edit, result)) = pending.next().await {
            if let Err(error) = result {
                warn!(record = %edit.id, error = %error, "record update failed");
                failed += 1;
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
            }
        }

        debug!(edits = batch.len(), failed, "batch commit settled");
        match first_failure {
            None => CommitOutcome::AllSucceeded,
            Some(error) => CommitOutcome::Failed(error),
        }
    }
}
