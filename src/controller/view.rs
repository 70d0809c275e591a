//! The grid's view controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{ViewControllerBuilder, ViewState};
use crate::bus::{MessageContext, Publisher, SelectionPublisher};
use crate::commit::{CommitOutcome, EditBatchCommitter, RecordUpdateService};
use crate::config::GridConfig;
use crate::error::{DraftError, ErrorInfo};
use crate::loading::LoadingSignal;
use crate::query::{FilterParameter, QuerySubscription, RecordQueryService, ResultSnapshot};
use crate::record::{DraftBatch, DraftEdit, Record, RecordId};
use crate::toast::{Toast, ToastSink, ToastVariant};

#[derive(Default)]
struct Session {
    drafts: DraftBatch,
    selected: Option<RecordId>,
}

/// Mediates filter changes, refreshes, row selection and draft commits.
///
/// All public operations absorb failures: callers observe the outcome through
/// [`ViewController::state`], the loading signal and toasts, never through an
/// error return.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use record_grid::bus::InMemoryBus;
/// use record_grid::controller::{ViewController, ViewState};
/// use record_grid::config::GridConfig;
/// use record_grid::record::Record;
/// use record_grid::store::InMemoryRecordStore;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = Arc::new(
///     InMemoryRecordStore::new("BoatType")
///         .with_records([Record::new("1").with("BoatType", "kayak")]),
/// );
/// let grid = ViewController::builder(GridConfig::default())
///     .record_service(store)
///     .publisher(Arc::new(InMemoryBus::new()))
///     .build()
///     .unwrap();
///
/// grid.set_filter("kayak").await;
/// assert_eq!(grid.state(), ViewState::Loaded);
/// # });
/// ```
pub struct ViewController {
    config: GridConfig,
    subscription: QuerySubscription,
    committer: EditBatchCommitter,
    loading: LoadingSignal,
    selection: SelectionPublisher,
    toasts: Arc<dyn ToastSink>,
    session: Mutex<Session>,
}

impl ViewController {
    pub fn builder(config: GridConfig) -> ViewControllerBuilder {
        ViewControllerBuilder::new(config)
    }

    pub(crate) fn assemble(
        config: GridConfig,
        query: Arc<dyn RecordQueryService>,
        update: Arc<dyn RecordUpdateService>,
        publisher: Arc<dyn Publisher>,
        context: MessageContext,
        toasts: Arc<dyn ToastSink>,
    ) -> Self {
        Self {
            config,
            subscription: QuerySubscription::new(query),
            committer: EditBatchCommitter::new(update),
            loading: LoadingSignal::new(),
            selection: SelectionPublisher::new(context, publisher),
            toasts,
            session: Mutex::new(Session::default()),
        }
    }

    // -- public operations --

    /// Bind a new filter and query for it.
    ///
    /// An earlier query still in flight is not cancelled; whichever response
    /// settles last is what the grid shows.
    pub async fn set_filter(&self, filter: impl Into<FilterParameter>) {
        let filter = filter.into();
        info!(filter = %filter, "filter changed");

        self.loading.enter();
        let snapshot = self.subscription.set_parameter(filter).await;
        self.loading.exit();
        self.settle_query(&snapshot);
    }

    /// Re-run the bound query without rebinding. No-op before any filter is set.
    pub async fn refresh(&self) {
        if self.subscription.handle().is_none() {
            debug!("refresh ignored, no filter bound");
            return;
        }

        self.loading.enter();
        let snapshot = self.subscription.refresh().await;
        self.loading.exit();
        if let Some(snapshot) = snapshot {
            self.settle_query(&snapshot);
        }
    }

    /// Remember the selection and tell sibling components about it.
    pub fn handle_row_selected(&self, id: impl Into<RecordId>) {
        let id = id.into();
        self.session().selected = Some(id.clone());

        if let Err(error) = self.selection.publish_selection(&id) {
            warn!(record = %id, error = %error, "failed to publish selection");
        }
    }

    /// Replace the staged drafts with `batch` and commit it.
    pub async fn handle_save_requested(&self, batch: DraftBatch) -> CommitOutcome {
        self.session().drafts = batch;
        self.commit_staged().await
    }

    /// Commit whatever drafts are currently staged.
    pub async fn save(&self) -> CommitOutcome {
        self.commit_staged().await
    }

    /// Stage one inline edit, merging with an earlier edit of the same row.
    pub fn stage_edit(&self, edit: DraftEdit) {
        self.session().drafts.stage(edit);
    }

    /// Stage raw grid draft rows, checked against the configured columns.
    ///
    /// Nothing is staged when any row is invalid.
    pub fn stage_draft_values(&self, rows: &[Value]) -> Result<(), DraftError> {
        let batch = DraftBatch::from_draft_values(rows, &self.config.columns)?;
        let mut session = self.session();
        for edit in &batch {
            session.drafts.stage(edit.clone());
        }
        Ok(())
    }

    // -- observation --

    pub fn state(&self) -> ViewState {
        ViewState::derive(self.loading.is_loading(), &self.subscription.snapshot())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn filter(&self) -> Option<FilterParameter> {
        self.subscription.filter()
    }

    pub fn snapshot(&self) -> Arc<ResultSnapshot> {
        self.subscription.snapshot()
    }

    /// Receiver that keeps observing snapshots across refreshes and filter changes.
    pub fn subscribe_snapshots(&self) -> watch::Receiver<Arc<ResultSnapshot>> {
        self.subscription.subscribe()
    }

    /// Records of the latest snapshot; `None` unless it succeeded.
    pub fn records(&self) -> Option<Vec<Record>> {
        self.snapshot().records().map(<[Record]>::to_vec)
    }

    /// Error of the latest snapshot; `None` unless it failed.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.snapshot().error().cloned()
    }

    pub fn selected_record(&self) -> Option<RecordId> {
        self.session().selected.clone()
    }

    pub fn draft_batch(&self) -> DraftBatch {
        self.session().drafts.clone()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn on_loading<F>(&self, listener: F) -> String
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.loading.on_loading(listener)
    }

    pub fn on_done_loading<F>(&self, listener: F) -> String
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.loading.on_done_loading(listener)
    }

    pub fn remove_loading_listener(&self, id: &str) -> bool {
        self.loading.remove_listener(id)
    }

    // -- internals --

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle_query(&self, snapshot: &ResultSnapshot) {
        match snapshot {
            ResultSnapshot::Success(records) => {
                debug!(records = records.len(), "query settled");
            }
            ResultSnapshot::Failure(error) => {
                warn!(error = %error, "query failed");
                self.toasts.show(Toast::new(
                    ToastVariant::QueryError,
                    self.config.error_title.as_str(),
                    error.message.as_str(),
                ));
            }
            ResultSnapshot::Pending => {}
        }
    }

    /// Commit the staged drafts. Drafts are cleared once the commit settles,
    /// whatever the outcome; only full success shows the success toast and
    /// refreshes, and only that refresh raises the loading signal.
    async fn commit_staged(&self) -> CommitOutcome {
        let batch = self.session().drafts.clone();
        info!(edits = batch.len(), "committing draft batch");

        let outcome = self.committer.submit(&batch).await;
        self.session().drafts.clear();

        match &outcome {
            CommitOutcome::AllSucceeded => {
                let text = &self.config.success_toast;
                self.toasts.show(Toast::new(
                    ToastVariant::Success,
                    text.title.as_str(),
                    text.message.as_str(),
                ));
                self.refresh().await;
            }
            CommitOutcome::Failed(error) => {
                // Rows that were written stay written; nothing is compensated.
                warn!(error = %error, "draft batch commit failed");
                self.toasts.show(Toast::new(
                    ToastVariant::CommitError,
                    self.config.error_title.as_str(),
                    error.message.as_str(),
                ));
            }
        }
        outcome
    }
}
