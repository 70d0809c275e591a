//! Reactive record grid controller.
//!
//! Keeps a list of records in sync with a mutable filter, raises loading
//! signals around every asynchronous step, commits inline multi-row edits as
//! one concurrent batch, and tells sibling components which row is selected
//! through a publish/subscribe bus. Rendering, the remote record service and
//! the bus transport are supplied by the host.

pub mod bus;
pub mod commit;
pub mod config;
pub mod controller;
mod error;
pub mod loading;
pub mod query;
pub mod record;
pub mod store;
pub mod toast;

pub use bus::{InMemoryBus, MessageContext, PublishError, SelectionMessage};
pub use commit::{CommitOutcome, EditBatchCommitter, RecordUpdateService};
pub use config::GridConfig;
pub use controller::{ViewController, ViewState};
pub use error::{ConfigError, DraftError, ErrorInfo};
pub use loading::LoadingSignal;
pub use query::{FilterParameter, QuerySubscription, RecordQueryService, ResultSnapshot};
pub use record::{DraftBatch, DraftEdit, FieldValue, Record, RecordId};
pub use store::InMemoryRecordStore;
pub use toast::{RecordingToasts, Toast, ToastSink, ToastVariant};
