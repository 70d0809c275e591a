//! Batched commit of inline draft edits.

mod committer;

pub use committer::{CommitOutcome, EditBatchCommitter, RecordUpdateService};
