//! Parameterized record query: filter binding, snapshots and the remote
//! query service seam.

mod service;
mod snapshot;
mod subscription;

pub use service::{QueryHandle, RecordQueryService};
pub use snapshot::{FilterParameter, ResultSnapshot};
pub use subscription::QuerySubscription;
