//! Loading notifications for external spinner coordination.

mod signal;

pub use signal::{LoadingSignal, DONE_LOADING_EVENT, LOADING_EVENT};
