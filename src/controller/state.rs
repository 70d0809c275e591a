use serde::{Deserialize, Serialize};

use crate::query::ResultSnapshot;

/// Observable state of the grid controller.
///
/// There is no terminal state: the controller can re-enter `Loading` for as
/// long as it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No filter bound and no data yet.
    Idle,
    /// A query, refresh or commit sequence is in flight.
    Loading,
    Loaded,
    Error,
}

impl ViewState {
    pub(crate) fn derive(loading: bool, snapshot: &ResultSnapshot) -> Self {
        if loading {
            return ViewState::Loading;
        }
        match snapshot {
            ResultSnapshot::Pending => ViewState::Idle,
            ResultSnapshot::Success(_) => ViewState::Loaded,
            ResultSnapshot::Failure(_) => ViewState::Error,
        }
    }
}
