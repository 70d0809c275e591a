//! Toast notifications raised by the controller. Rendering is the host's job.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Categorical outcome a toast reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Success,
    CommitError,
    QueryError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn new(variant: ToastVariant, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variant,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receiver of toast notifications.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: Toast);
}

/// Sink that keeps every toast, for tests and headless hosts.
#[derive(Clone, Default)]
pub struct RecordingToasts {
    shown: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingToasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Toast> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, variant: ToastVariant) -> usize {
        self.shown().iter().filter(|t| t.variant == variant).count()
    }
}

impl ToastSink for RecordingToasts {
    fn show(&self, toast: Toast) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

/// Sink that writes toasts to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingToasts;

impl ToastSink for TracingToasts {
    fn show(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Success => info!(title = %toast.title, "{}", toast.message),
            ToastVariant::CommitError | ToastVariant::QueryError => {
                error!(title = %toast.title, variant = ?toast.variant, "{}", toast.message)
            }
        }
    }
}
