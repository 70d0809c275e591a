//! Selection-changed messages for sibling components.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Event, PublishError, Publisher};
use crate::record::RecordId;

/// Message type of a selection change.
pub const RECORD_SELECTED: &str = "RecordSelected";

/// Channel and origin under which this component publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub channel: String,
    pub origin: Option<String>,
}

impl MessageContext {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Payload published when a row is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMessage {
    pub selected_id: RecordId,
}

/// Publishes [`SelectionMessage`]s on the context's channel.
pub struct SelectionPublisher {
    context: MessageContext,
    publisher: Arc<dyn Publisher>,
    seq: AtomicU64,
}

impl SelectionPublisher {
    pub fn new(context: MessageContext, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            context,
            publisher,
            seq: AtomicU64::new(1),
        }
    }

    pub fn context(&self) -> &MessageContext {
        &self.context
    }

    pub fn publish_selection(&self, selected_id: &RecordId) -> Result<(), PublishError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let message = SelectionMessage {
            selected_id: selected_id.clone(),
        };
        let mut event = Event::encode(
            format!("selection-{}", seq),
            self.context.channel.as_str(),
            RECORD_SELECTED,
            &message,
        )?;
        if let Some(origin) = &self.context.origin {
            event = event.with_metadata("origin", origin.as_str());
        }
        self.publisher.publish(event)
    }
}
