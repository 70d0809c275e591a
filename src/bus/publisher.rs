//! Bus messages and the publisher seam.

use thiserror::Error;

/// A message published on a named bus channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Unique identifier for this message
    pub id: String,
    /// Channel the message is published on
    pub channel: String,
    /// Message type (e.g., "RecordSelected")
    pub event_type: String,
    /// Serialized payload (bitcode)
    pub payload: Vec<u8>,
    /// Optional metadata (origin component, correlation IDs, etc.)
    pub metadata: Option<Vec<(String, String)>>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        channel: impl Into<String>,
        event_type: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            channel: channel.into(),
            event_type: event_type.into(),
            payload,
            metadata: None,
        }
    }

    /// Create a message with a bitcode-serialized payload.
    pub fn encode<T: serde::Serialize>(
        id: impl Into<String>,
        channel: impl Into<String>,
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, PublishError> {
        let bytes = bitcode::serialize(payload)
            .map_err(|e| PublishError::SerializationFailed(e.to_string()))?;
        Ok(Self::new(id, channel, event_type, bytes))
    }

    /// Decode the payload from bitcode binary format.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, bitcode::Error> {
        bitcode::deserialize(&self.payload)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Error type for bus operations.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
    #[error("message rejected: {0}")]
    Rejected(String),
    #[error("bus lock poisoned")]
    Poisoned,
}

/// Transport that delivers messages to other components.
///
/// The transport itself is supplied by the host; this crate only ships an
/// in-process implementation.
pub trait Publisher: Send + Sync {
    fn publish(&self, event: Event) -> Result<(), PublishError>;
}
