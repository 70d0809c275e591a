//! Subscriber seam for components listening on a bus channel.

use super::publisher::{Event, PublishError};

/// Pull-based consumer of one bus channel.
pub trait Subscriber: Send + Sync {
    /// Next unread message on the channel, if any. Never blocks.
    fn poll(&self) -> Result<Option<Event>, PublishError>;

    /// Channel this subscriber reads.
    fn channel(&self) -> &str;
}
