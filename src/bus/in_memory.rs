//! In-process bus for tests and single-process hosts.

use std::sync::{Arc, Mutex, RwLock};

use super::{Event, PublishError, Publisher, Subscriber};

/// In-memory bus holding an append-only message log.
///
/// Clones share the log. Each [`ChannelSubscriber`] keeps its own read
/// position and only sees messages on its channel.
///
/// ## Example
///
/// ```
/// use record_grid::bus::{Event, InMemoryBus, Publisher, Subscriber};
///
/// let bus = InMemoryBus::new();
/// let detail_panel = bus.subscribe("RecordMessageChannel");
///
/// bus.publish(Event::new("m-1", "RecordMessageChannel", "RecordSelected", vec![])).unwrap();
/// bus.publish(Event::new("m-2", "OtherChannel", "Noise", vec![])).unwrap();
///
/// assert_eq!(detail_panel.poll().unwrap().unwrap().id, "m-1");
/// assert!(detail_panel.poll().unwrap().is_none());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBus {
    log: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subscriber for `channel` starting at the beginning of the log.
    pub fn subscribe(&self, channel: impl Into<String>) -> ChannelSubscriber {
        ChannelSubscriber {
            log: Arc::clone(&self.log),
            channel: channel.into(),
            position: Mutex::new(0),
        }
    }

    /// All messages published so far, in order.
    pub fn events(&self) -> Vec<Event> {
        self.log.read().map(|log| log.clone()).unwrap_or_default()
    }

    /// Messages published on one channel, in order.
    pub fn events_on(&self, channel: &str) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.channel == channel)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.log.read().map(|log| log.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Publisher for InMemoryBus {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        self.log
            .write()
            .map_err(|_| PublishError::Poisoned)?
            .push(event);
        Ok(())
    }
}

/// Reads one channel of an [`InMemoryBus`].
pub struct ChannelSubscriber {
    log: Arc<RwLock<Vec<Event>>>,
    channel: String,
    position: Mutex<usize>,
}

impl Subscriber for ChannelSubscriber {
    fn poll(&self) -> Result<Option<Event>, PublishError> {
        let log = self.log.read().map_err(|_| PublishError::Poisoned)?;
        let mut position = self.position.lock().map_err(|_| PublishError::Poisoned)?;

        while *position < log.len() {
            let event = &log[*position];
            *position += 1;
            if event.channel == self.channel {
                return Ok(Some(event.clone()));
            }
        }
        Ok(None)
    }

    fn channel(&self) -> &str {
        &self.channel
    }
}
