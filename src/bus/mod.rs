//! Notification bus adapter.
//!
//! The grid tells sibling components which record is selected by publishing
//! on a shared channel. The transport is pluggable through [`Publisher`];
//! the channel comes from a [`MessageContext`] handed in at construction.
//!
//! ```text
//! ViewController ──select_row──▶ SelectionPublisher ──Event──▶ Publisher
//!                                                              │
//!                                   sibling ◀──poll── Subscriber
//! ```

mod in_memory;
mod publisher;
mod selection;
mod subscriber;

pub use in_memory::{ChannelSubscriber, InMemoryBus};
pub use publisher::{Event, PublishError, Publisher};
pub use selection::{MessageContext, SelectionMessage, SelectionPublisher, RECORD_SELECTED};
pub use subscriber::Subscriber;
