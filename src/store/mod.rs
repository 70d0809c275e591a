//! In-process record service implementing both the query and update seams.

mod in_memory;

pub use in_memory::InMemoryRecordStore;
