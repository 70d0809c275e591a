//! Records, grid columns and draft edits.

mod column;
mod draft;
mod record;

pub use column::{Column, ColumnType};
pub use draft::{DraftBatch, DraftEdit, DRAFT_ID_KEY};
pub use record::{FieldValue, Fields, Record, RecordId};
