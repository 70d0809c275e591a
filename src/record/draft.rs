use serde_json::Value;

use super::{Column, FieldValue, Fields, RecordId};
use crate::error::DraftError;

/// Key the grid uses for the row id inside a raw draft row.
pub const DRAFT_ID_KEY: &str = "Id";

/// An uncommitted change to one row: only the fields that were edited.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftEdit {
    pub id: RecordId,
    pub fields: Fields,
}

impl DraftEdit {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: Fields::new(),
        }
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

/// Ordered collection of draft edits awaiting one save.
///
/// Insertion order is edit order. Staging a second edit for a row already in
/// the batch merges into the existing entry instead of appending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftBatch {
    edits: Vec<DraftEdit>,
}

impl DraftBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, edit: DraftEdit) {
        match self.edits.iter_mut().find(|e| e.id == edit.id) {
            Some(existing) => existing.fields.extend(edit.fields),
            None => self.edits.push(edit),
        }
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DraftEdit> {
        self.edits.iter()
    }

    pub fn clear(&mut self) {
        self.edits.clear();
    }

    /// Parse the grid's raw draft rows (`{"Id": "...", "<field>": value}`).
    ///
    /// Every field must name an editable column and match its type.
    pub fn from_draft_values(rows: &[Value], columns: &[Column]) -> Result<Self, DraftError> {
        let mut batch = DraftBatch::new();
        for (index, row) in rows.iter().enumerate() {
            let object = row
                .as_object()
                .ok_or_else(|| DraftError::NotAnObject(row.to_string()))?;
            let id = object
                .get(DRAFT_ID_KEY)
                .and_then(Value::as_str)
                .ok_or(DraftError::MissingId(index))?;

            let mut edit = DraftEdit::new(id);
            for (name, raw) in object.iter().filter(|(name, _)| *name != DRAFT_ID_KEY) {
                let column = columns
                    .iter()
                    .find(|c| &c.field_name == name)
                    .ok_or_else(|| DraftError::UnknownColumn(name.clone()))?;
                if !column.editable {
                    return Err(DraftError::ReadOnlyColumn(name.clone()));
                }
                edit.fields.insert(name.clone(), column.coerce(raw)?);
            }
            batch.stage(edit);
        }
        Ok(batch)
    }
}

impl FromIterator<DraftEdit> for DraftBatch {
    fn from_iter<T: IntoIterator<Item = DraftEdit>>(iter: T) -> Self {
        let mut batch = DraftBatch::new();
        for edit in iter {
            batch.stage(edit);
        }
        batch
    }
}

impl<'a> IntoIterator for &'a DraftBatch {
    type Item = &'a DraftEdit;
    type IntoIter = std::slice::Iter<'a, DraftEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}
