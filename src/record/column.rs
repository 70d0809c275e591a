use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FieldValue;
use crate::error::DraftError;

/// Display/edit type of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Boolean,
}

impl ColumnType {
    fn name(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Currency => "currency",
            ColumnType::Boolean => "boolean",
        }
    }
}

/// A grid column bound to one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    pub field_name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub editable: bool,
}

impl Column {
    pub fn new(label: impl Into<String>, field_name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            label: label.into(),
            field_name: field_name.into(),
            column_type,
            editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Convert a raw cell value into a typed field value for this column.
    ///
    /// `null` is accepted by every column and clears the field.
    pub fn coerce(&self, raw: &Value) -> Result<FieldValue, DraftError> {
        let mismatch = || DraftError::TypeMismatch {
            column: self.field_name.clone(),
            expected: self.column_type.name(),
            actual: raw.to_string(),
        };

        match (self.column_type, raw) {
            (_, Value::Null) => Ok(FieldValue::Null),
            (ColumnType::Text, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
            (ColumnType::Number, Value::Number(n)) => {
                n.as_f64().map(FieldValue::Number).ok_or_else(mismatch)
            }
            (ColumnType::Currency, Value::Number(n)) => {
                n.as_f64().map(FieldValue::Currency).ok_or_else(mismatch)
            }
            (ColumnType::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
            _ => Err(mismatch()),
        }
    }
}
