//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::record::{Column, ColumnType};

/// Title and message of a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastText {
    pub title: String,
    pub message: String,
}

/// Settings for one grid instance. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Bus channel selection messages go to.
    pub channel: String,
    /// Origin tag attached to published messages.
    pub origin: Option<String>,
    pub columns: Vec<Column>,
    pub success_toast: ToastText,
    pub error_title: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            channel: "RecordMessageChannel".to_string(),
            origin: None,
            columns: vec![
                Column::new("Name", "Name", ColumnType::Text).editable(),
                Column::new("Length", "Length__c", ColumnType::Number).editable(),
                Column::new("Price", "Price__c", ColumnType::Currency).editable(),
                Column::new("Description", "Description__c", ColumnType::Text).editable(),
            ],
            success_toast: ToastText {
                title: "Success".to_string(),
                message: "Ship It!".to_string(),
            },
            error_title: "Error".to_string(),
        }
    }
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn column(&self, field_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field_name == field_name)
    }
}
