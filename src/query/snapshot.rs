use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorInfo;
use crate::record::Record;

/// Scoping value for the record query. May be empty, meaning "unscoped".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterParameter(String);

impl FilterParameter {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FilterParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FilterParameter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FilterParameter {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Complete outcome of one fetch. Replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultSnapshot {
    #[default]
    Pending,
    Success(Vec<Record>),
    Failure(ErrorInfo),
}

impl ResultSnapshot {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResultSnapshot::Pending)
    }

    pub fn records(&self) -> Option<&[Record]> {
        match self {
            ResultSnapshot::Success(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            ResultSnapshot::Failure(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<Vec<Record>, ErrorInfo>> for ResultSnapshot {
    fn from(result: Result<Vec<Record>, ErrorInfo>) -> Self {
        match result {
            Ok(records) => ResultSnapshot::Success(records),
            Err(error) => ResultSnapshot::Failure(error),
        }
    }
}
