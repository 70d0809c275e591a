use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use crate::commit::RecordUpdateService;
use crate::error::ErrorInfo;
use crate::query::{FilterParameter, QueryHandle, RecordQueryService};
use crate::record::{Fields, Record, RecordId};

type Validator = Box<dyn Fn(&RecordId, &Fields) -> Result<(), ErrorInfo> + Send + Sync>;

fn poisoned(operation: &str) -> ErrorInfo {
    ErrorInfo::with_status(format!("record store lock poisoned during {}", operation), 500)
}

/// Record service backed by an in-process map.
///
/// Queries return every record whose scope field equals the filter; an empty
/// filter returns everything. Updates merge partial fields into the stored
/// record. Call counters let callers observe how the store was used.
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<RecordId, Record>>,
    scope_field: String,
    query_failure: Mutex<Option<ErrorInfo>>,
    validator: Option<Validator>,
    queries: AtomicUsize,
    requeries: AtomicUsize,
    updates: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new(scope_field: impl Into<String>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            scope_field: scope_field.into(),
            query_failure: Mutex::new(None),
            validator: None,
            queries: AtomicUsize::new(0),
            requeries: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn with_records(self, records: impl IntoIterator<Item = Record>) -> Self {
        for record in records {
            self.insert(record);
        }
        self
    }

    /// Reject updates the validator returns an error for.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&RecordId, &Fields) -> Result<(), ErrorInfo> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn insert(&self, record: Record) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Make every query fail with `error` until cleared with `None`.
    pub fn fail_queries_with(&self, error: Option<ErrorInfo>) {
        *self
            .query_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = error;
    }

    pub fn query_calls(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn requery_calls(&self) -> usize {
        self.requeries.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn select(&self, filter: &FilterParameter) -> Result<Vec<Record>, ErrorInfo> {
        if let Some(error) = self
            .query_failure
            .lock()
            .map_err(|_| poisoned("query"))?
            .clone()
        {
            return Err(error);
        }

        let records = self.records.read().map_err(|_| poisoned("query"))?;
        Ok(records
            .values()
            .filter(|record| {
                filter.is_empty()
                    || record
                        .get(&self.scope_field)
                        .and_then(|v| v.as_text())
                        .is_some_and(|scope| scope == filter.as_str())
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecordQueryService for InMemoryRecordStore {
    async fn query(&self, filter: &FilterParameter) -> Result<Vec<Record>, ErrorInfo> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.select(filter)
    }

    async fn requery(&self, handle: &QueryHandle) -> Result<Vec<Record>, ErrorInfo> {
        self.requeries.fetch_add(1, Ordering::SeqCst);
        self.select(handle.filter())
    }
}

#[async_trait]
impl RecordUpdateService for InMemoryRecordStore {
    async fn update(&self, id: &RecordId, fields: &Fields) -> Result<(), ErrorInfo> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if let Some(validator) = &self.validator {
            validator(id, fields)?;
        }

        let mut records = self.records.write().map_err(|_| poisoned("update"))?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| ErrorInfo::with_status(format!("record {} not found", id), 404))?;
        record.apply(fields);
        Ok(())
    }
}
