//! Test fixtures: a boat catalogue, scripted services and a wired-up grid.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use record_grid::bus::InMemoryBus;
use record_grid::query::{FilterParameter, RecordQueryService};
use record_grid::record::{FieldValue, Fields, Record};
use record_grid::toast::RecordingToasts;
use record_grid::{ErrorInfo, GridConfig, InMemoryRecordStore, ViewController};

pub const CHANNEL: &str = "BoatMessageChannel__c";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn boat(id: &str, boat_type: &str, name: &str, price: f64) -> Record {
    Record::new(id)
        .with("BoatTypeId", boat_type)
        .with("Name", name)
        .with("Price__c", FieldValue::Currency(price))
}

/// Three kayaks and one yacht. Negative prices are rejected with "invalid price".
pub fn boat_store() -> InMemoryRecordStore {
    InMemoryRecordStore::new("BoatTypeId")
        .with_records([
            boat("1", "kayak", "Sea Hawk", 900.0),
            boat("2", "kayak", "Minnow", 450.0),
            boat("3", "kayak", "Paddler", 300.0),
            boat("4", "yacht", "Calypso", 250_000.0),
        ])
        .with_validator(reject_negative_prices)
}

pub fn reject_negative_prices(_: &record_grid::RecordId, fields: &Fields) -> Result<(), ErrorInfo> {
    match fields.get("Price__c").and_then(FieldValue::as_f64) {
        Some(price) if price < 0.0 => Err(ErrorInfo::with_status("invalid price", 400)),
        _ => Ok(()),
    }
}

/// A grid wired to in-memory collaborators, with loading events counted.
pub struct Harness {
    pub grid: ViewController,
    pub store: Arc<InMemoryRecordStore>,
    pub bus: InMemoryBus,
    pub toasts: RecordingToasts,
    pub entered: Arc<AtomicUsize>,
    pub exited: Arc<AtomicUsize>,
}

impl Harness {
    pub fn new(store: InMemoryRecordStore) -> Self {
        let store = Arc::new(store);
        Self::with_query_service(store.clone(), store)
    }

    /// Use `queries` for reads and `store` for writes.
    pub fn with_query_service(
        queries: Arc<dyn RecordQueryService>,
        store: Arc<InMemoryRecordStore>,
    ) -> Self {
        init_tracing();
        let bus = InMemoryBus::new();
        let toasts = RecordingToasts::new();
        let grid = ViewController::builder(GridConfig::default().with_channel(CHANNEL))
            .query_service(queries)
            .update_service(store.clone())
            .publisher(Arc::new(bus.clone()))
            .toasts(Arc::new(toasts.clone()))
            .build()
            .expect("all collaborators supplied");

        let entered = Arc::new(AtomicUsize::new(0));
        let exited = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&entered);
        grid.on_loading(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&exited);
        grid.on_done_loading(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Self {
            grid,
            store,
            bus,
            toasts,
            entered,
            exited,
        }
    }

    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn exited(&self) -> usize {
        self.exited.load(Ordering::SeqCst)
    }

    pub fn price_of(&self, id: &str) -> Option<f64> {
        self.store
            .get(&id.into())
            .and_then(|r| r.get("Price__c").and_then(FieldValue::as_f64))
    }
}

/// Query service whose latency and outcome are scripted per filter.
///
/// Every response carries one record named after the filter, so tests can
/// tell which query produced the visible snapshot.
#[derive(Default)]
pub struct ScriptedQueries {
    latency_ms: HashMap<String, u64>,
    failures: HashMap<String, ErrorInfo>,
    pub calls: AtomicUsize,
}

impl ScriptedQueries {
    pub fn latency(mut self, filter: &str, ms: u64) -> Self {
        self.latency_ms.insert(filter.to_string(), ms);
        self
    }

    pub fn failing(mut self, filter: &str, message: &str) -> Self {
        self.failures.insert(filter.to_string(), ErrorInfo::new(message));
        self
    }
}

#[async_trait]
impl RecordQueryService for ScriptedQueries {
    async fn query(&self, filter: &FilterParameter) -> Result<Vec<Record>, ErrorInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.latency_ms.get(filter.as_str()).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        match self.failures.get(filter.as_str()) {
            Some(error) => Err(error.clone()),
            None => Ok(vec![Record::new(format!("from-{}", filter))]),
        }
    }
}

pub fn record_ids(grid: &ViewController) -> Vec<String> {
    grid.records()
        .unwrap_or_default()
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}
