//! Overlapping operations on one grid. Nothing is cancelled, so the response
//! that settles last wins, even when it belongs to an older filter.

use std::sync::Arc;
use std::time::Duration;

use record_grid::ViewState;
use tokio::time::sleep;

use crate::support::{boat_store, record_ids, Harness, ScriptedQueries};

fn scripted(queries: ScriptedQueries) -> (Harness, Arc<ScriptedQueries>) {
    let queries = Arc::new(queries);
    let harness = Harness::with_query_service(queries.clone(), Arc::new(boat_store()));
    (harness, queries)
}

#[tokio::test(start_paused = true)]
async fn superseded_query_settling_last_overwrites_snapshot() {
    let (h, queries) = scripted(ScriptedQueries::default().latency("slow", 50).latency("fast", 5));

    tokio::join!(h.grid.set_filter("slow"), async {
        sleep(Duration::from_millis(1)).await;
        h.grid.set_filter("fast").await;
    });

    assert_eq!(queries.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    // The bound filter is the last one issued, the data is the last one to arrive.
    assert_eq!(h.grid.filter().unwrap().as_str(), "fast");
    assert_eq!(record_ids(&h.grid), vec!["from-slow"]);
    assert_eq!(h.grid.state(), ViewState::Loaded);
    assert_eq!((h.entered(), h.exited()), (2, 2));
}

#[tokio::test(start_paused = true)]
async fn stays_loading_until_every_query_settles() {
    let (h, _) = scripted(ScriptedQueries::default().latency("slow", 50).latency("fast", 5));

    tokio::join!(h.grid.set_filter("slow"), h.grid.set_filter("fast"), async {
        sleep(Duration::from_millis(20)).await;
        // "fast" has settled and is visible; "slow" is still in flight.
        assert_eq!(record_ids(&h.grid), vec!["from-fast"]);
        assert_eq!(h.grid.state(), ViewState::Loading);
        assert_eq!((h.entered(), h.exited()), (2, 1));
    });

    assert!(!h.grid.is_loading());
    assert_eq!(record_ids(&h.grid), vec!["from-slow"]);
}

#[tokio::test(start_paused = true)]
async fn readers_see_previous_snapshot_while_query_in_flight() {
    let (h, _) = scripted(
        ScriptedQueries::default()
            .latency("kayak", 0)
            .latency("yacht", 30)
            .failing("yacht", "timeout"),
    );
    h.grid.set_filter("kayak").await;

    tokio::join!(h.grid.set_filter("yacht"), async {
        sleep(Duration::from_millis(10)).await;
        assert_eq!(h.grid.state(), ViewState::Loading);
        assert_eq!(record_ids(&h.grid), vec!["from-kayak"]);
        assert!(h.grid.error().is_none());
    });

    assert_eq!(h.grid.state(), ViewState::Error);
    assert_eq!(h.grid.error().unwrap().message, "timeout");
}

#[tokio::test(start_paused = true)]
async fn selection_during_query_does_not_change_state() {
    let (h, _) = scripted(ScriptedQueries::default().latency("kayak", 30));

    tokio::join!(h.grid.set_filter("kayak"), async {
        sleep(Duration::from_millis(5)).await;
        h.grid.handle_row_selected("from-kayak");
        assert_eq!(h.grid.state(), ViewState::Loading);
    });

    assert_eq!(h.bus.len(), 1);
    assert_eq!(h.grid.state(), ViewState::Loaded);
}
