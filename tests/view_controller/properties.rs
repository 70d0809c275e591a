//! Property tests over arbitrary filter sequences and draft batches.

use std::future::Future;

use proptest::prelude::*;
use record_grid::record::{DraftBatch, DraftEdit, FieldValue};
use record_grid::{CommitOutcome, ErrorInfo, InMemoryRecordStore, ViewState};

use crate::support::{boat, reject_negative_prices, Harness};

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}

fn filter_strategy() -> impl Strategy<Value = (String, bool)> {
    (prop::sample::select(vec!["kayak", "yacht", "", "canoe"]), any::<bool>())
        .prop_map(|(filter, fails)| (filter.to_string(), fails))
}

/// Store with rows "0".."n", all of type "kayak".
fn numbered_store(n: usize) -> InMemoryRecordStore {
    InMemoryRecordStore::new("BoatTypeId")
        .with_records((0..n).map(|i| boat(&i.to_string(), "kayak", "Boat", 10.0)))
        .with_validator(reject_negative_prices)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn loading_signals_balance_after_every_filter_change(
        filters in prop::collection::vec(filter_strategy(), 1..8)
    ) {
        let h = Harness::new(numbered_store(3));
        block_on(async {
            for (filter, fails) in &filters {
                let error = fails.then(|| ErrorInfo::new("timeout"));
                h.store.fail_queries_with(error);
                h.grid.set_filter(filter.as_str()).await;

                assert_eq!(h.entered(), h.exited());
                assert!(!h.grid.is_loading());
                let expected = if *fails { ViewState::Error } else { ViewState::Loaded };
                assert_eq!(h.grid.state(), expected);
            }
        });
        prop_assert_eq!(h.store.query_calls(), filters.len());
    }

    #[test]
    fn commit_issues_one_update_per_edit(
        prices in prop::collection::vec(-50.0f64..500.0, 0..12)
    ) {
        let h = Harness::new(numbered_store(prices.len()));
        let batch: DraftBatch = prices
            .iter()
            .enumerate()
            .map(|(i, p)| DraftEdit::new(i.to_string()).set("Price__c", FieldValue::Currency(*p)))
            .collect();

        let outcome = block_on(async {
            h.grid.set_filter("kayak").await;
            h.grid.handle_save_requested(batch).await
        });

        prop_assert_eq!(h.store.update_calls(), prices.len());
        let all_valid = prices.iter().all(|p| *p >= 0.0);
        prop_assert_eq!(outcome.is_success(), all_valid);
        if !all_valid {
            prop_assert_eq!(
                outcome,
                CommitOutcome::Failed(ErrorInfo::with_status("invalid price", 400))
            );
        }
        prop_assert_eq!(h.store.requery_calls(), usize::from(all_valid));
    }

    #[test]
    fn save_always_settles_with_empty_drafts_and_no_loading(
        prices in prop::collection::vec(-10.0f64..10.0, 0..6),
        bound in any::<bool>(),
        refresh_fails in any::<bool>()
    ) {
        let h = Harness::new(numbered_store(prices.len()));
        block_on(async {
            if bound {
                h.grid.set_filter("kayak").await;
            }
            if refresh_fails {
                h.store.fail_queries_with(Some(ErrorInfo::new("timeout")));
            }
            for (i, p) in prices.iter().enumerate() {
                h.grid.stage_edit(DraftEdit::new(i.to_string()).set("Price__c", FieldValue::Currency(*p)));
            }
            h.grid.save().await;
        });

        prop_assert!(h.grid.draft_batch().is_empty());
        prop_assert!(!h.grid.is_loading());
        prop_assert_ne!(h.grid.state(), ViewState::Loading);
        prop_assert_eq!(h.entered(), h.exited());
    }
}
