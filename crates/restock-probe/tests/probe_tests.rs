// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the availability prober against a scripted fetcher.

use std::sync::Arc;

use restock_config::model::{ProbeConfig, ProductConfig};
use restock_core::AvailabilityTransition;
use restock_probe::Prober;
use restock_state::StateStore;
use restock_test_utils::MockFetcher;
use tempfile::TempDir;

const TARGET: &str = "GeForce RTX 5090";

fn available_page() -> String {
    format!(
        r#"<div class="item-container"><a class="item-title">MSI {TARGET} 32GB</a>
           <div class="item-operate"><button>Add to cart</button></div></div>"#
    )
}

fn sold_out_page() -> String {
    format!(
        r#"<div class="item-container"><a class="item-title">MSI {TARGET} 32GB</a>
           <div class="item-operate"><button>OUT OF STOCK</button></div></div>"#
    )
}

fn prober(fetcher: Arc<MockFetcher>, dir: &TempDir) -> (Prober, StateStore) {
    let store = StateStore::new(dir.path().join("state.json"));
    let product = ProductConfig {
        name: TARGET.to_string(),
        url: "https://example.com/p/list".to_string(),
    };
    let probe = ProbeConfig {
        retry_delay_secs: 0, // keep tests fast
        ..Default::default()
    };
    (
        Prober::new(fetcher, store.clone(), product, &probe),
        store,
    )
}

#[tokio::test]
async fn fresh_availability_is_a_became_available_transition() {
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher.push_html(available_page()).await;
    let (prober, store) = prober(fetcher.clone(), &dir);

    let (available, transition) = prober.probe().await;
    assert!(available);
    assert_eq!(transition, AvailabilityTransition::BecameAvailable);
    assert!(store.load().available);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn repeat_availability_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher.push_html(available_page()).await;
    fetcher.push_html(available_page()).await;
    let (prober, _store) = prober(fetcher.clone(), &dir);

    let (_, first) = prober.probe().await;
    let (_, second) = prober.probe().await;
    assert_eq!(first, AvailabilityTransition::BecameAvailable);
    assert_eq!(second, AvailabilityTransition::StillAvailable);
}

#[tokio::test]
async fn transient_failures_are_retried_up_to_budget() {
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher.push_timeout().await;
    fetcher.push_transport_error("connection reset").await;
    fetcher.push_html(available_page()).await;
    let (prober, _store) = prober(fetcher.clone(), &dir);

    let (available, transition) = prober.probe().await;
    assert!(available);
    assert_eq!(transition, AvailabilityTransition::BecameAvailable);
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test]
async fn exhausted_timeouts_flip_a_stale_available_flag() {
    // The page was available last run, now it times out on every
    // attempt. The probe must record `false` so a later restock re-arms the
    // alert instead of being suppressed by the stale flag.
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher.push_html(available_page()).await;
    for _ in 0..3 {
        fetcher.push_timeout().await;
    }
    let (prober, store) = prober(fetcher.clone(), &dir);

    let (_, first) = prober.probe().await;
    assert_eq!(first, AvailabilityTransition::BecameAvailable);

    let (available, second) = prober.probe().await;
    assert!(!available);
    assert_eq!(second, AvailabilityTransition::BecameUnavailable);
    assert!(!store.load().available);
    assert_eq!(fetcher.calls(), 4);
}

#[tokio::test]
async fn successful_fetch_with_sold_out_listing_is_definitive() {
    // A successful fetch is never retried, even when the answer is negative.
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher.push_html(sold_out_page()).await;
    let (prober, _store) = prober(fetcher.clone(), &dir);

    let (available, transition) = prober.probe().await;
    assert!(!available);
    assert_eq!(transition, AvailabilityTransition::StillUnavailable);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn missing_product_is_a_negative_probe() {
    let dir = TempDir::new().unwrap();
    let fetcher = Arc::new(MockFetcher::new());
    fetcher
        .push_html(r#"<div class="item-container"><a class="item-title">Some other card</a></div>"#)
        .await;
    let (prober, store) = prober(fetcher, &dir);

    let (available, transition) = prober.probe().await;
    assert!(!available);
    assert_eq!(transition, AvailabilityTransition::StillUnavailable);
    assert!(!store.load().available);
}
