// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NPS ingestion tests against a captured `thingstodo` page.

use fun_things::db::{ActivityStore, InMemoryStore};
use fun_things::error::AppError;
use fun_things::models::NpsPage;
use fun_things::services::ingest::ingest_records;
use fun_things::services::IngestReport;

mod common;
use common::{mock_store, service_over};

fn fixture_page() -> NpsPage {
    let raw = include_str!("fixtures/nps_thingstodo_page.json");
    serde_json::from_str(raw).expect("fixture parses")
}

#[test]
fn test_fixture_page_total() {
    let page = fixture_page();
    assert_eq!(page.total_records(), Some(5));
    assert_eq!(page.data.len(), 5);
}

#[tokio::test]
async fn test_ingest_counts_and_stores() {
    let store = InMemoryStore::new();
    let report = ingest_records(&store, fixture_page().data).await.unwrap();

    assert_eq!(
        report,
        IngestReport {
            received: 5,
            stored: 4,
            skipped_missing_id: 1,
            without_location: 2,
        }
    );

    assert_eq!(store.count().await.unwrap(), 4);
    assert_eq!(store.list_all_activities().await.unwrap().len(), 4);

    let located = store.list_activities_with_location().await.unwrap();
    let ids: Vec<&str> = located.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "8F2A1C34-0B6E-4F3A-9E2D-1A2B3C4D5E6F",
            "B7C6D5E4-1111-2222-3333-444455556666",
        ]
    );
}

#[tokio::test]
async fn test_ingested_fields_are_cleaned() {
    let store = InMemoryStore::new();
    ingest_records(&store, fixture_page().data).await.unwrap();

    let mist = store
        .get_by_id("8F2A1C34-0B6E-4F3A-9E2D-1A2B3C4D5E6F")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mist.description, "Climb granite steps beside Vernal Fall.");
    assert_eq!(mist.location_name.as_deref(), Some("Yosemite National Park"));
    assert!(!mist.pets_allowed);

    let stars = store
        .get_by_id("B7C6D5E4-1111-2222-3333-444455556666")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stars.description, "Dark skies");
    assert_eq!(stars.location_name.as_deref(), Some("Glacier Point Road"));
    assert!(stars.pets_allowed);

    let campfire = store
        .get_by_id("C0FFEE00-AAAA-BBBB-CCCC-DDDDEEEEFFFF")
        .await
        .unwrap()
        .unwrap();
    assert!(campfire.location.is_none());
}

#[tokio::test]
async fn test_reingest_is_idempotent() {
    let store = InMemoryStore::new();
    ingest_records(&store, fixture_page().data).await.unwrap();
    ingest_records(&store, fixture_page().data).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_store_failure_fails_ingest() {
    let mut store = mock_store();
    store
        .expect_upsert_activity()
        .returning(|_| Err(AppError::StoreUnavailable("write rejected".to_string())));

    let err = ingest_records(&store, fixture_page().data).await.unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_ingested_store_feeds_recommender() {
    let store = InMemoryStore::new();
    ingest_records(&store, fixture_page().data).await.unwrap();
    let service = service_over(store);

    // Near Yosemite Valley: only the two located activities are eligible.
    let chosen = service
        .recommend_by_distance(37.74, -119.57)
        .await
        .unwrap()
        .unwrap();
    assert!(chosen.has_location());
}
