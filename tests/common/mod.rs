// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fun_things::config::Config;
use fun_things::db::{ActivityStore, FirestoreDb, InMemoryStore};
use fun_things::error::Result;
use fun_things::models::{GeoPoint, ThingToDo};
use fun_things::services::RecommendationService;
use mockall::mock;
use std::sync::Arc;

/// Mean earth radius used by the haversine distance, in meters.
#[allow(dead_code)]
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl ActivityStore for Store {
        async fn list_activities_with_location(&self) -> Result<Vec<ThingToDo>>;
        async fn list_all_activities(&self) -> Result<Vec<ThingToDo>>;
        async fn count(&self) -> Result<u64>;
        async fn get_by_id(&self, id: &str) -> Result<Option<ThingToDo>>;
        async fn upsert_activity(&self, activity: &ThingToDo) -> Result<()>;
        fn name(&self) -> &'static str;
    }
}

/// A mock store that only answers `name()`; tests add the rest.
#[allow(dead_code)]
pub fn mock_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_name().return_const("mock");
    store
}

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// The query point most tests measure from.
#[allow(dead_code)]
pub fn origin() -> GeoPoint {
    GeoPoint::new(0.0, 0.0).unwrap()
}

/// Farthest a point can sit due north of the origin (the north pole).
#[allow(dead_code)]
pub const MAX_NORTH_METERS: f64 = EARTH_RADIUS_METERS * std::f64::consts::FRAC_PI_2;

/// A point `meters` due north of the equator on the prime meridian.
///
/// Only reaches the pole (~10,007 km); build farther points directly.
#[allow(dead_code)]
pub fn north_of_origin(meters: f64) -> GeoPoint {
    assert!(
        (0.0..=MAX_NORTH_METERS).contains(&meters),
        "{meters} m is past the pole; use GeoPoint::new for farther points"
    );
    let degrees = (meters / EARTH_RADIUS_METERS).to_degrees();
    GeoPoint::new(degrees, 0.0).unwrap()
}

/// A located activity `meters` north of the origin.
#[allow(dead_code)]
pub fn activity_at(id: &str, meters: f64) -> ThingToDo {
    ThingToDo::new(id, format!("Activity {id}"), Some(north_of_origin(meters)))
}

/// An activity without coordinates.
#[allow(dead_code)]
pub fn unlocated(id: &str) -> ThingToDo {
    ThingToDo::new(id, format!("Activity {id}"), None)
}

/// Recommendation service over an in-memory store with a fixed seed.
#[allow(dead_code)]
pub fn service_with(activities: Vec<ThingToDo>) -> RecommendationService {
    let store: Arc<dyn ActivityStore> = Arc::new(InMemoryStore::with_activities(activities));
    RecommendationService::new(store, &Config::test_default()).unwrap()
}

/// Recommendation service over any store.
#[allow(dead_code)]
pub fn service_over(store: impl ActivityStore + 'static) -> RecommendationService {
    RecommendationService::new(Arc::new(store), &Config::test_default()).unwrap()
}
