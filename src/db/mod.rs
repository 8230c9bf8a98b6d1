// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity storage.
//!
//! Recommenders only read through [`ActivityStore`]; ingestion is the only
//! writer. Adapters must return listings in a stable order (by id) so a
//! seeded recommender is reproducible.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::models::ThingToDo;

/// Collection names as constants.
pub mod collections {
    pub const THINGS_TO_DO: &str = "things_to_do";
}

/// Storage backend for activities.
///
/// Every failure is reported as [`AppError::StoreUnavailable`]; callers
/// propagate it without retrying.
///
/// [`AppError::StoreUnavailable`]: crate::error::AppError::StoreUnavailable
#[async_trait::async_trait]
pub trait ActivityStore: Send + Sync {
    /// All activities that have a location, ordered by id.
    async fn list_activities_with_location(&self) -> Result<Vec<ThingToDo>>;

    /// Every activity, ordered by id.
    async fn list_all_activities(&self) -> Result<Vec<ThingToDo>>;

    /// Number of stored activities.
    async fn count(&self) -> Result<u64>;

    /// Look up one activity. `Ok(None)` when it does not exist.
    async fn get_by_id(&self, id: &str) -> Result<Option<ThingToDo>>;

    /// Insert or replace an activity keyed by its id.
    async fn upsert_activity(&self, activity: &ThingToDo) -> Result<()>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
