// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process activity store.

use super::ActivityStore;
use crate::error::Result;
use crate::models::ThingToDo;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent in-memory store keyed by activity id.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    activities: Arc<DashMap<String, ThingToDo>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `activities`.
    pub fn with_activities(activities: impl IntoIterator<Item = ThingToDo>) -> Self {
        let store = Self::new();
        for activity in activities {
            store.activities.insert(activity.id.clone(), activity);
        }
        store
    }

    fn sorted(&self, filter: impl Fn(&ThingToDo) -> bool) -> Vec<ThingToDo> {
        let mut activities: Vec<ThingToDo> = self
            .activities
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary
        activities.sort_by(|a, b| a.id.cmp(&b.id));
        activities
    }
}

#[async_trait::async_trait]
impl ActivityStore for InMemoryStore {
    async fn list_activities_with_location(&self) -> Result<Vec<ThingToDo>> {
        Ok(self.sorted(ThingToDo::has_location))
    }

    async fn list_all_activities(&self) -> Result<Vec<ThingToDo>> {
        Ok(self.sorted(|_| true))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.activities.len() as u64)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ThingToDo>> {
        Ok(self.activities.get(id).map(|entry| entry.value().clone()))
    }

    async fn upsert_activity(&self, activity: &ThingToDo) -> Result<()> {
        self.activities.insert(activity.id.clone(), activity.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
