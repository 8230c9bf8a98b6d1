// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NPS ingestion.
//!
//! Handles the workflow:
//! 1. Fetch things to do from NPS
//! 2. Validate each record into a `ThingToDo`
//! 3. Upsert into the activity store

use crate::db::ActivityStore;
use crate::error::Result;
use crate::models::{NpsThingToDoRecord, ThingToDo};
use crate::services::NpsClient;
use futures_util::{stream, StreamExt};
use std::sync::Arc;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Counts from one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records received from NPS
    pub received: usize,
    /// Activities written to the store
    pub stored: usize,
    /// Records dropped for lacking an id
    pub skipped_missing_id: usize,
    /// Stored activities without usable coordinates
    pub without_location: usize,
}

/// Loads NPS things to do into the activity store.
pub struct IngestService {
    nps: NpsClient,
    store: Arc<dyn ActivityStore>,
}

impl IngestService {
    pub fn new(nps: NpsClient, store: Arc<dyn ActivityStore>) -> Self {
        Self { nps, store }
    }

    /// Fetch from NPS and store everything.
    pub async fn run(&self, page_size: u32, max_records: Option<u32>) -> Result<IngestReport> {
        let records = self.nps.fetch_all(page_size, max_records).await?;
        ingest_records(self.store.as_ref(), records).await
    }
}

/// Validate `records` and upsert them into `store`.
///
/// Every write is attempted; any store failure fails the whole run.
pub async fn ingest_records(
    store: &dyn ActivityStore,
    records: Vec<NpsThingToDoRecord>,
) -> Result<IngestReport> {
    let mut report = IngestReport {
        received: records.len(),
        ..IngestReport::default()
    };

    let activities: Vec<ThingToDo> = records
        .into_iter()
        .filter_map(|record| {
            let converted = record.into_thing_to_do();
            if converted.is_none() {
                report.skipped_missing_id += 1;
            }
            converted
        })
        .collect();

    report.without_location = activities.iter().filter(|a| !a.has_location()).count();

    stream::iter(activities.iter())
        .map(|activity| store.upsert_activity(activity))
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect::<Vec<Result<()>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<()>>>()?;

    report.stored = activities.len();

    tracing::info!(
        store = store.name(),
        received = report.received,
        stored = report.stored,
        skipped_missing_id = report.skipped_missing_id,
        without_location = report.without_location,
        "NPS ingestion complete"
    );

    Ok(report)
}
