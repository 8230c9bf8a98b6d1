// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fun Things ingestion job
//!
//! Fetches "things to do" from the NPS API and stores them in Firestore
//! for the recommendation service.

use fun_things::{
    config::Config,
    db::{ActivityStore, FirestoreDb},
    services::{IngestService, NpsClient},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        project = %config.gcp_project_id,
        nps_api_url = %config.nps_api_url,
        page_size = config.nps_page_size,
        max_records = ?config.nps_max_records,
        "Starting NPS ingestion"
    );

    let db = FirestoreDb::new(&config.gcp_project_id).await?;
    let store: Arc<dyn ActivityStore> = Arc::new(db);

    let nps = NpsClient::new(config.nps_api_url.clone(), config.nps_api_key.clone())?;
    let ingest = IngestService::new(nps, store);

    let report = ingest
        .run(config.nps_page_size, config.nps_max_records)
        .await?;

    tracing::info!(
        received = report.received,
        stored = report.stored,
        skipped_missing_id = report.skipped_missing_id,
        without_location = report.without_location,
        "Ingestion finished"
    );

    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fun_things=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
