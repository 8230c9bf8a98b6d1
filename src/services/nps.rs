// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! National Park Service API client.
//!
//! Handles:
//! - Paged `thingstodo` fetching
//! - Rate limit detection

use crate::error::{AppError, Result};
use crate::models::{NpsPage, NpsThingToDoRecord};
use serde::Deserialize;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// NPS API client.
#[derive(Clone)]
pub struct NpsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NpsClient {
    /// Create a client for `base_url` (e.g. `https://developer.nps.gov/api/v1`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("failed building NPS HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch one page of things to do.
    pub async fn get_things_to_do(&self, limit: u32, start: u32) -> Result<NpsPage> {
        let url = format!("{}/thingstodo", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("limit", limit.to_string()), ("start", start.to_string())])
            .send()
            .await
            .map_err(|e| AppError::NpsApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Fetch every record, `page_size` at a time, stopping at `max_records`
    /// if given.
    pub async fn fetch_all(
        &self,
        page_size: u32,
        max_records: Option<u32>,
    ) -> Result<Vec<NpsThingToDoRecord>> {
        let page_size = page_size.max(1);
        let mut records: Vec<NpsThingToDoRecord> = Vec::new();
        let mut start: u32 = 0;

        loop {
            let wanted = match max_records {
                Some(max) => max.saturating_sub(records.len() as u32).min(page_size),
                None => page_size,
            };
            if wanted == 0 {
                break;
            }

            let page = self.get_things_to_do(wanted, start).await?;
            let total = page.total_records();
            let received = page.data.len() as u32;

            tracing::debug!(start, received, total = ?total, "Fetched NPS page");

            records.extend(page.data);
            start = start.saturating_add(received);

            if received == 0 || total.is_some_and(|t| start >= t) {
                break;
            }
        }

        tracing::info!(count = records.len(), "Fetched NPS things to do");
        Ok(records)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("NPS rate limit hit (429)");
                return Err(AppError::NpsApi(AppError::NPS_RATE_LIMIT.to_string()));
            }

            return Err(AppError::NpsApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::NpsApi(format!("JSON parse error: {}", e)))
    }
}
