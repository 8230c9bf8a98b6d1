// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the store, recommenders and ingestion.

/// Application error type.
///
/// An empty store is not an error: recommenders report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid query point: {0}")]
    InvalidQueryPoint(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Activity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("NPS API error: {0}")]
    NpsApi(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const NPS_RATE_LIMIT: &'static str = "NPS rate limit exceeded";

    /// Check whether this is an NPS rate-limit failure worth retrying later.
    pub fn is_nps_rate_limit(&self) -> bool {
        matches!(self, AppError::NpsApi(msg) if msg == Self::NPS_RATE_LIMIT)
    }

    /// Check whether the caller supplied bad input (as opposed to an
    /// infrastructure failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidQueryPoint(_) | AppError::NotFound(_))
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
