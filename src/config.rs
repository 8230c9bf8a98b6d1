// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Read once at startup; the resulting clients and recommenders are shared
//! for the life of the process.

use crate::services::recommender::{RecommenderMode, RngSource, DEFAULT_DECAY_PER_METER};
use std::env;

const DEFAULT_NPS_API_URL: &str = "https://developer.nps.gov/api/v1";
const DEFAULT_NPS_PAGE_SIZE: u32 = 100;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Base URL of the NPS API
    pub nps_api_url: String,
    /// Records requested per NPS page
    pub nps_page_size: u32,
    /// Optional cap on records ingested per run
    pub nps_max_records: Option<u32>,
    /// Which recommender the serving layer uses by default
    pub recommender_mode: RecommenderMode,
    /// Decay constant (per meter) for distance weighting
    pub decay_per_meter: f64,
    /// Random source for recommendation sampling
    pub rng_source: RngSource,

    // --- Secrets ---
    /// NPS API key
    pub nps_api_key: String,
}

impl Config {
    /// Config for tests only. Never touches the environment.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            nps_api_url: "http://127.0.0.1:9".to_string(),
            nps_page_size: DEFAULT_NPS_PAGE_SIZE,
            nps_max_records: None,
            recommender_mode: RecommenderMode::Distance,
            decay_per_meter: DEFAULT_DECAY_PER_METER,
            rng_source: RngSource::Seeded(42),
            nps_api_key: "test_nps_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let nps_page_size = match env::var("NPS_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => DEFAULT_NPS_PAGE_SIZE,
        };

        let nps_max_records = env::var("NPS_MAX_RECORDS")
            .ok()
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                    name: "NPS_MAX_RECORDS",
                    reason: format!("expected a non-negative integer, got {raw:?}"),
                })
            })
            .transpose()?;

        let recommender_mode = match env::var("RECOMMENDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => RecommenderMode::Distance,
        };

        let decay_per_meter = match env::var("RECOMMENDER_DECAY_PER_METER") {
            Ok(raw) => parse_decay(&raw)?,
            Err(_) => DEFAULT_DECAY_PER_METER,
        };

        let rng_source = match env::var("RECOMMENDER_SEED") {
            Ok(raw) => RngSource::Seeded(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "RECOMMENDER_SEED",
                reason: format!("expected an unsigned 64-bit integer, got {raw:?}"),
            })?),
            Err(_) => RngSource::Entropy,
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            nps_api_url: env::var("NPS_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_NPS_API_URL.to_string()),
            nps_page_size,
            nps_max_records,
            recommender_mode,
            decay_per_meter,
            rng_source,
            nps_api_key: env::var("NPS_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("NPS_API_KEY"))?,
        })
    }
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::Invalid {
            name: "NPS_PAGE_SIZE",
            reason: format!("expected a positive integer, got {raw:?}"),
        }),
    }
}

/// Parse the decay constant. Zero would flatten to uniform and lose the
/// strict preference for closer activities, so it must be positive.
pub(crate) fn parse_decay(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(lambda) if lambda.is_finite() && lambda > 0.0 => Ok(lambda),
        _ => Err(ConfigError::Invalid {
            name: "RECOMMENDER_DECAY_PER_METER",
            reason: format!("expected a finite positive number, got {raw:?}"),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("NPS_API_KEY", " test_key ");
        env::set_var("RECOMMENDER", "uniform");
        env::set_var("RECOMMENDER_SEED", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.nps_api_key, "test_key");
        assert_eq!(config.recommender_mode, RecommenderMode::Uniform);
        assert_eq!(config.rng_source, RngSource::Seeded(7));
        assert_eq!(config.nps_page_size, DEFAULT_NPS_PAGE_SIZE);
        assert_eq!(config.decay_per_meter, DEFAULT_DECAY_PER_METER);
    }

    #[test]
    fn test_parse_decay_rejects_non_positive() {
        assert!(parse_decay("0").is_err());
        assert!(parse_decay("-3e-6").is_err());
        assert!(parse_decay("NaN").is_err());
        assert!(parse_decay("inf").is_err());
        assert!(parse_decay("abc").is_err());
        assert_eq!(parse_decay(" 5e-6 ").unwrap(), 5e-6);
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("50").unwrap(), 50);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("-1").is_err());
    }
}
