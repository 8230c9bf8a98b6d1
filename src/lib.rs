// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fun Things: recommend things to do near you
//!
//! This crate ingests "things to do" from the National Park Service API
//! and recommends them, weighting each by its distance from the user.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use config::{Config, ConfigError};
use db::ActivityStore;
use services::RecommendationService;
use std::sync::Arc;

/// Shared application state, built once at startup and handed to the
/// serving layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ActivityStore>,
    pub recommendations: RecommendationService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ActivityStore>) -> Result<Self, ConfigError> {
        let recommendations = RecommendationService::new(store.clone(), &config)?;
        Ok(Self {
            config,
            store,
            recommendations,
        })
    }
}
