// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation entry points for the serving layer.

use crate::config::{Config, ConfigError};
use crate::db::ActivityStore;
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, ThingToDo};
use crate::services::recommender::{
    DistanceRecommender, RecommendationRequest, Recommender, RecommenderMode, RngSource,
    UniformRecommender,
};
use std::sync::Arc;

/// Owns both recommenders and the store they read from.
///
/// Built once at startup and shared; every method is safe to call
/// concurrently.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn ActivityStore>,
    distance: DistanceRecommender,
    uniform: UniformRecommender,
    default_mode: RecommenderMode,
}

impl RecommendationService {
    /// Build from configuration (mode, decay constant, random source).
    pub fn new(
        store: Arc<dyn ActivityStore>,
        config: &Config,
    ) -> std::result::Result<Self, ConfigError> {
        let distance = DistanceRecommender::new(store.clone())
            .with_decay(config.decay_per_meter)?
            .with_rng_source(config.rng_source);
        let uniform = UniformRecommender::new(store.clone()).with_rng_source(config.rng_source);

        tracing::info!(
            store = store.name(),
            mode = config.recommender_mode.as_str(),
            decay_per_meter = config.decay_per_meter,
            seeded = config.rng_source != RngSource::Entropy,
            "Recommendation service initialized"
        );

        Ok(Self {
            store,
            distance,
            uniform,
            default_mode: config.recommender_mode,
        })
    }

    /// Distance-weighted recommendation around (`latitude`, `longitude`).
    ///
    /// Invalid coordinates are rejected before the store is queried.
    pub async fn recommend_by_distance(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<ThingToDo>> {
        let point = GeoPoint::new(latitude, longitude)?;
        self.distance.recommend_near(point).await
    }

    /// Uniformly random recommendation, ignoring location.
    pub async fn recommend_uniform(&self) -> Result<Option<ThingToDo>> {
        self.uniform.recommend_any().await
    }

    /// Recommend with the configured default mode.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<Option<ThingToDo>> {
        self.recommender(self.default_mode).recommend(request).await
    }

    pub fn recommender(&self, mode: RecommenderMode) -> &dyn Recommender {
        match mode {
            RecommenderMode::Distance => &self.distance,
            RecommenderMode::Uniform => &self.uniform,
        }
    }

    pub fn default_mode(&self) -> RecommenderMode {
        self.default_mode
    }

    /// Activity details by id.
    pub async fn get_activity(&self, id: &str) -> Result<ThingToDo> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
    }
}
