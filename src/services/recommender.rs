// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity recommenders.
//!
//! - [`DistanceRecommender`]: samples a located activity with probability
//!   proportional to `exp(-λ · distance)` from the query point.
//! - [`UniformRecommender`]: samples any activity uniformly.
//!
//! Both are stateless and safe to share across tasks. Randomness comes
//! from a [`RngSource`], or from a caller-supplied RNG via
//! `recommend_with_rng`.

use crate::config::ConfigError;
use crate::db::ActivityStore;
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, ThingToDo};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::str::FromStr;
use std::sync::Arc;

/// Default decay constant: weight halves at ~231 km and is ~5% at 1000 km.
pub const DEFAULT_DECAY_PER_METER: f64 = 3e-6;

/// Which recommender the serving layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommenderMode {
    #[default]
    Distance,
    Uniform,
}

impl RecommenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommenderMode::Distance => "distance",
            RecommenderMode::Uniform => "uniform",
        }
    }
}

impl FromStr for RecommenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(RecommenderMode::Distance),
            // "random" is the older name for this mode.
            "uniform" | "random" => Ok(RecommenderMode::Uniform),
            other => Err(ConfigError::Invalid {
                name: "RECOMMENDER",
                reason: format!("expected \"distance\", \"uniform\" or \"random\", got {other:?}"),
            }),
        }
    }
}

/// Where recommenders get their randomness.
///
/// `Seeded` builds the same generator on every call, so a fixed store and
/// query always produce the same recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RngSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RngSource {
    /// A fresh generator for one recommendation call.
    pub fn rng(&self) -> ChaCha8Rng {
        match self {
            RngSource::Entropy => ChaCha8Rng::from_entropy(),
            RngSource::Seeded(seed) => ChaCha8Rng::seed_from_u64(*seed),
        }
    }
}

/// Contextual parameters for a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecommendationRequest {
    /// Where the user is, if known.
    pub location: Option<GeoPoint>,
}

impl RecommendationRequest {
    pub fn anywhere() -> Self {
        Self { location: None }
    }

    pub fn near(location: GeoPoint) -> Self {
        Self {
            location: Some(location),
        }
    }
}

/// Produces at most one activity for a request.
#[async_trait::async_trait]
pub trait Recommender: Send + Sync {
    /// `Ok(None)` means nothing is eligible; it is not an error.
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Option<ThingToDo>>;

    fn mode(&self) -> RecommenderMode;
}

// ─── Weighting ───────────────────────────────────────────────

/// Unnormalized weight of a candidate `distance_meters` away.
///
/// Always in (0, 1] for non-negative distances, barring underflow at
/// extreme `λ · d`.
pub fn decay_weight(distance_meters: f64, decay_per_meter: f64) -> f64 {
    (-decay_per_meter * distance_meters).exp()
}

/// An activity id with its distance and unnormalized weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCandidate {
    pub id: String,
    pub distance_meters: f64,
    pub weight: f64,
}

/// Discrete distribution over candidates for one recommendation call.
#[derive(Debug, Clone)]
pub struct CandidateDistribution {
    candidates: Vec<WeightedCandidate>,
    probabilities: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl CandidateDistribution {
    /// Build from `(id, distance)` pairs. `Ok(None)` for an empty input.
    ///
    /// Probabilities are computed relative to the nearest candidate,
    /// `exp(-λ (d_i - d_min)) / Σ exp(-λ (d_j - d_min))`, which equals the
    /// plain ratio of weights but cannot sum to zero when every raw weight
    /// underflows.
    pub fn new(
        entries: impl IntoIterator<Item = (String, f64)>,
        decay_per_meter: f64,
    ) -> Result<Option<Self>> {
        let candidates: Vec<WeightedCandidate> = entries
            .into_iter()
            .map(|(id, distance_meters)| WeightedCandidate {
                weight: decay_weight(distance_meters, decay_per_meter),
                id,
                distance_meters,
            })
            .collect();

        if candidates.is_empty() {
            return Ok(None);
        }

        if let Some(bad) = candidates.iter().find(|c| !c.distance_meters.is_finite()) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "non-finite distance for candidate {}",
                bad.id
            )));
        }

        let nearest = candidates
            .iter()
            .map(|c| c.distance_meters)
            .fold(f64::INFINITY, f64::min);

        let relative: Vec<f64> = candidates
            .iter()
            .map(|c| decay_weight(c.distance_meters - nearest, decay_per_meter))
            .collect();
        let total: f64 = relative.iter().sum();
        let probabilities = relative.iter().map(|w| w / total).collect();

        let index = WeightedIndex::new(&relative).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("invalid candidate weights: {}", e))
        })?;

        Ok(Some(Self {
            candidates,
            probabilities,
            index,
        }))
    }

    pub fn candidates(&self) -> &[WeightedCandidate] {
        &self.candidates
    }

    /// Normalized selection probabilities, parallel to `candidates()`.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Draw one candidate; returns its position in `candidates()`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }
}

// ─── Distance-weighted ───────────────────────────────────────

/// Recommends located activities, favoring those closer to the query point.
#[derive(Clone)]
pub struct DistanceRecommender {
    store: Arc<dyn ActivityStore>,
    decay_per_meter: f64,
    rng_source: RngSource,
}

impl DistanceRecommender {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self {
            store,
            decay_per_meter: DEFAULT_DECAY_PER_METER,
            rng_source: RngSource::Entropy,
        }
    }

    /// Override λ. Must be finite and positive.
    pub fn with_decay(mut self, decay_per_meter: f64) -> std::result::Result<Self, ConfigError> {
        if !(decay_per_meter.is_finite() && decay_per_meter > 0.0) {
            return Err(ConfigError::Invalid {
                name: "RECOMMENDER_DECAY_PER_METER",
                reason: format!("expected a finite positive number, got {decay_per_meter}"),
            });
        }
        self.decay_per_meter = decay_per_meter;
        Ok(self)
    }

    pub fn with_rng_source(mut self, rng_source: RngSource) -> Self {
        self.rng_source = rng_source;
        self
    }

    pub fn decay_per_meter(&self) -> f64 {
        self.decay_per_meter
    }

    /// Recommend near `point` using the configured random source.
    pub async fn recommend_near(&self, point: GeoPoint) -> Result<Option<ThingToDo>> {
        let mut rng = self.rng_source.rng();
        self.recommend_with_rng(point, &mut rng).await
    }

    /// Recommend near `point`, drawing from `rng`.
    pub async fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        point: GeoPoint,
        rng: &mut R,
    ) -> Result<Option<ThingToDo>> {
        let mut activities = self.store.list_activities_with_location().await?;

        let Some(distribution) = self.distribution_for(&activities, point)? else {
            tracing::debug!(
                latitude = point.latitude(),
                longitude = point.longitude(),
                "No located activities to recommend"
            );
            return Ok(None);
        };

        let chosen = distribution.sample(rng);
        let candidate = &distribution.candidates()[chosen];

        tracing::debug!(
            candidates = distribution.len(),
            activity_id = %candidate.id,
            distance_meters = candidate.distance_meters,
            probability = distribution.probabilities()[chosen],
            "Distance-weighted recommendation"
        );

        Ok(Some(activities.swap_remove(chosen)))
    }

    /// The distribution a recommendation near `point` would sample from.
    pub async fn candidate_distribution(
        &self,
        point: GeoPoint,
    ) -> Result<Option<CandidateDistribution>> {
        let activities = self.store.list_activities_with_location().await?;
        self.distribution_for(&activities, point)
    }

    fn distribution_for(
        &self,
        activities: &[ThingToDo],
        point: GeoPoint,
    ) -> Result<Option<CandidateDistribution>> {
        let entries = activities.iter().filter_map(|a| {
            a.location
                .map(|location| (a.id.clone(), location.distance_meters(&point)))
        });
        let distribution = CandidateDistribution::new(entries, self.decay_per_meter)?;

        // The store contract guarantees every listed activity is located;
        // the distribution must line up with `activities` for swap_remove.
        match distribution {
            Some(d) if d.len() != activities.len() => Err(AppError::Internal(anyhow::anyhow!(
                "{} store returned {} unlocated activities",
                self.store.name(),
                activities.len() - d.len()
            ))),
            other => Ok(other),
        }
    }
}

#[async_trait::async_trait]
impl Recommender for DistanceRecommender {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Option<ThingToDo>> {
        let point = request.location.ok_or_else(|| {
            AppError::InvalidQueryPoint("a query location is required".to_string())
        })?;
        self.recommend_near(point).await
    }

    fn mode(&self) -> RecommenderMode {
        RecommenderMode::Distance
    }
}

// ─── Uniform ─────────────────────────────────────────────────

/// Recommends any stored activity with equal probability.
#[derive(Clone)]
pub struct UniformRecommender {
    store: Arc<dyn ActivityStore>,
    rng_source: RngSource,
}

impl UniformRecommender {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self {
            store,
            rng_source: RngSource::Entropy,
        }
    }

    pub fn with_rng_source(mut self, rng_source: RngSource) -> Self {
        self.rng_source = rng_source;
        self
    }

    pub async fn recommend_any(&self) -> Result<Option<ThingToDo>> {
        let mut rng = self.rng_source.rng();
        self.recommend_with_rng(&mut rng).await
    }

    pub async fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<ThingToDo>> {
        // One listing serves as both the emptiness check and the pool.
        let mut activities = self.store.list_all_activities().await?;
        if activities.is_empty() {
            tracing::debug!("Store is empty, nothing to recommend");
            return Ok(None);
        }

        let chosen = rng.gen_range(0..activities.len());
        tracing::debug!(
            candidates = activities.len(),
            activity_id = %activities[chosen].id,
            "Uniform recommendation"
        );
        Ok(Some(activities.swap_remove(chosen)))
    }
}

#[async_trait::async_trait]
impl Recommender for UniformRecommender {
    async fn recommend(&self, _request: &RecommendationRequest) -> Result<Option<ThingToDo>> {
        self.recommend_any().await
    }

    fn mode(&self) -> RecommenderMode {
        RecommenderMode::Uniform
    }
}
