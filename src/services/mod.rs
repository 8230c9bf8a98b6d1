// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ingest;
pub mod nps;
pub mod recommendation;
pub mod recommender;

pub use ingest::{IngestReport, IngestService};
pub use nps::NpsClient;
pub use recommendation::RecommendationService;
pub use recommender::{
    CandidateDistribution, DistanceRecommender, RecommendationRequest, Recommender,
    RecommenderMode, RngSource, UniformRecommender, WeightedCandidate,
};
