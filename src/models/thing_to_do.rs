// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! "Thing to do" activity model.

use super::GeoPoint;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A recommendable activity.
///
/// Immutable once ingested. Recommenders only look at `id` and `location`;
/// everything else is payload for the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ThingToDo {
    /// NPS identifier (also used as document ID)
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    /// Human-readable place name (park or location description)
    pub location_name: Option<String>,
    /// Coordinates, when known and valid
    pub location: Option<GeoPoint>,
    pub tags: Vec<String>,
    pub topics: Vec<String>,
    pub activities: Vec<String>,
    pub season: Option<String>,
    pub age_recommendation: Option<String>,
    pub accessibility: Option<String>,
    pub pets_allowed: bool,
}

impl ThingToDo {
    /// Minimal record with only identity and location, for tests and tools.
    pub fn new(id: impl Into<String>, title: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: None,
            image_url: None,
            location_name: None,
            location,
            tags: Vec::new(),
            topics: Vec::new(),
            activities: Vec::new(),
            season: None,
            age_recommendation: None,
            accessibility: None,
            pets_allowed: false,
        }
    }

    /// Whether this activity can take part in distance-weighted sampling.
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }
}
