// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! NPS `thingstodo` API schema.
//!
//! The upstream payload is loosely typed: every field may be missing, and
//! coordinates arrive as (possibly empty) strings. Everything is optional
//! here and validated once in [`NpsThingToDoRecord::into_thing_to_do`].

use super::{GeoPoint, ThingToDo};
use serde::Deserialize;
use serde_json::Value;

const UNTITLED: &str = "Untitled";
const NO_DESCRIPTION: &str = "No description available.";

/// One page of the `thingstodo` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpsPage {
    /// Total matching records, sent as a string ("265")
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub data: Vec<NpsThingToDoRecord>,
}

impl NpsPage {
    /// Reported total, if present and numeric.
    pub fn total_records(&self) -> Option<u32> {
        self.total.as_deref().and_then(|t| t.trim().parse().ok())
    }
}

/// Raw thing-to-do record as returned by NPS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsThingToDoRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<NpsImage>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    #[serde(default)]
    pub related_parks: Vec<NpsRelatedPark>,
    pub location_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub topics: Vec<NpsNamed>,
    #[serde(default)]
    pub activities: Vec<NpsNamed>,
    #[serde(default)]
    pub season: Vec<String>,
    pub age: Option<String>,
    pub accessibility_information: Option<String>,
    pub are_pets_permitted: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpsImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsRelatedPark {
    pub full_name: Option<String>,
}

/// Topic or activity tag (`{ "id": ..., "name": ... }`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpsNamed {
    pub name: Option<String>,
}

impl NpsThingToDoRecord {
    /// Convert to a [`ThingToDo`].
    ///
    /// Returns `None` for records without an id. Records with missing or
    /// invalid coordinates are kept, without a location.
    pub fn into_thing_to_do(self) -> Option<ThingToDo> {
        let id = non_empty(self.id)?;
        let title = non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string());

        let location = match (
            self.latitude.as_ref().and_then(parse_coordinate),
            self.longitude.as_ref().and_then(parse_coordinate),
        ) {
            (Some(lat), Some(lon)) => match GeoPoint::new(lat, lon) {
                Ok(point) => Some(point),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Discarding invalid coordinates");
                    None
                }
            },
            _ => {
                tracing::warn!(id = %id, title = %title, "Missing coordinates");
                None
            }
        };

        let location_name = self
            .related_parks
            .into_iter()
            .find_map(|p| non_empty(p.full_name))
            .or_else(|| {
                self.location_description
                    .as_deref()
                    .and_then(|d| d.split("<br").next())
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
            });

        let season = if self.season.is_empty() {
            None
        } else {
            Some(self.season.join(", "))
        };

        Some(ThingToDo {
            id,
            title,
            description: clean_description(self.short_description.as_deref()),
            url: non_empty(self.url),
            image_url: self.images.into_iter().next().and_then(|i| non_empty(i.url)),
            location_name,
            location,
            tags: self.tags,
            topics: names(self.topics),
            activities: names(self.activities),
            season,
            age_recommendation: non_empty(self.age),
            accessibility: non_empty(self.accessibility_information),
            pets_allowed: self
                .are_pets_permitted
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        })
    }
}

/// Strip paragraph tags and separators, and collapse whitespace.
pub fn clean_description(text: Option<&str>) -> String {
    let Some(text) = text else {
        return NO_DESCRIPTION.to_string();
    };

    let stripped = text
        .replace("<p>", " ")
        .replace("</p>", " ")
        .replace("---", "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        cleaned
    }
}

fn parse_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn names(items: Vec<NpsNamed>) -> Vec<String> {
    items.into_iter().filter_map(|n| non_empty(n.name)).collect()
}
