// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Geographic coordinates for activities and recommendation queries.

use crate::error::AppError;
use geo::{Distance, Haversine, Point};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A validated WGS84 coordinate pair.
///
/// Construct with [`GeoPoint::new`]; both components are finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        if !(latitude.is_finite() && longitude.is_finite()) {
            return Err(AppError::InvalidQueryPoint(format!(
                "({latitude}, {longitude}) is not a finite coordinate"
            )));
        }

        let point = Self {
            latitude,
            longitude,
        };

        point.validate().map_err(|e| {
            AppError::InvalidQueryPoint(format!(
                "({latitude}, {longitude}) is not a valid coordinate: {e}"
            ))
        })?;

        Ok(point)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        // geo uses (x, y) = (longitude, latitude)
        Point::new(point.longitude, point.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        for (lat, lon) in [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.1), (0.0, -200.0)] {
            let err = GeoPoint::new(lat, lon).unwrap_err();
            assert!(matches!(err, AppError::InvalidQueryPoint(_)), "{lat},{lon}");
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
        assert!(GeoPoint::new(f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = GeoPoint::new(37.3318, -122.0312).unwrap();
        assert_eq!(p.distance_meters(&p), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        let d = a.distance_meters(&b);
        // ~111.2 km on the mean-radius sphere
        assert!((d - 111_195.0).abs() < 100.0, "distance was {d}");
    }
}
