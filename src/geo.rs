//! Geographic predicates over building coordinates
//!
//! Two filters are supported: great-circle radius around a center point
//! (Haversine) and an inclusive bounding rectangle. Both are pure and are
//! evaluated in-process against stored `(lat, lon)` pairs, since SQLite
//! exposes no trigonometric functions.
//!
//! Longitude wraparound at the ±180° seam is not handled; the target data
//! is city-scale and never crosses the seam.

use crate::errors::{DirectoryError, DirectoryResult};

/// Mean Earth radius in kilometers, as used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two WGS84 points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Predicate selecting points within `radius_km` of a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusFilter {
    lat: f64,
    lon: f64,
    radius_km: f64,
}

impl RadiusFilter {
    pub fn new(lat: f64, lon: f64, radius_km: f64) -> DirectoryResult<Self> {
        if !lat.is_finite() || !lon.is_finite() || !radius_km.is_finite() {
            return Err(DirectoryError::Validation(
                "Radius query coordinates must be finite numbers".to_string(),
            ));
        }
        if radius_km <= 0.0 {
            return Err(DirectoryError::Validation(format!(
                "radius_km must be positive, got {}",
                radius_km
            )));
        }
        Ok(Self {
            lat,
            lon,
            radius_km,
        })
    }

    /// True when the point lies within the radius, boundary inclusive.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        haversine_km(self.lat, self.lon, lat, lon) <= self.radius_km
    }
}

/// Predicate selecting points inside an inclusive bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsFilter {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl BoundsFilter {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> DirectoryResult<Self> {
        if ![min_lat, min_lon, max_lat, max_lon]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(DirectoryError::Validation(
                "Bounds query coordinates must be finite numbers".to_string(),
            ));
        }
        if min_lat > max_lat {
            return Err(DirectoryError::Validation(format!(
                "min_lat {} exceeds max_lat {}",
                min_lat, max_lat
            )));
        }
        if min_lon > max_lon {
            return Err(DirectoryError::Validation(format!(
                "min_lon {} exceeds max_lon {}",
                min_lon, max_lon
            )));
        }
        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    /// True when the point lies inside the rectangle, edges inclusive.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
