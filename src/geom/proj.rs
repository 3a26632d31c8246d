//! Local planar approximation of lon/lat around a reference latitude.
//!
//! east  = Δλ · 111320 · cos(φ₀)
//! north = Δφ · 110540

use crate::error::{MeshError, Result};

/// Meters per degree of longitude at the equator.
pub const METERS_PER_DEGREE_LNG: f64 = 111_320.0;

/// Meters per degree of latitude (fixed WGS84 small-angle approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 110_540.0;

/// Scale factors converting degree deltas to meters at a reference latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetersPerDegree {
    pub lng: f64,
    pub lat: f64,
}

impl MetersPerDegree {
    /// Scale factors at `latitude` (degrees).
    ///
    /// An out-of-range latitude fails with `InvalidCoordinate` whose `lng` is
    /// NaN, since no longitude is involved.
    pub fn at(latitude: f64) -> Result<Self> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(MeshError::InvalidCoordinate { lng: f64::NAN, lat: latitude });
        }
        Ok(Self {
            lng: METERS_PER_DEGREE_LNG * latitude.to_radians().cos(),
            lat: METERS_PER_DEGREE_LAT,
        })
    }

    /// Degree deltas `(d_lng, d_lat)` spanning `meters` in each direction.
    #[inline]
    pub fn degrees_for(&self, meters: f64) -> (f64, f64) {
        (meters / self.lng, meters / self.lat)
    }

    /// Convert a planar area in degree² to m².
    #[inline] pub fn area_m2(&self, deg2: f64) -> f64 { deg2 * self.lng * self.lat }

    /// Convert a distance along a parallel (degrees of longitude) to meters.
    #[inline] pub fn lng_to_m(&self, d_lng: f64) -> f64 { d_lng * self.lng }

    /// Convert a distance along a meridian (degrees of latitude) to meters.
    #[inline] pub fn lat_to_m(&self, d_lat: f64) -> f64 { d_lat * self.lat }
}
