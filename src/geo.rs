//! Great-circle distance over the BED deployment trajectory
//!
//! The instrument reports position fixes as decimal-degree lon/lat pairs;
//! displacement between fixes uses the haversine formula with the 6367 km
//! mean Earth radius the historical processing used.

use serde::{Deserialize, Serialize};

use crate::error::{BedMotionError, Result};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Position fix in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub lon: f64,
    pub lat: f64,
}

impl GeoFix {
    /// Construct a fix, rejecting out-of-range coordinates
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let fix = GeoFix { lon, lat };
        fix.validate()?;
        Ok(fix)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.lon) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(BedMotionError::InvalidCoordinate {
                lon: self.lon,
                lat: self.lat,
            });
        }
        Ok(())
    }
}

/// Great-circle distance between two fixes in kilometers.
///
/// Out-of-range coordinates are rejected up front rather than letting NaN
/// propagate through the trig.
pub fn haversine_km(a: GeoFix, b: GeoFix) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    Ok(EARTH_RADIUS_KM * c)
}

/// Cumulative displacement in kilometers over consecutive fixes.
///
/// Zero for an empty or single-fix track.
pub fn track_distance_km(fixes: &[GeoFix]) -> Result<f64> {
    let mut total = 0.0;
    for pair in fixes.windows(2) {
        total += haversine_km(pair[0], pair[1])?;
    }
    Ok(total)
}
