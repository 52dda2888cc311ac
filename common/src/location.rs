//! Location related module
//!
//! A `Location` is a plain latitude/longitude pair in degrees.  Range is not enforced, callers
//! get whatever the data source sends.
//!
//! Distances are great-circle distances computed with the [Haversine] formula on a spherical
//! Earth.
//!
//! [Haversine]: https://en.wikipedia.org/wiki/Haversine_formula
//!
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6_371.;

/// Madrid, used when we know nothing about the user's position.
const DEF_LAT: f64 = 40.4167047;
const DEF_LON: f64 = -3.7035825;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Bad location {0}, expected \"lat,lon\"")]
    BadFormat(String),
    #[error("Bad coordinate {0}")]
    BadCoordinate(String),
}

/// Actual location
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            lat: DEF_LAT,
            lon: DEF_LON,
        }
    }
}

impl Location {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }

    /// Great-circle distance to `other` in km
    ///
    #[inline]
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine(self, other)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Parse `"lat,lon"`, spaces allowed around each value.
///
impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| LocationError::BadFormat(s.to_string()))?;
        let lat = parse_coord(lat)?;
        let lon = parse_coord(lon)?;
        Ok(Location { lat, lon })
    }
}

/// Parse one coordinate in degrees
///
pub fn parse_coord(s: &str) -> Result<f64, LocationError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| LocationError::BadCoordinate(s.trim().to_string()))
}

/// Compute the great-circle distance in km between two points with the Haversine formula.
///
pub fn haversine(from: &Location, to: &Location) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let d = EARTH_RADIUS_KM * c;
    trace!("haversine({from}, {to}) = {d}");
    d
}
