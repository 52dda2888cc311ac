//! Find the shelter closest to a given point.
//!
//! Two steps:
//! 1. coarse prefilter on the raw latitude/longitude delta (see below)
//! 2. stable sort on the Haversine distance, first one wins
//!
//! NOTE: the prefilter keeps shelters where `shelter - origin <= 1°` on both axes, *without*
//!       taking the absolute value.  Anything south or west of the origin always passes and
//!       anything more than one degree north or east never does.  Current clients rely on this
//!       behaviour, do not change it without telling them.
//!

use std::cmp::Ordering;

use tracing::{debug, trace};

use petshelter_common::{haversine, Location};

use crate::Shelter;

/// Maximum delta in degrees on each axis for the prefilter
pub const DEGREE_TOLERANCE: f64 = 1.;

/// Does `shelter` pass the prefilter for `origin`?
///
#[inline]
pub fn in_tolerance(origin: &Location, shelter: &Shelter) -> bool {
    shelter.address.latitude - origin.lat <= DEGREE_TOLERANCE
        && shelter.address.longitude - origin.lon <= DEGREE_TOLERANCE
}

/// Compare two distances, NaN goes after everything else.
///
#[inline]
fn by_distance(d1: f64, d2: f64) -> Ordering {
    d1.partial_cmp(&d2)
        .unwrap_or_else(|| d1.is_nan().cmp(&d2.is_nan()))
}

/// Return the shelters passing the prefilter, sorted by distance (in km) from `origin`.
///
/// Equal distances keep their original order.
///
#[tracing::instrument(skip(candidates))]
pub fn rank_by_distance<'a>(origin: &Location, candidates: &'a [Shelter]) -> Vec<(&'a Shelter, f64)> {
    let mut ranked: Vec<_> = candidates
        .iter()
        .filter(|s| in_tolerance(origin, s))
        .map(|s| (s, haversine(origin, &s.location())))
        .collect();
    trace!("{} of {} candidates in range", ranked.len(), candidates.len());

    ranked.sort_by(|(_, d1), (_, d2)| by_distance(*d1, *d2));
    ranked
}

/// Return the closest shelter from `origin`, if any passes the prefilter.
///
#[tracing::instrument(skip(candidates))]
pub fn find_closest<'a>(origin: &Location, candidates: &'a [Shelter]) -> Option<&'a Shelter> {
    let closest = rank_by_distance(origin, candidates)
        .first()
        .map(|(s, _)| *s);
    debug!("closest = {:?}", closest.map(|s| &s.name));
    closest
}
