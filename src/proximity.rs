// Proximity evaluation between the player and the session stations

use crate::catalog::{Point, Station};

/// Distance under which a station counts as nearby, in map units
pub const DEFAULT_PROXIMITY_THRESHOLD: f32 = 15.0;

/// Euclidean distance in the normalized map space
pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Stations strictly closer than `threshold` to `position`, in input order
pub fn nearby<'a>(position: Point, stations: &'a [Station], threshold: f32) -> Vec<&'a Station> {
    stations
        .iter()
        .filter(|s| distance(position, s.position) < threshold)
        .collect()
}

/// The closest station to `position` and its distance, if any
pub fn nearest(position: Point, stations: &[Station]) -> Option<(&Station, f32)> {
    stations
        .iter()
        .map(|s| (s, distance(position, s.position)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
