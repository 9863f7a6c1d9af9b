//! Geodesic helpers shared by `GraphStore`'s nearest-neighbour lookup.
//!
//! The degree-radius conversion mirrors the teacher's own
//! `layers::geo_util::compute_envelope` (there expressed in metres, for
//! an RTree storing road-network intersections); here it's expressed in
//! kilometres to match spec.md's `findNearbyNodes` contract.

use geo::{Distance, Haversine};
use geo_types::Point;

const LATITUDE_DEGREE_KM: f64 = 110.574;
const LONGITUDE_DEGREE_KM: f64 = 111.320;

/// Exact great-circle distance between two (lat, lng) points, in
/// kilometres, on the WGS-84 sphere.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let pa = Point::new(a.1, a.0);
    let pb = Point::new(b.1, b.0);
    Haversine::distance(pa, pb) / 1000.0
}

/// A conservative degree-space radius around `lat` that is guaranteed to
/// contain every point within `radius_km` of it. Used only to size an
/// RTree prefilter query (`locate_within_distance`); the caller still
/// re-checks every candidate with [`haversine_km`] before accepting it.
pub fn degree_radius(lat: f64, radius_km: f64) -> f64 {
    let lat_radius = radius_km / LATITUDE_DEGREE_KM;
    let lon_radius = radius_km / (LONGITUDE_DEGREE_KM * lat.to_radians().cos().max(1e-6));
    lat_radius.max(lon_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(haversine_km((1.29, 103.85), (1.29, 103.85)) < 1e-9);
    }

    #[test]
    fn one_degree_latitude_is_about_111km() {
        let d = haversine_km((1.0, 103.85), (2.0, 103.85));
        assert!((d - 111.0).abs() < 2.0, "got {d}");
    }
}
