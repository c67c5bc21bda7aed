//! Distance helpers.
//!
//! Clustering runs in degree space (planar Euclidean on lat/lng). That is a
//! scale-dependent approximation: fine at a few hundred metres, wrong at city
//! scale and beyond. `haversine_meters` is here for reporting and for callers
//! that need a ground distance.

use civic_core::models::GeoPoint;
use geo::{Distance, Haversine, Point};

/// Euclidean distance in degrees
pub fn degree_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    a.degree_distance(b)
}

/// Great-circle distance in meters
pub fn haversine_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    Haversine.distance(to_geo_point(a), to_geo_point(b))
}

/// Ground length of a north-south offset of `radius_deg` at `at`
pub fn radius_in_meters(radius_deg: f64, at: &GeoPoint) -> f64 {
    haversine_meters(at, &GeoPoint::new(at.lat + radius_deg, at.lng))
}

/// Arithmetic mean of latitudes and of longitudes, independently
pub fn mean_center(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lng_sum) =
        points.iter().fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Some(GeoPoint::new(lat_sum / n, lng_sum / n))
}

/// `geo` points are (x = longitude, y = latitude)
pub fn to_geo_point(point: &GeoPoint) -> Point {
    Point::new(point.lng, point.lat)
}
