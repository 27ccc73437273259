//! Great-circle helpers shared by weighting, search and reconstruction.
//!
//! All points are `geo::Point` with `x = longitude`, `y = latitude`.

use geo::{Bearing, Distance, Haversine, Point};

/// Haversine distance in meters
pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b)
}

/// Initial bearing from `from` towards `to`, degrees clockwise from north in `[0, 360)`
pub fn bearing(from: Point<f64>, to: Point<f64>) -> f64 {
    Haversine.bearing(from, to).rem_euclid(360.0)
}

/// Total length of a polyline in meters
pub fn path_length(points: &[Point<f64>]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}
