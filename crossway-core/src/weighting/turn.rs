//! Turn costs at the node a step starts from

use geo::Point;

use crate::{config::WeightingConfig, geodesy};

/// Bearings computed from coordinates carry rounding noise around right angles
const ANGLE_EPSILON: f64 = 1e-9;

/// Deviation from going straight on at `curr`, in degrees within `(-180, 180]`.
/// `0` is straight through, `±180` a full U-turn.
pub fn turn_deviation(prev: Point<f64>, curr: Point<f64>, next: Point<f64>) -> f64 {
    let back = geodesy::bearing(curr, prev);
    let ahead = geodesy::bearing(curr, next);

    let deviation = (ahead - back + 180.0 + 180.0).rem_euclid(360.0) - 180.0;
    if deviation <= -180.0 { deviation + 360.0 } else { deviation }
}

/// Penalty (s) for a given deviation. Left and right turns currently cost the same.
pub fn penalty_for_deviation(deviation: f64, config: &WeightingConfig) -> f64 {
    let magnitude = deviation.abs();

    if magnitude < 90.0 - ANGLE_EPSILON {
        0.0
    } else if magnitude > 180.0 - config.u_turn_tolerance_deg {
        config.u_turn_penalty
    } else {
        config.turn_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_table() {
        let config = WeightingConfig::default();
        assert_eq!(penalty_for_deviation(0.0, &config), 0.0);
        assert_eq!(penalty_for_deviation(45.0, &config), 0.0);
        assert_eq!(penalty_for_deviation(180.0, &config), 15.0);
        assert_eq!(penalty_for_deviation(-175.0, &config), 15.0);
        assert_eq!(penalty_for_deviation(90.0, &config), 10.0);
        assert_eq!(penalty_for_deviation(-90.0, &config), 10.0);
        assert_eq!(penalty_for_deviation(165.0, &config), 10.0);
    }

    #[test]
    fn deviation_from_geometry() {
        let west = Point::new(-0.001, 0.0);
        let curr = Point::new(0.0, 0.0);
        let east = Point::new(0.001, 0.0);
        let south = Point::new(0.0, -0.001);
        let north = Point::new(0.0, 0.001);

        assert!(turn_deviation(west, curr, east).abs() < 1e-6);
        assert!((turn_deviation(west, curr, west).abs() - 180.0).abs() < 1e-6);
        assert!((turn_deviation(west, curr, south) - 90.0).abs() < 1e-6);
        assert!((turn_deviation(west, curr, north) + 90.0).abs() < 1e-6);
    }
}
