//! Way speeds (km/h) from `maxspeed` and `highway` tags

use crate::{config::WeightingConfig, model::HighwayClass, model::Way};

const MPH_TO_KMH: f64 = 1.609_344;

/// Speed limit of the way, clamped to the configured speed bounds
pub fn way_max_speed(way: &Way, config: &WeightingConfig) -> f64 {
    let speed = way
        .tag("maxspeed")
        .filter(|v| !v.is_empty())
        .and_then(|v| parse_maxspeed(v, config))
        .unwrap_or_else(|| default_speed(way, config));

    // total for any bounds, including inverted ones
    speed.max(config.min_speed).min(config.max_speed)
}

/// Numeric values (optionally suffixed with `mph`) plus the `walk` and
/// `none` tokens. Anything else yields `None`.
pub fn parse_maxspeed(value: &str, config: &WeightingConfig) -> Option<f64> {
    let mut parts = value.split_whitespace();
    let token = parts.next()?;

    if let Ok(speed) = token.parse::<f64>() {
        if !speed.is_finite() {
            return None;
        }
        return Some(match parts.next() {
            Some("mph") => speed * MPH_TO_KMH,
            _ => speed,
        });
    }

    match token {
        "walk" => Some(config.walking_speed),
        "none" => Some(config.max_speed),
        _ => None,
    }
}

fn default_speed(way: &Way, config: &WeightingConfig) -> f64 {
    way.tag("highway")
        .and_then(|h| config.highway_speeds.get(HighwayClass::from_tag(h)))
        .unwrap_or(config.min_speed)
}
