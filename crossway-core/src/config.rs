//! Router configuration. Every field has a default, so partial files are fine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    Error, MAX_VISITED_NODES,
    model::{HighwayClass, VehicleType},
};

/// Speeds (km/h) and penalties (s) used to turn distances into cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    /// Lower clamp for any way speed
    pub min_speed: f64,
    /// Upper clamp for any way speed, also used for `maxspeed=none`
    pub max_speed: f64,
    /// Used for `maxspeed=walk`
    pub walking_speed: f64,
    pub turn_penalty: f64,
    pub u_turn_penalty: f64,
    /// A turn deviating more than `180° - tolerance` from straight on is a U-turn
    pub u_turn_tolerance_deg: f64,
    pub vehicle_speeds: VehicleSpeeds,
    pub highway_speeds: HighwaySpeeds,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            min_speed: 2.5,
            max_speed: 180.0,
            walking_speed: 5.0,
            turn_penalty: 10.0,
            u_turn_penalty: 15.0,
            u_turn_tolerance_deg: 10.0,
            vehicle_speeds: VehicleSpeeds::default(),
            highway_speeds: HighwaySpeeds::default(),
        }
    }
}

impl WeightingConfig {
    /// Rejects speeds and penalties that would make costs negative, infinite
    /// or NaN, or speed clamping impossible.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            return Err(invalid(format!("min_speed must be positive, got {}", self.min_speed)));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            return Err(invalid(format!(
                "max_speed must be at least min_speed ({}), got {}",
                self.min_speed, self.max_speed
            )));
        }
        positive("walking_speed", self.walking_speed)?;
        for (name, value) in [
            ("turn_penalty", self.turn_penalty),
            ("u_turn_penalty", self.u_turn_penalty),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }
        if !(0.0..=180.0).contains(&self.u_turn_tolerance_deg) {
            return Err(invalid(format!(
                "u_turn_tolerance_deg must be within 0..=180, got {}",
                self.u_turn_tolerance_deg
            )));
        }

        for vehicle in [VehicleType::Car, VehicleType::Bike, VehicleType::Pedestrian] {
            positive(&format!("vehicle_speeds.{vehicle}"), self.vehicle_speeds.get(vehicle))?;
        }
        let highway = &self.highway_speeds;
        for (name, value) in [
            ("motorway", highway.motorway),
            ("trunk", highway.trunk),
            ("primary", highway.primary),
            ("secondary", highway.secondary),
            ("tertiary", highway.tertiary),
            ("residential", highway.residential),
            ("link", highway.link),
            ("service", highway.service),
            ("living_street", highway.living_street),
            ("road", highway.road),
            ("unclassified", highway.unclassified),
        ] {
            positive(&format!("highway_speeds.{name}"), value)?;
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}

fn positive(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

/// Absolute maximum speed per travel mode (km/h)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpeeds {
    pub car: f64,
    pub bike: f64,
    pub pedestrian: f64,
}

impl Default for VehicleSpeeds {
    fn default() -> Self {
        Self {
            car: 160.0,
            bike: 30.0,
            pedestrian: 5.0,
        }
    }
}

impl VehicleSpeeds {
    pub fn get(&self, vehicle: VehicleType) -> f64 {
        match vehicle {
            VehicleType::Car => self.car,
            VehicleType::Bike => self.bike,
            VehicleType::Pedestrian => self.pedestrian,
        }
    }
}

/// Default speed (km/h) for ways without a usable `maxspeed` tag.
/// Unrecognised highway values fall back to `WeightingConfig::min_speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighwaySpeeds {
    pub motorway: f64,
    pub trunk: f64,
    pub primary: f64,
    pub secondary: f64,
    pub tertiary: f64,
    pub residential: f64,
    pub link: f64,
    pub service: f64,
    pub living_street: f64,
    pub road: f64,
    pub unclassified: f64,
}

impl Default for HighwaySpeeds {
    fn default() -> Self {
        Self {
            motorway: 180.0,
            trunk: 100.0,
            primary: 100.0,
            secondary: 100.0,
            tertiary: 50.0,
            residential: 30.0,
            link: 30.0,
            service: 10.0,
            living_street: 10.0,
            road: 50.0,
            unclassified: 50.0,
        }
    }
}

impl HighwaySpeeds {
    pub fn get(&self, class: HighwayClass) -> Option<f64> {
        let speed = match class {
            HighwayClass::Motorway => self.motorway,
            HighwayClass::Trunk => self.trunk,
            HighwayClass::Primary => self.primary,
            HighwayClass::Secondary => self.secondary,
            HighwayClass::Tertiary => self.tertiary,
            HighwayClass::Residential => self.residential,
            HighwayClass::Link => self.link,
            HighwayClass::Service => self.service,
            HighwayClass::LivingStreet => self.living_street,
            HighwayClass::Road => self.road,
            HighwayClass::Unclassified => self.unclassified,
            HighwayClass::Unknown => return None,
        };
        Some(speed)
    }
}

/// Snapping of query points onto the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Half-widths (degrees) of the search boxes, tried in order until one
    /// contains a usable node
    pub search_radii: Vec<f64>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            search_radii: vec![0.001],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub max_visited_nodes: usize,
    /// Per-query search deadline, unbounded when unset
    pub query_timeout_ms: Option<u64>,
    pub locator: LocatorConfig,
    pub weighting: WeightingConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_visited_nodes: MAX_VISITED_NODES,
            query_timeout_ms: None,
            locator: LocatorConfig::default(),
            weighting: WeightingConfig::default(),
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_visited_nodes == 0 {
            return Err(invalid("max_visited_nodes must be positive".to_string()));
        }
        if self.locator.search_radii.is_empty() {
            return Err(invalid("locator.search_radii is empty".to_string()));
        }
        if let Some(radius) = self
            .locator
            .search_radii
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(invalid(format!("search radius must be positive, got {radius}")));
        }
        self.weighting.validate()
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }
}
