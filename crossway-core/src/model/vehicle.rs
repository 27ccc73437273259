//! Travel modes and the road classifications they are checked against

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, model::Way};

/// Travel mode of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Bike,
    Pedestrian,
}

impl VehicleType {
    /// Road class eligibility. Cars stay off unclassifiable ways, bikes off
    /// dual carriageways and motorways, pedestrians off anything rural.
    pub fn allows(self, class: RoadClass) -> bool {
        match self {
            VehicleType::Car => class > RoadClass::Unknown,
            VehicleType::Bike => class < RoadClass::RuralDual,
            VehicleType::Pedestrian => class < RoadClass::Rural,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
            VehicleType::Pedestrian => "pedestrian",
        };
        f.write_str(name)
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "bike" | "bicycle" => Ok(VehicleType::Bike),
            "pedestrian" | "foot" | "walk" => Ok(VehicleType::Pedestrian),
            other => Err(Error::InvalidData(format!("unknown vehicle type '{other}'"))),
        }
    }
}

/// Road character derived from a way's tags, ordered from least to most
/// motorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoadClass {
    Unknown,
    LivingStreet,
    CycleStreet,
    Urban,
    Rural,
    RuralDual,
    Motorway,
}

impl RoadClass {
    pub fn of(way: &Way) -> Self {
        if is_motorway(way) {
            RoadClass::Motorway
        } else if is_rural_multi_lane(way) || is_rural_dual_carriageway(way) {
            RoadClass::RuralDual
        } else if is_rural(way) {
            RoadClass::Rural
        } else if is_urban(way) {
            RoadClass::Urban
        } else if is_cycle_street(way) {
            RoadClass::CycleStreet
        } else if is_living_street(way) {
            RoadClass::LivingStreet
        } else if is_urban_fuzzy(way) || is_motor_road(way) {
            RoadClass::Urban
        } else {
            RoadClass::Unknown
        }
    }
}

/// `highway=*` value grouped the way the default speed table is keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighwayClass {
    Motorway,
    Link,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    LivingStreet,
    Road,
    Unclassified,
    Unknown,
}

impl HighwayClass {
    pub fn from_tag(highway: &str) -> Self {
        match highway {
            "motorway" => HighwayClass::Motorway,
            "trunk" => HighwayClass::Trunk,
            "primary" => HighwayClass::Primary,
            "secondary" => HighwayClass::Secondary,
            "tertiary" => HighwayClass::Tertiary,
            "residential" => HighwayClass::Residential,
            "motorway_link" | "trunk_link" | "primary_link" | "secondary_link"
            | "tertiary_link" => HighwayClass::Link,
            "living_street" => HighwayClass::LivingStreet,
            "road" => HighwayClass::Road,
            "service" => HighwayClass::Service,
            "unclassified" => HighwayClass::Unclassified,
            _ => HighwayClass::Unknown,
        }
    }
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(value, "yes" | "true" | "1")
}

fn tag_is_truthy(way: &Way, key: &str) -> bool {
    way.tag(key).is_some_and(is_truthy)
}

fn numeric_maxspeed(way: &Way) -> Option<f64> {
    way.tag("maxspeed")?.parse::<f64>().ok()
}

fn is_motorway(way: &Way) -> bool {
    matches!(way.tag("highway"), Some("motorway" | "motorway_link"))
}

fn is_rural(way: &Way) -> bool {
    if numeric_maxspeed(way).is_some_and(|speed| speed > 50.0) {
        return true;
    }
    matches!(way.tag("maxspeed:type"), Some("rural" | "DE:rural"))
        || way.tag("rural") == Some("yes")
}

fn is_urban(way: &Way) -> bool {
    if numeric_maxspeed(way).is_some_and(|speed| (speed - 50.0).abs() < 1e-6) {
        return true;
    }
    matches!(way.tag("maxspeed:type"), Some("urban" | "DE:urban")) || way.tag("rural") == Some("no")
}

fn is_rural_dual_carriageway(way: &Way) -> bool {
    is_rural(way) && tag_is_truthy(way, "dual_carriageway")
}

/// Rural road with at least two lanes per direction
fn is_rural_multi_lane(way: &Way) -> bool {
    let oneway = matches!(way.tag("oneway"), Some("yes" | "true" | "1" | "-1"))
        || matches!(way.tag("junction"), Some("roundabout" | "circular"));

    let Some(lanes) = way.tag("lanes").and_then(|l| l.parse::<f64>().ok()) else {
        return false;
    };
    let multi_lane = if oneway { lanes >= 2.0 } else { lanes >= 4.0 };

    is_rural(way) && multi_lane
}

fn is_cycle_street(way: &Way) -> bool {
    tag_is_truthy(way, "cyclestreet") || tag_is_truthy(way, "bicycle_road")
}

fn is_living_street(way: &Way) -> bool {
    tag_is_truthy(way, "living_street") || way.tag("highway") == Some("living_street")
}

fn is_urban_fuzzy(way: &Way) -> bool {
    if matches!(way.tag("highway"), Some("living_street" | "residential")) {
        return true;
    }
    if tag_is_truthy(way, "lit") {
        return true;
    }
    if way
        .tag("sidewalk")
        .is_some_and(|s| is_truthy(s) || matches!(s, "left" | "right" | "both" | "separate"))
    {
        return true;
    }
    ["sidewalk:left", "sidewalk:right"]
        .iter()
        .any(|key| way.tag(key).is_some_and(|s| is_truthy(s) || s == "separate"))
}

/// Motor-road highway without any urban/rural hint
fn is_motor_road(way: &Way) -> bool {
    matches!(
        way.tag("highway"),
        Some(
            "trunk"
                | "trunk_link"
                | "primary"
                | "primary_link"
                | "secondary"
                | "secondary_link"
                | "tertiary"
                | "tertiary_link"
                | "unclassified"
                | "road"
                | "service"
        )
    )
}
