//! Data model for road routing
//!
//! Contains the persisted network facts (nodes, ways, crossings), travel
//! modes, searchable addresses and the route result.

pub mod address;
pub mod network;
pub mod route;
pub mod vehicle;

pub use address::{Address, OsmKind};
pub use network::{Crossing, Node, Tags, Way};
pub use route::{Route, routes_to_geojson};
pub use vehicle::{HighwayClass, RoadClass, VehicleType};
