//! Query-time road routing over a persisted OSM-like network.
//!
//! Edges and their costs are derived per query straight from ways, nodes and
//! tags; there is no precomputed weighted graph. A* search runs on top of
//! that on-demand expansion and the resulting node path is turned back into
//! geometry afterwards.

pub mod config;
pub mod error;
pub mod geodesy;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;
pub mod weighting;

pub use config::{LocatorConfig, RouterConfig, WeightingConfig};
pub use error::Error;
pub use model::{Address, Crossing, Node, OsmKind, Route, Tags, VehicleType, Way};
pub use routing::{RoutePlanner, find_routes};
pub use store::{InMemoryNetwork, NetworkBuilder, NetworkStore};

/// OSM node identifier
pub type NodeId = i64;
/// OSM way identifier
pub type WayId = i64;
/// Travel cost in seconds
pub type Cost = f64;

/// Default visited-node cap for a single search
pub const MAX_VISITED_NODES: usize = 500_000;
