pub use crate::MAX_VISITED_NODES;

// Re-export key components
pub use crate::config::{LocatorConfig, RouterConfig, WeightingConfig};
pub use crate::loading::{load_network, network_from_snapshot};
pub use crate::model::{Address, Route, VehicleType, routes_to_geojson};
pub use crate::routing::{RoutePlanner, find_routes};
pub use crate::store::{InMemoryNetwork, NetworkBuilder, NetworkStore};
pub use crate::weighting::WeightCalculator;

// Core types for the road network
pub use crate::Cost; // seconds
pub use crate::Error;
pub use crate::NodeId;
pub use crate::WayId;
pub use crate::model::{Crossing, Node, Tags, Way};
