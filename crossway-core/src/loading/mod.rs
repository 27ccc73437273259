//! This module is responsible for loading a persisted road network snapshot
//! and building the in-memory network queries run against.

mod builder;
mod snapshot;

pub use builder::{load_network, network_from_snapshot};
pub use snapshot::{NetworkSnapshot, SnapshotNode, SnapshotWay};
