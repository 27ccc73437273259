//! Read-only access to the persisted road network.
//!
//! Routing never owns the network; it asks a [`NetworkStore`] for the few
//! facts a query step needs. Every lookup is a blocking call and storage
//! failures are returned as [`Error::Storage`](crate::Error::Storage).

mod address;
mod memory;

pub use address::AddressIndex;
pub use memory::{InMemoryNetwork, NetworkBuilder, NetworkStats};

use crate::{
    Error, NodeId, WayId,
    model::{Crossing, Node, Way},
};

pub trait NetworkStore {
    /// `Ok(None)` when no node has this id
    fn node(&self, id: NodeId) -> Result<Option<Node>, Error>;

    /// Nodes inside the box of half-width `radius_deg` around the point
    fn nodes_near(&self, lat: f64, lon: f64, radius_deg: f64) -> Result<Vec<Node>, Error>;

    fn ways_incident_to(&self, id: NodeId) -> Result<Vec<Way>, Error>;

    /// Ways containing both nodes
    fn ways_connecting(&self, a: NodeId, b: NodeId) -> Result<Vec<Way>, Error>;

    /// The way's node sequence in mapping order, each entry flagged
    fn ordered_crossings(&self, way: WayId) -> Result<Vec<Crossing>, Error>;
}

impl<S: NetworkStore + ?Sized> NetworkStore for &S {
    fn node(&self, id: NodeId) -> Result<Option<Node>, Error> {
        (**self).node(id)
    }

    fn nodes_near(&self, lat: f64, lon: f64, radius_deg: f64) -> Result<Vec<Node>, Error> {
        (**self).nodes_near(lat, lon, radius_deg)
    }

    fn ways_incident_to(&self, id: NodeId) -> Result<Vec<Way>, Error> {
        (**self).ways_incident_to(id)
    }

    fn ways_connecting(&self, a: NodeId, b: NodeId) -> Result<Vec<Way>, Error> {
        (**self).ways_connecting(a, b)
    }

    fn ordered_crossings(&self, way: WayId) -> Result<Vec<Crossing>, Error> {
        (**self).ordered_crossings(way)
    }
}
