//! Road network components - nodes, ways and crossings

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{NodeId, WayId};

/// Open string-keyed OSM tag map
pub type Tags = hashbrown::HashMap<String, String>;

/// Road network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// OSM ID of the node
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Tags,
    /// Shared by at least two ways of the network
    #[serde(default)]
    pub is_crossing: bool,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            lat,
            lon,
            tags: Tags::new(),
            is_crossing: false,
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    /// Node coordinates (`x` = lon, `y` = lat)
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Tagged, ordered polyline of nodes.
///
/// The node order is the one the way was mapped in and is the only source of
/// truth for `oneway` semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    /// OSM ID of the way
    pub id: WayId,
    #[serde(default)]
    pub tags: Tags,
    pub nodes: Vec<NodeId>,
}

impl Way {
    pub fn new(id: WayId, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            tags: Tags::new(),
            nodes,
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// A node seen through one way's node sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub id: NodeId,
    /// Index of this entry in the way's node sequence
    pub position: usize,
    pub point: Point<f64>,
    pub is_crossing: bool,
}

impl Crossing {
    pub fn from_node(node: &Node, position: usize) -> Self {
        Self {
            id: node.id,
            position,
            point: node.point(),
            is_crossing: node.is_crossing,
        }
    }
}
