use serde::{Deserialize, Serialize};

use crate::{
    NodeId, Tags, WayId,
    model::{Node, Way},
};

/// Persisted form of the road network as written by the ingestion pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub ways: Vec<SnapshotWay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotWay {
    pub id: WayId,
    #[serde(default)]
    pub tags: Tags,
    pub nodes: Vec<NodeId>,
}

impl From<SnapshotNode> for Node {
    fn from(raw: SnapshotNode) -> Self {
        Node {
            tags: raw.tags,
            ..Node::new(raw.id, raw.lat, raw.lon)
        }
    }
}

impl From<SnapshotWay> for Way {
    fn from(raw: SnapshotWay) -> Self {
        Way {
            id: raw.id,
            tags: raw.tags,
            nodes: raw.nodes,
        }
    }
}
