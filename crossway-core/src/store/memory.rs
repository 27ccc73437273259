//! In-memory network with hash indices and an R-tree over node positions

use hashbrown::{HashMap, HashSet};
use log::{info, warn};
use rstar::{AABB, RTree, primitives::GeomWithData};

use super::{NetworkStore, address::AddressIndex};
use crate::{
    Error, NodeId, WayId,
    model::{Address, Crossing, Node, OsmKind, Way},
};

/// `[lon, lat]` position tagged with its node id
type IndexedNode = GeomWithData<[f64; 2], NodeId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStats {
    pub nodes: usize,
    pub ways: usize,
    pub crossings: usize,
    pub addresses: usize,
}

/// Whole network held in memory, safe to share between query threads
#[derive(Debug)]
pub struct InMemoryNetwork {
    nodes: HashMap<NodeId, Node>,
    ways: HashMap<WayId, Way>,
    /// Incident way ids per node, ascending
    node_ways: HashMap<NodeId, Vec<WayId>>,
    rtree: RTree<IndexedNode>,
    addresses: AddressIndex,
}

impl InMemoryNetwork {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            nodes: self.nodes.len(),
            ways: self.ways.len(),
            crossings: self.nodes.values().filter(|n| n.is_crossing).count(),
            addresses: self.addresses.len(),
        }
    }

    /// Addresses matching every word of `query`, see [`AddressIndex::search`]
    pub fn search_addresses(&self, query: &str, limit: usize) -> Vec<Address> {
        self.addresses.search(query, limit)
    }

    /// Address by the OSM id a search returned
    pub fn locate_address(&self, osm_id: i64) -> Option<&Address> {
        self.addresses.locate(osm_id)
    }

    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.ways.get(&id)
    }

    fn ways_by_ids(&self, ids: impl IntoIterator<Item = WayId>) -> Vec<Way> {
        ids.into_iter()
            .filter_map(|id| self.ways.get(&id).cloned())
            .collect()
    }
}

impl NetworkStore for InMemoryNetwork {
    fn node(&self, id: NodeId) -> Result<Option<Node>, Error> {
        Ok(self.nodes.get(&id).cloned())
    }

    fn nodes_near(&self, lat: f64, lon: f64, radius_deg: f64) -> Result<Vec<Node>, Error> {
        let envelope = AABB::from_corners(
            [lon - radius_deg, lat - radius_deg],
            [lon + radius_deg, lat + radius_deg],
        );

        let mut found: Vec<Node> = self
            .rtree
            .locate_in_envelope(&envelope)
            .filter_map(|entry| self.nodes.get(&entry.data).cloned())
            .collect();
        found.sort_unstable_by_key(|n| n.id);

        Ok(found)
    }

    fn ways_incident_to(&self, id: NodeId) -> Result<Vec<Way>, Error> {
        let ids = self.node_ways.get(&id).map(Vec::as_slice).unwrap_or_default();
        Ok(self.ways_by_ids(ids.iter().copied()))
    }

    fn ways_connecting(&self, a: NodeId, b: NodeId) -> Result<Vec<Way>, Error> {
        let (Some(ways_a), Some(ways_b)) = (self.node_ways.get(&a), self.node_ways.get(&b)) else {
            return Ok(Vec::new());
        };

        let shared = ways_a
            .iter()
            .copied()
            .filter(|id| ways_b.binary_search(id).is_ok());

        Ok(self.ways_by_ids(shared))
    }

    fn ordered_crossings(&self, way: WayId) -> Result<Vec<Crossing>, Error> {
        let Some(way) = self.ways.get(&way) else {
            return Ok(Vec::new());
        };

        way.nodes
            .iter()
            .enumerate()
            .map(|(position, id)| {
                self.nodes
                    .get(id)
                    .map(|node| Crossing::from_node(node, position))
                    .ok_or_else(|| {
                        Error::Storage(format!("way {} references missing node {id}", way.id))
                    })
            })
            .collect()
    }
}

/// Collects nodes and ways, then derives crossing flags and indices
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    ways: Vec<Way>,
}

impl NetworkBuilder {
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_way(&mut self, way: Way) -> &mut Self {
        self.ways.push(way);
        self
    }

    /// Shorthand for an untagged node
    pub fn node(&mut self, id: NodeId, lat: f64, lon: f64) -> &mut Self {
        self.add_node(Node::new(id, lat, lon))
    }

    /// Shorthand for a way with the given tags
    pub fn way(&mut self, id: WayId, nodes: &[NodeId], tags: &[(&str, &str)]) -> &mut Self {
        let way = tags
            .iter()
            .fold(Way::new(id, nodes.to_vec()), |w, (k, v)| w.with_tag(k, v));
        self.add_way(way)
    }

    pub fn build(&mut self) -> InMemoryNetwork {
        let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(self.nodes.len());
        for node in self.nodes.drain(..) {
            if let Some(previous) = nodes.insert(node.id, node) {
                warn!("Duplicate node {}, keeping the last one", previous.id);
            }
        }

        let mut ways: HashMap<WayId, Way> = HashMap::with_capacity(self.ways.len());
        for way in self.ways.drain(..) {
            if way.nodes.len() < 2 {
                warn!("Way {} has fewer than two nodes - skipping", way.id);
                continue;
            }
            if let Some(missing) = way.nodes.iter().find(|id| !nodes.contains_key(*id)) {
                warn!("Way {} references unknown node {missing} - skipping", way.id);
                continue;
            }
            if ways.insert(way.id, way).is_some() {
                warn!("Duplicate way id, keeping the last one");
            }
        }

        let mut node_ways: HashMap<NodeId, Vec<WayId>> = HashMap::new();
        for way in ways.values() {
            let distinct: HashSet<NodeId> = way.nodes.iter().copied().collect();
            for id in distinct {
                node_ways.entry(id).or_default().push(way.id);
            }
        }
        for way_ids in node_ways.values_mut() {
            way_ids.sort_unstable();
        }

        for node in nodes.values_mut() {
            node.is_crossing = node_ways.get(&node.id).is_some_and(|w| w.len() >= 2);
        }

        let addresses = collect_addresses(&nodes, &ways);

        let points: Vec<IndexedNode> = nodes
            .values()
            .map(|n| GeomWithData::new([n.lon, n.lat], n.id))
            .collect();

        let network = InMemoryNetwork {
            nodes,
            ways,
            node_ways,
            rtree: RTree::bulk_load(points),
            addresses: AddressIndex::new(addresses),
        };

        let stats = network.stats();
        info!(
            "Built road network: {} nodes, {} ways, {} crossings, {} addresses",
            stats.nodes, stats.ways, stats.crossings, stats.addresses
        );

        network
    }
}

/// Addresses of tagged nodes and ways. A way's address sits at its middle node.
fn collect_addresses(nodes: &HashMap<NodeId, Node>, ways: &HashMap<WayId, Way>) -> Vec<Address> {
    let from_nodes = nodes
        .values()
        .filter_map(|n| Address::from_tags(OsmKind::Node, n.id, n.lat, n.lon, &n.tags));

    let from_ways = ways.values().filter_map(|way| {
        let anchor = way.nodes.get(way.nodes.len() / 2).and_then(|id| nodes.get(id))?;
        Address::from_tags(OsmKind::Way, way.id, anchor.lat, anchor.lon, &way.tags)
    });

    from_nodes.chain(from_ways).collect()
}
