use std::collections::BTreeMap;

use super::astar::NeighborExpander;
use crate::{
    Cost, Error, NodeId,
    model::VehicleType,
    store::NetworkStore,
    weighting::{WeightCalculator, cut},
};

/// Derives the outgoing edges of a node from the ways passing through it,
/// for one query's destination and vehicle.
pub struct EdgeExpander<'a, S> {
    store: &'a S,
    weights: &'a WeightCalculator,
    destination: NodeId,
    vehicle: VehicleType,
}

impl<'a, S: NetworkStore> EdgeExpander<'a, S> {
    pub fn new(
        store: &'a S,
        weights: &'a WeightCalculator,
        destination: NodeId,
        vehicle: VehicleType,
    ) -> Self {
        Self {
            store,
            weights,
            destination,
            vehicle,
        }
    }

    /// Neighbors of `id` keyed by node id, each with the cheapest cost over
    /// all ways reaching it.
    pub fn edges(
        &self,
        id: NodeId,
        previous: Option<NodeId>,
    ) -> Result<BTreeMap<NodeId, Cost>, Error> {
        let ways = self.store.ways_incident_to(id)?;

        let prev_node = match previous {
            Some(prev) => self.store.node(prev)?,
            None => None,
        };

        let mut result: BTreeMap<NodeId, Cost> = BTreeMap::new();

        for way in &ways {
            if !self.weights.is_way_allowed(way, self.vehicle) {
                log::trace!("Way {} not allowed for {}", way.id, self.vehicle);
                continue;
            }

            let crossings = self.store.ordered_crossings(way.id)?;
            let Some(from) = cut::position_of(id, &crossings).map(|idx| crossings[idx]) else {
                log::trace!("Node {id} missing from way {}", way.id);
                continue;
            };

            let weights = self.weights.calculate_weights(
                prev_node.as_ref(),
                &from,
                way,
                &crossings,
                self.destination,
                self.vehicle,
            );

            for (neighbor, cost) in weights {
                if neighbor == id {
                    continue;
                }
                result
                    .entry(neighbor)
                    .and_modify(|existing| {
                        if cost < *existing {
                            *existing = cost;
                        }
                    })
                    .or_insert(cost);
            }
        }

        Ok(result)
    }
}

impl<S: NetworkStore> NeighborExpander<NodeId, Cost> for EdgeExpander<'_, S> {
    fn expand(&self, node: NodeId, previous: Option<NodeId>) -> Result<Vec<(NodeId, Cost)>, Error> {
        Ok(self.edges(node, previous)?.into_iter().collect())
    }
}
