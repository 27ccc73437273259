use geo::Point;

use super::astar::Heuristic;
use crate::{
    Cost, Error, NodeId, geodesy, model::VehicleType, store::NetworkStore,
    weighting::WeightCalculator,
};

/// Straight-line travel time to the destination at the vehicle's top speed.
/// Never overestimates, as no way can be traversed faster than that.
pub struct DestinationHeuristic<'a, S> {
    store: &'a S,
    destination: Point<f64>,
    factor: f64,
}

impl<'a, S: NetworkStore> DestinationHeuristic<'a, S> {
    pub fn new(
        store: &'a S,
        weights: &WeightCalculator,
        destination: Point<f64>,
        vehicle: VehicleType,
    ) -> Self {
        Self {
            store,
            destination,
            factor: weights.maximum_way_factor(vehicle),
        }
    }
}

impl<S: NetworkStore> Heuristic<NodeId, Cost> for DestinationHeuristic<'_, S> {
    fn estimate(&self, node: NodeId) -> Result<Cost, Error> {
        // zero is still a valid lower bound
        let Some(node) = self.store.node(node)? else {
            return Ok(0.0);
        };
        Ok(geodesy::distance(node.point(), self.destination) * self.factor)
    }
}
