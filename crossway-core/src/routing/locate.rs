use geo::Point;

use crate::{
    Error, NodeId,
    config::LocatorConfig,
    geodesy,
    model::{Node, VehicleType},
    store::NetworkStore,
    weighting::WeightCalculator,
};

/// Snaps query points onto the closest node a vehicle can actually leave
pub struct NearestNodeLocator<'a, S> {
    store: &'a S,
    weights: &'a WeightCalculator,
    config: &'a LocatorConfig,
}

impl<'a, S: NetworkStore> NearestNodeLocator<'a, S> {
    pub fn new(store: &'a S, weights: &'a WeightCalculator, config: &'a LocatorConfig) -> Self {
        Self {
            store,
            weights,
            config,
        }
    }

    /// Closest usable node to `point` (`x` = lon, `y` = lat). Search boxes are
    /// tried in configured order; equal distances resolve to the lower node id.
    pub fn nearest(&self, point: Point<f64>, vehicle: VehicleType) -> Result<Node, Error> {
        for &radius in &self.config.search_radii {
            let mut candidates: Vec<(f64, Node)> = self
                .store
                .nodes_near(point.y(), point.x(), radius)?
                .into_iter()
                .map(|node| (geodesy::distance(node.point(), point), node))
                .collect();
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));

            for (_, node) in candidates {
                if self.is_usable(node.id, vehicle)? {
                    return Ok(node);
                }
            }
            log::debug!("No usable node within {radius}° of ({}, {})", point.y(), point.x());
        }

        Err(Error::NoNearbyNode {
            lat: point.y(),
            lon: point.x(),
        })
    }

    /// At least one allowed way leaves the node
    pub fn is_usable(&self, id: NodeId, vehicle: VehicleType) -> Result<bool, Error> {
        for way in self.store.ways_incident_to(id)? {
            if !self.weights.is_way_allowed(&way, vehicle) {
                continue;
            }
            let crossings = self.store.ordered_crossings(way.id)?;
            if self.weights.cut_path_nodes(id, &way, &crossings).is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
