use geo::Point;
use itertools::Itertools;

use crate::{
    Error, NodeId, WayId,
    model::{Crossing, VehicleType},
    store::NetworkStore,
    weighting::{WeightCalculator, cut},
};

/// Turns a node path back into geometry, re-deriving for every hop which way
/// carries it instead of trusting the search's bookkeeping.
pub struct PathReconstructor<'a, S> {
    store: &'a S,
    weights: &'a WeightCalculator,
}

/// The way chosen for one hop and where the hop starts and ends on it
struct Hop {
    way: WayId,
    distance: f64,
    from_position: usize,
    to_position: usize,
}

impl<'a, S: NetworkStore> PathReconstructor<'a, S> {
    pub fn new(store: &'a S, weights: &'a WeightCalculator) -> Self {
        Self { store, weights }
    }

    /// Geometry of the path and its length in meters. Only ways `vehicle`
    /// may use are considered for a hop.
    pub fn calculate_path_information(
        &self,
        path: &[NodeId],
        vehicle: VehicleType,
    ) -> Result<(Vec<Point<f64>>, f64), Error> {
        match path {
            [] => return Ok((Vec::new(), 0.0)),
            [only] => {
                let node = self.store.node(*only)?.ok_or(Error::NodeNotFound(*only))?;
                return Ok((vec![node.point()], 0.0));
            }
            _ => {}
        }

        let mut points: Vec<Point<f64>> = Vec::new();
        let mut total = 0.0;

        for (prev, next) in path.iter().copied().tuple_windows() {
            let (hop, crossings) = self.choose_hop(prev, next, vehicle)?;
            total += hop.distance;

            let (lo, hi) = if hop.from_position <= hop.to_position {
                (hop.from_position, hop.to_position)
            } else {
                (hop.to_position, hop.from_position)
            };
            let slice = crossings.get(lo..=hi).ok_or(Error::NodeNotOnWay {
                node: next,
                way: hop.way,
            })?;

            let mut hop_points: Vec<Point<f64>> = slice.iter().map(|c| c.point).collect();
            if hop.from_position > hop.to_position {
                hop_points.reverse();
            }

            // the joint node closes the previous hop
            let skip = usize::from(!points.is_empty());
            points.extend(hop_points.into_iter().skip(skip));
        }

        Ok((points, total))
    }

    /// Shortest usable way carrying `prev -> next`, lowest way id on equal distances
    fn choose_hop(
        &self,
        prev: NodeId,
        next: NodeId,
        vehicle: VehicleType,
    ) -> Result<(Hop, Vec<Crossing>), Error> {
        let ways: Vec<_> = self
            .store
            .ways_connecting(prev, next)?
            .into_iter()
            .filter(|way| self.weights.is_way_allowed(way, vehicle))
            .collect();
        let Some(first_way) = ways.first().map(|w| w.id) else {
            return Err(Error::NoConnectingWay {
                from: prev,
                to: next,
            });
        };

        let mut best: Option<(Hop, Vec<Crossing>)> = None;

        for way in &ways {
            let crossings = self.store.ordered_crossings(way.id)?;
            let Some(cut_nodes) = self.weights.cut_path_nodes(prev, way, &crossings) else {
                continue;
            };
            let Some(from) = cut::position_of(prev, cut_nodes).map(|idx| cut_nodes[idx]) else {
                continue;
            };

            let reached = self
                .weights
                .calculate_distances(prev, cut_nodes, next)
                .into_iter()
                .filter(|(c, _)| c.id == next)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((to, distance)) = reached else {
                log::trace!("Node {next} not reachable from {prev} along way {}", way.id);
                continue;
            };

            if best.as_ref().is_none_or(|(hop, _)| distance < hop.distance) {
                let hop = Hop {
                    way: way.id,
                    distance,
                    from_position: from.position,
                    to_position: to.position,
                };
                best = Some((hop, crossings));
            }
        }

        best.ok_or(Error::NodeNotOnWay {
            node: next,
            way: first_way,
        })
    }
}
