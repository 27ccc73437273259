//! Per-query edge derivation: which nodes a step along a way reaches and what
//! it costs for a given vehicle.

pub mod cut;
pub mod speed;
pub mod turn;

use std::collections::BTreeMap;

use geo::Point;
use itertools::Itertools;

use crate::{
    Cost, NodeId,
    config::WeightingConfig,
    geodesy,
    model::{Crossing, Node, RoadClass, VehicleType, Way},
};

pub use cut::Direction;

/// Owns the (immutable) speed tables and penalties used for costing
#[derive(Debug, Clone, Default)]
pub struct WeightCalculator {
    config: WeightingConfig,
}

impl WeightCalculator {
    pub fn new(config: WeightingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightingConfig {
        &self.config
    }

    pub fn is_way_allowed(&self, way: &Way, vehicle: VehicleType) -> bool {
        vehicle.allows(RoadClass::of(way))
    }

    /// Seconds per meter at the vehicle's absolute top speed; no edge can be cheaper
    pub fn maximum_way_factor(&self, vehicle: VehicleType) -> f64 {
        3.6 / self.config.vehicle_speeds.get(vehicle)
    }

    /// Seconds per meter along `way`
    pub fn way_factor(&self, way: &Way, vehicle: VehicleType) -> f64 {
        let vehicle_speed = self.config.vehicle_speeds.get(vehicle);
        let way_speed = speed::way_max_speed(way, &self.config);
        3.6 / way_speed.min(vehicle_speed)
    }

    /// Turn penalty for arriving at `curr` from `prev` and leaving towards `next`
    pub fn crossing_factor(
        &self,
        prev: Option<Point<f64>>,
        curr: Point<f64>,
        next: Point<f64>,
        vehicle: VehicleType,
    ) -> f64 {
        if vehicle != VehicleType::Car {
            return 0.0;
        }
        let Some(prev) = prev else {
            return 0.0;
        };
        // bearings are undefined for coincident points
        if prev == curr || next == curr {
            return 0.0;
        }

        turn::penalty_for_deviation(turn::turn_deviation(prev, curr, next), &self.config)
    }

    pub fn cut_path_nodes<'a>(
        &self,
        from: NodeId,
        way: &Way,
        nodes: &'a [Crossing],
    ) -> Option<&'a [Crossing]> {
        cut::cut_path_nodes(from, way, nodes)
    }

    /// Distances (m) from `from` along a cut segment to both of its ends and,
    /// when it lies on the segment, to `destination`.
    pub fn calculate_distances(
        &self,
        from: NodeId,
        cut: &[Crossing],
        destination: NodeId,
    ) -> Vec<(Crossing, f64)> {
        let (Some(first), Some(last)) = (cut.first(), cut.last()) else {
            return Vec::new();
        };

        let offsets: Vec<f64> = std::iter::once(0.0)
            .chain(
                cut.iter()
                    .tuple_windows()
                    .map(|(a, b)| geodesy::distance(a.point, b.point))
                    .scan(0.0, |acc, d| {
                        *acc += d;
                        Some(*acc)
                    }),
            )
            .collect();

        let Some(from_idx) = cut::position_of(from, cut) else {
            return Vec::new();
        };
        let from_offset = offsets[from_idx];
        let full = offsets[offsets.len() - 1];

        let mut out = vec![(*first, from_offset), (*last, full - from_offset)];

        if let Some((idx, d)) = cut
            .iter()
            .enumerate()
            .filter(|(_, c)| c.id == destination)
            .map(|(idx, _)| (idx, (offsets[idx] - from_offset).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
        {
            out.push((cut[idx], d));
        }

        out
    }

    /// Neighbors reachable from `from` along `way` and their cost. When a
    /// neighbor shows up more than once the cheaper entry wins.
    pub fn calculate_weights(
        &self,
        prev: Option<&Node>,
        from: &Crossing,
        way: &Way,
        nodes: &[Crossing],
        destination: NodeId,
        vehicle: VehicleType,
    ) -> BTreeMap<NodeId, Cost> {
        let mut out = BTreeMap::new();

        let Some(cut) = self.cut_path_nodes(from.id, way, nodes) else {
            log::trace!("No traversable segment from node {} on way {}", from.id, way.id);
            return out;
        };

        let way_factor = self.way_factor(way, vehicle);
        let prev_point = prev.map(Node::point);

        for (target, distance) in self.calculate_distances(from.id, cut, destination) {
            if target.id == from.id {
                continue;
            }
            let cost = distance * way_factor
                + self.crossing_factor(prev_point, from.point, target.point, vehicle);

            out.entry(target.id)
                .and_modify(|existing: &mut Cost| *existing = existing.min(cost))
                .or_insert(cost);
        }

        out
    }
}
