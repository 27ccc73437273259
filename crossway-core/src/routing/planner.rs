use std::time::Instant;

use geo::Point;
use itertools::Itertools;
use rayon::prelude::*;

use super::{
    astar::{SearchLimits, astar},
    edges::EdgeExpander,
    heuristic::DestinationHeuristic,
    locate::NearestNodeLocator,
    path::PathReconstructor,
};
use crate::{
    Error,
    config::RouterConfig,
    model::{Node, Route, VehicleType},
    store::NetworkStore,
    weighting::WeightCalculator,
};

/// Answers route queries against a network store.
///
/// Holds no per-query state, so one planner can serve any number of
/// concurrent queries as long as the store supports concurrent reads.
pub struct RoutePlanner<S> {
    store: S,
    config: RouterConfig,
    weights: WeightCalculator,
}

impl<S: NetworkStore> RoutePlanner<S> {
    /// Fails with [`Error::InvalidConfig`] when the configuration could yield
    /// negative or non-finite costs.
    pub fn new(store: S, config: RouterConfig) -> Result<Self, Error> {
        config.validate()?;
        let weights = WeightCalculator::new(config.weighting.clone());
        Ok(Self {
            store,
            config,
            weights,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn weights(&self) -> &WeightCalculator {
        &self.weights
    }

    /// Nearest node `vehicle` can start from or arrive at
    pub fn locate(&self, point: Point<f64>, vehicle: VehicleType) -> Result<Node, Error> {
        NearestNodeLocator::new(&self.store, &self.weights, &self.config.locator)
            .nearest(point, vehicle)
    }

    /// Route between two arbitrary points (`x` = lon, `y` = lat)
    pub fn find_route(
        &self,
        start: Point<f64>,
        end: Point<f64>,
        vehicle: VehicleType,
    ) -> Result<Route, Error> {
        let started = Instant::now();
        let start_node = self.locate(start, vehicle)?;
        let end_node = self.locate(end, vehicle)?;
        log::debug!(
            "Located nodes {} -> {} in {:?}",
            start_node.id,
            end_node.id,
            started.elapsed()
        );

        self.route_between((start, &start_node), (end, &end_node), vehicle)
    }

    /// One route per consecutive pair of waypoints. Every waypoint is
    /// located before any leg is searched.
    pub fn find_route_through(
        &self,
        waypoints: &[Point<f64>],
        vehicle: VehicleType,
    ) -> Result<Vec<Route>, Error> {
        if waypoints.len() < 2 {
            return Err(Error::InvalidData(format!(
                "at least two waypoints are required, got {}",
                waypoints.len()
            )));
        }

        let nodes = waypoints
            .iter()
            .map(|point| self.locate(*point, vehicle))
            .collect::<Result<Vec<_>, _>>()?;

        waypoints
            .iter()
            .zip(&nodes)
            .tuple_windows()
            .map(|((start, start_node), (end, end_node))| {
                self.route_between((*start, start_node), (*end, end_node), vehicle)
            })
            .collect()
    }

    /// Searches between two located nodes; the query points only bound the
    /// returned geometry.
    fn route_between(
        &self,
        (query_start, start): (Point<f64>, &Node),
        (query_end, end): (Point<f64>, &Node),
        vehicle: VehicleType,
    ) -> Result<Route, Error> {
        let limits = SearchLimits {
            max_visited_nodes: self.config.max_visited_nodes,
            deadline: self
                .config
                .query_timeout()
                .and_then(|timeout| Instant::now().checked_add(timeout)),
        };

        let expander = EdgeExpander::new(&self.store, &self.weights, end.id, vehicle);
        let heuristic = DestinationHeuristic::new(&self.store, &self.weights, end.point(), vehicle);

        let search_started = Instant::now();
        let (nodes, cost) = astar(start.id, end.id, &expander, &heuristic, limits)?;
        log::debug!(
            "Search {} -> {} settled {} nodes, cost {:.1}s in {:?}",
            start.id,
            end.id,
            nodes.len(),
            cost,
            search_started.elapsed()
        );

        let reconstruct_started = Instant::now();
        let (points, distance) = PathReconstructor::new(&self.store, &self.weights)
            .calculate_path_information(&nodes, vehicle)?;
        log::debug!(
            "Reconstructed {} points, {distance:.1} m in {:?}",
            points.len(),
            reconstruct_started.elapsed()
        );

        Ok(Route {
            points,
            distance_meters: distance,
            cost_seconds: cost,
            nodes,
            vehicle,
            query_start,
            query_end,
        })
    }
}

/// Runs independent start/end queries in parallel. Results keep the input order.
pub fn find_routes<S>(
    planner: &RoutePlanner<S>,
    queries: &[(Point<f64>, Point<f64>)],
    vehicle: VehicleType,
) -> Vec<Result<Route, Error>>
where
    S: NetworkStore + Sync,
{
    let started = Instant::now();
    let results: Vec<_> = queries
        .par_iter()
        .map(|&(start, end)| planner.find_route(start, end, vehicle))
        .collect();

    let found = results.iter().filter(|r| r.is_ok()).count();
    log::info!(
        "Batch of {} queries done in {:?}, {found} routes found",
        queries.len(),
        started.elapsed()
    );

    results
}
