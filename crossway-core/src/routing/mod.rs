pub mod astar;
pub mod edges;
pub mod heuristic;
pub mod locate;
pub mod path;
pub mod planner;
pub mod priority_queue;

pub use astar::{Heuristic, NeighborExpander, SearchLimits, astar};
pub use edges::EdgeExpander;
pub use heuristic::DestinationHeuristic;
pub use locate::NearestNodeLocator;
pub use path::PathReconstructor;
pub use planner::{RoutePlanner, find_routes};
pub use priority_queue::PriorityQueue;
