//! A* search generic over the node key and the cost type.
//!
//! The open set is a max-priority queue holding negated `g + h` values, so the
//! cheapest candidate pops first. There is no closed set: a node is pushed
//! again whenever its `g` strictly improves, and stale entries are expanded
//! with their current best `g`.

use std::{
    hash::Hash,
    ops::{Add, Neg},
    time::Instant,
};

use hashbrown::{HashMap, hash_map::Entry};

use super::priority_queue::PriorityQueue;
use crate::{Error, MAX_VISITED_NODES};

/// Produces the outgoing `(neighbor, weight)` pairs of a node
pub trait NeighborExpander<K, N> {
    /// `previous` is the node `node` was reached from, if any
    fn expand(&self, node: K, previous: Option<K>) -> Result<Vec<(K, N)>, Error>;
}

/// Lower bound of the remaining cost from a node to the destination
pub trait Heuristic<K, N> {
    fn estimate(&self, node: K) -> Result<N, Error>;
}

/// Bounds on the work a single search may do
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub max_visited_nodes: usize,
    pub deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_visited_nodes: MAX_VISITED_NODES,
            deadline: None,
        }
    }
}

/// Finds the cheapest path from `start` to `end`.
///
/// Returns the node path (start and end included) and its accumulated cost.
pub fn astar<K, N, E, H>(
    start: K,
    end: K,
    expander: &E,
    heuristic: &H,
    limits: SearchLimits,
) -> Result<(Vec<K>, N), Error>
where
    K: Copy + Eq + Hash,
    N: Copy + PartialOrd + Add<Output = N> + Neg<Output = N> + Default,
    E: NeighborExpander<K, N>,
    H: Heuristic<K, N>,
{
    let mut open: PriorityQueue<K, N> = PriorityQueue::new();
    let mut g_score: HashMap<K, N> = HashMap::new();
    let mut parent: HashMap<K, K> = HashMap::new();

    open.push(start, N::default());
    g_score.insert(start, N::default());

    let mut iterations = 0usize;

    while let Some((current, _)) = open.pop() {
        if current == end {
            let path = reconstruct(&parent, start, end);
            let cost = g_score.get(&end).copied().unwrap_or_default();
            log::debug!("A* reached destination after {iterations} iterations");
            return Ok((path, cost));
        }

        iterations += 1;
        if iterations >= limits.max_visited_nodes {
            return Err(Error::VisitLimitReached {
                iterations,
                limit: limits.max_visited_nodes,
            });
        }
        if limits.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::DeadlineExceeded { iterations });
        }

        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };

        for (neighbor, weight) in expander.expand(current, parent.get(&current).copied())? {
            let tentative = current_g + weight;

            match g_score.entry(neighbor) {
                Entry::Vacant(entry) => {
                    entry.insert(tentative);
                }
                Entry::Occupied(mut entry) => {
                    if tentative < *entry.get() {
                        *entry.get_mut() = tentative;
                    } else {
                        continue;
                    }
                }
            }

            parent.insert(neighbor, current);
            let estimate = heuristic.estimate(neighbor)?;
            open.push(neighbor, -(tentative + estimate));
        }
    }

    log::debug!("A* exhausted the open set after {iterations} iterations");
    Err(Error::NoRouteFound { iterations })
}

fn reconstruct<K: Copy + Eq + Hash>(parent: &HashMap<K, K>, start: K, end: K) -> Vec<K> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        match parent.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Directed adjacency list
    struct Graph(HashMap<u32, Vec<(u32, f64)>>);

    impl Graph {
        fn new(edges: &[(u32, u32, f64)]) -> Self {
            let mut adjacency: HashMap<u32, Vec<(u32, f64)>> = HashMap::new();
            for &(a, b, w) in edges {
                adjacency.entry(a).or_default().push((b, w));
            }
            Self(adjacency)
        }
    }

    impl NeighborExpander<u32, f64> for Graph {
        fn expand(&self, node: u32, _previous: Option<u32>) -> Result<Vec<(u32, f64)>, Error> {
            Ok(self.0.get(&node).cloned().unwrap_or_default())
        }
    }

    struct Zero;

    impl Heuristic<u32, f64> for Zero {
        fn estimate(&self, _node: u32) -> Result<f64, Error> {
            Ok(0.0)
        }
    }

    /// Exact remaining costs for the diamond below
    struct Exact;

    impl Heuristic<u32, f64> for Exact {
        fn estimate(&self, node: u32) -> Result<f64, Error> {
            Ok(match node {
                1 => 4.0,
                2 => 3.0,
                3 => 1.0,
                _ => 0.0,
            })
        }
    }

    fn diamond() -> Graph {
        // 1 -> 2 -> 4 costs 5, 1 -> 3 -> 4 costs 4
        Graph::new(&[(1, 2, 2.0), (2, 4, 3.0), (1, 3, 3.0), (3, 4, 1.0)])
    }

    #[test]
    fn finds_cheapest_path() {
        let graph = diamond();
        let (path, cost) = astar(1, 4, &graph, &Zero, SearchLimits::default()).unwrap();
        assert_eq!(path, vec![1, 3, 4]);
        assert_eq!(cost, 4.0);

        let (path, cost) = astar(1, 4, &graph, &Exact, SearchLimits::default()).unwrap();
        assert_eq!(path, vec![1, 3, 4]);
        assert_eq!(cost, 4.0);
    }

    #[test]
    fn improved_relaxation_is_reexpanded() {
        // 3 is first reached at cost 10 and later at cost 2
        let graph = Graph::new(&[(1, 3, 10.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]);
        let (path, cost) = astar(1, 4, &graph, &Zero, SearchLimits::default()).unwrap();
        assert_eq!(path, vec![1, 2, 3, 4]);
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn start_equals_end() {
        let graph = diamond();
        let (path, cost) = astar(1, 1, &graph, &Zero, SearchLimits::default()).unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn unreachable_destination_reports_iterations() {
        let graph = Graph::new(&[(1, 2, 1.0), (2, 1, 1.0)]);
        let err = astar(1, 9, &graph, &Zero, SearchLimits::default()).unwrap_err();
        assert!(matches!(err, Error::NoRouteFound { iterations } if iterations >= 2));
        assert!(err.is_no_route());
    }

    #[test]
    fn visit_cap_stops_the_search() {
        let edges: Vec<_> = (0..100).map(|i| (i, i + 1, 1.0)).collect();
        let graph = Graph::new(&edges);
        let limits = SearchLimits {
            max_visited_nodes: 10,
            deadline: None,
        };

        let err = astar(0, 100, &graph, &Zero, limits).unwrap_err();
        assert!(matches!(err, Error::VisitLimitReached { limit: 10, .. }));
    }

    #[test]
    fn past_deadline_stops_the_search() {
        let graph = diamond();
        let limits = SearchLimits {
            max_visited_nodes: MAX_VISITED_NODES,
            deadline: Instant::now().checked_sub(Duration::from_millis(1)),
        };
        // checked_sub only fails right after boot
        if limits.deadline.is_none() {
            return;
        }

        let err = astar(1, 4, &graph, &Zero, limits).unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded { .. }));
    }

    #[test]
    fn expander_errors_propagate() {
        struct Failing;
        impl NeighborExpander<u32, f64> for Failing {
            fn expand(&self, _node: u32, _previous: Option<u32>) -> Result<Vec<(u32, f64)>, Error> {
                Err(Error::Storage("backend down".into()))
            }
        }

        let err = astar(1, 2, &Failing, &Zero, SearchLimits::default()).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
