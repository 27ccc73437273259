use thiserror::Error;

use crate::{NodeId, WayId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("No usable node found near ({lat}, {lon})")]
    NoNearbyNode { lat: f64, lon: f64 },
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    #[error("No way connects node {from} and {to}")]
    NoConnectingWay { from: NodeId, to: NodeId },
    #[error("Node {node} is not part of way {way}")]
    NodeNotOnWay { node: NodeId, way: WayId },
    #[error("No route found, after {iterations} iterations")]
    NoRouteFound { iterations: usize },
    #[error("No route found, visited node limit of {limit} reached after {iterations} iterations")]
    VisitLimitReached { iterations: usize, limit: usize },
    #[error("No route found, query deadline exceeded after {iterations} iterations")]
    DeadlineExceeded { iterations: usize },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl Error {
    /// True for outcomes that mean "there is no route" rather than a failure
    /// of the system itself.
    pub fn is_no_route(&self) -> bool {
        matches!(
            self,
            Error::NoNearbyNode { .. }
                | Error::NodeNotFound(_)
                | Error::NoConnectingWay { .. }
                | Error::NodeNotOnWay { .. }
                | Error::NoRouteFound { .. }
                | Error::VisitLimitReached { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_exhaustion_reports_iterations() {
        let err = Error::NoRouteFound { iterations: 42 };
        assert!(err.is_no_route());
        assert_eq!(err.to_string(), "No route found, after 42 iterations");
    }

    #[test]
    fn storage_failures_are_not_no_route() {
        assert!(!Error::Storage("disk gone".into()).is_no_route());
        assert!(!Error::DeadlineExceeded { iterations: 3 }.is_no_route());
    }
}
