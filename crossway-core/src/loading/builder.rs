use std::{fs::File, io::BufReader, path::Path, time::Instant};

use log::info;

use super::snapshot::NetworkSnapshot;
use crate::{Error, store::InMemoryNetwork};

/// Reads a JSON network snapshot from disk and builds the in-memory network
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid snapshot, or
/// contains no routable data
pub fn load_network(path: impl AsRef<Path>) -> Result<InMemoryNetwork, Error> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InvalidData(format!(
            "Network snapshot not found: {}",
            path.display()
        )));
    }

    info!("Loading road network snapshot: {}", path.display());
    let started = Instant::now();

    let reader = BufReader::new(File::open(path)?);
    let snapshot: NetworkSnapshot = serde_json::from_reader(reader)?;
    info!(
        "Parsed {} nodes and {} ways in {:?}",
        snapshot.nodes.len(),
        snapshot.ways.len(),
        started.elapsed()
    );

    network_from_snapshot(snapshot)
}

/// Builds the in-memory network from an already parsed snapshot
///
/// # Errors
///
/// Returns an error if the snapshot contains invalid coordinates or no
/// usable way
pub fn network_from_snapshot(snapshot: NetworkSnapshot) -> Result<InMemoryNetwork, Error> {
    validate_snapshot(&snapshot)?;

    let mut builder = InMemoryNetwork::builder();
    for node in snapshot.nodes {
        builder.add_node(node.into());
    }
    for way in snapshot.ways {
        builder.add_way(way.into());
    }

    let network = builder.build();
    if network.stats().ways == 0 {
        return Err(Error::InvalidData(
            "Snapshot contains no way referencing known nodes".to_string(),
        ));
    }

    Ok(network)
}

fn validate_snapshot(snapshot: &NetworkSnapshot) -> Result<(), Error> {
    if snapshot.nodes.is_empty() {
        return Err(Error::InvalidData("Snapshot contains no nodes".to_string()));
    }

    if let Some(node) = snapshot.nodes.iter().find(|n| {
        !n.lat.is_finite() || !n.lon.is_finite() || n.lat.abs() > 90.0 || n.lon.abs() > 180.0
    }) {
        return Err(Error::InvalidData(format!(
            "Node {} has invalid coordinates ({}, {})",
            node.id, node.lat, node.lon
        )));
    }

    Ok(())
}
