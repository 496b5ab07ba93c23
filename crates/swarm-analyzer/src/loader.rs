//! Snapshot loading from CSV files

use crate::{AnalyzerError, Result};
use serde::Deserialize;
use std::path::Path;
use swarm_graph::SwarmPoint;
use tracing::info;

/// One row of a snapshot: a satellite position in meters.
#[derive(Debug, Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
    z: f64,
}

/// Load satellite positions from a CSV file with `x,y,z` columns.
///
/// Row order defines satellite identity, so rows are never skipped: a
/// missing column, an unparseable field, or a non-finite coordinate
/// fails the whole snapshot.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<SwarmPoint>> {
    let path = path.as_ref();
    info!("Loading snapshot from {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();

    for (row, record) in reader.deserialize::<RawPosition>().enumerate() {
        let raw = record?;
        let point = SwarmPoint::new(raw.x, raw.y, raw.z);
        if !point.is_finite() {
            return Err(AnalyzerError::BadCoordinate {
                path: path.to_path_buf(),
                row,
            });
        }
        points.push(point);
    }

    if points.is_empty() {
        return Err(AnalyzerError::EmptySnapshot(path.to_path_buf()));
    }

    info!("Loaded {} satellites from {}", points.len(), path.display());
    Ok(points)
}
