//! Swarm Analyzer
//!
//! One-shot batch analysis of satellite swarm snapshots. For each
//! density scenario and communication range it builds a proximity
//! graph, renders the swarm and metric histograms, and writes a text
//! plus JSON report:
//!
//! ```text
//! outputs/
//!   low_20000m/
//!     swarm.png
//!     degree_distribution.png
//!     ...
//!     analysis.txt
//!     metrics.json
//! ```
//!
//! All distances and ranges are in meters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod loader;
pub mod pipeline;
pub mod report;

pub use pipeline::{run, RunSummary};
pub use report::CaseReport;

/// Default communication ranges in meters.
pub const DEFAULT_RANGES_M: [f64; 3] = [20000.0, 40000.0, 60000.0];

/// Default histogram bin count.
pub const DEFAULT_BINS: usize = 20;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Non-finite coordinate at row {row} of {path}")]
    BadCoordinate { path: PathBuf, row: usize },
    #[error("Snapshot {0} contains no satellites")]
    EmptySnapshot(PathBuf),
    #[error("Graph error: {0}")]
    Graph(#[from] swarm_graph::GraphError),
    #[error("Render error: {0}")]
    Render(#[from] swarm_render::RenderError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// A named swarm-population scenario, each backed by one snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    Avg,
    High,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Low, Density::Avg, Density::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Low => "low",
            Density::Avg => "avg",
            Density::High => "high",
        }
    }

    /// Snapshot file name under the input directory.
    pub fn file_name(&self) -> String {
        format!("topology_{}.csv", self.as_str())
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full configuration for one batch run. Paths are explicit; nothing is
/// derived from the executable location.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Communication ranges to evaluate, in meters.
    pub ranges_m: Vec<f64>,
    /// Flatten swarm plots onto the x/y plane instead of drawing in 3D.
    pub flat: bool,
    /// Histogram bin count.
    pub bins: usize,
}

impl AnalyzerConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ranges_m: DEFAULT_RANGES_M.to_vec(),
            flat: false,
            bins: DEFAULT_BINS,
        }
    }

    pub fn with_ranges(mut self, ranges_m: Vec<f64>) -> Self {
        self.ranges_m = ranges_m;
        self
    }

    pub fn snapshot_path(&self, density: Density) -> PathBuf {
        self.input_dir.join(density.file_name())
    }

    /// Output directory for one (density, range) case.
    pub fn case_dir(&self, density: Density, range_m: f64) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}m", density, range_m.round() as i64))
    }
}
