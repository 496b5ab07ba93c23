//! Per-case report artifacts
//!
//! The JSON record is the primary output; the text report renders the
//! same numbers for reading alongside the images.

use crate::{Density, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use swarm_graph::MetricsReport;
use tracing::info;

/// Everything produced for one (density, range) case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub density: Density,
    /// Communication range in meters.
    pub range_m: f64,
    pub generated_at: DateTime<Utc>,
    pub metrics: MetricsReport,
    /// Image files written into the case directory.
    pub images: Vec<String>,
}

impl CaseReport {
    pub fn new(density: Density, range_m: f64, metrics: MetricsReport) -> Self {
        Self {
            density,
            range_m,
            generated_at: Utc::now(),
            metrics,
            images: Vec::new(),
        }
    }
}

/// Write the structured metrics record.
pub fn write_json(report: &CaseReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    info!("Metrics record saved: {}", path.display());
    Ok(())
}

/// Write the human-readable summary.
pub fn write_text(report: &CaseReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    let m = &report.metrics;
    let case = format!("{}, {} m", report.density, report.range_m);

    writeln!(w, "Swarm connectivity analysis ({})", case)?;
    writeln!(w, "Generated: {}", report.generated_at.to_rfc3339())?;
    writeln!(w)?;
    writeln!(w, "Satellites: {}", m.node_count)?;
    writeln!(w, "Links in range: {}", m.edge_count)?;
    writeln!(w, "Mean degree: {}", fmt_mean(m.mean_degree, 3))?;
    writeln!(
        w,
        "Mean clustering coefficient: {}",
        fmt_mean(m.mean_clustering, 3)
    )?;
    writeln!(w, "Maximal cliques: {}", m.clique_count)?;
    writeln!(w, "Connected components: {}", m.component_count)?;
    writeln!(
        w,
        "Shortest paths (reachable ordered pairs): {}",
        m.path_count
    )?;
    // Edge weights are squared distances, so path weights are in m^2.
    writeln!(
        w,
        "Mean shortest-path weight: {} m^2",
        fmt_mean(m.mean_path_weight, 1)
    )?;
    writeln!(w)?;
    writeln!(w, "Images:")?;
    for image in &report.images {
        writeln!(w, "  {}", image)?;
    }

    info!("Text report saved: {}", path.display());
    Ok(())
}

fn fmt_mean(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "n/a".to_string(),
    }
}
