//! Batch pipeline over (density, range) cases
//!
//! Each case runs to completion independently. A failed snapshot load
//! fails every case of that density; a failed case is logged with its
//! (density, range) context and the batch moves on.

use crate::{loader, report, AnalyzerConfig, Density, Result};
use std::fs;
use swarm_graph::{analyze, ProximityGraph, SwarmPoint};
use swarm_render::{render_histogram, render_swarm_2d, render_swarm_3d, PlotStyle, RenderError};
use tracing::{error, info, warn};

/// Outcome of a whole batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<(Density, f64)>,
    pub failed: Vec<(Density, f64, String)>,
}

impl RunSummary {
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn case_count(&self) -> usize {
        self.completed.len() + self.failed.len()
    }
}

/// Run every (density, range) case in the configuration.
pub fn run(config: &AnalyzerConfig) -> Result<RunSummary> {
    fs::create_dir_all(&config.output_dir)?;

    let style = PlotStyle::default();
    let mut summary = RunSummary::default();

    for density in Density::ALL {
        let points = match loader::load_points(config.snapshot_path(density)) {
            Ok(points) => points,
            Err(err) => {
                error!("Snapshot for density '{}' failed to load: {}", density, err);
                for &range_m in &config.ranges_m {
                    summary.failed.push((density, range_m, err.to_string()));
                }
                continue;
            }
        };

        for &range_m in &config.ranges_m {
            match run_case(config, density, range_m, &points, &style) {
                Ok(()) => summary.completed.push((density, range_m)),
                Err(err) => {
                    error!(
                        "Case ({}, {} m) failed: {}",
                        density, range_m, err
                    );
                    summary.failed.push((density, range_m, err.to_string()));
                }
            }
        }
    }

    Ok(summary)
}

fn run_case(
    config: &AnalyzerConfig,
    density: Density,
    range_m: f64,
    points: &[SwarmPoint],
    style: &PlotStyle,
) -> Result<()> {
    let case_dir = config.case_dir(density, range_m);
    fs::create_dir_all(&case_dir)?;
    info!("Analyzing case ({}, {} m)", density, range_m);

    let graph = ProximityGraph::build(points, range_m)?;
    let metrics = analyze(&graph);
    let mut case = report::CaseReport::new(density, range_m, metrics);

    let title = format!("Density: {} - Range: {} m", density, range_m);
    let swarm_file = "swarm.png";
    let swarm_path = case_dir.join(swarm_file);
    if config.flat {
        render_swarm_2d(&graph, &title, &swarm_path, style)?;
    } else {
        render_swarm_3d(&graph, &title, &swarm_path, style)?;
    }
    case.images.push(swarm_file.to_string());

    let degrees: Vec<f64> = case.metrics.degrees.iter().map(|&d| d as f64).collect();
    let clique_sizes: Vec<f64> =
        case.metrics.clique_sizes.iter().map(|&s| s as f64).collect();
    let component_sizes: Vec<f64> = case
        .metrics
        .component_sizes
        .iter()
        .map(|&s| s as f64)
        .collect();

    let histograms: [(&str, &[f64], &str); 5] = [
        ("degree_distribution.png", degrees.as_slice(), "Degree"),
        (
            "clustering_distribution.png",
            case.metrics.clustering.as_slice(),
            "Clustering coefficient",
        ),
        (
            "cliques_distribution.png",
            clique_sizes.as_slice(),
            "Clique size",
        ),
        (
            "components_distribution.png",
            component_sizes.as_slice(),
            "Component size",
        ),
        (
            "shortest_path_distribution.png",
            case.metrics.path_weights.as_slice(),
            "Path weight (m^2)",
        ),
    ];

    for (file, values, x_label) in histograms {
        let plot_title = format!("{} ({}, {} m)", x_label, density, range_m);
        match render_histogram(
            values,
            config.bins,
            &plot_title,
            x_label,
            &case_dir.join(file),
            style,
        ) {
            Ok(()) => case.images.push(file.to_string()),
            Err(RenderError::EmptySeries(_)) => {
                warn!("Skipping {} for ({}, {} m): no data", file, density, range_m);
            }
            Err(err) => return Err(err.into()),
        }
    }

    report::write_json(&case, &case_dir.join("metrics.json"))?;
    report::write_text(&case, &case_dir.join("analysis.txt"))?;

    info!("Case ({}, {} m) saved to {}", density, range_m, case_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_snapshot(dir: &std::path::Path, density: Density, rows: &[(f64, f64, f64)]) {
        let mut file = fs::File::create(dir.join(density.file_name())).unwrap();
        writeln!(file, "x,y,z").unwrap();
        for (x, y, z) in rows {
            writeln!(file, "{},{},{}", x, y, z).unwrap();
        }
    }

    fn small_swarm() -> Vec<(f64, f64, f64)> {
        vec![
            (0.0, 0.0, 0.0),
            (10000.0, 0.0, 0.0),
            (0.0, 15000.0, 0.0),
            (90000.0, 90000.0, 90000.0),
        ]
    }

    #[test]
    fn test_run_produces_case_artifacts() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for density in Density::ALL {
            write_snapshot(input.path(), density, &small_swarm());
        }

        let config = AnalyzerConfig::new(input.path(), output.path())
            .with_ranges(vec![20000.0]);
        let summary = run(&config).unwrap();

        assert!(summary.all_ok());
        assert_eq!(summary.completed.len(), 3);

        let case_dir = output.path().join("low_20000m");
        assert!(case_dir.join("swarm.png").exists());
        assert!(case_dir.join("degree_distribution.png").exists());
        assert!(case_dir.join("metrics.json").exists());
        assert!(case_dir.join("analysis.txt").exists());
    }

    #[test]
    fn test_missing_density_does_not_abort_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        // Only two of the three snapshots exist.
        write_snapshot(input.path(), Density::Low, &small_swarm());
        write_snapshot(input.path(), Density::High, &small_swarm());

        let config = AnalyzerConfig::new(input.path(), output.path())
            .with_ranges(vec![20000.0, 40000.0]);
        let summary = run(&config).unwrap();

        assert_eq!(summary.completed.len(), 4);
        assert_eq!(summary.failed.len(), 2);
        assert!(summary
            .failed
            .iter()
            .all(|(density, _, _)| *density == Density::Avg));
    }

    #[test]
    fn test_case_report_lists_written_images() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for density in Density::ALL {
            write_snapshot(input.path(), density, &small_swarm());
        }

        let config = AnalyzerConfig::new(input.path(), output.path())
            .with_ranges(vec![20000.0]);
        run(&config).unwrap();

        let case: report::CaseReport = serde_json::from_reader(
            fs::File::open(output.path().join("avg_20000m/metrics.json")).unwrap(),
        )
        .unwrap();
        assert!(case.images.contains(&"swarm.png".to_string()));
        for image in &case.images {
            assert!(output.path().join("avg_20000m").join(image).exists());
        }
    }
}
