//! Scatter-plus-edges views of a proximity graph
//!
//! Connected and isolated satellites are drawn in distinct colors so
//! coverage gaps stand out; every in-range link becomes a line segment.

use crate::{padded_range, PlotStyle, RenderError, Result};
use plotters::prelude::*;
use std::path::Path;
use swarm_graph::ProximityGraph;
use tracing::info;

/// Render the swarm in 3D, axes in meters.
pub fn render_swarm_3d(
    graph: &ProximityGraph,
    title: &str,
    path: &Path,
    style: &PlotStyle,
) -> Result<()> {
    if graph.node_count() == 0 {
        return Err(RenderError::EmptySeries(title.to_string()));
    }

    let (x_min, x_max) = padded_range(graph.positions().map(|p| p.x));
    let (y_min, y_max) = padded_range(graph.positions().map(|p| p.y));
    let (z_min, z_max) = padded_range(graph.positions().map(|p| p.z));

    let root =
        BitMapBackend::new(path, (style.swarm_size, style.swarm_size)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .build_cartesian_3d(x_min..x_max, y_min..y_max, z_min..z_max)
        .map_err(draw_err)?;

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.10))
        .max_light_lines(3)
        .draw()
        .map_err(draw_err)?;

    let coords: Vec<(f64, f64, f64)> =
        graph.positions().map(|p| (p.x, p.y, p.z)).collect();

    // Links first so nodes draw on top of them.
    chart
        .draw_series(graph.edges().map(|(a, b, _)| {
            PathElement::new(vec![coords[a], coords[b]], style.edge_color.mix(0.7))
        }))
        .map_err(draw_err)?;

    let connected: Vec<(f64, f64, f64)> = node_coords(graph, false);
    let isolated: Vec<(f64, f64, f64)> = node_coords(graph, true);

    let connected_color = style.connected_color;
    chart
        .draw_series(
            connected
                .iter()
                .map(|&p| Circle::new(p, 4, connected_color.filled())),
        )
        .map_err(draw_err)?
        .label(format!("Connected satellites ({})", connected.len()))
        .legend(move |(x, y)| Circle::new((x, y), 4, connected_color.filled()));

    let isolated_color = style.isolated_color;
    chart
        .draw_series(
            isolated
                .iter()
                .map(|&p| Circle::new(p, 4, isolated_color.filled())),
        )
        .map_err(draw_err)?
        .label(format!("Isolated satellites ({})", isolated.len()))
        .legend(move |(x, y)| Circle::new((x, y), 4, isolated_color.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("Swarm plot saved: {}", path.display());
    Ok(())
}

/// Render the swarm flattened onto the x/y plane, axes in meters.
pub fn render_swarm_2d(
    graph: &ProximityGraph,
    title: &str,
    path: &Path,
    style: &PlotStyle,
) -> Result<()> {
    if graph.node_count() == 0 {
        return Err(RenderError::EmptySeries(title.to_string()));
    }

    let (x_min, x_max) = padded_range(graph.positions().map(|p| p.x));
    let (y_min, y_max) = padded_range(graph.positions().map(|p| p.y));

    let root =
        BitMapBackend::new(path, (style.swarm_size, style.swarm_size)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("X (m)")
        .y_desc("Y (m)")
        .draw()
        .map_err(draw_err)?;

    let coords: Vec<(f64, f64)> = graph.positions().map(|p| (p.x, p.y)).collect();

    chart
        .draw_series(graph.edges().map(|(a, b, _)| {
            PathElement::new(vec![coords[a], coords[b]], style.edge_color.mix(0.7))
        }))
        .map_err(draw_err)?;

    let connected_color = style.connected_color;
    chart
        .draw_series(
            node_coords(graph, false)
                .iter()
                .map(|&(x, y, _)| Circle::new((x, y), 4, connected_color.filled())),
        )
        .map_err(draw_err)?
        .label("Connected satellites")
        .legend(move |(x, y)| Circle::new((x, y), 4, connected_color.filled()));

    let isolated_color = style.isolated_color;
    chart
        .draw_series(
            node_coords(graph, true)
                .iter()
                .map(|&(x, y, _)| Circle::new((x, y), 4, isolated_color.filled())),
        )
        .map_err(draw_err)?
        .label("Isolated satellites")
        .legend(move |(x, y)| Circle::new((x, y), 4, isolated_color.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("Swarm plot saved: {}", path.display());
    Ok(())
}

fn node_coords(graph: &ProximityGraph, isolated: bool) -> Vec<(f64, f64, f64)> {
    (0..graph.node_count())
        .filter(|&v| graph.is_isolated(v) == isolated)
        .filter_map(|v| graph.position(v).map(|p| (p.x, p.y, p.z)))
        .collect()
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}
