//! Swarm Render - PNG plots for swarm topology analysis
//!
//! Two families of output, both written straight to disk:
//!
//! - Scatter-plus-edges views of a proximity graph, 3D or flattened to
//!   the x/y plane ([`swarm_plot`])
//! - Histograms of metric sequences such as degrees or clique sizes
//!   ([`histogram`])

use plotters::style::RGBColor;
use thiserror::Error;

pub mod histogram;
pub mod swarm_plot;

pub use histogram::render_histogram;
pub use swarm_plot::{render_swarm_2d, render_swarm_3d};

/// Render errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw: {0}")]
    EmptySeries(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Colors and figure dimensions shared by every plot in a run.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Swarm plot figure size in pixels (square).
    pub swarm_size: u32,
    /// Histogram figure size in pixels (width, height).
    pub histogram_size: (u32, u32),
    /// Satellites with at least one link in range.
    pub connected_color: RGBColor,
    /// Satellites with no link in range.
    pub isolated_color: RGBColor,
    pub edge_color: RGBColor,
    pub bar_color: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            swarm_size: 1200,
            histogram_size: (800, 600),
            connected_color: RGBColor(30, 60, 200),
            isolated_color: RGBColor(200, 40, 40),
            edge_color: RGBColor(130, 60, 180),
            bar_color: RGBColor(60, 100, 200),
        }
    }
}

/// Axis range with a small margin so edge points do not sit on the
/// frame. Collapses to a unit band around degenerate data.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
