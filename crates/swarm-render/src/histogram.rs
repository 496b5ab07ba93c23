//! Histogram rendering for metric sequences

use crate::{PlotStyle, RenderError, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Render a histogram of `values` with `bins` equal-width bins.
///
/// An empty sequence is an [`RenderError::EmptySeries`] so callers can
/// decide whether a missing plot is worth failing the case over.
pub fn render_histogram(
    values: &[f64],
    bins: usize,
    title: &str,
    x_label: &str,
    path: &Path,
    style: &PlotStyle,
) -> Result<()> {
    if values.is_empty() {
        return Err(RenderError::EmptySeries(title.to_string()));
    }
    let bins = bins.max(1);

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Degenerate data still gets one visible bar.
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1);

    let root =
        BitMapBackend::new(path, style.histogram_size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0f64..(y_max as f64 * 1.05))
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Frequency")
        .disable_x_mesh()
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let x0 = lo + i as f64 * width;
            let x1 = x0 + width;
            Rectangle::new(
                [(x0, 0.0), (x1, count as f64)],
                style.bar_color.mix(0.75).filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("Histogram saved: {}", path.display());
    Ok(())
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("degrees.png");
        let values = vec![0.0, 1.0, 1.0, 2.0, 2.0, 2.0, 5.0];

        render_histogram(
            &values,
            5,
            "Degree distribution",
            "Degree",
            &path,
            &PlotStyle::default(),
        )
        .unwrap();

        assert!(path.exists());
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_histogram_single_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");

        render_histogram(
            &[3.0, 3.0, 3.0],
            20,
            "Flat",
            "Value",
            &path,
            &PlotStyle::default(),
        )
        .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_histogram_empty_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.png");

        let err = render_histogram(&[], 20, "Empty", "Value", &path, &PlotStyle::default());
        assert!(matches!(err, Err(RenderError::EmptySeries(_))));
        assert!(!path.exists());
    }
}
