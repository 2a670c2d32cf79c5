//! Static plot generation for recorded density histories
//!
//! Renders one line per requested species over proper time, with a legend,
//! to a PNG file. Colors come from a default palette unless the caller
//! provides their own through [`PlotConfig::series_colors`].
//!
//! # Example
//!
//! ```rust,ignore
//! use freezeout_rs::output::visualization::{plot_density_evolution, PlotConfig};
//!
//! let mut config = PlotConfig::default();
//! config.title = "pi0 freeze-out".to_string();
//!
//! plot_density_evolution(&result, &[111, 22], &["pi0", "gamma"], "freezeout.png", Some(&config))?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use crate::evolution::EvolutionResult;

/// Fallback palette when no per-series colors are configured.
const DEFAULT_PALETTE: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK];

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for customizing density plots.
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Density evolution")
    pub title: String,

    /// X-axis label (default: "tau (fm/c)")
    pub xlabel: String,

    /// Y-axis label (default: "n (fm^-3)")
    pub ylabel: String,

    /// Optional per-series colors; must cover every requested PID when set
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Density evolution".to_string(),
            xlabel: "tau (fm/c)".to_string(),
            ylabel: "n (fm^-3)".to_string(),
            series_colors: None,
            background: WHITE,
        }
    }
}

// =================================================================================================
// Plotting
// =================================================================================================

/// Render the recorded series of the given PIDs as a PNG line plot.
///
/// `labels` provides one legend entry per PID, in the same order.
pub fn plot_density_evolution(
    result: &EvolutionResult,
    pids: &[i64],
    labels: &[&str],
    path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    if result.time_points.is_empty() {
        return Err("cannot plot an empty result".into());
    }
    if pids.len() != labels.len() {
        return Err(format!("{} PIDs but {} labels", pids.len(), labels.len()).into());
    }
    for &pid in pids {
        if result.density_series(pid).is_none() {
            return Err(format!("no recorded series for PID {pid}").into());
        }
    }

    let x_min = result.time_points[0];
    let x_max = *result
        .time_points
        .last()
        .ok_or("cannot plot an empty result")?;

    let mut y_max: f64 = 0.0;
    for &pid in pids {
        if let Some(series) = result.density_series(pid) {
            for &sample in series.iter() {
                y_max = y_max.max(sample);
            }
        }
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(config.title.as_str(), ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc(config.xlabel.as_str())
        .y_desc(config.ylabel.as_str())
        .draw()?;

    for (index, (&pid, label)) in pids.iter().zip(labels.iter()).enumerate() {
        let color = match &config.series_colors {
            Some(colors) => *colors
                .get(index)
                .ok_or_else(|| format!("no color configured for series {index}"))?,
            None => DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()],
        };

        // Presence established above
        if let Some(series) = result.density_series(pid) {
            chart
                .draw_series(LineSeries::new(
                    result
                        .time_points
                        .iter()
                        .copied()
                        .zip(series.iter().copied()),
                    &color,
                ))?
                .label(*label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
