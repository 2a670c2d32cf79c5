//! Visualization sub-module: static density-evolution plots
//!
//! Uses the `plotters` library to render recorded density histories to
//! PNG files. Only available with the `visualization` feature (on by
//! default).

mod density_plot;

pub use density_plot::{plot_density_evolution, PlotConfig};
