//! Output module for evolution results
//!
//! This module provides tools to output recorded density histories:
//! - **Export**: CSV data export for external analysis
//! - **Visualization**: PNG plots using plotters (feature `visualization`)
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots and graphics
//!     ├── mod.rs
//!     └── density_plot.rs
//! ```
//!
//! Both submodules consume [`EvolutionResult`](crate::evolution::EvolutionResult)
//! directly: export for programmatic analysis (pandas, Excel), visualization
//! for human interpretation.

pub mod export;

#[cfg(feature = "visualization")]
pub mod visualization;

pub use export::{export_density_csv, CsvError};

#[cfg(feature = "visualization")]
pub use visualization::{plot_density_evolution, PlotConfig};
