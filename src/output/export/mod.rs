//! Export sub-module for saving recorded density histories
//!
//! # Supported Formats
//!
//! - **CSV**: semicolon-separated values, readable without configuration in
//!   Excel, LibreOffice Calc, and pandas
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use freezeout_rs::output::export::export_density_csv;
//!
//! // All recorded step points
//! export_density_csv(&result, &[111, 22], None, "densities.csv")?;
//!
//! // Reduced to 1000 rows for a lighter file
//! export_density_csv(&result, &[111, 22], Some(1000), "densities.csv")?;
//! ```

pub mod csv;

pub use csv::{export_density_csv, CsvError};
