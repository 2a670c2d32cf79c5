//! CSV export for recorded density histories.
//!
//! # Produced format
//!
//! The separator is `;`, directly readable without configuration in Excel
//! and LibreOffice Calc. Densities are written in scientific notation to
//! avoid any ambiguity on orders of magnitude (freeze-out densities span
//! many decades as the medium cools).
//!
//! ```text
//! tau (fm/c);n_111 (fm^-3);n_22 (fm^-3)
//! 1.000000e-1;3.245632e-2;6.234112e-2
//! 1.050000e-1;3.199871e-2;6.301542e-2
//! ...
//! ```
//!
//! # Downsampling
//!
//! When `n_rows = Some(n)` with `n` smaller than the recorded history,
//! rows are selected uniformly. The first (τ₀) and last points are
//! **always included**: the late-time tail of a freeze-out curve must
//! never be truncated.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::evolution::EvolutionResult;

// =================================================================================================
// CsvError
// =================================================================================================

/// Possible errors during a CSV export.
///
/// This custom type allows the caller to distinguish failure causes
/// and react precisely (e.g. suggest another path on `Io`, or correct the
/// PID list on `UnknownPid`).
#[derive(Debug)]
pub enum CsvError {
    /// System error: unable to open or write the file.
    Io(std::io::Error),

    /// The `EvolutionResult` contains no recorded step points.
    EmptyResult,

    /// A requested PID has no recorded series.
    UnknownPid(i64),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::Io(e) => write!(f, "CSV I/O error: {e}"),
            CsvError::EmptyResult => {
                write!(f, "CSV export failed: result contains no recorded points")
            }
            CsvError::UnknownPid(pid) => {
                write!(f, "CSV export failed: no recorded series for PID {pid}")
            }
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        CsvError::Io(e)
    }
}

// =================================================================================================
// Export
// =================================================================================================

/// Write the recorded series of the given PIDs to a semicolon CSV file.
///
/// `n_rows` caps the number of data rows via uniform downsampling; `None`
/// writes every recorded step point.
pub fn export_density_csv<P: AsRef<Path>>(
    result: &EvolutionResult,
    pids: &[i64],
    n_rows: Option<usize>,
    path: P,
) -> Result<(), CsvError> {
    if result.time_points.is_empty() {
        return Err(CsvError::EmptyResult);
    }
    for &pid in pids {
        if result.density_series(pid).is_none() {
            return Err(CsvError::UnknownPid(pid));
        }
    }

    let indices = select_indices(result.time_points.len(), n_rows);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "tau (fm/c)")?;
    for pid in pids {
        write!(writer, ";n_{pid} (fm^-3)")?;
    }
    writeln!(writer)?;

    for index in indices {
        write!(writer, "{:e}", result.time_points[index])?;
        for &pid in pids {
            // Presence established above
            if let Some(series) = result.density_series(pid) {
                write!(writer, ";{:e}", series[index])?;
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Uniform row selection that always keeps the first and last indices.
fn select_indices(total: usize, n_rows: Option<usize>) -> Vec<usize> {
    match n_rows {
        Some(n) if n >= 2 && n < total => {
            let stride = (total - 1) as f64 / (n - 1) as f64;
            let mut indices: Vec<usize> = (0..n)
                .map(|i| ((i as f64 * stride).round() as usize).min(total - 1))
                .collect();
            indices.dedup();
            if indices.last() != Some(&(total - 1)) {
                indices.push(total - 1);
            }
            indices
        }
        _ => (0..total).collect(),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::{evolve, EvolutionConfig};
    use crate::network::{Particle, ReactionNetwork};
    use crate::physics::{ConstantTemperature, SpinStatistics};

    fn sample_result() -> EvolutionResult {
        let mut network = ReactionNetwork::new();
        network.insert_particle(Particle::new(
            211,
            0.140,
            1.0,
            0.0,
            SpinStatistics::BoseEinstein,
            0,
        ));
        let profile = ConstantTemperature::new(0.155);
        let config = EvolutionConfig::new(0.1, 1.1, 20);
        evolve(&mut network, &profile, &config).unwrap()
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("densities.csv");

        export_density_csv(&result, &[211], None, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "tau (fm/c);n_211 (fm^-3)");
        assert_eq!(lines.len(), 1 + 21);
        assert!(lines[1].contains(';'));
    }

    #[test]
    fn test_export_unknown_pid() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("densities.csv");

        let err = export_density_csv(&result, &[999], None, &path).unwrap_err();
        assert!(matches!(err, CsvError::UnknownPid(999)));
    }

    #[test]
    fn test_downsampling_keeps_endpoints() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("densities.csv");

        export_density_csv(&result, &[211], Some(5), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1 + 5);

        let first_tau: f64 = lines[1].split(';').next().unwrap().parse().unwrap();
        let last_tau: f64 = lines.last().unwrap().split(';').next().unwrap().parse().unwrap();
        assert!((first_tau - 0.1).abs() < 1e-9);
        assert!((last_tau - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_select_indices_full_when_unset() {
        assert_eq!(select_indices(4, None), vec![0, 1, 2, 3]);
        assert_eq!(select_indices(4, Some(10)), vec![0, 1, 2, 3]);
    }
}
