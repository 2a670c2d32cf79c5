//! Catalog loaders for the particle datasheet and the decays sheet
//!
//! Two whitespace-delimited text formats, loaded in sequence to build a
//! populated [`ReactionNetwork`].
//!
//! # Particle datasheet
//!
//! One particle per line, columns (units in GeV):
//!
//! ```text
//! PID Name Mass Width SpinDegen B S c b I Iz Q NumDecays
//! ```
//!
//! Only PID, Mass, Width, SpinDegen and NumDecays are consumed. Statistics
//! are assigned from the parity of the integer part of SpinDegen: even is
//! Fermi–Dirac, odd is Bose–Einstein. That convention is specific to this
//! catalog family (it holds because SpinDegen = 2J + 1) and
//! Maxwell–Boltzmann is never assigned from file.
//!
//! # Decays sheet
//!
//! Interleaved line types: a header per parent with the same column set as
//! the datasheet, followed by one line per channel:
//!
//! ```text
//! ParentPID NumDaughters BranchingRatio PID_1 PID_2 PID_3 PID_4 PID_5
//! ```
//!
//! `NumDaughters ≤ 5`; only the first `NumDaughters` daughter slots are
//! read. The channel rate is BranchingRatio × the header line's Width. The
//! leading ParentPID column of a channel line is read and ignored; the
//! header particle is the primary reactant.
//!
//! Blank lines are tolerated between records in both files, so a trailing
//! newline never fails a load.
//!
//! # Failure policy
//!
//! Loading is all-or-nothing. An unreadable file or a malformed line (too
//! few columns, non-numeric fields, references to unregistered PIDs,
//! self-loops) aborts construction with the offending path and line
//! reported; no partially populated network is ever returned.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::network::{Particle, ReactionNetwork};
use crate::physics::SpinStatistics;

/// Channel lines carry at most five daughter slots.
const MAX_DAUGHTERS: usize = 5;

/// A datasheet row needs at least PID..SpinDegen plus a trailing NumDecays.
const MIN_HEADER_COLUMNS: usize = 6;

// =================================================================================================
// CatalogError
// =================================================================================================

/// Errors raised while loading a catalog.
///
/// Both variants are fatal at construction time; the caller never receives
/// a half-built network.
#[derive(Debug)]
pub enum CatalogError {
    /// The file could not be opened or read.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line could not be interpreted. Carries the offending line verbatim.
    Parse {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Open { path, source } => {
                write!(f, "failed to open catalog {}: {source}", path.display())
            }
            CatalogError::Parse {
                path,
                line_number,
                line,
                reason,
            } => write!(
                f,
                "parse error in {} at line {line_number}: {reason} (line: {line:?})",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Open { source, .. } => Some(source),
            CatalogError::Parse { .. } => None,
        }
    }
}

// =================================================================================================
// Loading
// =================================================================================================

/// Build a [`ReactionNetwork`] from the two catalog files.
///
/// The datasheet registers every species; the decays sheet then attaches
/// channels. Species appear in the network in ascending PID order no matter
/// the file order; channels keep file order within each parent.
pub fn load_network<P: AsRef<Path>, Q: AsRef<Path>>(
    particle_datasheet: P,
    decays_sheet: Q,
) -> Result<ReactionNetwork, CatalogError> {
    let mut network = ReactionNetwork::new();
    load_particles(particle_datasheet.as_ref(), &mut network)?;
    load_decays(decays_sheet.as_ref(), &mut network)?;
    Ok(network)
}

fn open(path: &Path) -> Result<BufReader<File>, CatalogError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn load_particles(path: &Path, network: &mut ReactionNetwork) -> Result<(), CatalogError> {
    let reader = open(path)?;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let particle = parse_particle_header(path, index + 1, &line)?.into_particle();
        network.insert_particle(particle);
    }
    Ok(())
}

fn load_decays(path: &Path, network: &mut ReactionNetwork) -> Result<(), CatalogError> {
    let reader = open(path)?;
    let mut lines = reader.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line = line.map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let header = parse_particle_header(path, index + 1, &line)?;

        for _ in 0..header.num_decays {
            let (channel_index, channel_line) = match lines.next() {
                Some((i, l)) => (
                    i + 1,
                    l.map_err(|source| CatalogError::Open {
                        path: path.to_path_buf(),
                        source,
                    })?,
                ),
                None => {
                    return Err(parse_error(
                        path,
                        index + 1,
                        &line,
                        format!(
                            "expected {} decay channel lines after this header, hit end of file",
                            header.num_decays
                        ),
                    ))
                }
            };

            let channel = parse_channel_line(path, channel_index, &channel_line)?;
            network
                .add_channel(
                    header.pid,
                    channel.branching_ratio,
                    header.width,
                    &channel.daughters,
                    0.0,
                )
                .map_err(|e| {
                    parse_error(path, channel_index, &channel_line, e.to_string())
                })?;
        }
    }
    Ok(())
}

// =================================================================================================
// Line parsers
// =================================================================================================

/// The consumed subset of a datasheet/header row.
struct ParticleHeader {
    pid: i64,
    mass: f64,
    width: f64,
    spin_degen: f64,
    num_decays: usize,
}

impl ParticleHeader {
    fn into_particle(self) -> Particle {
        // Catalog convention: SpinDegen = 2J + 1, so even values are
        // half-integer spin (fermions) and odd values integer spin (bosons).
        let statistics = if (self.spin_degen as i64) % 2 == 0 {
            SpinStatistics::FermiDirac
        } else {
            SpinStatistics::BoseEinstein
        };
        Particle::new(
            self.pid,
            self.mass,
            self.spin_degen,
            self.width,
            statistics,
            self.num_decays,
        )
    }
}

struct ChannelLine {
    branching_ratio: f64,
    daughters: Vec<i64>,
}

fn parse_error(path: &Path, line_number: usize, line: &str, reason: String) -> CatalogError {
    CatalogError::Parse {
        path: path.to_path_buf(),
        line_number,
        line: line.to_string(),
        reason,
    }
}

fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    what: &str,
    path: &Path,
    line_number: usize,
    line: &str,
) -> Result<T, CatalogError> {
    let raw = fields.get(index).ok_or_else(|| {
        parse_error(path, line_number, line, format!("missing column for {what}"))
    })?;
    raw.parse().map_err(|_| {
        parse_error(
            path,
            line_number,
            line,
            format!("could not parse {what} from {raw:?}"),
        )
    })
}

fn parse_particle_header(
    path: &Path,
    line_number: usize,
    line: &str,
) -> Result<ParticleHeader, CatalogError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_HEADER_COLUMNS {
        return Err(parse_error(
            path,
            line_number,
            line,
            format!(
                "expected at least {MIN_HEADER_COLUMNS} columns, found {}",
                fields.len()
            ),
        ));
    }

    Ok(ParticleHeader {
        pid: parse_field(&fields, 0, "PID", path, line_number, line)?,
        mass: parse_field(&fields, 2, "Mass", path, line_number, line)?,
        width: parse_field(&fields, 3, "Width", path, line_number, line)?,
        spin_degen: parse_field(&fields, 4, "SpinDegen", path, line_number, line)?,
        num_decays: parse_field(&fields, fields.len() - 1, "NumDecays", path, line_number, line)?,
    })
}

fn parse_channel_line(
    path: &Path,
    line_number: usize,
    line: &str,
) -> Result<ChannelLine, CatalogError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    // Leading ParentPID column is present but the header particle is the
    // primary reactant; the column is not consulted.
    let num_daughters: usize =
        parse_field(&fields, 1, "NumDaughters", path, line_number, line)?;
    if num_daughters == 0 || num_daughters > MAX_DAUGHTERS {
        return Err(parse_error(
            path,
            line_number,
            line,
            format!("NumDaughters must be 1..={MAX_DAUGHTERS}, found {num_daughters}"),
        ));
    }

    let branching_ratio: f64 =
        parse_field(&fields, 2, "BranchingRatio", path, line_number, line)?;

    let mut daughters = Vec::with_capacity(num_daughters);
    for slot in 0..num_daughters {
        daughters.push(parse_field(
            &fields,
            3 + slot,
            "daughter PID",
            path,
            line_number,
            line,
        )?);
    }

    Ok(ChannelLine {
        branching_ratio,
        daughters,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
