//! Physical constants and unit conventions
//!
//! The crate works in natural units with one dimensionful conversion:
//! energies, masses, temperatures and decay widths are quoted in GeV,
//! lengths and times in fm (fm/c), and number densities in fm⁻³. The
//! reduced Planck constant bridges the two systems.

/// Reduced Planck constant, ℏc ≈ 0.197 GeV·fm.
pub const HBAR: f64 = 0.197;

/// Temperature-to-mass ratio below which the non-relativistic dispersion
/// E(q) = q²/2m replaces E(q) = √(q² + m²) in thermal integrals.
pub const NONRELATIVISTIC_SWITCH: f64 = 1e-2;
