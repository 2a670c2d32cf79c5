//! Thermodynamics of the hadron gas
//!
//! This module provides the physics the reaction network consumes:
//!
//! - **Constants**: natural units, ℏ in GeV·fm
//! - **Thermal**: equilibrium number densities for MB/FD/BE statistics
//! - **Cooling**: background temperature profiles T(τ)
//!
//! # Architecture
//!
//! The physics here is deliberately free of network state: every function
//! takes plain numbers and returns plain numbers, so the same thermodynamics
//! serves the kernel, the tests, and the demos. Temperature trajectories sit
//! behind the [`TemperatureProfile`] trait so the driver loop never cares
//! which medium model supplies T(τ).
//!
//! # Units
//!
//! Energies, masses, temperatures and widths are in GeV; times in fm/c;
//! densities in fm⁻³. See [`constants`].

pub mod constants;
mod cooling;
mod thermal;

pub use cooling::{ConstantTemperature, IdealHydroCooling, TemperatureProfile};
pub use thermal::{equilibrium_density, SpinStatistics};
