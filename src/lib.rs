//! freezeout-rs: Hadronic Reaction Network Simulation
//!
//! A framework for simulating the chemical evolution of a hadron gas:
//! particle number densities coupled through decays and inverse decays,
//! integrated in time while the background medium cools.
//!
//! # Architecture
//!
//! freezeout-rs is built on two core principles:
//!
//! 1. **Separation of chemistry and numerics**
//!    - The reaction network defines the coupled rate equations (what to solve)
//!    - The RK4 stage machinery and the quadrature provide the methods (how to solve)
//!
//! 2. **Keys instead of pointers**
//!    - The network exclusively owns every particle in an ordered dictionary
//!    - Reactions refer to their endpoints by PID, so the cyclic reaction
//!      graph never turns into a cyclic ownership graph
//!
//! # Quick Start
//!
//! ```rust
//! use freezeout_rs::network::ReactionNetwork;
//! use freezeout_rs::network::Particle;
//! use freezeout_rs::physics::SpinStatistics;
//!
//! // 1. Build a miniature network: a rho meson decaying to two pions
//! let mut network = ReactionNetwork::new();
//! network.insert_particle(Particle::new(113, 0.775, 3.0, 0.149, SpinStatistics::BoseEinstein, 1));
//! network.insert_particle(Particle::new(211, 0.140, 1.0, 0.0, SpinStatistics::BoseEinstein, 0));
//! network.insert_particle(Particle::new(-211, 0.140, 1.0, 0.0, SpinStatistics::BoseEinstein, 0));
//! network.add_decay(113, 1.0, &[211, -211]).unwrap();
//!
//! // 2. Thermal initial condition at T = 0.155 GeV, then step in time
//! network.initialize_system(0.1, 0.155);
//! network.time_step(0.005, 0.150);
//!
//! // 3. Query densities by PID
//! let n_rho = network.get_particle_density(113).unwrap();
//! assert!(n_rho > 0.0);
//! ```
//!
//! Catalog-driven construction, the cooling driver loop, CSV export and
//! plotting live in [`catalog`], [`evolution`] and [`output`]; see the
//! `demos/` directory for complete workflows.
//!
//! # Modules
//!
//! - [`numerics`]: Adaptive Gauss–Legendre quadrature
//! - [`physics`]: Thermodynamics (equilibrium densities, spin statistics, cooling profiles)
//! - [`network`]: The particle/reaction graph and the RK4 driver
//! - [`catalog`]: Particle-data and decay-sheet loaders
//! - [`evolution`]: Time-evolution driver and recorded results
//! - [`output`]: Result export (CSV) and visualization (plotters)

// Core modules
pub mod catalog;
pub mod evolution;
pub mod network;
pub mod numerics;
pub mod output;
pub mod physics;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use freezeout_rs::prelude::*;
    //! ```
    pub use crate::evolution::{evolve, EvolutionConfig, EvolutionResult};
    pub use crate::network::{NetworkError, Particle, ReactionNetwork};
    pub use crate::physics::{
        ConstantTemperature, IdealHydroCooling, SpinStatistics, TemperatureProfile,
    };
}
