//! The reaction network: particle dictionary and RK4 driver
//!
//! # Core Concepts
//!
//! - **ReactionNetwork**: exclusively owns every [`Particle`] in an ordered
//!   dictionary keyed by PID and drives the four-stage RK4 sweep
//! - **Particle**: graph node, density carrier, passive stage accumulator
//! - **Reaction**: graph edge, owned by its primary reactant, endpoints by PID
//!
//! # Why edge-centric
//!
//! Each particle's stage slope is a sum over every reaction it touches, so
//! the driver makes a full pass over all reactions per stage rather than
//! trying to pull a per-particle δn: the kernel reads the densities of
//! several endpoints and pushes contributions into the stage accumulators
//! of several endpoints. Accumulators are strictly additive within a stage
//! and only ever read from the previous stage, which makes contributions
//! commute up to floating-point summation order.
//!
//! # Ordering guarantee
//!
//! All state lives in a `BTreeMap<i64, Particle>`, so iteration is sorted
//! by PID and identical inputs replay bit-identically. Reactions keep
//! catalog order within each particle. Execution is single-threaded and
//! synchronous; a parallel sweep would need atomic or per-thread shadow
//! accumulators reduced at stage boundaries, which is deferred.
//!
//! # Per-particle state machine over one step
//!
//! ```text
//! [CLEAN: k*=0]
//!   ──stage First──▶  [k1 set]
//!   ──stage Second──▶ [k1,k2 set]
//!   ──stage Third──▶  [k1..k3 set]
//!   ──stage Fourth──▶ [k1..k4 set]
//!   ──finalize──▶     [CLEAN, density advanced]
//! ```
//!
//! Stages are driven strictly in order by [`ReactionNetwork::time_step`];
//! finalize always follows the fourth stage within the same call.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

mod particle;
mod reaction;

pub use particle::{Particle, Rk4Stage};
pub use reaction::{Reaction, ReactionKind};

use crate::catalog::{self, CatalogError};

// =================================================================================================
// NetworkError
// =================================================================================================

/// Errors from programmatic network construction and queries.
#[derive(Debug)]
pub enum NetworkError {
    /// A PID that is not a key of the particle dictionary.
    UnknownPid(i64),

    /// A decay channel with no products.
    EmptyProducts { parent: i64 },

    /// A decay channel listing its own parent among the products.
    SelfLoop { parent: i64 },

    /// A channel rate that is negative or non-finite.
    InvalidRate { parent: i64, rate: f64 },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::UnknownPid(pid) => write!(f, "unknown PID {pid}"),
            NetworkError::EmptyProducts { parent } => {
                write!(f, "decay channel of {parent} has no products")
            }
            NetworkError::SelfLoop { parent } => {
                write!(f, "decay channel of {parent} lists the parent as a product")
            }
            NetworkError::InvalidRate { parent, rate } => {
                write!(f, "decay channel of {parent} has invalid rate {rate}")
            }
        }
    }
}

impl std::error::Error for NetworkError {}

// =================================================================================================
// ReactionNetwork
// =================================================================================================

/// Stores the particle species of a hadron gas and evolves their densities
/// by integrating the coupled rate equations with fourth-order Runge–Kutta.
///
/// # Example
///
/// ```rust
/// use freezeout_rs::network::{Particle, ReactionNetwork};
/// use freezeout_rs::physics::SpinStatistics;
///
/// let mut network = ReactionNetwork::new();
/// network.insert_particle(Particle::new(113, 0.775, 3.0, 0.149, SpinStatistics::BoseEinstein, 1));
/// network.insert_particle(Particle::new(211, 0.140, 1.0, 0.0, SpinStatistics::BoseEinstein, 0));
/// network.insert_particle(Particle::new(-211, 0.140, 1.0, 0.0, SpinStatistics::BoseEinstein, 0));
/// network.add_decay(113, 1.0, &[211, -211]).unwrap();
///
/// network.initialize_system(0.1, 0.155);
/// network.time_step(0.005, 0.154);
/// assert!(network.get_particle_density(113).unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReactionNetwork {
    particles: BTreeMap<i64, Particle>,
    tau: f64,
    clamp_negative_densities: bool,
}

impl ReactionNetwork {
    /// An empty network, to be populated with [`insert_particle`](Self::insert_particle)
    /// and [`add_decay`](Self::add_decay).
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a network from a particle datasheet and a decays sheet.
    ///
    /// Construction is all-or-nothing: any open or parse failure returns the
    /// error and no partially populated network escapes.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        particle_datasheet: P,
        decays_sheet: Q,
    ) -> Result<Self, CatalogError> {
        catalog::load_network(particle_datasheet, decays_sheet)
    }

    // ====== Construction ======

    /// Insert a species, replacing any previous entry with the same PID.
    pub fn insert_particle(&mut self, particle: Particle) {
        self.particles.insert(particle.pid(), particle);
    }

    /// Register a decay channel `parent → products` with the given
    /// branching ratio. The channel rate is branching ratio × parent width.
    ///
    /// Validates that every endpoint exists, that products are non-empty
    /// and distinct from the parent, and that the rate is finite and
    /// non-negative. Branching-ratio sums per parent are catalog-provided
    /// and deliberately not renormalized here.
    pub fn add_decay(
        &mut self,
        parent: i64,
        branching_ratio: f64,
        products: &[i64],
    ) -> Result<(), NetworkError> {
        self.add_decay_with_source(parent, branching_ratio, products, 0.0)
    }

    /// [`add_decay`](Self::add_decay) with a medium source term attached
    /// (thermal production feeding the parent at `source_rate · n_eq`).
    pub fn add_decay_with_source(
        &mut self,
        parent: i64,
        branching_ratio: f64,
        products: &[i64],
        source_rate: f64,
    ) -> Result<(), NetworkError> {
        let width = match self.particles.get(&parent) {
            Some(p) => p.decay_width(),
            None => return Err(NetworkError::UnknownPid(parent)),
        };
        self.add_channel(parent, branching_ratio, width, products, source_rate)
    }

    /// Register a channel with an explicit width. The catalog loader passes
    /// the width of the decays-sheet header line here, which is what the
    /// channel rate is defined against.
    pub(crate) fn add_channel(
        &mut self,
        parent: i64,
        branching_ratio: f64,
        width: f64,
        products: &[i64],
        source_rate: f64,
    ) -> Result<(), NetworkError> {
        if !self.particles.contains_key(&parent) {
            return Err(NetworkError::UnknownPid(parent));
        }
        if products.is_empty() {
            return Err(NetworkError::EmptyProducts { parent });
        }
        for &pid in products {
            if pid == parent {
                return Err(NetworkError::SelfLoop { parent });
            }
            if !self.particles.contains_key(&pid) {
                return Err(NetworkError::UnknownPid(pid));
            }
        }

        let rate = branching_ratio * width;
        if !rate.is_finite() || rate < 0.0 {
            return Err(NetworkError::InvalidRate { parent, rate });
        }

        let reaction = Reaction::decay(parent, branching_ratio, width, products.to_vec())
            .with_source_rate(source_rate);
        if let Some(p) = self.particles.get_mut(&parent) {
            p.add_reaction(reaction);
        }
        Ok(())
    }

    /// Clamp densities to zero at finalize instead of admitting small
    /// RK4 overshoots below zero. Off by default: the unclamped update
    /// preserves the conservation laws of the kernel exactly.
    pub fn set_clamp_negative_densities(&mut self, clamp: bool) {
        self.clamp_negative_densities = clamp;
    }

    // ====== Evolution ======

    /// Thermal initial condition: every species starts on its equilibrium
    /// density at `temperature`, with clean accumulators, at proper time
    /// `tau_0`.
    pub fn initialize_system(&mut self, tau_0: f64, temperature: f64) {
        self.tau = tau_0;
        for particle in self.particles.values_mut() {
            let n_eq = particle.eq_density(temperature);
            particle.set_density(n_eq);
            particle.clear_accumulators();
        }
    }

    /// Advance every density by one RK4 step of size `dt` at the given
    /// background temperature.
    ///
    /// Equilibrium densities are memoized for the step before the sweep, so
    /// the kernel never recomputes a quadrature mid-stage. The four stages
    /// then sweep over all reactions in deterministic order, and finalize
    /// commits the step.
    pub fn time_step(&mut self, dt: f64, temperature: f64) {
        for particle in self.particles.values_mut() {
            particle.eq_density(temperature);
        }

        let pids: Vec<i64> = self.particles.keys().copied().collect();
        let mut product_buffer: Vec<i64> = Vec::new();

        for stage in Rk4Stage::ALL {
            for &pid in &pids {
                let reaction_count = self.particles[&pid].reactions().len();
                for index in 0..reaction_count {
                    let (delta, source) = {
                        let parent = &self.particles[&pid];
                        let reaction = &parent.reactions()[index];
                        product_buffer.clear();
                        product_buffer.extend_from_slice(reaction.products());
                        reaction.stage_deltas(parent, &self.particles, stage)
                    };

                    if let Some(parent) = self.particles.get_mut(&pid) {
                        parent.update(delta + source, dt, stage);
                    }
                    for &product_pid in &product_buffer {
                        if let Some(product) = self.particles.get_mut(&product_pid) {
                            product.update(-delta, dt, stage);
                        }
                    }
                }
            }
        }

        self.finalize_time_step();
        self.tau += dt;
    }

    /// Commit the four accumulated stages on every particle and reset for
    /// the next step. Always runs inside [`time_step`](Self::time_step),
    /// directly after the fourth stage.
    fn finalize_time_step(&mut self) {
        let clamp = self.clamp_negative_densities;
        for particle in self.particles.values_mut() {
            particle.finalize_time_step(clamp);
        }
    }

    // ====== Queries ======

    /// Current density of a species, in fm⁻³.
    pub fn get_particle_density(&self, pid: i64) -> Result<f64, NetworkError> {
        self.particles
            .get(&pid)
            .map(Particle::density)
            .ok_or(NetworkError::UnknownPid(pid))
    }

    /// Borrow a species by PID.
    pub fn particle(&self, pid: i64) -> Option<&Particle> {
        self.particles.get(&pid)
    }

    /// Mutably borrow a species by PID, for test construction of
    /// off-equilibrium states.
    pub fn particle_mut(&mut self, pid: i64) -> Option<&mut Particle> {
        self.particles.get_mut(&pid)
    }

    /// All species in ascending PID order.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    /// All PIDs in ascending order.
    pub fn pids(&self) -> impl Iterator<Item = i64> + '_ {
        self.particles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Proper time of the current state, in fm/c.
    pub fn tau(&self) -> f64 {
        self.tau
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SpinStatistics;

    fn rho_pi_network() -> ReactionNetwork {
        let mut network = ReactionNetwork::new();
        network.insert_particle(Particle::new(
            113,
            0.775,
            3.0,
            0.149,
            SpinStatistics::BoseEinstein,
            1,
        ));
        network.insert_particle(Particle::new(
            211,
            0.140,
            1.0,
            0.0,
            SpinStatistics::BoseEinstein,
            0,
        ));
        network.insert_particle(Particle::new(
            -211,
            0.140,
            1.0,
            0.0,
            SpinStatistics::BoseEinstein,
            0,
        ));
        network.add_decay(113, 1.0, &[211, -211]).unwrap();
        network
    }

    #[test]
    fn test_add_decay_rejects_unknown_parent() {
        let mut network = ReactionNetwork::new();
        let err = network.add_decay(999, 1.0, &[1]).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownPid(999)));
    }

    #[test]
    fn test_add_decay_rejects_unknown_product() {
        let mut network = rho_pi_network();
        let err = network.add_decay(113, 0.5, &[321]).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownPid(321)));
    }

    #[test]
    fn test_add_decay_rejects_self_loop() {
        let mut network = rho_pi_network();
        let err = network.add_decay(113, 0.5, &[113]).unwrap_err();
        assert!(matches!(err, NetworkError::SelfLoop { parent: 113 }));
    }

    #[test]
    fn test_add_decay_rejects_empty_products() {
        let mut network = rho_pi_network();
        let err = network.add_decay(113, 0.5, &[]).unwrap_err();
        assert!(matches!(err, NetworkError::EmptyProducts { parent: 113 }));
    }

    #[test]
    fn test_add_decay_rejects_negative_branching() {
        let mut network = rho_pi_network();
        let err = network.add_decay(113, -0.5, &[211]).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidRate { parent: 113, .. }));
    }

    #[test]
    fn test_unknown_pid_query_reports_without_mutation() {
        let network = rho_pi_network();
        assert!(matches!(
            network.get_particle_density(12345),
            Err(NetworkError::UnknownPid(12345))
        ));
        assert_eq!(network.len(), 3);
    }

    #[test]
    fn test_initialize_sets_thermal_densities() {
        let mut network = rho_pi_network();
        network.initialize_system(0.1, 0.155);
        for particle in network.particles() {
            assert!(particle.density() > 0.0);
            assert_eq!(particle.rk4_accumulators(), [0.0; 4]);
        }
        assert_eq!(network.tau(), 0.1);
    }

    #[test]
    fn test_accumulators_clean_after_step() {
        let mut network = rho_pi_network();
        network.initialize_system(0.1, 0.155);
        network.time_step(0.005, 0.150);
        for particle in network.particles() {
            assert_eq!(particle.rk4_accumulators(), [0.0; 4]);
        }
        assert!((network.tau() - 0.105).abs() < 1e-15);
    }

    #[test]
    fn test_iteration_is_sorted_by_pid() {
        let network = rho_pi_network();
        let pids: Vec<i64> = network.pids().collect();
        assert_eq!(pids, vec![-211, 113, 211]);
    }
}
