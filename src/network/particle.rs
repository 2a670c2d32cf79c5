//! Particle nodes and the RK4 stage accumulators
//!
//! A [`Particle`] is a node of the reaction graph: identity and
//! thermodynamic constants, the current number density, the four
//! Runge–Kutta stage accumulators, a memoized equilibrium density, and the
//! ordered list of reactions it drives as primary reactant. Particles know
//! nothing about each other; cross-species coupling happens exclusively
//! through the network's sweep over reactions.
//!
//! # Stage accumulation contract
//!
//! The network couples many species, so a particle's slope at a given stage
//! is the sum of contributions from every reaction it touches. The
//! accumulators are therefore strictly additive within a stage:
//!
//! | stage  | accumulator update |
//! |--------|--------------------|
//! | First  | k₁ += Δτ·δn        |
//! | Second | k₂ += Δτ·δn        |
//! | Third  | k₃ += Δτ·δn        |
//! | Fourth | k₄ += Δτ·δn        |
//!
//! and all of the RK4 stage structure lives in the offsets: the right-hand
//! side at stage s is evaluated at density + offset(s) with offsets
//! (0, k₁/2, k₂/2, k₃). A stage only ever reads accumulators written by the
//! previous stage, so contributions within one stage commute (up to the
//! fixed floating-point summation order the network guarantees).
//!
//! Between steps all accumulators are exactly zero; `finalize_time_step`
//! commits the Simpson-weighted combination and resets them.

use crate::network::reaction::Reaction;
use crate::physics::{equilibrium_density, SpinStatistics};

// =================================================================================================
// Rk4Stage
// =================================================================================================

/// The four sub-stages of the classical fourth-order Runge–Kutta scheme.
///
/// Stages must be driven strictly in order, with a finalize after
/// [`Fourth`](Rk4Stage::Fourth); the network owns that discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rk4Stage {
    First,
    Second,
    Third,
    Fourth,
}

impl Rk4Stage {
    /// The stages in sweep order.
    pub const ALL: [Rk4Stage; 4] = [
        Rk4Stage::First,
        Rk4Stage::Second,
        Rk4Stage::Third,
        Rk4Stage::Fourth,
    ];
}

// =================================================================================================
// Particle
// =================================================================================================

/// A particle species: graph node, state carrier, passive RK4 accumulator.
///
/// # State
///
/// - `density` **\[fm⁻³\]** advances only at `finalize_time_step`
/// - `k1..k4` accumulate stage slopes during a step and are zero between steps
/// - the equilibrium density is memoized per step and keyed on the step
///   temperature, because temperature changes between steps but not within one
#[derive(Debug, Clone)]
pub struct Particle {
    pid: i64,
    mass: f64,
    degeneracy: f64,
    decay_width: f64,
    statistics: SpinStatistics,

    density: f64,
    k1: f64,
    k2: f64,
    k3: f64,
    k4: f64,

    eq_density: f64,
    eq_density_temperature: f64,
    eq_density_valid: bool,

    reactions: Vec<Reaction>,
}

impl Particle {
    /// Create a species with zero density and clean accumulators.
    ///
    /// # Arguments
    ///
    /// * `pid`            — Particle Data Group integer identifier
    /// * `mass`           — rest mass **\[GeV\]**
    /// * `degeneracy`     — spin degeneracy g
    /// * `decay_width`    — total width Γ **\[GeV\]**
    /// * `statistics`     — occupancy selector for thermal integrals
    /// * `decay_channels` — reaction-list capacity hint
    pub fn new(
        pid: i64,
        mass: f64,
        degeneracy: f64,
        decay_width: f64,
        statistics: SpinStatistics,
        decay_channels: usize,
    ) -> Self {
        Self {
            pid,
            mass,
            degeneracy,
            decay_width,
            statistics,
            density: 0.0,
            k1: 0.0,
            k2: 0.0,
            k3: 0.0,
            k4: 0.0,
            eq_density: 0.0,
            eq_density_temperature: 0.0,
            eq_density_valid: false,
            reactions: Vec::with_capacity(decay_channels),
        }
    }

    // ====== Identity and constants ======

    pub fn pid(&self) -> i64 {
        self.pid
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn degeneracy(&self) -> f64 {
        self.degeneracy
    }

    pub fn decay_width(&self) -> f64 {
        self.decay_width
    }

    pub fn statistics(&self) -> SpinStatistics {
        self.statistics
    }

    // ====== Density ======

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Overwrite the current density, for initial conditions and tests.
    pub fn set_density(&mut self, density: f64) {
        self.density = density;
    }

    // ====== Reactions ======

    /// Append a reaction this particle drives as primary reactant.
    /// Catalog order is preserved.
    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    /// The reactions this particle drives, in catalog order.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    // ====== RK4 stage machinery ======

    /// Accumulate a stage contribution, additively.
    pub fn update(&mut self, delta_density: f64, dt: f64, stage: Rk4Stage) {
        match stage {
            Rk4Stage::First => self.k1 += dt * delta_density,
            Rk4Stage::Second => self.k2 += dt * delta_density,
            Rk4Stage::Third => self.k3 += dt * delta_density,
            Rk4Stage::Fourth => self.k4 += dt * delta_density,
        }
    }

    /// Density offset at which the right-hand side is evaluated for `stage`.
    pub fn rk4_offset(&self, stage: Rk4Stage) -> f64 {
        match stage {
            Rk4Stage::First => 0.0,
            Rk4Stage::Second => self.k1 / 2.0,
            Rk4Stage::Third => self.k2 / 2.0,
            Rk4Stage::Fourth => self.k3,
        }
    }

    /// Commit one full step: density += (k₁ + 2k₂ + 2k₃ + k₄)/6, reset the
    /// accumulators, drop the equilibrium-density memo (the next step may
    /// run at a different temperature).
    pub fn finalize_time_step(&mut self, clamp_negative: bool) {
        self.density += (self.k1 + 2.0 * self.k2 + 2.0 * self.k3 + self.k4) / 6.0;
        if clamp_negative && self.density < 0.0 {
            self.density = 0.0;
        }
        self.k1 = 0.0;
        self.k2 = 0.0;
        self.k3 = 0.0;
        self.k4 = 0.0;
        self.eq_density_valid = false;
    }

    /// Zero the accumulators without committing, for (re)initialization.
    pub fn clear_accumulators(&mut self) {
        self.k1 = 0.0;
        self.k2 = 0.0;
        self.k3 = 0.0;
        self.k4 = 0.0;
    }

    /// Current accumulator values (k₁, k₂, k₃, k₄), for diagnostics.
    pub fn rk4_accumulators(&self) -> [f64; 4] {
        [self.k1, self.k2, self.k3, self.k4]
    }

    // ====== Equilibrium density ======

    /// Thermal equilibrium density at `temperature`, memoized.
    ///
    /// The memo stays valid for repeated calls at the same temperature
    /// within one step and is dropped at `finalize_time_step`.
    pub fn eq_density(&mut self, temperature: f64) -> f64 {
        if self.eq_density_valid && self.eq_density_temperature == temperature {
            return self.eq_density;
        }
        self.eq_density =
            equilibrium_density(self.mass, self.degeneracy, self.statistics, temperature);
        self.eq_density_temperature = temperature;
        self.eq_density_valid = true;
        self.eq_density
    }

    /// The memoized equilibrium density, without recomputation.
    ///
    /// The network refreshes every memo at the top of each step, so kernel
    /// reads during the stage sweep always hit a valid cache.
    pub fn cached_eq_density(&self) -> f64 {
        debug_assert!(self.eq_density_valid, "eq density read before refresh");
        self.eq_density
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pion() -> Particle {
        Particle::new(211, 0.140, 1.0, 0.0, SpinStatistics::BoseEinstein, 0)
    }

    #[test]
    fn test_new_particle_is_clean() {
        let p = pion();
        assert_eq!(p.density(), 0.0);
        assert_eq!(p.rk4_accumulators(), [0.0; 4]);
        assert!(p.reactions().is_empty());
    }

    #[test]
    fn test_update_is_additive_within_a_stage() {
        let mut p = pion();
        p.update(2.0, 0.1, Rk4Stage::First);
        p.update(3.0, 0.1, Rk4Stage::First);
        let [k1, k2, k3, k4] = p.rk4_accumulators();
        assert!((k1 - 0.5).abs() < 1e-15);
        assert_eq!((k2, k3, k4), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_stage_offsets() {
        let mut p = pion();
        p.update(1.0, 1.0, Rk4Stage::First); // k1 = 1
        p.update(2.0, 1.0, Rk4Stage::Second); // k2 = 2
        p.update(3.0, 1.0, Rk4Stage::Third); // k3 = 3
        assert_eq!(p.rk4_offset(Rk4Stage::First), 0.0);
        assert_eq!(p.rk4_offset(Rk4Stage::Second), 0.5);
        assert_eq!(p.rk4_offset(Rk4Stage::Third), 1.0);
        assert_eq!(p.rk4_offset(Rk4Stage::Fourth), 3.0);
    }

    #[test]
    fn test_finalize_commits_simpson_weights_and_resets() {
        let mut p = pion();
        p.set_density(1.0);
        p.update(1.0, 1.0, Rk4Stage::First);
        p.update(1.0, 1.0, Rk4Stage::Second);
        p.update(1.0, 1.0, Rk4Stage::Third);
        p.update(1.0, 1.0, Rk4Stage::Fourth);
        p.finalize_time_step(false);
        // (1 + 2 + 2 + 1)/6 = 1
        assert!((p.density() - 2.0).abs() < 1e-15);
        assert_eq!(p.rk4_accumulators(), [0.0; 4]);
    }

    #[test]
    fn test_finalize_clamp_choice() {
        let mut p = pion();
        p.set_density(0.0);
        p.update(-1.0, 1.0, Rk4Stage::First);
        let mut q = p.clone();

        p.finalize_time_step(false);
        assert!(p.density() < 0.0);

        q.finalize_time_step(true);
        assert_eq!(q.density(), 0.0);
    }

    #[test]
    fn test_eq_density_memoization() {
        let mut p = pion();
        let first = p.eq_density(0.155);
        let second = p.eq_density(0.155);
        assert_eq!(first, second);
        assert!(first > 0.0);

        // A different temperature invalidates the memo
        let cooler = p.eq_density(0.120);
        assert!(cooler < first);

        // Finalize drops the memo; the next call recomputes to the same value
        p.finalize_time_step(false);
        assert_eq!(p.eq_density(0.120), cooler);
    }
}
