//! Reaction edges and the detailed-balance decay kernel
//!
//! # Physical background
//!
//! A decay channel with branching ratio $b$ of a parent with total width
//! $\Gamma$ drives the parent density towards chemical equilibrium with its
//! daughters. Detailed balance folds the inverse decay into the same
//! kernel: at equilibrium the forward and inverse rates cancel, so the net
//! rate can be written against the equilibrium densities,
//!
//! $$\frac{\mathrm{d}n_\mathrm{parent}}{\mathrm{d}\tau}
//!   = \Gamma_b \left( n^\mathrm{eq}_\mathrm{parent}
//!       \prod_i \frac{n_i}{n^\mathrm{eq}_i} - n_\mathrm{parent} \right),
//!   \qquad \Gamma_b = b\,\Gamma,$$
//!
//! where the product runs over the channel's daughters. Positive δn is net
//! formation of the parent; every product entry receives −δn. A channel
//! with repeated daughters (π⁰ → γγ) lists the same PID twice, squares the
//! ratio, and deposits −δn twice.
//!
//! # Kernel guard
//!
//! A kinematically suppressed daughter can carry an equilibrium density
//! that underflows to zero. Dividing by it would poison the network with
//! NaN, so any vanishing or non-finite daughter $n^\mathrm{eq}$ forces the
//! inverse-decay product to zero for that channel; forward decays still
//! deplete the parent.
//!
//! # Ownership
//!
//! A reaction is owned by its primary reactant's [`Particle`] and refers to
//! every endpoint by PID. Endpoints are resolved against the network's
//! particle dictionary at evaluation time; the reaction graph can be cyclic
//! but the ownership graph never is.

use std::collections::BTreeMap;

use crate::network::particle::{Particle, Rk4Stage};

// =================================================================================================
// ReactionKind
// =================================================================================================

/// Tag for the reaction taxonomy.
///
/// One inhabitant today. Further kinds (2→2 scattering, explicit-rate 2→1
/// formation) plug in as new tags with their own kernels sharing the same
/// accumulator contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    /// One-body decay with the inverse folded in via detailed balance
    Decay,
}

// =================================================================================================
// Reaction
// =================================================================================================

/// A reaction edge: kind, rate, endpoint PIDs, optional medium source.
#[derive(Debug, Clone)]
pub struct Reaction {
    kind: ReactionKind,

    /// Channel rate Γ_b = branching ratio × parent width **\[GeV\]**
    rate: f64,

    /// The branching ratio as parsed, kept alongside the derived rate so
    /// catalog round-trips are bit-exact
    branching_ratio: f64,

    /// Primary reactant first; decays have exactly one reactant
    reactants: Vec<i64>,

    /// Daughter PIDs in channel order; duplicates are meaningful
    products: Vec<i64>,

    /// Optional thermal production from the medium **\[GeV\]**: contributes
    /// `source_rate · n_eq` to the parent only. Zero by default.
    source_rate: f64,
}

impl Reaction {
    /// Build a decay channel for `parent` with the given branching ratio.
    pub fn decay(parent: i64, branching_ratio: f64, parent_width: f64, products: Vec<i64>) -> Self {
        Self {
            kind: ReactionKind::Decay,
            rate: branching_ratio * parent_width,
            branching_ratio,
            reactants: vec![parent],
            products,
            source_rate: 0.0,
        }
    }

    /// Attach a medium source term to this channel.
    pub fn with_source_rate(mut self, source_rate: f64) -> Self {
        self.source_rate = source_rate;
        self
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn branching_ratio(&self) -> f64 {
        self.branching_ratio
    }

    pub fn reactants(&self) -> &[i64] {
        &self.reactants
    }

    pub fn products(&self) -> &[i64] {
        &self.products
    }

    pub fn source_rate(&self) -> f64 {
        self.source_rate
    }

    // ====== Kernel ======

    /// Evaluate the rate kernel at one RK4 sub-stage.
    ///
    /// Returns `(delta, source)`: `delta` is δn, deposited as +δn on the
    /// parent and −δn on every product entry; `source` is the medium
    /// production term, deposited on the parent only.
    ///
    /// Densities are read at the stage offset for the parent and the
    /// products alike, so a network sitting exactly on equilibrium yields
    /// δn = 0 at every sub-stage, not just the first.
    pub(crate) fn stage_deltas(
        &self,
        parent: &Particle,
        particles: &BTreeMap<i64, Particle>,
        stage: Rk4Stage,
    ) -> (f64, f64) {
        match self.kind {
            ReactionKind::Decay => {
                let parent_eq = parent.cached_eq_density();
                let shifted_parent = parent.density() + parent.rk4_offset(stage);

                // Contribution from inverse decays
                let mut from_inv_decays = 1.0;
                for pid in &self.products {
                    let product = &particles[pid];
                    let product_eq = product.cached_eq_density();
                    if product_eq <= 0.0 || !product_eq.is_finite() {
                        from_inv_decays = 0.0;
                        break;
                    }
                    from_inv_decays *=
                        (product.density() + product.rk4_offset(stage)) / product_eq;
                }

                // dn/dt = Γ_b (n_eq Π nᵢ/nᵢ_eq − n), inverse decays folded in
                let delta = self.rate * (parent_eq * from_inv_decays - shifted_parent);
                let source = self.source_rate * parent_eq;
                (delta, source)
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
