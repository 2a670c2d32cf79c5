//! Time-evolution driver
//!
//! The network advances one step at a time; this module owns the loop
//! around it: validate the run configuration, set the thermal initial
//! condition, sample the temperature profile once per step, and record
//! every species' density at the integrator's step points.
//!
//! # Example
//!
//! ```rust,ignore
//! use freezeout_rs::evolution::{evolve, EvolutionConfig};
//! use freezeout_rs::network::ReactionNetwork;
//! use freezeout_rs::physics::IdealHydroCooling;
//!
//! let mut network = ReactionNetwork::from_files("particles.dat", "decays.dat")?;
//! let profile = IdealHydroCooling::new(0.1, 0.5);
//! let config = EvolutionConfig::new(0.1, 20.0, 3980);
//!
//! let result = evolve(&mut network, &profile, &config)?;
//! println!("final pi0 density: {}", result.final_density(111).unwrap());
//! ```

use std::collections::{BTreeMap, HashMap};

use nalgebra::DVector;

use crate::network::ReactionNetwork;
use crate::physics::TemperatureProfile;

// =================================================================================================
// EvolutionConfig
// =================================================================================================

/// Configuration of one evolution run.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionConfig {
    /// Initial proper time τ₀ **\[fm/c\]**
    pub tau_0: f64,

    /// Final proper time τ_f **\[fm/c\]**
    pub tau_f: f64,

    /// Number of RK4 steps; the step size is (τ_f − τ₀)/steps
    pub time_steps: usize,
}

impl EvolutionConfig {
    pub fn new(tau_0: f64, tau_f: f64, time_steps: usize) -> Self {
        Self {
            tau_0,
            tau_f,
            time_steps,
        }
    }

    /// Validate that the run parameters are physically meaningful.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tau_0 > 0.0) {
            return Err("Initial proper time must be positive".to_string());
        }
        if self.tau_f <= self.tau_0 {
            return Err("Final proper time must exceed the initial one".to_string());
        }
        if self.time_steps == 0 {
            return Err("Time steps must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Step size Δτ in fm/c.
    pub fn dt(&self) -> f64 {
        (self.tau_f - self.tau_0) / self.time_steps as f64
    }
}

// =================================================================================================
// EvolutionResult
// =================================================================================================

/// The recorded outcome of an evolution run.
///
/// Densities are sampled at every integrator step point, initial condition
/// included, so each series has `time_steps + 1` entries.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Proper times of the recorded samples **\[fm/c\]**
    pub time_points: Vec<f64>,

    /// Density series per PID, aligned with `time_points` **\[fm⁻³\]**
    pub densities: BTreeMap<i64, DVector<f64>>,

    /// Run metadata (integrator, step count, profile name, ...)
    pub metadata: HashMap<String, String>,
}

impl EvolutionResult {
    /// The recorded series for one species.
    pub fn density_series(&self, pid: i64) -> Option<&DVector<f64>> {
        self.densities.get(&pid)
    }

    /// The last recorded density for one species.
    pub fn final_density(&self, pid: i64) -> Option<f64> {
        self.densities
            .get(&pid)
            .and_then(|series| series.iter().last().copied())
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Driver loop
// =================================================================================================

/// Evolve `network` under the temperature `profile` and record every
/// species' density at the step points.
///
/// The network is (re)initialized on its thermal equilibrium state at
/// T(τ₀) first, so a run is reproducible from the network alone. The
/// profile is sampled at the starting time of each step.
pub fn evolve(
    network: &mut ReactionNetwork,
    profile: &dyn TemperatureProfile,
    config: &EvolutionConfig,
) -> Result<EvolutionResult, String> {
    config.validate()?;
    if network.is_empty() {
        return Err("Cannot evolve an empty reaction network".to_string());
    }

    let dt = config.dt();
    network.initialize_system(config.tau_0, profile.temperature(config.tau_0));

    let mut time_points = Vec::with_capacity(config.time_steps + 1);
    let mut series: BTreeMap<i64, Vec<f64>> = network
        .pids()
        .map(|pid| (pid, Vec::with_capacity(config.time_steps + 1)))
        .collect();

    let record = |network: &ReactionNetwork, series: &mut BTreeMap<i64, Vec<f64>>| {
        for particle in network.particles() {
            if let Some(samples) = series.get_mut(&particle.pid()) {
                samples.push(particle.density());
            }
        }
    };

    time_points.push(config.tau_0);
    record(network, &mut series);

    for step in 0..config.time_steps {
        let tau = config.tau_0 + step as f64 * dt;
        network.time_step(dt, profile.temperature(tau));

        // Step points computed from the index, not accumulated, so the last
        // one lands on τ_f within machine epsilon.
        time_points.push(config.tau_0 + (step as f64 + 1.0) * dt);
        record(network, &mut series);
    }

    let densities = series
        .into_iter()
        .map(|(pid, samples)| (pid, DVector::from_vec(samples)))
        .collect();

    let mut result = EvolutionResult {
        time_points,
        densities,
        metadata: HashMap::new(),
    };
    result.add_metadata("integrator", "Runge-Kutta 4");
    result.add_metadata("time steps", &config.time_steps.to_string());
    result.add_metadata("dt", &dt.to_string());
    result.add_metadata("temperature profile", profile.name());

    Ok(result)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Particle;
    use crate::physics::{ConstantTemperature, SpinStatistics};

    fn pion_gas() -> ReactionNetwork {
        let mut network = ReactionNetwork::new();
        network.insert_particle(Particle::new(
            211,
            0.140,
            1.0,
            0.0,
            SpinStatistics::BoseEinstein,
            0,
        ));
        network
    }

    #[test]
    fn test_config_validation() {
        assert!(EvolutionConfig::new(0.1, 20.0, 100).validate().is_ok());
        assert!(EvolutionConfig::new(0.0, 20.0, 100).validate().is_err());
        assert!(EvolutionConfig::new(0.1, 0.1, 100).validate().is_err());
        assert!(EvolutionConfig::new(0.1, 20.0, 0).validate().is_err());
    }

    #[test]
    fn test_empty_network_is_rejected() {
        let mut network = ReactionNetwork::new();
        let profile = ConstantTemperature::new(0.155);
        let config = EvolutionConfig::new(0.1, 1.0, 10);
        assert!(evolve(&mut network, &profile, &config).is_err());
    }

    #[test]
    fn test_sample_counts_and_time_grid() {
        let mut network = pion_gas();
        let profile = ConstantTemperature::new(0.155);
        let config = EvolutionConfig::new(0.1, 1.1, 50);

        let result = evolve(&mut network, &profile, &config).unwrap();
        assert_eq!(result.time_points.len(), 51);
        assert_eq!(result.density_series(211).unwrap().len(), 51);
        assert!((result.time_points[0] - 0.1).abs() < 1e-12);
        assert!((result.time_points[50] - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_metadata_is_recorded() {
        let mut network = pion_gas();
        let profile = ConstantTemperature::new(0.155);
        let config = EvolutionConfig::new(0.1, 1.1, 10);

        let result = evolve(&mut network, &profile, &config).unwrap();
        assert_eq!(
            result.metadata.get("integrator"),
            Some(&"Runge-Kutta 4".to_string())
        );
        assert_eq!(result.metadata.get("time steps"), Some(&"10".to_string()));
        assert_eq!(
            result.metadata.get("temperature profile"),
            Some(&"Constant temperature".to_string())
        );
    }

    #[test]
    fn test_reaction_free_species_stays_put() {
        let mut network = pion_gas();
        let profile = ConstantTemperature::new(0.155);
        let config = EvolutionConfig::new(0.1, 2.0, 100);

        let result = evolve(&mut network, &profile, &config).unwrap();
        let series = result.density_series(211).unwrap();
        let initial = series[0];
        assert!(initial > 0.0);
        for sample in series.iter() {
            assert_eq!(*sample, initial);
        }
    }
}
