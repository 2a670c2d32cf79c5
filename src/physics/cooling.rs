//! Background temperature profiles
//!
//! The reaction network never owns the medium: each time step receives the
//! current temperature from outside. The [`TemperatureProfile`] trait is the
//! seam where medium models plug in, so the same driver loop runs against a
//! static thermal bath or a longitudinally expanding fireball.

// =================================================================================================
// TemperatureProfile
// =================================================================================================

/// A background temperature trajectory T(τ).
///
/// Implementors map a proper time τ (fm/c) to a temperature (GeV). The
/// driver samples the profile once per time step, at the step's starting
/// point.
pub trait TemperatureProfile {
    /// Temperature in GeV at proper time `tau` (fm/c).
    fn temperature(&self, tau: f64) -> f64;

    /// Human-readable profile name for result metadata.
    fn name(&self) -> &str;
}

// =================================================================================================
// Implementations
// =================================================================================================

/// A static thermal bath: T(τ) = T₀ for all τ.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTemperature {
    /// Bath temperature **\[GeV\]**
    pub t_0: f64,
}

impl ConstantTemperature {
    pub fn new(t_0: f64) -> Self {
        Self { t_0 }
    }
}

impl TemperatureProfile for ConstantTemperature {
    fn temperature(&self, _tau: f64) -> f64 {
        self.t_0
    }

    fn name(&self) -> &str {
        "Constant temperature"
    }
}

/// Ideal boost-invariant longitudinal expansion.
///
/// Bjorken hydrodynamics with an ideal-gas equation of state cools the
/// medium as
///
/// $$T(\tau) = T_0 \left(\frac{\tau_0}{\tau}\right)^{4/3}$$
///
/// # Example
///
/// ```rust
/// use freezeout_rs::physics::{IdealHydroCooling, TemperatureProfile};
///
/// let profile = IdealHydroCooling::new(0.1, 0.5);
/// assert!((profile.temperature(0.1) - 0.5).abs() < 1e-12);
/// assert!(profile.temperature(1.0) < profile.temperature(0.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdealHydroCooling {
    /// Initial proper time τ₀ **\[fm/c\]**
    pub tau_0: f64,

    /// Temperature at τ₀ **\[GeV\]**
    pub t_0: f64,
}

impl IdealHydroCooling {
    pub fn new(tau_0: f64, t_0: f64) -> Self {
        Self { tau_0, t_0 }
    }
}

impl TemperatureProfile for IdealHydroCooling {
    fn temperature(&self, tau: f64) -> f64 {
        self.t_0 * (4.0 / 3.0 * (self.tau_0 / tau).ln()).exp()
    }

    fn name(&self) -> &str {
        "Ideal hydrodynamic cooling"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_profile_is_flat() {
        let bath = ConstantTemperature::new(0.155);
        assert_eq!(bath.temperature(0.1), 0.155);
        assert_eq!(bath.temperature(20.0), 0.155);
    }

    #[test]
    fn test_cooling_matches_power_law() {
        let profile = IdealHydroCooling::new(0.1, 0.5);
        let expected = 0.5 * (0.1_f64 / 1.7).powf(4.0 / 3.0);
        assert!((profile.temperature(1.7) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cooling_is_monotone() {
        let profile = IdealHydroCooling::new(0.1, 0.5);
        let mut previous = profile.temperature(0.1);
        for step in 1..200 {
            let t = profile.temperature(0.1 + step as f64 * 0.1);
            assert!(t < previous);
            previous = t;
        }
    }
}
