//! Example: a small resonance gas - static bath vs cooling medium
//!
//! Builds a pi/rho/omega network programmatically, then runs it twice:
//!
//! 1. In a static thermal bath at T = 0.155 GeV, where every species must
//!    hold its equilibrium density (detailed balance)
//! 2. In a cooling medium, where resonance populations are regenerated by
//!    inverse decays while the photon channel slowly leaks
//!
//! **Channels**:
//! - rho0   -> pi+ pi-      (branching 1.0,   Gamma = 0.1491 GeV)
//! - omega  -> pi+ pi- pi0  (branching 0.892, Gamma = 8.49e-3 GeV)
//! - omega  -> pi0 gamma    (branching 0.084)

use freezeout_rs::evolution::{evolve, EvolutionConfig, EvolutionResult};
use freezeout_rs::network::{Particle, ReactionNetwork};
use freezeout_rs::output::export::export_density_csv;
use freezeout_rs::physics::{
    ConstantTemperature, IdealHydroCooling, SpinStatistics, TemperatureProfile,
};

fn build_network() -> Result<ReactionNetwork, Box<dyn std::error::Error>> {
    let mut network = ReactionNetwork::new();

    network.insert_particle(Particle::new(22, 0.0, 2.0, 0.0, SpinStatistics::BoseEinstein, 0));
    network.insert_particle(Particle::new(
        111,
        0.1349768,
        1.0,
        7.81e-9,
        SpinStatistics::BoseEinstein,
        0,
    ));
    network.insert_particle(Particle::new(
        211,
        0.13957,
        1.0,
        0.0,
        SpinStatistics::BoseEinstein,
        0,
    ));
    network.insert_particle(Particle::new(
        -211,
        0.13957,
        1.0,
        0.0,
        SpinStatistics::BoseEinstein,
        0,
    ));
    network.insert_particle(Particle::new(
        113,
        0.77526,
        3.0,
        0.1491,
        SpinStatistics::BoseEinstein,
        1,
    ));
    network.insert_particle(Particle::new(
        223,
        0.78266,
        3.0,
        8.49e-3,
        SpinStatistics::BoseEinstein,
        2,
    ));

    network.add_decay(113, 1.0, &[211, -211])?;
    network.add_decay(223, 0.892, &[211, -211, 111])?;
    network.add_decay(223, 0.084, &[111, 22])?;

    Ok(network)
}

fn report(label: &str, result: &EvolutionResult, pids: &[(i64, &str)]) {
    println!("{label}:");
    for &(pid, name) in pids {
        let series = match result.density_series(pid) {
            Some(series) => series,
            None => continue,
        };
        println!(
            "  {:<6} n(tau_0) = {:.4e}   n(tau_f) = {:.4e} fm^-3",
            name,
            series[0],
            series[series.len() - 1]
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Resonance Gas - Static Bath vs Cooling Medium");
    println!("═══════════════════════════════════════════════════════\n");

    let species: [(i64, &str); 6] = [
        (211, "pi+"),
        (-211, "pi-"),
        (111, "pi0"),
        (113, "rho0"),
        (223, "omega"),
        (22, "gamma"),
    ];

    // ====== Run 1: static thermal bath ======

    let mut network = build_network()?;
    let bath = ConstantTemperature::new(0.155);
    let static_config = EvolutionConfig::new(0.1, 10.0, 1980);

    let static_result = evolve(&mut network, &bath, &static_config)?;
    report("Static bath at T = 0.155 GeV", &static_result, &species);

    // Detailed balance: nothing may drift
    for &(pid, name) in &species {
        let series = static_result.density_series(pid).ok_or("missing series")?;
        let drift = (series[series.len() - 1] - series[0]).abs() / series[0];
        println!("  {:<6} relative drift over the run: {:.2e}", name, drift);
    }
    println!();

    // ====== Run 2: cooling medium ======

    // Stops at tau = 2.0 fm/c, while every species is still on the
    // relativistic branch of its thermal integral
    let mut network = build_network()?;
    let cooling = IdealHydroCooling::new(0.1, 0.5);
    let cooling_config = EvolutionConfig::new(0.1, 2.0, 380);

    println!(
        "Cooling medium: T = {:.3} -> {:.4} GeV",
        cooling.temperature(0.1),
        cooling.temperature(2.0)
    );
    let cooling_result = evolve(&mut network, &cooling, &cooling_config)?;
    report("Cooling run", &cooling_result, &species);

    // ====== CSV export ======

    let csv_path = std::env::temp_dir().join("resonance_gas.csv");
    let pids: Vec<i64> = species.iter().map(|&(pid, _)| pid).collect();
    export_density_csv(&cooling_result, &pids, None, &csv_path)?;
    println!("Cooling-run CSV written to {}", csv_path.display());

    Ok(())
}
