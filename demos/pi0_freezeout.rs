//! Example: pi0 freeze-out in a cooling hadronic medium
//!
//! Loads a miniature pi0/gamma catalog, evolves the network while the
//! medium cools along the ideal boost-invariant trajectory, and writes the
//! recorded history as CSV and PNG.
//!
//! **Physical System**:
//! - Species: pi0 (PID 111) and gamma (PID 22)
//! - Channel: pi0 -> gamma gamma, Gamma = 7.81e-9 GeV
//! - Medium: T(tau) = T0 (tau0/tau)^(4/3), T0 = 0.5 GeV at tau0 = 0.1 fm/c
//!
//! The run stops at 8 fm/c: beyond that the medium is cold enough that the
//! thermal integral of the pion switches to its non-relativistic branch and
//! the scenario changes character.

use std::fs::File;
use std::io::Write;

use freezeout_rs::evolution::{evolve, EvolutionConfig};
use freezeout_rs::network::ReactionNetwork;
use freezeout_rs::output::export::export_density_csv;
use freezeout_rs::output::visualization::{plot_density_evolution, PlotConfig};
use freezeout_rs::physics::{IdealHydroCooling, TemperatureProfile};

const PARTICLES: &str = "\
111 pi0 0.1349768 7.81e-09 1 0 0 0 0 1 -1 0 1
22 gamma 0.0 0.0 2 0 0 0 0 0 0 0 0
";

const DECAYS: &str = "\
111 pi0 0.1349768 7.81e-09 1 0 0 0 0 1 -1 0 1
111 2 1.0 22 22 0 0 0
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  pi0 Freeze-out - Ideal Hydrodynamic Cooling");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Catalog files ======

    let tmp_dir = std::env::temp_dir();
    let particles_path = tmp_dir.join("pi0_particles.dat");
    let decays_path = tmp_dir.join("pi0_decays.dat");
    File::create(&particles_path)?.write_all(PARTICLES.as_bytes())?;
    File::create(&decays_path)?.write_all(DECAYS.as_bytes())?;

    let mut network = ReactionNetwork::from_files(&particles_path, &decays_path)?;
    println!("Catalog:");
    println!("  species    : {}", network.len());
    for particle in network.particles() {
        println!(
            "  PID {:>4}   : m = {} GeV, {} channel(s)",
            particle.pid(),
            particle.mass(),
            particle.reactions().len()
        );
    }

    // ====== Run configuration ======

    let tau_0: f64 = 0.1; // fm/c
    let tau_f: f64 = 8.0; // fm/c
    let t_0 = 0.5; // GeV
    let dtau = tau_0 / 20.0;
    let steps = ((tau_f - tau_0) / dtau).round() as usize;

    let profile = IdealHydroCooling::new(tau_0, t_0);
    let config = EvolutionConfig::new(tau_0, tau_f, steps);

    println!("\nSimulation:");
    println!("  tau        : {} -> {} fm/c", tau_0, tau_f);
    println!("  dtau       : {} fm/c ({} steps)", dtau, steps);
    println!("  T(tau_0)   : {} GeV", profile.temperature(tau_0));
    println!("  T(tau_f)   : {:.6} GeV\n", profile.temperature(tau_f));

    // ====== Evolution ======

    let result = evolve(&mut network, &profile, &config)?;

    let n_pi0 = result.density_series(111).ok_or("missing pi0 series")?;
    println!("pi0 density:");
    println!("  initial    : {:.6e} fm^-3", n_pi0[0]);
    println!("  final      : {:.6e} fm^-3", n_pi0[n_pi0.len() - 1]);
    println!(
        "  gamma final: {:.6e} fm^-3",
        result.final_density(22).ok_or("missing gamma series")?
    );

    // ====== Output artifacts ======

    let csv_path = tmp_dir.join("pi0_freezeout.csv");
    export_density_csv(
        &result,
        &[111, 22],
        Some(1000),
        &csv_path,
    )?;
    println!("\nCSV written to {}", csv_path.display());

    let png_path = tmp_dir.join("pi0_freezeout.png");
    let mut plot_config = PlotConfig::default();
    plot_config.title = "pi0 freeze-out".to_string();
    plot_density_evolution(
        &result,
        &[111, 22],
        &["pi0", "gamma"],
        png_path.to_str().ok_or("non-UTF8 temp path")?,
        Some(&plot_config),
    )?;
    println!("Plot written to {}", png_path.display());

    Ok(())
}
