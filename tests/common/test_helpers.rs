//! Helper functions and fixtures for integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use freezeout_rs::network::{Particle, ReactionNetwork};
use freezeout_rs::physics::SpinStatistics;

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// The pi0 -> gamma gamma miniature catalog, datasheet side.
pub const PI0_PARTICLES: &str = "\
111 pi0 0.1349768 7.81e-09 1 0 0 0 0 1 -1 0 1
22 gamma 0.0 0.0 2 0 0 0 0 0 0 0 0
";

/// The pi0 -> gamma gamma miniature catalog, decays side.
pub const PI0_DECAYS: &str = "\
111 pi0 0.1349768 7.81e-09 1 0 0 0 0 1 -1 0 1
111 2 1.0 22 22 0 0 0
";

/// Write a (particles, decays) catalog pair into a temp directory.
pub fn write_catalog(
    dir: &tempfile::TempDir,
    particles: &str,
    decays: &str,
) -> (PathBuf, PathBuf) {
    let particles_path = dir.path().join("particles.dat");
    let decays_path = dir.path().join("decays.dat");
    File::create(&particles_path)
        .unwrap()
        .write_all(particles.as_bytes())
        .unwrap();
    File::create(&decays_path)
        .unwrap()
        .write_all(decays.as_bytes())
        .unwrap();
    (particles_path, decays_path)
}

/// Load the pi0 -> gamma gamma network from catalog files.
pub fn pi0_network(dir: &tempfile::TempDir) -> ReactionNetwork {
    let (particles, decays) = write_catalog(dir, PI0_PARTICLES, PI0_DECAYS);
    ReactionNetwork::from_files(particles, decays).unwrap()
}

/// A programmatic rho -> pi+ pi- network for equilibrium scenarios.
pub fn rho_pi_network() -> ReactionNetwork {
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

/// A single decay A -> B where the inverse channel is suppressed by a huge
/// daughter degeneracy, so the kernel reduces to dn_A/dt = -Γ n_A.
pub fn pure_decay_network(width: f64) -> ReactionNetwork {
    let mut network = ReactionNetwork::new();
    network.insert_particle(Particle::new(
        1,
        0.5,
        1.0,
        width,
        SpinStatistics::BoseEinstein,
        1,
    ));
    // Degeneracy 1e18 makes n_B / n_B_eq negligible for any density the
    // run can reach, which switches the inverse decays off numerically
    network.insert_particle(Particle::new(
        2,
        0.14,
        1e18,
        0.0,
        SpinStatistics::BoseEinstein,
        0,
    ));
    network.add_decay(1, 1.0, &[2]).unwrap();
    network
}
