//! Catalog loading: construction, enumeration round-trips, failure modes

mod common;

use common::test_helpers::write_catalog;
use freezeout_rs::catalog::CatalogError;
use freezeout_rs::network::ReactionNetwork;

/// Three particles, two channels of the same parent with split branching.
const BRANCHED_PARTICLES: &str = "\
1000 A 1.200 0.05 1 0 0 0 0 0 0 0 2
1001 B 0.400 0.0 1 0 0 0 0 0 0 0 0
1002 C 0.300 0.0 2 0 0 0 0 0 0 0 0
1003 D 0.250 0.0 1 0 0 0 0 0 0 0 0
";

const BRANCHED_DECAYS: &str = "\
1000 A 1.200 0.05 1 0 0 0 0 0 0 0 2
1000 2 0.6 1001 1002 0 0 0
1000 2 0.4 1001 1003 0 0 0
";

fn branched_network() -> ReactionNetwork {
    let dir = tempfile::tempdir().unwrap();
    let (particles, decays) = write_catalog(&dir, BRANCHED_PARTICLES, BRANCHED_DECAYS);
    ReactionNetwork::from_files(particles, decays).unwrap()
}

#[test]
fn test_branched_parent_gets_both_channels() {
    let network = branched_network();
    assert_eq!(network.len(), 4);

    let parent = network.particle(1000).unwrap();
    assert_eq!(parent.reactions().len(), 2);

    // Channel rates are branching x width, bit-exact against the same
    // product computed here
    let rates: Vec<f64> = parent.reactions().iter().map(|r| r.rate()).collect();
    assert_eq!(rates, vec![0.6 * 0.05, 0.4 * 0.05]);
}

#[test]
fn test_reaction_enumeration_round_trips() {
    let network = branched_network();

    // Re-enumerate (parent, branching, products) and compare against the
    // catalog as a multi-set; file order is preserved per parent
    let mut enumerated: Vec<(i64, f64, Vec<i64>)> = Vec::new();
    for particle in network.particles() {
        for reaction in particle.reactions() {
            enumerated.push((
                particle.pid(),
                reaction.branching_ratio(),
                reaction.products().to_vec(),
            ));
        }
    }

    let expected = vec![
        (1000_i64, 0.6, vec![1001_i64, 1002]),
        (1000, 0.4, vec![1001, 1003]),
    ];
    assert_eq!(enumerated, expected);
}

#[test]
fn test_channel_order_is_catalog_order() {
    let network = branched_network();
    let parent = network.particle(1000).unwrap();
    assert_eq!(parent.reactions()[0].products(), &[1001, 1002]);
    assert_eq!(parent.reactions()[1].products(), &[1001, 1003]);
}

#[test]
fn test_stable_species_have_no_channels() {
    let network = branched_network();
    for pid in [1001, 1002, 1003] {
        assert!(network.particle(pid).unwrap().reactions().is_empty());
    }
}

#[test]
fn test_blank_trailing_lines_load_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let (particles, decays) = write_catalog(
        &dir,
        &format!("{BRANCHED_PARTICLES}\n\n"),
        &format!("{BRANCHED_DECAYS}\n"),
    );
    assert!(ReactionNetwork::from_files(particles, decays).is_ok());
}

#[test]
fn test_missing_particles_file_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let (_, decays) = write_catalog(&dir, BRANCHED_PARTICLES, BRANCHED_DECAYS);
    let missing = dir.path().join("absent.dat");

    let err = ReactionNetwork::from_files(missing, decays).unwrap_err();
    assert!(matches!(err, CatalogError::Open { .. }));
}

#[test]
fn test_malformed_line_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    let bad_particles = "1000 A 1.200 0.05 1 0 0 0 0 0 0 0 2\n1001 B not-a-mass 0.0 1 0 0 0 0 0 0 0 0\n";
    let (particles, decays) = write_catalog(&dir, bad_particles, "");

    let err = ReactionNetwork::from_files(particles, decays).unwrap_err();
    match err {
        CatalogError::Parse {
            line_number, line, ..
        } => {
            assert_eq!(line_number, 2);
            assert!(line.contains("not-a-mass"));
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn test_decay_referencing_unknown_pid_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let decays = "1000 A 1.200 0.05 1 0 0 0 0 0 0 0 1\n1000 2 1.0 1001 4242 0 0 0\n";
    let (particles, decays) = write_catalog(&dir, BRANCHED_PARTICLES, decays);

    let err = ReactionNetwork::from_files(particles, decays).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_self_loop_channel_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let decays = "1000 A 1.200 0.05 1 0 0 0 0 0 0 0 1\n1000 2 1.0 1000 1001 0 0 0\n";
    let (particles, decays) = write_catalog(&dir, BRANCHED_PARTICLES, decays);

    let err = ReactionNetwork::from_files(particles, decays).unwrap_err();
    match err {
        CatalogError::Parse { reason, .. } => assert!(reason.contains("parent")),
        other => panic!("expected a parse error, got {other}"),
    }
}
