//! End-to-end runs of the estimator and simulator on small networks.

extern crate ergm;
use ergm::test_utilities::*;
use ergm::*;
use std::fs;

fn read_last_row(path: &str) -> Vec<f64> {
    let text = fs::read_to_string(path).unwrap();
    let last = text.lines().last().unwrap();
    last.split_whitespace()
        .skip(1)
        .map(|token| token.parse().unwrap())
        .collect()
}

#[test]
fn test_estimation_produces_traces() {
    let network_path = temp_path("estimation.net");
    let graph = random_graph(30, 60, false, None, TwoPathCacheKind::Hash, 12);
    write_pajek(&graph, &network_path).unwrap();
    // The trace files are named theta_<prefix>_<rank>.txt, so the prefix
    // must not carry a directory.
    let prefix = format!("run_{}", std::process::id());
    let config = Config::parse(
        &format!(
            "arclistFile = {}\n\
             useTNTsampler = true\n\
             samplerSteps = 500\n\
             Ssteps = 20\n\
             EEsteps = 40\n\
             seed = 1\n\
             outputFilePrefix = {}\n\
             structParams = {{Edges, AltKStars(2.0)}}\n",
            network_path, prefix
        ),
        "test.cfg",
    )
    .unwrap();
    run_estimation(&config, 0).unwrap();

    let observed_text = fs::read_to_string(format!("obs_stats_{}_0.txt", prefix)).unwrap();
    let observed: Vec<f64> = observed_text
        .lines()
        .nth(1)
        .unwrap()
        .split_whitespace()
        .map(|token| token.parse().unwrap())
        .collect();
    assert_eq!(observed[0], 60.0);
    let theta = read_last_row(&format!("theta_{}_0.txt", prefix));
    assert_eq!(theta.len(), 2);
    assert!(theta.iter().all(|value| value.is_finite()));
    // A sparse network pushes the density parameter negative.
    assert!(theta[0] < 0.0);
    let theta_lines = fs::read_to_string(format!("theta_{}_0.txt", prefix)).unwrap();
    assert_eq!(theta_lines.lines().count(), 1 + 20 + 40);

    for path in [
        network_path,
        format!("obs_stats_{}_0.txt", prefix),
        format!("theta_{}_0.txt", prefix),
        format!("dzA_{}_0.txt", prefix),
    ]
    .iter()
    {
        fs::remove_file(path).unwrap();
    }
}

#[test]
fn test_simulation_emits_networks_and_statistics() {
    let prefix = temp_path("simulation_run");
    let stats_path = temp_path("simulation_stats.txt");
    let config = Config::parse(
        &format!(
            "numNodes = 40\n\
             burnin = 20000\n\
             sampleSize = 5\n\
             interval = 2000\n\
             seed = 2\n\
             simNetFilePrefix = {}\n\
             simStatsFile = {}\n\
             structParams = {{Edges = -2.0}}\n",
            prefix, stats_path
        ),
        "test.cfg",
    )
    .unwrap();
    run_simulation(&config, 0).unwrap();

    let stats = fs::read_to_string(&stats_path).unwrap();
    assert_eq!(stats.lines().count(), 6);
    for sample in 0..5u64 {
        let t = 20000 + (sample + 1) * 2000;
        let network_path = format!("{}_{}.net", prefix, t);
        let network = read_pajek(&network_path).unwrap();
        assert_eq!(network.nodes_number, 40);
        // The statistics row tracks the written network exactly.
        let row: Vec<f64> = stats
            .lines()
            .nth(1 + sample as usize)
            .unwrap()
            .split_whitespace()
            .skip(1)
            .map(|token| token.parse().unwrap())
            .collect();
        assert_eq!(row[0], network.edges.len() as f64);
        fs::remove_file(&network_path).unwrap();
    }
    fs::remove_file(&stats_path).unwrap();
}

#[test]
fn test_ifd_simulation_pins_density() {
    let prefix = temp_path("ifd_sim");
    let stats_path = temp_path("ifd_sim_stats.txt");
    let config = Config::parse(
        &format!(
            "isDirected = true\n\
             numNodes = 10\n\
             numArcs = 20\n\
             useIFDsampler = true\n\
             burnin = 50000\n\
             sampleSize = 10\n\
             interval = 5000\n\
             seed = 3\n\
             simNetFilePrefix = {}\n\
             simStatsFile = {}\n\
             structParams = {{Arc = 0.0, Reciprocity = 0.0}}\n",
            prefix, stats_path
        ),
        "test.cfg",
    )
    .unwrap();
    run_simulation(&config, 0).unwrap();
    let stats = fs::read_to_string(&stats_path).unwrap();
    for sample in 0..10u64 {
        let t = 50000 + (sample + 1) * 5000;
        let network_path = format!("{}_{}.net", prefix, t);
        let network = read_pajek(&network_path).unwrap();
        assert_eq!(network.edges.len(), 20, "sample at t = {}", t);
        fs::remove_file(&network_path).unwrap();
    }
    fs::remove_file(&stats_path).unwrap();
}

#[test]
fn test_simulation_requires_full_theta() {
    let config = Config::parse(
        "numNodes = 10\nstructParams = {Edges}\n",
        "test.cfg",
    )
    .unwrap();
    assert!(run_simulation(&config, 0).is_err());
}

#[test]
fn test_estimation_requires_network() {
    let config = Config::parse(
        "numNodes = 10\nstructParams = {Edges}\n",
        "test.cfg",
    )
    .unwrap();
    assert!(run_estimation(&config, 0).is_err());
}

/// Simulate from known parameters, re-estimate from one realisation, and
/// require the recovered density parameter to land near the truth. Slow,
/// so opt in with --ignored.
#[test]
#[ignore]
fn test_simulation_estimation_round_trip() {
    let prefix = temp_path("round_trip_sim");
    let stats_path = temp_path("round_trip_stats.txt");
    let config = Config::parse(
        &format!(
            "numNodes = 60\n\
             burnin = 200000\n\
             sampleSize = 1\n\
             interval = 1000\n\
             seed = 4\n\
             simNetFilePrefix = {}\n\
             simStatsFile = {}\n\
             structParams = {{Edges = -2.0}}\n",
            prefix, stats_path
        ),
        "test.cfg",
    )
    .unwrap();
    run_simulation(&config, 0).unwrap();
    let network_path = format!("{}_{}.net", prefix, 200000 + 1000);

    let estimation_prefix = format!("round_trip_{}", std::process::id());
    let config = Config::parse(
        &format!(
            "arclistFile = {}\n\
             useTNTsampler = true\n\
             samplerSteps = 1000\n\
             Ssteps = 200\n\
             EEsteps = 2000\n\
             seed = 5\n\
             outputFilePrefix = {}\n\
             structParams = {{Edges}}\n",
            network_path, estimation_prefix
        ),
        "test.cfg",
    )
    .unwrap();
    run_estimation(&config, 0).unwrap();
    let theta = read_last_row(&format!("theta_{}_0.txt", estimation_prefix));
    assert!(
        (theta[0] - (-2.0)).abs() < 0.5,
        "recovered {} for a true density parameter of -2.0",
        theta[0]
    );
    for path in [
        network_path,
        stats_path,
        format!("obs_stats_{}_0.txt", estimation_prefix),
        format!("theta_{}_0.txt", estimation_prefix),
        format!("dzA_{}_0.txt", estimation_prefix),
    ]
    .iter()
    {
        fs::remove_file(path).unwrap();
    }
}
