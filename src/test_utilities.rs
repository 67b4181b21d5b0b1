//! Shared fixtures and brute-force reference counters for the test suite.

use crate::graph::Graph;
use crate::two_paths::TwoPathCacheKind;
use crate::types::*;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// A collision-safe scratch path for tests that write files.
pub fn temp_path(name: &str) -> String {
    Path::new(&std::env::temp_dir())
        .join(format!("ergm_{}_{}", std::process::id(), name))
        .to_str()
        .unwrap()
        .to_string()
}

/// Undirected path 0-1-...-(n-1).
pub fn path_graph(n: NodeT, cache: TwoPathCacheKind) -> Graph {
    let mut graph = Graph::new(n, false, None, cache).unwrap();
    for node in 0..n - 1 {
        graph.insert_edge(node, node + 1);
    }
    graph
}

/// Undirected cycle on n nodes.
pub fn cycle_graph(n: NodeT, cache: TwoPathCacheKind) -> Graph {
    let mut graph = path_graph(n, cache);
    graph.insert_edge(n - 1, 0);
    graph
}

/// Directed cycle 0 -> 1 -> ... -> 0.
pub fn directed_cycle(n: NodeT, cache: TwoPathCacheKind) -> Graph {
    let mut graph = Graph::new(n, true, None, cache).unwrap();
    for node in 0..n {
        graph.insert_edge(node, (node + 1) % n);
    }
    graph
}

/// Complete bipartite graph on `mode_a + mode_b` nodes.
pub fn complete_bipartite(mode_a: NodeT, mode_b: NodeT, cache: TwoPathCacheKind) -> Graph {
    let mut graph = Graph::new(mode_a + mode_b, false, Some(mode_a), cache).unwrap();
    for a in 0..mode_a {
        for b in mode_a..mode_a + mode_b {
            graph.insert_edge(a, b);
        }
    }
    graph
}

/// Erdos-Renyi-style graph with `edges` distinct random edges.
pub fn random_graph(
    n: NodeT,
    edges: EdgeT,
    directed: bool,
    mode_a: Option<NodeT>,
    cache: TwoPathCacheKind,
    seed: u64,
) -> Graph {
    let mut graph = Graph::new(n, directed, mode_a, cache).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    while graph.get_edges_number() < edges {
        let (src, dst) = random_dyad(&graph, &mut rng);
        if !graph.has_edge(src, dst) {
            graph.insert_edge(src, dst);
        }
    }
    graph
}

/// Uniform candidate dyad of the right shape for the graph's mode.
pub fn random_dyad(graph: &Graph, rng: &mut SmallRng) -> (NodeT, NodeT) {
    let n = graph.get_nodes_number();
    loop {
        let (src, dst) = if graph.is_bipartite() {
            let mode_a = graph.get_mode_a_number();
            (rng.gen_range(0, mode_a), rng.gen_range(mode_a, n))
        } else {
            (rng.gen_range(0, n), rng.gen_range(0, n))
        };
        if src != dst {
            return (src, dst);
        }
    }
}

/// Triangle count by brute force over node triples.
pub fn brute_force_triangles(graph: &Graph) -> u64 {
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .filter(|&(a, b, c)| {
            graph.has_edge(a, b) && graph.has_edge(b, c) && graph.has_edge(a, c)
        })
        .count() as u64
}

/// Four-cycle count by brute force over ordered quadruples, each cycle
/// counted once.
pub fn brute_force_four_cycles(graph: &Graph) -> u64 {
    let n = graph.get_nodes_number();
    let mut cycles = 0u64;
    // a is the smallest corner; b and d its neighbours on the cycle with
    // b < d; c the opposite corner.
    for a in 0..n {
        for b in 0..n {
            if b <= a || !graph.has_edge(a, b) {
                continue;
            }
            for d in b + 1..n {
                if d == a || !graph.has_edge(a, d) {
                    continue;
                }
                for c in 0..n {
                    if c <= a || c == b || c == d {
                        continue;
                    }
                    if graph.has_edge(b, c) && graph.has_edge(d, c) {
                        cycles += 1;
                    }
                }
            }
        }
    }
    cycles
}

/// Common-neighbour count from scratch.
pub fn brute_force_two_paths(graph: &Graph, first: NodeT, second: NodeT) -> u32 {
    (0..graph.get_nodes_number())
        .filter(|&k| {
            k != first && k != second && graph.has_edge(first, k) && graph.has_edge(second, k)
        })
        .count() as u32
}
