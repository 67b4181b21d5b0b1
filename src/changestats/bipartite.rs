//! Change statistics of bipartite (two-mode) graphs. Every function takes
//! the toggle as `(a, b)` with `a` in mode A and `b` in mode B; the model
//! dispatch normalises the endpoint order before calling in here.

use super::*;
use crate::graph::Graph;
use crate::types::*;
use hashbrown::HashMap;
use itertools::Itertools;

#[inline]
fn assert_modes(graph: &Graph, a: NodeT, b: NodeT) {
    debug_assert!(graph.is_bipartite());
    debug_assert!(graph.is_mode_a(a) && !graph.is_mode_a(b));
}

pub fn change_alt_stars_a(graph: &Graph, a: NodeT, b: NodeT, lambda: f64) -> f64 {
    assert_modes(graph, a, b);
    alt_delta(lambda, graph.get_node_degree(a))
}

pub fn stat_alt_stars_a(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_mode_a_number())
        .map(|node| alt_value(lambda, graph.get_node_degree(node)))
        .sum()
}

pub fn change_alt_stars_b(graph: &Graph, a: NodeT, b: NodeT, lambda: f64) -> f64 {
    assert_modes(graph, a, b);
    alt_delta(lambda, graph.get_node_degree(b))
}

pub fn stat_alt_stars_b(graph: &Graph, lambda: f64) -> f64 {
    (graph.get_mode_a_number()..graph.get_nodes_number())
        .map(|node| alt_value(lambda, graph.get_node_degree(node)))
        .sum()
}

/// Alternating k-cycles over mode-A pairs: the toggle opens one more
/// two-path between `a` and every other mode-A neighbour of `b`.
pub fn change_alt_k_cycles_a(graph: &Graph, a: NodeT, b: NodeT, lambda: f64) -> f64 {
    assert_modes(graph, a, b);
    graph
        .iter_neighbours(b)
        .filter(|&k| k != a)
        .map(|k| alt_delta(lambda, graph.two_path(a, k)))
        .sum()
}

pub fn stat_alt_k_cycles_a(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_mode_a_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| alt_value(lambda, graph.two_path(first, second)))
        .sum()
}

pub fn change_alt_k_cycles_b(graph: &Graph, a: NodeT, b: NodeT, lambda: f64) -> f64 {
    assert_modes(graph, a, b);
    graph
        .iter_neighbours(a)
        .filter(|&k| k != b)
        .map(|k| alt_delta(lambda, graph.two_path(b, k)))
        .sum()
}

pub fn stat_alt_k_cycles_b(graph: &Graph, lambda: f64) -> f64 {
    (graph.get_mode_a_number()..graph.get_nodes_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| alt_value(lambda, graph.two_path(first, second)))
        .sum()
}

pub fn change_two_stars_a(graph: &Graph, a: NodeT, b: NodeT) -> f64 {
    assert_modes(graph, a, b);
    graph.get_node_degree(a) as f64
}

pub fn stat_two_stars_a(graph: &Graph) -> f64 {
    (0..graph.get_mode_a_number())
        .map(|node| choose_two(graph.get_node_degree(node)))
        .sum()
}

pub fn change_two_stars_b(graph: &Graph, a: NodeT, b: NodeT) -> f64 {
    assert_modes(graph, a, b);
    graph.get_node_degree(b) as f64
}

pub fn stat_two_stars_b(graph: &Graph) -> f64 {
    (graph.get_mode_a_number()..graph.get_nodes_number())
        .map(|node| choose_two(graph.get_node_degree(node)))
        .sum()
}

pub fn change_activity_a(graph: &Graph, a: NodeT, b: NodeT, attribute: usize) -> f64 {
    assert_modes(graph, a, b);
    match graph.binary_attribute(attribute, a) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

pub fn stat_activity_a(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .filter(|&(src, _)| graph.binary_attribute(attribute, src) == Some(true))
        .count() as f64
}

pub fn change_activity_b(graph: &Graph, a: NodeT, b: NodeT, attribute: usize) -> f64 {
    assert_modes(graph, a, b);
    match graph.binary_attribute(attribute, b) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

pub fn stat_activity_b(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .filter(|&(_, dst)| graph.binary_attribute(attribute, dst) == Some(true))
        .count() as f64
}

/// Mode-A nodes with exactly one neighbour whose binary attribute holds.
fn flagged_degree(graph: &Graph, node: NodeT, attribute: usize) -> u32 {
    graph
        .iter_neighbours(node)
        .filter(|&k| graph.binary_attribute(attribute, k) == Some(true))
        .count() as u32
}

pub fn change_exactly_one_neighbour_a(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
) -> f64 {
    assert_modes(graph, a, b);
    if graph.binary_attribute(attribute, b) != Some(true) {
        return 0.0;
    }
    match flagged_degree(graph, a, attribute) {
        0 => 1.0,
        1 => -1.0,
        _ => 0.0,
    }
}

pub fn stat_exactly_one_neighbour_a(graph: &Graph, attribute: usize) -> f64 {
    (0..graph.get_mode_a_number())
        .filter(|&node| flagged_degree(graph, node, attribute) == 1)
        .count() as f64
}

pub fn change_exactly_one_neighbour_b(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
) -> f64 {
    assert_modes(graph, a, b);
    if graph.binary_attribute(attribute, a) != Some(true) {
        return 0.0;
    }
    match flagged_degree(graph, b, attribute) {
        0 => 1.0,
        1 => -1.0,
        _ => 0.0,
    }
}

pub fn stat_exactly_one_neighbour_b(graph: &Graph, attribute: usize) -> f64 {
    (graph.get_mode_a_number()..graph.get_nodes_number())
        .filter(|&node| flagged_degree(graph, node, attribute) == 1)
        .count() as f64
}

/// Attribute homophily over mode-A pairs: `c^alpha` summed over matching
/// pairs, `c` their common-neighbour count. The toggle raises `c` by one
/// toward every matching co-neighbour of `b`.
pub fn change_nodematch_alpha_a(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
    alpha: f64,
) -> f64 {
    assert_modes(graph, a, b);
    let own = match graph.categorical_attribute(attribute, a) {
        Some(category) => category,
        None => return 0.0,
    };
    graph
        .iter_neighbours(b)
        .filter(|&k| k != a && graph.categorical_attribute(attribute, k) == Some(own))
        .map(|k| {
            let common = graph.two_path(a, k) as f64;
            pow0(common + 1.0, alpha) - pow0(common, alpha)
        })
        .sum()
}

pub fn stat_nodematch_alpha_a(graph: &Graph, attribute: usize, alpha: f64) -> f64 {
    (0..graph.get_mode_a_number())
        .tuple_combinations()
        .filter(|&(first, second): &(NodeT, NodeT)| {
            match (
                graph.categorical_attribute(attribute, first),
                graph.categorical_attribute(attribute, second),
            ) {
                (Some(one), Some(other)) => one == other,
                _ => false,
            }
        })
        .map(|(first, second)| pow0(graph.two_path(first, second) as f64, alpha))
        .sum()
}

pub fn change_nodematch_alpha_b(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
    alpha: f64,
) -> f64 {
    assert_modes(graph, a, b);
    let own = match graph.categorical_attribute(attribute, b) {
        Some(category) => category,
        None => return 0.0,
    };
    graph
        .iter_neighbours(a)
        .filter(|&k| k != b && graph.categorical_attribute(attribute, k) == Some(own))
        .map(|k| {
            let common = graph.two_path(b, k) as f64;
            pow0(common + 1.0, alpha) - pow0(common, alpha)
        })
        .sum()
}

pub fn stat_nodematch_alpha_b(graph: &Graph, attribute: usize, alpha: f64) -> f64 {
    (graph.get_mode_a_number()..graph.get_nodes_number())
        .tuple_combinations()
        .filter(|&(first, second): &(NodeT, NodeT)| {
            match (
                graph.categorical_attribute(attribute, first),
                graph.categorical_attribute(attribute, second),
            ) {
                (Some(one), Some(other)) => one == other,
                _ => false,
            }
        })
        .map(|(first, second)| pow0(graph.two_path(first, second) as f64, alpha))
        .sum()
}

/// Matching co-neighbour counts of the mode-A endpoints of the edges of
/// `b`, grouped by category in one pass.
fn category_counts(graph: &Graph, node: NodeT, attribute: usize) -> HashMap<CategoryT, u32> {
    let mut counts = HashMap::new();
    for k in graph.iter_neighbours(node) {
        if let Some(category) = graph.categorical_attribute(attribute, k) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
    counts
}

/// Edgewise homophily: `u^beta` summed over edges, `u` the number of
/// co-neighbours matching the edge's mode-A endpoint. The toggle both
/// contributes its own edge term and deepens the count of every matching
/// co-neighbour's edge.
pub fn change_nodematch_beta_a(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
    beta: f64,
) -> f64 {
    assert_modes(graph, a, b);
    let own = match graph.categorical_attribute(attribute, a) {
        Some(category) => category,
        None => return 0.0,
    };
    let counts = category_counts(graph, b, attribute);
    let matching = counts.get(&own).copied().unwrap_or(0) as f64;
    let mut change = pow0(matching, beta);
    for k in graph.iter_neighbours(b) {
        if k == a || graph.categorical_attribute(attribute, k) != Some(own) {
            continue;
        }
        // The co-neighbour count of the edge (k, b) gains the new endpoint.
        let others = matching - 1.0;
        change += pow0(others + 1.0, beta) - pow0(others, beta);
    }
    change
}

pub fn stat_nodematch_beta_a(graph: &Graph, attribute: usize, beta: f64) -> f64 {
    graph
        .iter_edges()
        .map(|(a, b)| {
            let own = match graph.categorical_attribute(attribute, a) {
                Some(category) => category,
                None => return 0.0,
            };
            let matching = graph
                .iter_neighbours(b)
                .filter(|&k| k != a && graph.categorical_attribute(attribute, k) == Some(own))
                .count() as f64;
            pow0(matching, beta)
        })
        .sum()
}

pub fn change_nodematch_beta_b(
    graph: &Graph,
    a: NodeT,
    b: NodeT,
    attribute: usize,
    beta: f64,
) -> f64 {
    assert_modes(graph, a, b);
    let own = match graph.categorical_attribute(attribute, b) {
        Some(category) => category,
        None => return 0.0,
    };
    let counts = category_counts(graph, a, attribute);
    let matching = counts.get(&own).copied().unwrap_or(0) as f64;
    let mut change = pow0(matching, beta);
    for k in graph.iter_neighbours(a) {
        if k == b || graph.categorical_attribute(attribute, k) != Some(own) {
            continue;
        }
        let others = matching - 1.0;
        change += pow0(others + 1.0, beta) - pow0(others, beta);
    }
    change
}

pub fn stat_nodematch_beta_b(graph: &Graph, attribute: usize, beta: f64) -> f64 {
    graph
        .iter_edges()
        .map(|(a, b)| {
            let own = match graph.categorical_attribute(attribute, b) {
                Some(category) => category,
                None => return 0.0,
            };
            let matching = graph
                .iter_neighbours(a)
                .filter(|&k| k != b && graph.categorical_attribute(attribute, k) == Some(own))
                .count() as f64;
            pow0(matching, beta)
        })
        .sum()
}
