//! Change statistics of undirected one-mode graphs. The four-cycle and
//! node-power statistics also serve bipartite graphs, where the two-path
//! accessor dispatches to the per-mode tables.

use super::*;
use crate::graph::Graph;
use crate::types::*;
use hashbrown::HashMap;
use itertools::Itertools;

/// Edge count: the density term of every model.
#[inline]
pub fn change_edges(_graph: &Graph, _src: NodeT, _dst: NodeT) -> f64 {
    1.0
}

pub fn stat_edges(graph: &Graph) -> f64 {
    graph.get_edges_number() as f64
}

/// Two-stars gained by the toggle: one per existing edge at either endpoint.
pub fn change_two_stars(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    (graph.get_node_degree(src) + graph.get_node_degree(dst)) as f64
}

pub fn stat_two_stars(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| choose_two(graph.get_node_degree(node)))
        .sum()
}

pub fn change_three_stars(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    choose_two(graph.get_node_degree(src)) + choose_two(graph.get_node_degree(dst))
}

pub fn stat_three_stars(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| choose_three(graph.get_node_degree(node)))
        .sum()
}

/// Triangles closed by the toggle: one per common neighbour.
pub fn change_triangles(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    graph.two_path(src, dst) as f64
}

pub fn stat_triangles(graph: &Graph) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| graph.two_path(src, dst) as f64)
        .sum::<f64>()
        / 3.0
}

/// Four-cycles closed by the toggle: one per two-path from `src` to each
/// other neighbour of `dst`. Valid for one-mode and bipartite graphs.
pub fn change_four_cycles(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    graph
        .iter_neighbours(dst)
        .filter(|&k| k != src)
        .map(|k| graph.two_path(src, k) as f64)
        .sum()
}

/// Every four-cycle has two same-mode opposite pairs, each holding two of
/// its two-paths.
pub fn stat_four_cycles(graph: &Graph) -> f64 {
    iter_same_mode_pairs(graph)
        .map(|(first, second)| choose_two(graph.two_path(first, second)))
        .sum::<f64>()
        / 2.0
}

pub fn change_isolates(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    let mut change = 0.0;
    if graph.get_node_degree(src) == 0 {
        change -= 1.0;
    }
    if graph.get_node_degree(dst) == 0 {
        change -= 1.0;
    }
    change
}

pub fn stat_isolates(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .filter(|&node| graph.get_node_degree(node) == 0)
        .count() as f64
}

pub fn change_alt_k_stars(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    alt_delta(lambda, graph.get_node_degree(src)) + alt_delta(lambda, graph.get_node_degree(dst))
}

pub fn stat_alt_k_stars(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| alt_value(lambda, graph.get_node_degree(node)))
        .sum()
}

/// Alternating two-paths: the toggle opens a path between `src` and every
/// other neighbour of `dst`, and symmetrically.
pub fn change_alt_two_paths(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    graph
        .iter_neighbours(dst)
        .filter(|&k| k != src)
        .map(|k| alt_delta(lambda, graph.two_path(src, k)))
        .sum::<f64>()
        + graph
            .iter_neighbours(src)
            .filter(|&k| k != dst)
            .map(|k| alt_delta(lambda, graph.two_path(dst, k)))
            .sum::<f64>()
}

pub fn stat_alt_two_paths(graph: &Graph, lambda: f64) -> f64 {
    iter_same_mode_pairs(graph)
        .map(|(first, second)| alt_value(lambda, graph.two_path(first, second)))
        .sum()
}

/// Alternating k-triangles: the new edge contributes its own two-path
/// count, and deepens the triangle counts of the edges toward every common
/// neighbour.
pub fn change_alt_k_triangles(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    let (smaller, other) = if graph.get_node_degree(src) <= graph.get_node_degree(dst) {
        (src, dst)
    } else {
        (dst, src)
    };
    let mut change = alt_value(lambda, graph.two_path(src, dst));
    for k in graph.iter_neighbours(smaller) {
        if k == other || !graph.has_edge(k, other) {
            continue;
        }
        change += alt_delta(lambda, graph.two_path(src, k))
            + alt_delta(lambda, graph.two_path(dst, k));
    }
    change
}

pub fn stat_alt_k_triangles(graph: &Graph, lambda: f64) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| alt_value(lambda, graph.two_path(src, dst)))
        .sum()
}

/// Number of four-cycles through `node`, recounted from its two-hop
/// neighbourhood: one cycle per pair of two-paths to the same opposite
/// corner.
pub fn node_four_cycles(graph: &Graph, node: NodeT) -> u32 {
    let mut opposite: HashMap<NodeT, u32> = HashMap::new();
    for k in graph.iter_neighbours(node) {
        for corner in graph.iter_neighbours(k) {
            if corner != node {
                *opposite.entry(corner).or_insert(0) += 1;
            }
        }
    }
    opposite
        .values()
        .map(|&paths| paths * (paths - 1) / 2)
        .sum()
}

/// Sum over nodes of the node-local four-cycle count raised to
/// `1 / lambda`. The toggle is resolved by enumerating the cycles it
/// closes and re-evaluating the power at every touched node.
pub fn change_four_cycles_node_power(
    graph: &Graph,
    src: NodeT,
    dst: NodeT,
    lambda: f64,
) -> f64 {
    let exponent = 1.0 / lambda;
    let mut increments: HashMap<NodeT, u32> = HashMap::new();
    for k in graph.iter_neighbours(dst) {
        if k == src {
            continue;
        }
        for l in graph.iter_neighbours(src) {
            if l == dst || l == k || !graph.has_edge(k, l) {
                continue;
            }
            *increments.entry(src).or_insert(0) += 1;
            *increments.entry(dst).or_insert(0) += 1;
            *increments.entry(k).or_insert(0) += 1;
            *increments.entry(l).or_insert(0) += 1;
        }
    }
    increments
        .into_iter()
        .map(|(node, gained)| {
            let current = node_four_cycles(graph, node) as f64;
            pow0(current + gained as f64, exponent) - pow0(current, exponent)
        })
        .sum()
}

pub fn stat_four_cycles_node_power(graph: &Graph, lambda: f64) -> f64 {
    let exponent = 1.0 / lambda;
    (0..graph.get_nodes_number())
        .map(|node| pow0(node_four_cycles(graph, node) as f64, exponent))
        .sum()
}

/// Unordered same-mode pairs: all pairs on one-mode graphs, the within-mode
/// pairs on bipartite ones.
pub(crate) fn iter_same_mode_pairs(graph: &Graph) -> impl Iterator<Item = (NodeT, NodeT)> + '_ {
    let mode_a = graph.get_mode_a_number();
    let bipartite = graph.is_bipartite();
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .filter(move |&(first, second)| {
            !bipartite || (first < mode_a) == (second < mode_a)
        })
}
