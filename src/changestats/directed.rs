//! Change statistics of directed graphs.

use super::*;
use crate::graph::Graph;
use crate::types::*;
use itertools::Itertools;

pub fn change_reciprocity(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    if graph.has_edge(dst, src) {
        1.0
    } else {
        0.0
    }
}

/// Mutual dyads, each counted once.
pub fn stat_reciprocity(graph: &Graph) -> f64 {
    graph
        .iter_edges()
        .filter(|&(src, dst)| src < dst && graph.has_edge(dst, src))
        .count() as f64
}

pub fn change_in_two_stars(graph: &Graph, _src: NodeT, dst: NodeT) -> f64 {
    graph.get_in_degree(dst) as f64
}

pub fn stat_in_two_stars(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| choose_two(graph.get_in_degree(node)))
        .sum()
}

pub fn change_out_two_stars(graph: &Graph, src: NodeT, _dst: NodeT) -> f64 {
    graph.get_out_degree(src) as f64
}

pub fn stat_out_two_stars(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| choose_two(graph.get_out_degree(node)))
        .sum()
}

/// Mixed two-paths gained: the arc extends a path beyond `dst` and one
/// into `src`; a mutual pair would be a length-two cycle, not a path.
pub fn change_two_paths(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    let mutual = if graph.has_edge(dst, src) { 2.0 } else { 0.0 };
    graph.get_out_degree(dst) as f64 + graph.get_in_degree(src) as f64 - mutual
}

pub fn stat_two_paths(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| {
            (graph.two_path_mixed(first, second) + graph.two_path_mixed(second, first)) as f64
        })
        .sum()
}

pub fn change_isolates(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    let mut change = 0.0;
    if graph.get_total_degree(src) == 0 {
        change -= 1.0;
    }
    if graph.get_total_degree(dst) == 0 {
        change -= 1.0;
    }
    change
}

pub fn stat_isolates(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .filter(|&node| graph.get_total_degree(node) == 0)
        .count() as f64
}

/// Sinks: receivers that never send. The source endpoint stops being one,
/// the target may become one.
pub fn change_sink(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    let mut change = 0.0;
    if graph.get_out_degree(src) == 0 && graph.get_in_degree(src) > 0 {
        change -= 1.0;
    }
    if graph.get_out_degree(dst) == 0 && graph.get_in_degree(dst) == 0 {
        change += 1.0;
    }
    change
}

pub fn stat_sink(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .filter(|&node| graph.get_out_degree(node) == 0 && graph.get_in_degree(node) > 0)
        .count() as f64
}

/// Sources: senders that never receive.
pub fn change_source(graph: &Graph, src: NodeT, dst: NodeT) -> f64 {
    let mut change = 0.0;
    if graph.get_in_degree(src) == 0 && graph.get_out_degree(src) == 0 {
        change += 1.0;
    }
    if graph.get_in_degree(dst) == 0 && graph.get_out_degree(dst) > 0 {
        change -= 1.0;
    }
    change
}

pub fn stat_source(graph: &Graph) -> f64 {
    (0..graph.get_nodes_number())
        .filter(|&node| graph.get_in_degree(node) == 0 && graph.get_out_degree(node) > 0)
        .count() as f64
}

pub fn change_alt_in_stars(graph: &Graph, _src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    alt_delta(lambda, graph.get_in_degree(dst))
}

pub fn stat_alt_in_stars(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| alt_value(lambda, graph.get_in_degree(node)))
        .sum()
}

pub fn change_alt_out_stars(graph: &Graph, src: NodeT, _dst: NodeT, lambda: f64) -> f64 {
    alt_delta(lambda, graph.get_out_degree(src))
}

pub fn stat_alt_out_stars(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .map(|node| alt_value(lambda, graph.get_out_degree(node)))
        .sum()
}

/// Alternating transitive two-paths over ordered pairs.
pub fn change_alt_two_paths_t(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    graph
        .iter_out_neighbours(dst)
        .filter(|&k| k != src)
        .map(|k| alt_delta(lambda, graph.two_path_mixed(src, k)))
        .sum::<f64>()
        + graph
            .iter_in_neighbours(src)
            .filter(|&k| k != dst)
            .map(|k| alt_delta(lambda, graph.two_path_mixed(k, dst)))
            .sum::<f64>()
}

pub fn stat_alt_two_paths_t(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| {
            alt_value(lambda, graph.two_path_mixed(first, second))
                + alt_value(lambda, graph.two_path_mixed(second, first))
        })
        .sum()
}

/// Alternating shared-source two-paths (unordered pairs with a common
/// in-neighbour).
pub fn change_alt_two_paths_u(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    graph
        .iter_out_neighbours(src)
        .filter(|&k| k != dst)
        .map(|k| alt_delta(lambda, graph.two_path_in(dst, k)))
        .sum()
}

pub fn stat_alt_two_paths_u(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| alt_value(lambda, graph.two_path_in(first, second)))
        .sum()
}

/// Alternating shared-target two-paths (unordered pairs with a common
/// out-neighbour).
pub fn change_alt_two_paths_d(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    graph
        .iter_in_neighbours(dst)
        .filter(|&k| k != src)
        .map(|k| alt_delta(lambda, graph.two_path_out(src, k)))
        .sum()
}

pub fn stat_alt_two_paths_d(graph: &Graph, lambda: f64) -> f64 {
    (0..graph.get_nodes_number())
        .tuple_combinations()
        .map(|(first, second): (NodeT, NodeT)| alt_value(lambda, graph.two_path_out(first, second)))
        .sum()
}

pub fn change_alt_two_paths_td(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    change_alt_two_paths_t(graph, src, dst, lambda) + change_alt_two_paths_d(graph, src, dst, lambda)
}

pub fn stat_alt_two_paths_td(graph: &Graph, lambda: f64) -> f64 {
    stat_alt_two_paths_t(graph, lambda) + stat_alt_two_paths_d(graph, lambda)
}

/// Alternating transitive k-triangles: one unit per arc, counting the
/// mixed two-paths between its endpoints.
pub fn change_alt_k_triangles_t(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    let mut change = alt_value(lambda, graph.two_path_mixed(src, dst));
    for k in graph.iter_out_neighbours(dst) {
        if k != src && graph.has_edge(src, k) {
            change += alt_delta(lambda, graph.two_path_mixed(src, k));
        }
    }
    for k in graph.iter_in_neighbours(src) {
        if k != dst && graph.has_edge(k, dst) {
            change += alt_delta(lambda, graph.two_path_mixed(k, dst));
        }
    }
    change
}

pub fn stat_alt_k_triangles_t(graph: &Graph, lambda: f64) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| alt_value(lambda, graph.two_path_mixed(src, dst)))
        .sum()
}

/// Alternating cyclic k-triangles: one unit per arc, counting the mixed
/// two-paths closing it into a cycle.
pub fn change_alt_k_triangles_c(graph: &Graph, src: NodeT, dst: NodeT, lambda: f64) -> f64 {
    let mut change = alt_value(lambda, graph.two_path_mixed(dst, src));
    for k in graph.iter_out_neighbours(dst) {
        if k != src && graph.has_edge(k, src) {
            change += alt_delta(lambda, graph.two_path_mixed(src, k));
        }
    }
    for k in graph.iter_in_neighbours(src) {
        if k != dst && graph.has_edge(dst, k) {
            change += alt_delta(lambda, graph.two_path_mixed(k, dst));
        }
    }
    change
}

pub fn stat_alt_k_triangles_c(graph: &Graph, lambda: f64) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| alt_value(lambda, graph.two_path_mixed(dst, src)))
        .sum()
}
