//! Attribute-conditioned change statistics. A missing value on any
//! endpoint attribute a term reads suppresses that pair's contribution.

use crate::graph::Graph;
use crate::types::*;

pub fn change_activity(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.binary_attribute(attribute, src),
        graph.binary_attribute(attribute, dst),
    ) {
        (Some(first), Some(second)) => (first as u32 + second as u32) as f64,
        _ => 0.0,
    }
}

pub fn stat_activity(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_activity(graph, src, dst, attribute))
        .sum()
}

pub fn change_interaction(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.binary_attribute(attribute, src),
        graph.binary_attribute(attribute, dst),
    ) {
        (Some(true), Some(true)) => 1.0,
        _ => 0.0,
    }
}

pub fn stat_interaction(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_interaction(graph, src, dst, attribute))
        .sum()
}

pub fn change_sender(graph: &Graph, src: NodeT, _dst: NodeT, attribute: usize) -> f64 {
    match graph.binary_attribute(attribute, src) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

pub fn stat_sender(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_sender(graph, src, dst, attribute))
        .sum()
}

pub fn change_receiver(graph: &Graph, _src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match graph.binary_attribute(attribute, dst) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

pub fn stat_receiver(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_receiver(graph, src, dst, attribute))
        .sum()
}

pub fn change_matching(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.categorical_attribute(attribute, src),
        graph.categorical_attribute(attribute, dst),
    ) {
        (Some(first), Some(second)) if first == second => 1.0,
        _ => 0.0,
    }
}

pub fn stat_matching(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_matching(graph, src, dst, attribute))
        .sum()
}

pub fn change_mismatching(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.categorical_attribute(attribute, src),
        graph.categorical_attribute(attribute, dst),
    ) {
        (Some(first), Some(second)) if first != second => 1.0,
        _ => 0.0,
    }
}

pub fn stat_mismatching(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_mismatching(graph, src, dst, attribute))
        .sum()
}

/// Mutual dyads whose endpoints share the category.
pub fn change_matching_reciprocity(
    graph: &Graph,
    src: NodeT,
    dst: NodeT,
    attribute: usize,
) -> f64 {
    if !graph.has_edge(dst, src) {
        return 0.0;
    }
    change_matching(graph, src, dst, attribute)
}

pub fn stat_matching_reciprocity(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .filter(|&(src, dst)| src < dst && graph.has_edge(dst, src))
        .map(|(src, dst)| change_matching(graph, src, dst, attribute))
        .sum()
}

pub fn change_continuous_sum(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.continuous_attribute(attribute, src),
        graph.continuous_attribute(attribute, dst),
    ) {
        (Some(first), Some(second)) => first + second,
        _ => 0.0,
    }
}

pub fn stat_continuous_sum(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_continuous_sum(graph, src, dst, attribute))
        .sum()
}

pub fn change_continuous_sender(graph: &Graph, src: NodeT, _dst: NodeT, attribute: usize) -> f64 {
    graph.continuous_attribute(attribute, src).unwrap_or(0.0)
}

pub fn stat_continuous_sender(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_continuous_sender(graph, src, dst, attribute))
        .sum()
}

pub fn change_continuous_receiver(graph: &Graph, _src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    graph.continuous_attribute(attribute, dst).unwrap_or(0.0)
}

pub fn stat_continuous_receiver(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_continuous_receiver(graph, src, dst, attribute))
        .sum()
}

/// Absolute difference: heterophily on a continuous attribute.
pub fn change_diff(graph: &Graph, src: NodeT, dst: NodeT, attribute: usize) -> f64 {
    match (
        graph.continuous_attribute(attribute, src),
        graph.continuous_attribute(attribute, dst),
    ) {
        (Some(first), Some(second)) => (first - second).abs(),
        _ => 0.0,
    }
}

pub fn stat_diff(graph: &Graph, attribute: usize) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_diff(graph, src, dst, attribute))
        .sum()
}

/// Dyadic covariate: straight-line distance between the endpoints in the
/// coordinate attributes.
pub fn change_euclidean_distance(
    graph: &Graph,
    src: NodeT,
    dst: NodeT,
    coordinates: &[usize],
) -> f64 {
    let mut squared = 0.0;
    for &attribute in coordinates {
        match (
            graph.continuous_attribute(attribute, src),
            graph.continuous_attribute(attribute, dst),
        ) {
            (Some(first), Some(second)) => squared += (first - second) * (first - second),
            _ => return 0.0,
        }
    }
    squared.sqrt()
}

pub fn stat_euclidean_distance(graph: &Graph, coordinates: &[usize]) -> f64 {
    graph
        .iter_edges()
        .map(|(src, dst)| change_euclidean_distance(graph, src, dst, coordinates))
        .sum()
}
