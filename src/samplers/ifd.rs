//! Improved fixed-density sampler. At the target edge count the move is a
//! compound swap of one edge for one non-edge, which cannot change the
//! density. Off target (a simulation may start from an empty graph) the
//! kernel falls back to single corrective toggles whose acceptance carries
//! the auxiliary-parameter penalty `-aux * (change in edge count)`; the
//! auxiliary parameter itself follows the gradient step
//! `aux += k * (edges - target)` every iteration.

use super::{accept, attempt_toggle, draw_edge, draw_non_edge};
use crate::graph::Graph;
use crate::model::Model;
use crate::types::*;
use rand::rngs::SmallRng;

#[allow(clippy::too_many_arguments)]
pub(crate) fn step(
    graph: &mut Graph,
    model: &Model,
    theta: &[f64],
    dz_a: &mut [f64],
    scratch: &mut [f64],
    swap_scratch: &mut [f64],
    aux: &mut f64,
    k: f64,
    target: EdgeT,
    rng: &mut SmallRng,
) -> bool {
    let edges = graph.get_edges_number();
    let moved = if edges == target {
        swap_step(graph, model, theta, dz_a, scratch, swap_scratch, rng)
    } else if edges < target {
        let (src, dst) = draw_non_edge(graph, rng);
        attempt_toggle(
            graph, model, theta, src, dst, false, 1.0, -*aux, dz_a, scratch, rng,
        )
    } else {
        match draw_edge(graph, rng) {
            Some((src, dst)) => attempt_toggle(
                graph, model, theta, src, dst, true, 1.0, *aux, dz_a, scratch, rng,
            ),
            None => false,
        }
    };
    *aux += k * (graph.get_edges_number() as f64 - target as f64);
    moved
}

/// One edge out, one non-edge in, as a single move. The proposal is
/// symmetric, so `q = 1`.
fn swap_step(
    graph: &mut Graph,
    model: &Model,
    theta: &[f64],
    dz_a: &mut [f64],
    removal: &mut [f64],
    insertion: &mut [f64],
    rng: &mut SmallRng,
) -> bool {
    let (removed_src, removed_dst) = match draw_edge(graph, rng) {
        Some(edge) => edge,
        None => return false,
    };
    graph.remove_edge(removed_src, removed_dst);
    model.change_vector(graph, removed_src, removed_dst, removal);
    let (added_src, added_dst) = draw_non_edge(graph, rng);
    model.change_vector(graph, added_src, added_dst, insertion);
    let score = theta
        .iter()
        .zip(insertion.iter().zip(removal.iter()))
        .map(|(parameter, (gain, loss))| parameter * (gain - loss))
        .sum::<f64>();
    if accept(rng, 1.0, score) {
        graph.insert_edge(added_src, added_dst);
        for (accumulated, (gain, loss)) in dz_a.iter_mut().zip(insertion.iter().zip(removal.iter()))
        {
            *accumulated += gain - loss;
        }
        true
    } else {
        graph.insert_edge(removed_src, removed_dst);
        false
    }
}
