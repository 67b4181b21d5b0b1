//! Tie / no-tie sampler: half the proposals pick an existing edge to
//! remove, half a non-edge to add, with the proposal ratio correcting for
//! the different sampling densities of the two sets.

use super::{attempt_toggle, draw_edge, draw_non_edge};
use crate::graph::Graph;
use crate::model::Model;
use rand::rngs::SmallRng;
use rand::Rng;

pub(crate) fn step(
    graph: &mut Graph,
    model: &Model,
    theta: &[f64],
    dz_a: &mut [f64],
    scratch: &mut [f64],
    rng: &mut SmallRng,
) -> bool {
    let edges = graph.toggleable_edges();
    let non_edges = graph.toggleable_dyads() - edges;
    if non_edges == 0 && edges == 0 {
        return false;
    }
    let inserting = edges == 0 || (non_edges > 0 && rng.gen::<f64>() < 0.5);
    if inserting {
        let (src, dst) = draw_non_edge(graph, rng);
        // Forward: the insertion branch (forced when no edge exists) picks
        // one of the non-edges; reverse: the removal branch picks the new
        // edge among edges + 1.
        let forward = if edges == 0 { 1.0 } else { 0.5 } / non_edges as f64;
        let reverse = 0.5 / (edges + 1) as f64;
        attempt_toggle(
            graph,
            model,
            theta,
            src,
            dst,
            false,
            reverse / forward,
            0.0,
            dz_a,
            scratch,
            rng,
        )
    } else {
        let (src, dst) = match draw_edge(graph, rng) {
            Some(edge) => edge,
            None => return false,
        };
        let forward = 0.5 / edges as f64;
        let reverse = if edges == 1 { 1.0 } else { 0.5 } / (non_edges + 1) as f64;
        attempt_toggle(
            graph,
            model,
            theta,
            src,
            dst,
            true,
            reverse / forward,
            0.0,
            dz_a,
            scratch,
            rng,
        )
    }
}
