//! Basic sampler: uniform dyad, toggle whatever state it is in, `q = 1`.

use super::{attempt_toggle, draw_dyad};
use crate::graph::Graph;
use crate::model::Model;
use rand::rngs::SmallRng;

pub(crate) fn step(
    graph: &mut Graph,
    model: &Model,
    theta: &[f64],
    dz_a: &mut [f64],
    scratch: &mut [f64],
    rng: &mut SmallRng,
) -> bool {
    let (src, dst) = draw_dyad(graph, rng);
    let removing = graph.has_edge(src, dst);
    attempt_toggle(
        graph, model, theta, src, dst, removing, 1.0, 0.0, dz_a, scratch, rng,
    )
}
