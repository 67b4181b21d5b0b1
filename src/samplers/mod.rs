//! The three MCMC edge-flip samplers and their shared proposal machinery.
//!
//! All three kernels share one acceptance rule: a toggle with change
//! vector `delta` and proposal ratio `q` is accepted with probability
//! `min(1, q * exp(theta . delta))`, the dot product negated for removal
//! moves. Removal proposals take the edge out first and compute the
//! change vector for re-adding it, so the change statistics stay pure
//! functions of a graph without the toggled edge.

use crate::graph::Graph;
use crate::model::Model;
use crate::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

mod basic;
mod ifd;
mod tnt;

/// Build the process-local generator from the optional configured seed and
/// the harness rank.
pub fn seed_rng(seed: Option<u64>, rank: u32) -> SmallRng {
    let base = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0)
    });
    SmallRng::seed_from_u64(base.wrapping_add((rank as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

#[inline]
pub(crate) fn dot(theta: &[f64], delta: &[f64]) -> f64 {
    theta
        .iter()
        .zip(delta.iter())
        .map(|(parameter, change)| parameter * change)
        .sum()
}

/// Metropolis acceptance with proposal ratio `q` and log-density change
/// `score`.
#[inline]
pub(crate) fn accept(rng: &mut SmallRng, q: f64, score: f64) -> bool {
    let probability = q * score.exp();
    probability >= 1.0 || rng.gen::<f64>() < probability
}

/// Uniform admissible dyad: ordered for directed graphs, across the modes
/// for bipartite ones, sources restricted to the latest period under the
/// citation variant, never two fixed endpoints.
pub(crate) fn draw_dyad(graph: &Graph, rng: &mut SmallRng) -> (NodeT, NodeT) {
    let n = graph.get_nodes_number();
    loop {
        let (src, dst) = if graph.has_periods() {
            let latest = graph.get_latest_period_nodes();
            (
                latest[rng.gen_range(0, latest.len())],
                rng.gen_range(0, n),
            )
        } else if graph.is_bipartite() {
            let mode_a = graph.get_mode_a_number();
            (rng.gen_range(0, mode_a), rng.gen_range(mode_a, n))
        } else {
            (rng.gen_range(0, n), rng.gen_range(0, n))
        };
        if src != dst && graph.is_toggleable(src, dst) {
            return (src, dst);
        }
    }
}

/// Uniform admissible non-edge, by rejection from the dyads.
pub(crate) fn draw_non_edge(graph: &Graph, rng: &mut SmallRng) -> (NodeT, NodeT) {
    loop {
        let (src, dst) = draw_dyad(graph, rng);
        if !graph.has_edge(src, dst) {
            return (src, dst);
        }
    }
}

/// Uniform admissible edge, or `None` when every edge is frozen.
pub(crate) fn draw_edge(graph: &Graph, rng: &mut SmallRng) -> Option<(NodeT, NodeT)> {
    if graph.toggleable_edges() == 0 {
        return None;
    }
    loop {
        let (src, dst) = graph.edge_list[rng.gen_range(0, graph.edge_list.len())];
        if graph.is_toggleable(src, dst) {
            return Some((src, dst));
        }
    }
}

/// Propose a single toggle of `(src, dst)` and carry it out on acceptance.
/// `extra_score` joins the log-density change; the IFD kernel routes its
/// auxiliary-parameter penalty through it. Returns whether the move was
/// accepted, accumulating the signed change vector into `dz_a`.
pub(crate) fn attempt_toggle(
    graph: &mut Graph,
    model: &Model,
    theta: &[f64],
    src: NodeT,
    dst: NodeT,
    removing: bool,
    q: f64,
    extra_score: f64,
    dz_a: &mut [f64],
    scratch: &mut [f64],
    rng: &mut SmallRng,
) -> bool {
    if removing {
        graph.remove_edge(src, dst);
        model.change_vector(graph, src, dst, scratch);
        if accept(rng, q, -dot(theta, scratch) + extra_score) {
            for (accumulated, change) in dz_a.iter_mut().zip(scratch.iter()) {
                *accumulated -= change;
            }
            true
        } else {
            graph.insert_edge(src, dst);
            false
        }
    } else {
        model.change_vector(graph, src, dst, scratch);
        if accept(rng, q, dot(theta, scratch) + extra_score) {
            graph.insert_edge(src, dst);
            for (accumulated, change) in dz_a.iter_mut().zip(scratch.iter()) {
                *accumulated += change;
            }
            true
        } else {
            false
        }
    }
}

/// Which proposal distribution drives the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerKind {
    Basic,
    Tnt,
    Ifd,
}

/// A sampler kernel plus its persistent state: scratch change vectors and,
/// for IFD, the auxiliary density parameter.
#[derive(Clone, Debug)]
pub struct Sampler {
    kind: SamplerKind,
    scratch: Vec<f64>,
    swap_scratch: Vec<f64>,
    /// IFD auxiliary parameter; carried across the estimation phases.
    pub ifd_aux: f64,
    ifd_k: f64,
    ifd_target: EdgeT,
}

impl Sampler {
    pub fn basic() -> Sampler {
        Sampler::new(SamplerKind::Basic, 0.0, 0)
    }

    pub fn tnt() -> Sampler {
        Sampler::new(SamplerKind::Tnt, 0.0, 0)
    }

    /// IFD sampler pinned to `target` edges with gradient multiplier `k`.
    pub fn ifd(k: f64, target: EdgeT) -> Sampler {
        Sampler::new(SamplerKind::Ifd, k, target)
    }

    fn new(kind: SamplerKind, ifd_k: f64, ifd_target: EdgeT) -> Sampler {
        Sampler {
            kind,
            scratch: Vec::new(),
            swap_scratch: Vec::new(),
            ifd_aux: 0.0,
            ifd_k,
            ifd_target,
        }
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    /// Run `steps` inner iterations, mutating the graph in place and
    /// accumulating accepted change vectors into `dz_a`. Returns the
    /// number of accepted toggles.
    pub fn run(
        &mut self,
        graph: &mut Graph,
        model: &Model,
        theta: &[f64],
        steps: u64,
        dz_a: &mut [f64],
        rng: &mut SmallRng,
    ) -> u64 {
        if self.scratch.len() != model.len() {
            self.scratch = vec![0.0; model.len()];
            self.swap_scratch = vec![0.0; model.len()];
        }
        let mut accepted = 0;
        for _ in 0..steps {
            let moved = match self.kind {
                SamplerKind::Basic => {
                    basic::step(graph, model, theta, dz_a, &mut self.scratch, rng)
                }
                SamplerKind::Tnt => tnt::step(graph, model, theta, dz_a, &mut self.scratch, rng),
                SamplerKind::Ifd => ifd::step(
                    graph,
                    model,
                    theta,
                    dz_a,
                    &mut self.scratch,
                    &mut self.swap_scratch,
                    &mut self.ifd_aux,
                    self.ifd_k,
                    self.ifd_target,
                    rng,
                ),
            };
            if moved {
                accepted += 1;
            }
        }
        accepted
    }
}
