//! Simulation driver: burn-in, then networks and statistics emitted at
//! regular intervals under fixed parameters.

use crate::config::Config;
use crate::from_pajek::insert_edge_list;
use crate::output::TraceWriter;
use crate::samplers::{seed_rng, Sampler};
use crate::to_pajek::write_pajek;
use crate::types::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// Run one simulation: `burnin` discarded iterations, then `sampleSize`
/// samples `interval` iterations apart, each written as
/// `<simNetFilePrefix>_<t>.net` with one statistics row appended to the
/// statistics file. `t` is the cumulative iteration count.
pub fn run_simulation(config: &Config, rank: u32) -> Result<()> {
    if !config.theta_fully_specified() {
        return Err(
            "Simulation requires a fixed value for every term, e.g. Arc = -2.0.".to_string(),
        );
    }
    let (mut graph, edges) = config.build_graph()?;
    let (model, theta) = config.build_model(&graph)?;
    let mut rng = seed_rng(config.seed, rank);

    // Statistics of the starting network, accumulated edge by edge; the
    // per-sample statistics stay a running sum from here on.
    let mut statistics = vec![0.0; model.len()];
    let mut scratch = vec![0.0; model.len()];
    insert_edge_list(&mut graph, &edges, |pre_insertion, src, dst| {
        model.change_vector(pre_insertion, src, dst, &mut scratch);
        for (accumulated, change) in statistics.iter_mut().zip(scratch.iter()) {
            *accumulated += change;
        }
    })?;

    let mut sampler = if config.use_ifd_sampler {
        let target = config
            .num_arcs
            .ok_or_else(|| "The IFD sampler requires numArcs to pin the density.".to_string())?;
        Sampler::ifd(config.ifd_k, target)
    } else if config.use_tnt_sampler {
        Sampler::tnt()
    } else {
        Sampler::basic()
    };

    let mut stats_trace = TraceWriter::create(config.sim_stats_file.clone(), &model.labels)?;
    let mut dz_a = vec![0.0; model.len()];

    info!(
        "Rank {}: simulating {} samples of interval {} after {} burn-in iterations.",
        rank, config.sample_size, config.interval, config.burnin
    );
    let mut accepted = sampler.run(
        &mut graph,
        &model,
        &theta,
        config.burnin,
        &mut dz_a,
        &mut rng,
    );
    let bar = ProgressBar::new(config.sample_size);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} ({eta})")
            .progress_chars("=>-"),
    );
    bar.set_message("simulation".to_string());
    for sample in 0..config.sample_size {
        accepted += sampler.run(
            &mut graph,
            &model,
            &theta,
            config.interval,
            &mut dz_a,
            &mut rng,
        );
        let t = config.burnin + (sample + 1) * config.interval;
        write_pajek(
            &graph,
            &format!("{}_{}.net", config.sim_net_file_prefix, t),
        )?;
        let absolute: Vec<f64> = statistics
            .iter()
            .zip(dz_a.iter())
            .map(|(base, deviation)| base + deviation)
            .collect();
        stats_trace.write_row(t, &absolute)?;
        if !absolute.iter().all(|value| value.is_finite()) {
            return Err("Non-finite simulated statistic; aborting.".to_string());
        }
        bar.inc(1);
    }
    bar.finish();
    let total = config.burnin + config.sample_size * config.interval;
    info!(
        "Rank {}: simulation done, {} accepted of {} proposals, {} edges in the last sample.",
        rank,
        accepted,
        total,
        graph.get_edges_number()
    );
    Ok(())
}
