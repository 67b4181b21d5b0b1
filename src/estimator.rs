//! The two-phase parameter estimation loop: Algorithm S (stochastic
//! approximation warm-up) followed by Algorithm EE (equilibrium
//! expectation), both driven by the same sampler block primitive.
//!
//! `dz_a` is the running deviation of the chain's sufficient statistics
//! from the observed ones; at equilibrium it oscillates around zero. Each
//! outer step consumes its current value for exactly one theta update and
//! appends one row to the per-rank trace files.

use crate::config::Config;
use crate::from_pajek::insert_edge_list;
use crate::model::Model;
use crate::output::{write_vector_file, TraceWriter};
use crate::samplers::{seed_rng, Sampler};
use crate::types::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// Tolerance of the bootstrap cross-check between summed change
/// statistics and direct evaluation.
const BOOTSTRAP_TOLERANCE: f64 = 1e-6;

/// Smoothing factor of the running theta moments behind the `compC`
/// step-halving rule.
const MOMENT_SMOOTHING: f64 = 0.1;

fn progress_bar(length: u64, message: &str) -> ProgressBar {
    let bar = ProgressBar::new(length);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} ({eta})")
            .progress_chars("=>-"),
    );
    bar.set_message(message.to_string());
    bar
}

fn ensure_finite(theta: &[f64], dz_a: &[f64]) -> Result<()> {
    if theta.iter().chain(dz_a.iter()).all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err("Non-finite value in theta or dzA; aborting after flushing traces.".to_string())
    }
}

/// Run one full estimation for this rank: bootstrap, Algorithm S,
/// Algorithm EE, trace output.
pub fn run_estimation(config: &Config, rank: u32) -> Result<()> {
    if config.arclist_file.is_none() {
        return Err("Estimation requires an arclistFile.".to_string());
    }
    let (mut graph, edges) = config.build_graph()?;
    let (model, mut theta) = config.build_model(&graph)?;
    let mut rng = seed_rng(config.seed, rank);

    // Observed statistics, accumulated one edge insertion at a time.
    let mut observed = vec![0.0; model.len()];
    let mut scratch = vec![0.0; model.len()];
    insert_edge_list(&mut graph, &edges, |pre_insertion, src, dst| {
        model.change_vector(pre_insertion, src, dst, &mut scratch);
        for (accumulated, change) in observed.iter_mut().zip(scratch.iter()) {
            *accumulated += change;
        }
    })?;
    cross_check_observed(&model, &graph, &observed)?;
    info!(
        "Rank {}: observed network has {} edges; statistics {:?}.",
        rank,
        graph.get_edges_number(),
        observed
    );
    let prefix = &config.output_file_prefix;
    write_vector_file(
        &format!("obs_stats_{}_{}.txt", prefix, rank),
        &model.labels,
        &observed,
    )?;
    let mut theta_trace =
        TraceWriter::create(format!("theta_{}_{}.txt", prefix, rank), &model.labels)?;
    let mut dza_trace =
        TraceWriter::create(format!("dzA_{}_{}.txt", prefix, rank), &model.labels)?;

    let mut sampler = if config.use_ifd_sampler {
        Sampler::ifd(config.ifd_k, graph.get_edges_number())
    } else if config.use_tnt_sampler {
        Sampler::tnt()
    } else {
        Sampler::basic()
    };

    let mut dz_a = vec![0.0; model.len()];
    let mut t = 0u64;
    let bar = progress_bar(config.s_steps + config.ee_steps, "estimation");

    // Algorithm S: per-parameter scales that start large and decay with
    // the accumulated squared deviations.
    let mut squared_sum = vec![0.0; model.len()];
    let mut accepted = 0u64;
    for _ in 0..config.s_steps {
        accepted += sampler.run(
            &mut graph,
            &model,
            &theta,
            config.sampler_steps,
            &mut dz_a,
            &mut rng,
        );
        for parameter in 0..model.len() {
            squared_sum[parameter] += dz_a[parameter] * dz_a[parameter];
            theta[parameter] -=
                config.aca_s * dz_a[parameter] / (1.0 + squared_sum[parameter]).sqrt();
        }
        theta_trace.write_row(t, &theta)?;
        dza_trace.write_row(t, &dz_a)?;
        ensure_finite(&theta, &dz_a)?;
        t += 1;
        bar.inc(1);
    }
    info!(
        "Rank {}: Algorithm S done, {} accepted of {} proposals, theta {:?}.",
        rank,
        accepted,
        config.s_steps * config.sampler_steps,
        theta
    );

    // Algorithm EE.
    let mut scale = vec![1.0; model.len()];
    let mut theta_mean = theta.clone();
    let mut theta_variance = vec![0.0; model.len()];
    accepted = 0;
    let block = config.ee_inner_steps * config.sampler_steps;
    for _ in 0..config.ee_steps {
        accepted += sampler.run(&mut graph, &model, &theta, block, &mut dz_a, &mut rng);
        for parameter in 0..model.len() {
            let deviation = dz_a[parameter];
            theta[parameter] -= if config.use_borisenko_update {
                scale[parameter]
                    * config.learning_rate
                    * deviation.signum()
                    * theta[parameter].abs().max(config.min_theta)
            } else {
                scale[parameter] * config.aca_ee * deviation * deviation.abs()
            };
        }
        for parameter in 0..model.len() {
            theta_mean[parameter] = (1.0 - MOMENT_SMOOTHING) * theta_mean[parameter]
                + MOMENT_SMOOTHING * theta[parameter];
            let centred = theta[parameter] - theta_mean[parameter];
            theta_variance[parameter] = (1.0 - MOMENT_SMOOTHING) * theta_variance[parameter]
                + MOMENT_SMOOTHING * centred * centred;
            if theta_variance[parameter].sqrt()
                > config.comp_c * theta_mean[parameter].abs()
            {
                scale[parameter] *= 0.5;
            }
        }
        theta_trace.write_row(t, &theta)?;
        dza_trace.write_row(t, &dz_a)?;
        ensure_finite(&theta, &dz_a)?;
        t += 1;
        bar.inc(1);
    }
    bar.finish();
    info!(
        "Rank {}: Algorithm EE done, {} accepted of {} proposals, theta {:?}.",
        rank,
        accepted,
        config.ee_steps * block,
        theta
    );
    Ok(())
}

/// The summed change statistics must agree with direct evaluation minus
/// the empty-graph values; a mismatch means a broken change statistic.
fn cross_check_observed(
    model: &Model,
    graph: &crate::graph::Graph,
    observed: &[f64],
) -> Result<()> {
    let direct = model.evaluate(graph);
    let baseline = model.baseline(graph);
    for (parameter, ((summed, direct), baseline)) in observed
        .iter()
        .zip(direct.iter())
        .zip(baseline.iter())
        .enumerate()
    {
        let expected = direct - baseline;
        let tolerance = BOOTSTRAP_TOLERANCE * (1.0 + expected.abs());
        if (summed - expected).abs() > tolerance {
            return Err(format!(
                "Bootstrap mismatch for {}: summed change statistics give {} but direct evaluation gives {}.",
                model.labels[parameter], summed, expected
            ));
        }
    }
    Ok(())
}
