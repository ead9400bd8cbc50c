/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{append_csv, report, AlgorithmArgs, GlobalArgs};
use crate::graphs::random::{ChangeModel, RandomGraph};
use crate::runner::Runner;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use dsi_progress_logger::{progress_logger, ProgressLog};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// How the random graph changes between rounds.
pub enum Model {
    /// Swap a random edge with a random non-edge.
    Swap,
    /// Swap, or remove a random edge while the number of edges stays in the
    /// interesting range [n ln n . . n^(3/2)].
    SwapOrRemove,
}

impl From<Model> for ChangeModel {
    fn from(value: Model) -> Self {
        match value {
            Model::Swap => ChangeModel::Swap,
            Model::SwapOrRemove => ChangeModel::SwapOrRemove,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Runs an algorithm on a random graph that changes at each round.", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    /// The number of vertices.
    pub n: usize,

    #[arg(long, default_value_t = 15000)]
    /// The initial number of edges.
    pub m: usize,

    #[arg(long = "change", default_value_t = 1)]
    /// The number of changes the graph undergoes after each round.
    pub change_rate: usize,

    #[arg(long, default_value_t = 10000)]
    /// The number of rounds.
    pub rounds: usize,

    #[arg(long, value_enum, default_value_t = Model::Swap)]
    /// The change model.
    pub model: Model,

    #[arg(long, default_value_t = 0)]
    /// The seed of the pseudorandom number generator.
    pub seed: u64,

    #[clap(flatten)]
    pub alg: AlgorithmArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut alg = args.alg.build(args.n)?;

    log::info!(
        "Building a random graph with {} vertices and {} edges (seed {})",
        args.n,
        args.m,
        args.seed
    );
    let mut graph = RandomGraph::new(args.n, args.m, args.model.into(), args.seed)?;

    let mut runner = Runner::new(args.alg.probe_rate, args.change_rate);
    if let Some(step) = args.alg.visualization {
        runner = runner.visualization(step);
    }

    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }
    let stats = runner.run_random(alg.as_mut(), &mut graph, args.rounds, &mut pl);

    log::info!(
        "At the end of the run the graph has {} vertices and {} edges",
        args.n,
        graph.num_edges()
    );
    report(&stats);

    if let Some(csv) = &args.alg.csv {
        append_csv(
            csv,
            &[
                ("alg", alg.name().to_owned()),
                ("n", args.n.to_string()),
                ("m", args.m.to_string()),
                ("c0", args.alg.c0.to_string()),
                ("radius", alg.radius().to_string()),
                ("phase_len", alg.phase_len().to_string()),
                ("probe", args.alg.probe_rate.to_string()),
                ("change", args.change_rate.to_string()),
                ("model", format!("{:?}", graph.model())),
                ("seed", args.seed.to_string()),
            ],
            &stats,
        )?;
    }
    Ok(())
}
