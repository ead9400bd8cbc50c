/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{append_csv, report, AlgorithmArgs, GlobalArgs};
use crate::graphs::delta::DeltaStream;
use crate::graphs::DynGraph;
use crate::runner::Runner;
use anyhow::{ensure, Context, Result};
use clap::Parser;
use dsi_progress_logger::{progress_logger, ProgressLog};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Runs an algorithm on a graph evolving according to a file of per-round edge deltas. Each nonempty line of the file not starting with '#' has the form <round> <+|-> <u> <v>, and adds or removes the edge {u, v} at the given round. There is a round for each round of the file; the edges of round 0 are added before the first round.", long_about = None)]
pub struct CliArgs {
    /// The file containing the deltas.
    #[arg(long)]
    pub deltas: PathBuf,

    #[arg(long)]
    /// The number of vertices; if not specified, the largest vertex in the
    /// deltas plus one.
    pub n: Option<usize>,

    #[arg(long)]
    /// The start vertex (default: 0).
    pub start: Option<usize>,

    #[arg(long)]
    /// The end vertex (default: n - 1).
    pub end: Option<usize>,

    #[clap(flatten)]
    pub alg: AlgorithmArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    log::info!("Reading deltas from {}", args.deltas.display());
    let deltas = DeltaStream::load(&args.deltas)?;
    let min_n = match deltas.max_node() {
        Some(v) => v
            .checked_add(1)
            .with_context(|| format!("Vertex {} is too large", v))?,
        None => 0,
    };
    let n = args.n.unwrap_or(min_n);
    ensure!(
        n >= min_n,
        "The deltas contain vertex {}, but the graph has {} vertices",
        min_n - 1,
        n
    );
    ensure!(n >= 2, "The graph must have at least two vertices (got {})", n);
    let start = args.start.unwrap_or(0);
    let end = args.end.unwrap_or(n - 1);
    ensure!(
        start < n && end < n && start != end,
        "Invalid start and end vertices {} and {} for a graph with {} vertices",
        start,
        end,
        n
    );
    log::info!(
        "{} rounds on a graph with {} vertices, from {} to {}",
        deltas.num_rounds(),
        n,
        start,
        end
    );

    let mut alg = args.alg.build(n)?;
    let mut graph = DynGraph::empty(n);
    alg.set_endpoints(start, end);
    graph.set_endpoints(start, end);

    let runner = Runner::new(args.alg.probe_rate, 0);
    let runner = match args.alg.visualization {
        Some(step) => runner.visualization(step),
        None => runner,
    };

    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }
    let stats = runner.run_deltas(alg.as_mut(), &mut graph, &deltas, &mut pl);

    log::info!("At the end of the run the graph has {} edges", graph.num_edges());
    report(&stats);

    if let Some(csv) = &args.alg.csv {
        let deltas_name = args
            .deltas
            .file_name()
            .context("The delta file has no name")?
            .to_string_lossy()
            .into_owned();
        append_csv(
            csv,
            &[
                ("alg", alg.name().to_owned()),
                ("n", n.to_string()),
                ("deltas", deltas_name),
                ("c0", args.alg.c0.to_string()),
                ("radius", alg.radius().to_string()),
                ("phase_len", alg.phase_len().to_string()),
                ("probe", args.alg.probe_rate.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ],
            &stats,
        )?;
    }
    Ok(())
}
