/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface structs, functions, and methods.
//!
//! Each subcommand is implemented as a submodule with a `CliArgs` struct and
//! a `main` function.

use crate::algo::{OnePath, TwoPath};
use crate::runner::RunStats;
use crate::traits::ProbeAlgorithm;
use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub mod dataset;
pub mod random;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// The available algorithms.
pub enum AlgorithmKind {
    /// The single-path algorithm.
    One,
    /// The dual-path algorithm.
    Two,
}

/// Shared CLI arguments describing the algorithm and the way it is run.
#[derive(Args, Debug)]
pub struct AlgorithmArgs {
    #[arg(short, long, value_enum)]
    /// The algorithm to run.
    pub alg: AlgorithmKind,

    #[arg(long, default_value_t = 0.5)]
    /// The constant c₀ defining the phase radius R = ⌈√(c₀·n / ln n)⌉.
    pub c0: f64,

    #[arg(long)]
    /// Use this phase radius instead of the one computed from c₀.
    pub radius: Option<usize>,

    #[arg(long = "probe", default_value_t = 1)]
    /// The number of probes the algorithm performs at each round.
    pub probe_rate: usize,

    #[arg(long)]
    /// Every this number of rounds, output a character describing the
    /// answer: '.' (correct), '_' (correct with an invalid primary path),
    /// 'F' (incorrect), 'S' (incorrect with an invalid primary path).
    pub visualization: Option<usize>,

    #[arg(long)]
    /// Append a summary of the run to this CSV file (the header is written
    /// if the file does not exist).
    pub csv: Option<PathBuf>,
}

impl AlgorithmArgs {
    /// Builds the selected algorithm for a graph with `n` vertices.
    pub fn build(&self, n: usize) -> Result<Box<dyn ProbeAlgorithm>> {
        ensure!(n >= 2, "The graph must have at least two vertices (got {})", n);
        ensure!(
            self.c0.is_finite() && self.c0 > 0.0,
            "The constant c0 must be positive (got {})",
            self.c0
        );
        ensure!(self.radius != Some(0), "The radius must be positive");
        ensure!(self.probe_rate > 0, "The probe rate must be positive");
        ensure!(
            self.visualization != Some(0),
            "The visualization step must be positive"
        );

        let alg: Box<dyn ProbeAlgorithm> = match (self.alg, self.radius) {
            (AlgorithmKind::One, None) => Box::new(OnePath::new(self.c0, n)),
            (AlgorithmKind::One, Some(r)) => Box::new(OnePath::with_radius(r, n)),
            (AlgorithmKind::Two, None) => Box::new(TwoPath::new(self.c0, n)),
            (AlgorithmKind::Two, Some(r)) => Box::new(TwoPath::with_radius(r, n)),
        };
        log::info!("--- {} algorithm ---", alg.name());
        log::info!("R = {}, phase length = {}", alg.radius(), alg.phase_len());
        Ok(alg)
    }
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_seconds, global = true, display_order = 1000)]
    /// How often to log progress, in seconds. Default is 10s.
    pub log_interval: Option<Duration>,
}

fn parse_seconds(value: &str) -> Result<Duration> {
    let secs = value
        .parse::<f64>()
        .with_context(|| format!("Invalid number of seconds {:?}", value))?;
    ensure!(
        secs.is_finite() && secs >= 0.0,
        "Invalid number of seconds {:?}",
        value
    );
    Ok(Duration::from_secs_f64(secs))
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    Random(random::CliArgs),
    Dataset(dataset::CliArgs),
}

#[derive(Parser, Debug)]
#[command(name = "dynconn", version)]
/// Tracks the connectivity of two vertices in a dynamic graph revealed
/// through probes.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::Random(args) => {
            random::main(cli.args, args)?;
        }
        SubCommands::Dataset(args) => {
            dataset::main(cli.args, args)?;
        }
    }

    log::info!("The command took {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Logs the summary of a run, and prints its trace, if any.
pub fn report(stats: &RunStats) {
    if !stats.trace.is_empty() {
        println!("{}", stats.trace);
    }
    log::info!(
        "Correct answers: {}/{} ({:.2}%)",
        stats.correct,
        stats.rounds,
        stats.correct_percent()
    );
    log::info!(
        "Correct answers (without first phase): {}/{} ({:.2}%)",
        stats.correct_after_first_phase,
        stats.rounds_after_first_phase(),
        stats.correct_after_first_phase_percent()
    );
    log::info!(
        "Valid paths: {}, valid empty answers: {}, invalid paths: {}, invalid empty answers: {}, malformed answers: {}",
        stats.correct_path,
        stats.correct_empty,
        stats.incorrect_path,
        stats.incorrect_empty,
        stats.malformed
    );
    if stats.secondary_answers > 0 {
        log::info!(
            "Rounds with an invalid primary path: {}",
            stats.secondary_answers
        );
    }
}

const STATS_HEADER: [&str; 10] = [
    "rounds",
    "correct",
    "correct_after_first_phase",
    "correct_path",
    "correct_empty",
    "incorrect_path",
    "incorrect_empty",
    "malformed",
    "secondary_answers",
    "correct_percent",
];

/// Appends to a CSV file a row made of the given parameters followed by the
/// statistics of a run.
///
/// If the file does not exist it is created, and a header with the names of
/// the parameters and of the statistics is written first.
pub fn append_csv(path: impl AsRef<Path>, params: &[(&str, String)], stats: &RunStats) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;
    let new = !path.exists();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;

    if new {
        let header = params
            .iter()
            .map(|(name, _)| *name)
            .chain(STATS_HEADER)
            .collect::<Vec<_>>();
        writeln!(file, "{}", header.join(","))?;
    }
    let row = params
        .iter()
        .map(|(_, value)| value.clone())
        .chain([
            stats.rounds.to_string(),
            stats.correct.to_string(),
            stats.correct_after_first_phase.to_string(),
            stats.correct_path.to_string(),
            stats.correct_empty.to_string(),
            stats.incorrect_path.to_string(),
            stats.incorrect_empty.to_string(),
            stats.malformed.to_string(),
            stats.secondary_answers.to_string(),
            format!("{:.2}", stats.correct_percent()),
        ])
        .collect::<Vec<_>>();
    writeln!(file, "{}", row.join(","))
        .with_context(|| format!("Could not write to {}", path.display()))?;
    log::info!("Appended results to {}", path.display());
    Ok(())
}

/// Creates all parent directories of the given file path.
pub fn create_parent_dir(file_path: impl AsRef<Path>) -> Result<()> {
    if let Some(parent_dir) = file_path.as_ref().parent() {
        std::fs::create_dir_all(parent_dir).with_context(|| {
            format!(
                "Failed to create the directory {:?}",
                parent_dir.to_string_lossy()
            )
        })?;
    }
    Ok(())
}

/// Initializes the `env_logger` logger with a custom format including
/// timestamps with elapsed time since initialization.
pub fn init_env_logger() -> Result<()> {
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
    use jiff::SpanRound;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64);
        let span = span.round(span_round).map_err(std::io::Error::other)?;
        writeln!(
            buf,
            "{} {} {style}{}{style:#} {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}
