/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Experiments pitting a [`ProbeAlgorithm`] against a changing graph.
//!
//! At each round the [`Runner`] lets the algorithm perform a fixed number of
//! probes on the graph, validates the resulting answer, and then changes the
//! graph.

use crate::graphs::delta::DeltaStream;
use crate::graphs::random::RandomGraph;
use crate::traits::{GraphOracle, ProbeAlgorithm, Validation};
use dsi_progress_logger::ProgressLog;

/// Statistics about the answers of an algorithm during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// The number of rounds.
    pub rounds: usize,
    /// The phase length of the algorithm.
    pub phase_len: usize,
    /// The number of correct answers.
    pub correct: usize,
    /// The number of correct answers given after the first phase.
    pub correct_after_first_phase: usize,
    pub correct_empty: usize,
    pub correct_path: usize,
    pub incorrect_empty: usize,
    pub incorrect_path: usize,
    pub malformed: usize,
    /// The number of rounds in which the primary path was found invalid.
    pub secondary_answers: usize,
    /// A character for every visualized round: `.` for a correct answer,
    /// `_` for a correct answer with an invalid primary path, `F` for an
    /// incorrect answer, and `S` for an incorrect answer with an invalid
    /// primary path.
    pub trace: String,
}

impl RunStats {
    fn record(&mut self, round: usize, validation: Validation, primary_valid: bool) {
        self.rounds += 1;
        match validation {
            Validation::ValidPath => self.correct_path += 1,
            Validation::ValidEmpty => self.correct_empty += 1,
            Validation::InvalidPath => self.incorrect_path += 1,
            Validation::InvalidEmpty => self.incorrect_empty += 1,
            Validation::Malformed => self.malformed += 1,
        }
        if validation.is_correct() {
            self.correct += 1;
            if round >= self.phase_len {
                self.correct_after_first_phase += 1;
            }
        }
        if !primary_valid {
            self.secondary_answers += 1;
        }
    }

    /// Returns the number of rounds following the first phase.
    pub fn rounds_after_first_phase(&self) -> usize {
        self.rounds.saturating_sub(self.phase_len)
    }

    /// Returns the percentage of correct answers.
    pub fn correct_percent(&self) -> f64 {
        percent(self.correct, self.rounds)
    }

    /// Returns the percentage of correct answers after the first phase.
    pub fn correct_after_first_phase_percent(&self) -> f64 {
        percent(
            self.correct_after_first_phase,
            self.rounds_after_first_phase(),
        )
    }
}

fn percent(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        100.0 * num as f64 / den as f64
    }
}

fn trace_char(correct: bool, primary_valid: bool) -> char {
    match (correct, primary_valid) {
        (true, true) => '.',
        (true, false) => '_',
        (false, true) => 'F',
        (false, false) => 'S',
    }
}

/// Drives a [`ProbeAlgorithm`] on a [`GraphOracle`].
///
/// # Examples
///
/// ```
/// use dynconn::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let mut graph = RandomGraph::new(100, 500, ChangeModel::Swap, 0)?;
/// let mut alg = OnePath::new(0.5, 100);
/// let stats = Runner::new(1, 1).run_random(&mut alg, &mut graph, 1000, no_logging![]);
/// assert_eq!(stats.rounds, 1000);
/// assert_eq!(
///     stats.correct,
///     stats.correct_path + stats.correct_empty
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Runner {
    probe_rate: usize,
    change_rate: usize,
    visualization: Option<usize>,
}

impl Runner {
    /// Creates a new runner performing `probe_rate` probes per round and, on
    /// random graphs, `change_rate` changes per round.
    pub fn new(probe_rate: usize, change_rate: usize) -> Self {
        assert!(probe_rate > 0, "At least one probe per round is necessary");
        Self {
            probe_rate,
            change_rate,
            visualization: None,
        }
    }

    /// Records in the [trace](RunStats::trace) a character every `step`
    /// rounds.
    pub fn visualization(mut self, step: usize) -> Self {
        assert!(step > 0, "The visualization step must be positive");
        self.visualization = Some(step);
        self
    }

    /// Runs `rounds` rounds, calling `mutate` with the graph and the index of
    /// the round after each round has been validated.
    pub fn run<A: ProbeAlgorithm + ?Sized, G: GraphOracle>(
        &self,
        alg: &mut A,
        graph: &mut G,
        rounds: usize,
        mut mutate: impl FnMut(&mut G, usize),
        pl: &mut impl ProgressLog,
    ) -> RunStats {
        assert_eq!(
            alg.start_vertex(),
            graph.start_vertex(),
            "The algorithm and the graph have different start vertices"
        );
        assert_eq!(
            alg.end_vertex(),
            graph.end_vertex(),
            "The algorithm and the graph have different end vertices"
        );

        let mut stats = RunStats {
            phase_len: alg.phase_len(),
            ..RunStats::default()
        };
        pl.item_name("round");
        pl.expected_updates(Some(rounds));
        pl.start(format!("Running the {} algorithm...", alg.name()));

        for round in 0..rounds {
            for _ in 0..self.probe_rate {
                let node = alg.probe_input();
                alg.set_probe_result(&graph.probe(node));
            }

            let validation = graph.validate(alg.answer());
            let primary_valid = alg.primary_valid();
            stats.record(round, validation, primary_valid);
            if validation == Validation::Malformed {
                log::warn!(
                    "Malformed answer at round {}: {:?}",
                    round,
                    alg.answer()
                );
            }
            if let Some(step) = self.visualization {
                if round % step == 0 {
                    stats
                        .trace
                        .push(trace_char(validation.is_correct(), primary_valid));
                }
            }

            mutate(graph, round);
            pl.light_update();
        }

        pl.done();
        stats
    }

    /// Runs `rounds` rounds on a random graph, performing after each round
    /// the number of [changes](RandomGraph::change) specified at
    /// construction.
    pub fn run_random<A: ProbeAlgorithm + ?Sized>(
        &self,
        alg: &mut A,
        graph: &mut RandomGraph,
        rounds: usize,
        pl: &mut impl ProgressLog,
    ) -> RunStats {
        self.run(
            alg,
            graph,
            rounds,
            |graph, _| {
                for _ in 0..self.change_rate {
                    graph.change();
                }
            },
            pl,
        )
    }

    /// Runs a round for each round of a delta stream.
    ///
    /// The delta of round 0 is applied before the first round, so that the
    /// graph is populated when probing starts; the delta of round `i` + 1 is
    /// applied after validating round `i`.
    pub fn run_deltas<A: ProbeAlgorithm + ?Sized, G: GraphOracle>(
        &self,
        alg: &mut A,
        graph: &mut G,
        deltas: &DeltaStream,
        pl: &mut impl ProgressLog,
    ) -> RunStats {
        let (added, removed) = deltas.delta(0);
        graph.apply_delta(added, removed);
        self.run(
            alg,
            graph,
            deltas.num_rounds(),
            |graph, round| {
                let (added, removed) = deltas.delta(round + 1);
                graph.apply_delta(added, removed);
            },
            pl,
        )
    }
}
