/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Per-round edge deltas read from text files.
//!
//! Each nonempty line that does not start with `#` describes the addition
//! or the removal of an edge at a given round:
//!
//! ```text
//! # round op u v
//! 0 + 0 1
//! 0 + 1 2
//! 3 - 0 1
//! ```
//!
//! Fields are separated by whitespace; rounds need not be contiguous or
//! sorted.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors in a line of a delta file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeltaError {
    #[error("Expected 4 fields (round, operation, and two vertices), found {0}")]
    FieldCount(usize),
    #[error("Unknown operation {0:?} (expected '+' or '-')")]
    Operation(String),
    #[error("Cannot parse {0:?} as a nonnegative integer")]
    Number(String),
    #[error("Self-loop on vertex {0}")]
    SelfLoop(usize),
    #[error("Round {0} is too large")]
    Round(usize),
}

/// The edges added and removed at a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub added: Vec<(usize, usize)>,
    pub removed: Vec<(usize, usize)>,
}

/// A sequence of per-round edge deltas.
///
/// # Examples
///
/// ```
/// use dynconn::graphs::delta::DeltaStream;
///
/// let deltas: DeltaStream = "0 + 0 1\n# comment\n\n2 - 1 0\n".parse()?;
/// assert_eq!(deltas.num_rounds(), 3);
/// assert_eq!(deltas.delta(0), (&[(0, 1)][..], &[][..]));
/// assert_eq!(deltas.delta(2), (&[][..], &[(1, 0)][..]));
/// assert_eq!(deltas.max_node(), Some(1));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaStream {
    /// Only rounds with at least one delta are stored.
    rounds: BTreeMap<usize, Delta>,
    max_node: Option<usize>,
}

fn parse_number(field: &str) -> Result<usize, DeltaError> {
    field
        .parse()
        .map_err(|_| DeltaError::Number(field.to_owned()))
}

impl DeltaStream {
    /// Reads a delta stream from a [`BufRead`].
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut result = Self::default();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Cannot read line {}", line_num + 1))?;
            result
                .parse_line(&line)
                .with_context(|| format!("Error at line {}: {:?}", line_num + 1, line))?;
        }
        log::debug!(
            "Read {} rounds of deltas (largest vertex: {:?})",
            result.num_rounds(),
            result.max_node
        );
        Ok(result)
    }

    /// Reads a delta stream from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Cannot open delta file {}", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Cannot parse delta file {}", path.display()))
    }

    fn parse_line(&mut self, line: &str) -> Result<(), DeltaError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let fields = line.split_whitespace().collect::<Vec<_>>();
        let [round, op, u, v] = fields[..] else {
            return Err(DeltaError::FieldCount(fields.len()));
        };
        let round = parse_number(round)?;
        if round == usize::MAX {
            return Err(DeltaError::Round(round));
        }
        let (u, v) = (parse_number(u)?, parse_number(v)?);
        if u == v {
            return Err(DeltaError::SelfLoop(u));
        }
        let added = match op {
            "+" => true,
            "-" => false,
            _ => return Err(DeltaError::Operation(op.to_owned())),
        };
        let delta = self.rounds.entry(round).or_default();
        if added {
            delta.added.push((u, v));
        } else {
            delta.removed.push((u, v));
        }
        self.max_node = self.max_node.max(Some(u.max(v)));
        Ok(())
    }

    /// Returns the number of rounds, that is, the largest round with a delta
    /// plus one.
    pub fn num_rounds(&self) -> usize {
        self.rounds.last_key_value().map_or(0, |(&round, _)| round + 1)
    }

    /// Returns the largest vertex appearing in the stream, if any.
    pub fn max_node(&self) -> Option<usize> {
        self.max_node
    }

    /// Returns the edges added and removed at the given round.
    ///
    /// Rounds without a delta (including rounds past the end of the stream)
    /// return empty slices.
    pub fn delta(&self, round: usize) -> (&[(usize, usize)], &[(usize, usize)]) {
        match self.rounds.get(&round) {
            Some(delta) => (&delta.added, &delta.removed),
            None => (&[], &[]),
        }
    }
}

impl FromStr for DeltaStream {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}
