/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// The outcome of the validation of an answer against the current state of
/// a graph.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validation {
    /// A nonempty path whose arcs all exist.
    ValidPath,
    /// An empty answer, and the start and end vertices are disconnected.
    ValidEmpty,
    /// A well-formed path using at least one arc that does not exist.
    InvalidPath,
    /// An empty answer, but the start and end vertices are connected.
    InvalidEmpty,
    /// A path with the wrong endpoints, an out-of-range vertex, or a
    /// repeated vertex.
    Malformed,
}

impl Validation {
    /// Returns true if the answer is correct.
    pub fn is_correct(self) -> bool {
        matches!(self, Validation::ValidPath | Validation::ValidEmpty)
    }
}

/// A dynamic graph answering probes.
///
/// Vertices are the integers in `[0..num_nodes())`; the graph has two
/// distinguished vertices, the start and end vertices, whose connectivity is
/// tracked by a [`ProbeAlgorithm`](crate::traits::ProbeAlgorithm).
pub trait GraphOracle {
    /// Returns the number of vertices.
    fn num_nodes(&self) -> usize;

    /// Returns the start vertex.
    fn start_vertex(&self) -> usize;

    /// Returns the end vertex.
    fn end_vertex(&self) -> usize;

    /// Returns the current neighbors of a vertex.
    ///
    /// The order of the neighbors must be deterministic, as algorithms might
    /// pick among them by position.
    fn probe(&self, node: usize) -> Vec<usize>;

    /// Validates an answer against the current state of the graph.
    fn validate(&self, path: &[usize]) -> Validation;

    /// Adds and removes the given edges.
    fn apply_delta(&mut self, added: &[(usize, usize)], removed: &[(usize, usize)]);
}
