/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Random dynamic graphs.

use crate::graphs::DynGraph;
use crate::traits::{GraphOracle, Validation};
use crate::utils::EdgeSet;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use thiserror::Error;

/// Errors raised by the construction of a [`RandomGraph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("The graph must have at least two vertices (got {0})")]
    TooFewNodes(usize),
    #[error("A simple graph with {n} vertices cannot have {m} edges (at most {max})")]
    TooManyEdges { n: usize, m: usize, max: usize },
}

/// The way a [`RandomGraph`] changes between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeModel {
    /// Remove a random edge and add a random non-edge.
    Swap,
    /// Either swap, as in [`ChangeModel::Swap`], or remove a random edge,
    /// with equal probability. Removal is possible only if the number of
    /// edges stays in the [interesting range](RandomGraph::interesting_range).
    SwapOrRemove,
}

/// A change performed by [`RandomGraph::change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Swap {
        removed: (usize, usize),
        added: (usize, usize),
    },
    Remove((usize, usize)),
}

/// A random undirected graph with a fixed number of vertices that changes at
/// random.
///
/// The graph is initialized with `m` distinct random edges, chosen with a
/// [pseudorandom number generator](SmallRng) seeded with the given seed; at
/// each call to [`change`](RandomGraph::change) it mutates following a
/// [`ChangeModel`]. The current edges are kept both in a [`DynGraph`], which
/// answers probes, and in an [`EdgeSet`], from which edges to remove are
/// drawn.
///
/// # Examples
///
/// ```
/// use dynconn::prelude::*;
///
/// let mut graph = RandomGraph::new(100, 500, ChangeModel::Swap, 0)?;
/// assert_eq!(graph.num_edges(), 500);
/// graph.change();
/// assert_eq!(graph.num_edges(), 500);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RandomGraph {
    graph: DynGraph,
    edges: EdgeSet,
    model: ChangeModel,
    rng: SmallRng,
}

impl RandomGraph {
    /// Creates a new random graph with `n` vertices and `m` edges.
    ///
    /// A warning is logged if `m` is outside the
    /// [interesting range](RandomGraph::interesting_range).
    pub fn new(n: usize, m: usize, model: ChangeModel, seed: u64) -> Result<Self, ModelError> {
        if n < 2 {
            return Err(ModelError::TooFewNodes(n));
        }
        let max = n * (n - 1) / 2;
        if m > max {
            return Err(ModelError::TooManyEdges { n, m, max });
        }
        let (low, high) = Self::interesting_range(n);
        if (m as f64) < low {
            log::warn!(
                "The range of parameters is not interesting: {} edges are fewer than n ln n = {:.0}",
                m,
                low
            );
        } else if (m as f64) > high {
            log::warn!(
                "The range of parameters is not interesting: {} edges are more than n^(3/2) = {:.0}",
                m,
                high
            );
        }

        let mut result = Self {
            graph: DynGraph::empty(n),
            edges: EdgeSet::new(),
            model,
            rng: SmallRng::seed_from_u64(seed),
        };
        for _ in 0..m {
            let (u, v) = result.random_non_edge();
            result.graph.add_edge(u, v);
            result.edges.insert(u, v);
        }
        Ok(result)
    }

    /// Returns the interesting range of edge counts for `n` vertices, that
    /// is, `[n ln n . . n^(3/2)]`.
    pub fn interesting_range(n: usize) -> (f64, f64) {
        let n = n as f64;
        (n * n.ln(), n.powf(1.5))
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &DynGraph {
        &self.graph
    }

    /// Returns the current number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the change model.
    pub fn model(&self) -> ChangeModel {
        self.model
    }

    /// Returns a uniformly random pair of distinct vertices that are not
    /// adjacent.
    ///
    /// The graph must not be complete.
    fn random_non_edge(&mut self) -> (usize, usize) {
        let n = self.graph.num_nodes();
        loop {
            let u = self.rng.random_range(0..n);
            let v = self.rng.random_range(0..n);
            if u != v && !self.edges.contains(u, v) {
                return (u, v);
            }
        }
    }

    fn is_complete(&self) -> bool {
        let n = self.graph.num_nodes();
        self.edges.len() == n * (n - 1) / 2
    }

    /// Changes the graph following its [`ChangeModel`].
    ///
    /// Returns the change performed, or `None` if no change was possible
    /// (i.e., the graph has no edges, or it is complete and the model
    /// requires a swap).
    pub fn change(&mut self) -> Option<Change> {
        let remove = match self.model {
            ChangeModel::Swap => false,
            ChangeModel::SwapOrRemove => {
                let (low, high) = Self::interesting_range(self.graph.num_nodes());
                let m = self.edges.len() as f64 - 1.0;
                low <= m && m <= high && self.rng.random_bool(0.5)
            }
        };

        let removed = self.edges.choose(&mut self.rng)?;
        let change = if remove {
            Change::Remove(removed)
        } else {
            if self.is_complete() {
                return None;
            }
            // Drawn before the removal, so the removed edge is not added back
            Change::Swap {
                removed,
                added: self.random_non_edge(),
            }
        };

        match change {
            Change::Remove((u, v)) => {
                self.remove(u, v);
            }
            Change::Swap {
                removed: (u, v),
                added: (x, y),
            } => {
                self.remove(u, v);
                self.graph.add_edge(x, y);
                self.edges.insert(x, y);
            }
        }
        log::trace!("{:?}", change);
        Some(change)
    }

    fn remove(&mut self, u: usize, v: usize) {
        self.graph.remove_edge(u, v);
        self.edges.remove(u, v);
    }
}

impl GraphOracle for RandomGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    #[inline(always)]
    fn start_vertex(&self) -> usize {
        self.graph.start_vertex()
    }

    #[inline(always)]
    fn end_vertex(&self) -> usize {
        self.graph.end_vertex()
    }

    fn probe(&self, node: usize) -> Vec<usize> {
        self.graph.probe(node)
    }

    fn validate(&self, path: &[usize]) -> Validation {
        self.graph.validate(path)
    }

    fn apply_delta(&mut self, added: &[(usize, usize)], removed: &[(usize, usize)]) {
        for &(u, v) in removed {
            self.remove(u, v);
        }
        for &(u, v) in added {
            if self.graph.add_edge(u, v) {
                self.edges.insert(u, v);
            }
        }
    }
}
