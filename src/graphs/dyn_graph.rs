/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{GraphOracle, Validation};
use std::collections::{BTreeSet, VecDeque};
use sux::bits::BitVec;
use sux::traits::BitVecOpsMut;

/// A mutable undirected simple graph based on a vector of [`BTreeSet`].
///
/// Neighbors are reported in increasing order, which makes every
/// [`ProbeAlgorithm`](crate::traits::ProbeAlgorithm) run on this graph
/// deterministic. Self-loops are not allowed.
///
/// The graph has two distinguished vertices, by default 0 and `n` − 1,
/// against which answers are [validated](GraphOracle::validate).
///
/// # Examples
///
/// ```
/// use dynconn::prelude::*;
///
/// let mut graph = DynGraph::from_edges(4, [(0, 1), (1, 3)]);
/// assert_eq!(graph.probe(1), vec![0, 3]);
/// assert_eq!(graph.validate(&[0, 1, 3]), Validation::ValidPath);
/// graph.remove_edge(3, 1);
/// assert_eq!(graph.validate(&[0, 1, 3]), Validation::InvalidPath);
/// assert_eq!(graph.validate(&[]), Validation::ValidEmpty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynGraph {
    /// The number of edges in the graph.
    num_edges: usize,
    /// For each vertex, its set of neighbors.
    succ: Vec<BTreeSet<usize>>,
    start: usize,
    end: usize,
}

impl DynGraph {
    /// Creates a new graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        assert!(n >= 2, "The graph must have at least two vertices (got {})", n);
        Self {
            num_edges: 0,
            succ: Vec::from_iter((0..n).map(|_| BTreeSet::new())),
            start: 0,
            end: n - 1,
        }
    }

    /// Creates a new graph with `n` vertices from an [`IntoIterator`] of
    /// edges.
    ///
    /// Duplicate edges are ignored.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut g = Self::empty(n);
        for (u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    fn check_node(&self, node: usize) {
        if node >= self.succ.len() {
            panic!(
                "Node {} does not exist (the graph has {} nodes)",
                node,
                self.succ.len(),
            );
        }
    }

    /// Adds the edge `{u, v}` and returns whether it is a new one.
    ///
    /// Self-loops are never added.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        self.check_node(u.max(v));
        if u == v {
            return false;
        }
        let result = self.succ[u].insert(v);
        if result {
            self.succ[v].insert(u);
            self.num_edges += 1;
        }
        result
    }

    /// Removes the edge `{u, v}` and returns whether it was present.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        self.check_node(u.max(v));
        let result = self.succ[u].remove(&v);
        if result {
            self.succ[v].remove(&u);
            self.num_edges -= 1;
        }
        result
    }

    /// Returns whether the edge `{u, v}` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.succ[u].contains(&v)
    }

    /// Returns the number of edges.
    #[inline(always)]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the degree of a vertex.
    #[inline(always)]
    pub fn degree(&self, node: usize) -> usize {
        self.succ[node].len()
    }

    /// Returns an iterator over the neighbors of a vertex, in increasing
    /// order.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.succ[node].iter().copied()
    }

    /// Returns whether `u` and `v` are connected, using a breadth-first
    /// visit from `u`.
    pub fn connected(&self, u: usize, v: usize) -> bool {
        self.check_node(u.max(v));
        if u == v {
            return true;
        }
        let mut visited = BitVec::new(self.succ.len());
        let mut queue = VecDeque::new();
        visited.set(u, true);
        queue.push_back(u);
        while let Some(node) = queue.pop_front() {
            for &succ in &self.succ[node] {
                if !visited[succ] {
                    if succ == v {
                        return true;
                    }
                    visited.set(succ, true);
                    queue.push_back(succ);
                }
            }
        }
        false
    }

    /// Sets the start and end vertices.
    pub fn set_endpoints(&mut self, start: usize, end: usize) {
        self.check_node(start.max(end));
        assert_ne!(start, end, "The start and end vertices must differ");
        self.start = start;
        self.end = end;
    }
}

impl GraphOracle for DynGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.succ.len()
    }

    #[inline(always)]
    fn start_vertex(&self) -> usize {
        self.start
    }

    #[inline(always)]
    fn end_vertex(&self) -> usize {
        self.end
    }

    fn probe(&self, node: usize) -> Vec<usize> {
        self.successors(node).collect()
    }

    fn validate(&self, path: &[usize]) -> Validation {
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            return if self.connected(self.start, self.end) {
                Validation::InvalidEmpty
            } else {
                Validation::ValidEmpty
            };
        };

        if first != self.start || last != self.end {
            return Validation::Malformed;
        }
        let n = self.succ.len();
        let mut seen = BitVec::new(n);
        for &node in path {
            if node >= n || seen[node] {
                return Validation::Malformed;
            }
            seen.set(node, true);
        }

        if path.windows(2).all(|arc| self.has_edge(arc[0], arc[1])) {
            Validation::ValidPath
        } else {
            Validation::InvalidPath
        }
    }

    fn apply_delta(&mut self, added: &[(usize, usize)], removed: &[(usize, usize)]) {
        for &(u, v) in removed {
            self.remove_edge(u, v);
        }
        for &(u, v) in added {
            self.add_edge(u, v);
        }
    }
}
