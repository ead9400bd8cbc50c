/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use sux::bits::BitVec;
use sux::traits::BitVecOpsMut;

/// A ball grown by expanding one vertex per probe.
///
/// This is a breadth-first visit in which the queue is never consumed: the
/// discovered vertices are kept in discovery order, and the `k`-th probe
/// absorbed by the ball expands the vertex at position `k`. Since vertices
/// are appended in discovery order, the expansion order is exactly that of a
/// breadth-first visit from the center.
///
/// When all discovered vertices have been expanded (e.g., because the
/// connected component of the center has been exhausted) the ball keeps
/// reprobing its last vertex: a round must always spend its probe.
///
/// Parents are stored in an arena indexed by vertex: the parent of a vertex
/// is the vertex whose probe discovered it. The center has no parent unless
/// the ball has been started with a link to an outer root.
///
/// # Examples
///
/// ```
/// use dynconn::algo::Ball;
///
/// let mut ball = Ball::new(5);
/// ball.start(0, None);
/// assert_eq!(ball.next_probe(), Some(0));
/// assert_eq!(ball.absorb(&[1, 2], 0, |_| true), &[1, 2]);
/// assert_eq!(ball.next_probe(), Some(1));
/// assert_eq!(ball.parent(2), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Ball {
    /// The vertices of the ball, in discovery order.
    vertices: Vec<usize>,
    /// Membership bits.
    members: BitVec,
    /// The parent arena.
    parents: Vec<Option<usize>>,
    /// The number of probes absorbed since the last start.
    expanded: usize,
}

impl Ball {
    /// Creates an empty ball on a graph with `num_nodes` vertices.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            vertices: Vec::new(),
            members: BitVec::new(num_nodes),
            parents: vec![None; num_nodes],
            expanded: 0,
        }
    }

    /// Empties the ball.
    ///
    /// Only the entries of the current members are cleared, so the cost is
    /// linear in the size of the ball.
    pub fn reset(&mut self) {
        for &v in &self.vertices {
            self.members.set(v, false);
            self.parents[v] = None;
        }
        self.vertices.clear();
        self.expanded = 0;
    }

    /// Empties the ball and restarts it from `center`, whose parent will be
    /// `link`.
    pub fn start(&mut self, center: usize, link: Option<usize>) {
        self.reset();
        self.vertices.push(center);
        self.members.set(center, true);
        self.parents[center] = link;
    }

    /// Returns the center of the ball, if the ball is not empty.
    pub fn center(&self) -> Option<usize> {
        self.vertices.first().copied()
    }

    /// Returns the vertex to probe next, or `None` if the ball is empty.
    pub fn next_probe(&self) -> Option<usize> {
        let last = self.vertices.len().checked_sub(1)?;
        Some(self.vertices[self.expanded.min(last)])
    }

    /// Absorbs the neighbors of the probed vertex, returning the vertices
    /// that have been added to the ball.
    ///
    /// Neighbors are examined in the given order; those that are not already
    /// in the ball and that are accepted by `admit` are appended, with parent
    /// `probed`.
    pub fn absorb(
        &mut self,
        neighbors: &[usize],
        probed: usize,
        mut admit: impl FnMut(usize) -> bool,
    ) -> &[usize] {
        let old_len = self.vertices.len();
        for &node in neighbors {
            if !self.members[node] && admit(node) {
                self.members.set(node, true);
                self.parents[node] = Some(probed);
                self.vertices.push(node);
            }
        }
        self.expanded += 1;
        &self.vertices[old_len..]
    }

    /// Returns whether `node` is in the ball.
    #[inline(always)]
    pub fn contains(&self, node: usize) -> bool {
        self.members[node]
    }

    /// Returns the parent of `node`, if any.
    #[inline(always)]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    /// Returns the parent arena.
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Returns the vertices of the ball in discovery order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Returns the number of vertices in the ball.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the ball is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of probes absorbed since the last start.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Returns the first vertex of this ball (in discovery order) that also
    /// belongs to `other`.
    pub fn first_common(&self, other: &Ball) -> Option<usize> {
        self.vertices.iter().copied().find(|&v| other.contains(v))
    }
}
