/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{reconstruct, Ball};
use crate::traits::{phase_radius, ProbeAlgorithm};

/// The four balls of a [`TwoPath`] phase, in the order in which they are
/// grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The ball around u₁, the first neighbor of S (primary path).
    U1,
    /// The ball around u₂, the second neighbor of S (secondary path).
    U2,
    /// The ball around v₁, a neighbor of T (primary path).
    V1,
    /// The ball around v₂, a neighbor of T (secondary path).
    V2,
}

impl Side {
    fn from_quarter(quarter: usize) -> Self {
        match quarter {
            0 => Side::U1,
            1 => Side::U2,
            2 => Side::V1,
            3 => Side::V2,
            _ => unreachable!("a phase has four quarters"),
        }
    }
}

/// The action performed at a given round of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Probe S and pick the centers u₁ and u₂.
    Source,
    /// Probe T and pick the centers v₁ and v₂.
    Target,
    /// Check that the arc starting at the given index of the last primary
    /// path still exists.
    Check(usize),
    /// Grow a ball.
    Grow(Side),
    /// Probe S and ignore the result.
    Filler,
}

/// The dual-path algorithm.
///
/// A phase lasts 8R rounds. At round 0 the start vertex S is probed, and its
/// first two neighbors u₁ and u₂ become the centers of two balls; at round 1
/// the end vertex T is probed, and two of its neighbors v₁ and v₂ become the
/// centers of two further balls. The remaining odd rounds, plus round 2, grow
/// the four balls in turn, each for a quarter of the phase, as a [`Ball`].
///
/// The balls form two groups, (u₁, v₁) and (u₂, v₂), that are kept
/// vertex-disjoint (except for S and T): a ball never admits a vertex
/// belonging to a ball of the other group. An intersection within the first
/// group yields the *primary* path, within the second group the *secondary*
/// path; the two paths share no vertex except S and T.
///
/// Even rounds (except 0 and 2) check, in round-robin fashion, the arcs of
/// the primary path committed at the end of the last phase. If an arc is
/// found missing, the primary path is invalidated until the end of the phase,
/// and the [answer](ProbeAlgorithm::answer) becomes the last secondary path.
///
/// # Examples
///
/// ```
/// use dynconn::prelude::*;
///
/// // Two disjoint paths from 0 to 5
/// let graph = DynGraph::from_edges(6, [(0, 1), (1, 2), (2, 5), (0, 3), (3, 4), (4, 5)]);
/// let mut alg = TwoPath::with_radius(2, 6);
/// for _ in 0..alg.phase_len() {
///     let v = alg.probe_input();
///     alg.set_probe_result(&graph.probe(v));
/// }
/// assert_eq!(alg.last_primary(), &[0, 1, 2, 5]);
/// assert_eq!(alg.last_secondary(), &[0, 3, 4, 5]);
/// assert_eq!(alg.answer(), &[0, 1, 2, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct TwoPath {
    radius: usize,
    num_nodes: usize,
    s: usize,
    t: usize,
    /// The position of the next round in the current phase.
    pos: usize,
    u1: Ball,
    u2: Ball,
    v1: Ball,
    v2: Ball,
    /// The primary path found during the current phase, if any.
    primary: Vec<usize>,
    /// The secondary path found during the current phase, if any.
    secondary: Vec<usize>,
    last_primary: Vec<usize>,
    last_secondary: Vec<usize>,
    /// Whether all checked arcs of the last primary path exist.
    primary_valid: bool,
}

impl TwoPath {
    /// Creates a new dual-path algorithm for a graph with `n` vertices, with
    /// radius `⌈√(c·n / ln n)⌉`.
    ///
    /// The start and end vertices are 0 and `n` − 1.
    pub fn new(c: f64, n: usize) -> Self {
        Self::with_radius(phase_radius(c, n), n)
    }

    /// Creates a new dual-path algorithm for a graph with `n` vertices with
    /// the given radius.
    pub fn with_radius(radius: usize, n: usize) -> Self {
        assert!(radius > 0, "The radius must be positive");
        assert!(n >= 2, "The graph must have at least two vertices (got {})", n);
        Self {
            radius,
            num_nodes: n,
            s: 0,
            t: n - 1,
            pos: 0,
            u1: Ball::new(n),
            u2: Ball::new(n),
            v1: Ball::new(n),
            v2: Ball::new(n),
            primary: vec![],
            secondary: vec![],
            last_primary: vec![],
            last_secondary: vec![],
            primary_valid: true,
        }
    }

    /// Returns the ball on the given side.
    pub fn ball(&self, side: Side) -> &Ball {
        match side {
            Side::U1 => &self.u1,
            Side::U2 => &self.u2,
            Side::V1 => &self.v1,
            Side::V2 => &self.v2,
        }
    }

    /// Returns the primary path committed at the end of the last phase.
    pub fn last_primary(&self) -> &[usize] {
        &self.last_primary
    }

    /// Returns the secondary path committed at the end of the last phase.
    pub fn last_secondary(&self) -> &[usize] {
        &self.last_secondary
    }

    fn step(&self) -> Step {
        match self.pos {
            0 => Step::Source,
            1 => Step::Target,
            p if p % 2 == 1 || p == 2 => Step::Grow(Side::from_quarter(p / (2 * self.radius))),
            p => {
                let len = self.last_primary.len();
                if len < 2 {
                    Step::Filler
                } else {
                    Step::Check((p / 2 - 2) % (len - 1))
                }
            }
        }
    }

    /// Picks u₁ and u₂ among the neighbors of S.
    fn start_source(&mut self, neighbors: &[usize]) {
        self.u1.reset();
        self.u2.reset();
        self.v1.reset();
        self.v2.reset();
        self.primary.clear();
        self.secondary.clear();

        let mut centers = neighbors.iter().copied();
        if let Some(u1) = centers.next() {
            self.u1.start(u1, Some(self.s));
        }
        if let Some(u2) = centers.next() {
            self.u2.start(u2, Some(self.s));
        }
        log::trace!(
            "Centers around S: {:?}, {:?}",
            self.u1.center(),
            self.u2.center()
        );
    }

    /// Picks v₁ and v₂ among the neighbors of T, so that v₁ is not in the
    /// ball of u₂ and v₂ is not in the ball of u₁.
    fn start_target(&mut self, neighbors: &[usize]) {
        let v1 = neighbors.iter().copied().find(|&v| !self.u2.contains(v));
        if let Some(v1) = v1 {
            self.v1.start(v1, Some(self.t));
        }
        if let Some(v2) = neighbors
            .iter()
            .copied()
            .find(|&v| Some(v) != v1 && !self.u1.contains(v))
        {
            self.v2.start(v2, Some(self.t));
        }
        log::trace!(
            "Centers around T: {:?}, {:?}",
            self.v1.center(),
            self.v2.center()
        );
    }

    /// Grows the ball on the given side, returning a vertex witnessing an
    /// intersection with the other ball of the same group, if any.
    fn grow(&mut self, side: Side, neighbors: &[usize]) -> Option<usize> {
        let (s, t) = (self.s, self.t);
        let Self { u1, u2, v1, v2, .. } = self;
        // The ball to grow, its partner in the group, the balls of the other
        // group, the endpoint the ball is rooted at, and the other endpoint.
        let (ball, partner, forbidden, own, other) = match side {
            Side::U1 => (u1, &*v1, [&*u2, &*v2], s, t),
            Side::U2 => (u2, &*v2, [&*u1, &*v1], s, t),
            Side::V1 => (v1, &*u1, [&*u2, &*v2], t, s),
            Side::V2 => (v2, &*u2, [&*u1, &*v1], t, s),
        };
        let probed = ball.next_probe()?;
        ball.absorb(neighbors, probed, |v| {
            v != own && (v == other || !forbidden.iter().any(|b| b.contains(v)))
        })
        .iter()
        .copied()
        .find(|&v| v == other || partner.contains(v))
    }

    /// Returns a vertex witnessing a path between the balls of a group.
    fn witness(&self, u: &Ball, v: &Ball) -> Option<usize> {
        if u.contains(self.t) {
            Some(self.t)
        } else if v.contains(self.s) {
            Some(self.s)
        } else {
            u.first_common(v)
        }
    }

    fn set_primary(&mut self, meeting: usize) {
        if self.primary.is_empty() {
            self.primary = reconstruct(
                meeting,
                self.u1.parents(),
                self.v1.parents(),
                self.s,
                self.t,
            );
            log::debug!("Found primary path {:?}", self.primary);
        }
    }

    fn set_secondary(&mut self, meeting: usize) {
        if self.secondary.is_empty() {
            self.secondary = reconstruct(
                meeting,
                self.u2.parents(),
                self.v2.parents(),
                self.s,
                self.t,
            );
            log::debug!("Found secondary path {:?}", self.secondary);
        }
    }

    /// Looks for paths in both groups from scratch.
    fn discover(&mut self) {
        if self.primary.is_empty() {
            if let Some(meeting) = self.witness(&self.u1, &self.v1) {
                self.set_primary(meeting);
            }
        }
        if self.secondary.is_empty() {
            if let Some(meeting) = self.witness(&self.u2, &self.v2) {
                self.set_secondary(meeting);
            }
        }
    }

    /// Returns whether the two groups of balls are disjoint, except for the
    /// start and end vertices.
    pub fn groups_disjoint(&self) -> bool {
        self.u1
            .vertices()
            .iter()
            .chain(self.v1.vertices())
            .filter(|&&v| v != self.s && v != self.t)
            .all(|&v| !self.u2.contains(v) && !self.v2.contains(v))
    }
}

impl ProbeAlgorithm for TwoPath {
    fn name(&self) -> &'static str {
        "two_path"
    }

    fn radius(&self) -> usize {
        self.radius
    }

    fn phase_len(&self) -> usize {
        8 * self.radius
    }

    fn phase_pos(&self) -> usize {
        self.pos
    }

    fn probe_input(&self) -> usize {
        match self.step() {
            Step::Source | Step::Filler => self.s,
            Step::Target => self.t,
            Step::Check(i) => self.last_primary[i],
            Step::Grow(side) => self.ball(side).next_probe().unwrap_or(self.s),
        }
    }

    fn set_probe_result(&mut self, neighbors: &[usize]) {
        match self.step() {
            Step::Source => {
                self.start_source(neighbors);
                self.discover();
            }
            Step::Target => {
                self.start_target(neighbors);
                self.discover();
            }
            Step::Check(i) => {
                let next = self.last_primary[i + 1];
                if self.primary_valid && !neighbors.contains(&next) {
                    log::debug!(
                        "Arc ({}, {}) of the primary path is missing",
                        self.last_primary[i],
                        next
                    );
                    self.primary_valid = false;
                }
            }
            Step::Grow(side) => {
                if let Some(meeting) = self.grow(side, neighbors) {
                    match side {
                        Side::U1 | Side::V1 => self.set_primary(meeting),
                        Side::U2 | Side::V2 => self.set_secondary(meeting),
                    }
                }
                debug_assert!(
                    self.groups_disjoint(),
                    "The balls of the two groups intersect"
                );
            }
            Step::Filler => {}
        }

        self.pos += 1;
        if self.pos == self.phase_len() {
            self.last_primary = std::mem::take(&mut self.primary);
            self.last_secondary = std::mem::take(&mut self.secondary);
            self.primary_valid = true;
            self.pos = 0;
            log::debug!(
                "Committed primary path {:?} and secondary path {:?}",
                self.last_primary,
                self.last_secondary
            );
        }
    }

    fn answer(&self) -> &[usize] {
        if self.primary_valid {
            &self.last_primary
        } else {
            &self.last_secondary
        }
    }

    fn primary_valid(&self) -> bool {
        self.primary_valid
    }

    fn start_vertex(&self) -> usize {
        self.s
    }

    fn end_vertex(&self) -> usize {
        self.t
    }

    fn set_endpoints(&mut self, s: usize, t: usize) {
        assert!(s < self.num_nodes, "Vertex {} does not exist", s);
        assert!(t < self.num_nodes, "Vertex {} does not exist", t);
        assert_ne!(s, t, "The start and end vertices must differ");
        self.s = s;
        self.t = t;
        self.pos = 0;
        // The committed paths join the old endpoints
        self.last_primary.clear();
        self.last_secondary.clear();
        self.primary_valid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(alg: &mut TwoPath, adj: &[&[usize]], rounds: usize) {
        for _ in 0..rounds {
            let v = alg.probe_input();
            alg.set_probe_result(adj[v]);
        }
    }

    #[test]
    fn test_schedule() {
        let alg = TwoPath::with_radius(2, 10);
        assert_eq!(alg.phase_len(), 16);
        let steps = (0..16)
            .map(|pos| TwoPath { pos, ..alg.clone() }.step())
            .collect::<Vec<_>>();
        assert_eq!(steps[0], Step::Source);
        assert_eq!(steps[1], Step::Target);
        assert_eq!(steps[2], Step::Grow(Side::U1));
        assert_eq!(steps[3], Step::Grow(Side::U1));
        assert_eq!(steps[4], Step::Filler);
        assert_eq!(steps[5], Step::Grow(Side::U2));
        assert_eq!(steps[7], Step::Grow(Side::U2));
        assert_eq!(steps[9], Step::Grow(Side::V1));
        assert_eq!(steps[11], Step::Grow(Side::V1));
        assert_eq!(steps[13], Step::Grow(Side::V2));
        assert_eq!(steps[15], Step::Grow(Side::V2));
        assert_eq!(steps[14], Step::Filler);
    }

    #[test]
    fn test_schedule_radius_one() {
        // Rounds 0 and 1 take the whole quarter of u₁
        let alg = TwoPath::with_radius(1, 10);
        let steps = (0..8)
            .map(|pos| TwoPath { pos, ..alg.clone() }.step())
            .collect::<Vec<_>>();
        assert_eq!(
            steps,
            vec![
                Step::Source,
                Step::Target,
                Step::Grow(Side::U2),
                Step::Grow(Side::U2),
                Step::Filler,
                Step::Grow(Side::V1),
                Step::Filler,
                Step::Grow(Side::V2),
            ]
        );

        // 0 - 1 - 3 - 4 - 9 and 0 - 2 - 9: u₁ keeps only its center
        let adj: [&[usize]; 10] = [
            &[1, 2],
            &[0, 3],
            &[0, 9],
            &[1, 4],
            &[3, 9],
            &[],
            &[],
            &[],
            &[],
            &[2, 4],
        ];
        let mut alg = alg;
        run(&mut alg, &adj, 7);
        assert_eq!(alg.ball(Side::U1).vertices(), &[1]);
    }

    #[test]
    fn test_check_round_robin() {
        let mut alg = TwoPath::with_radius(2, 10);
        alg.last_primary = vec![0, 3, 6, 9];
        let checks = (4..16)
            .step_by(2)
            .map(|pos| TwoPath { pos, ..alg.clone() }.step())
            .collect::<Vec<_>>();
        assert_eq!(
            checks,
            vec![
                Step::Check(0),
                Step::Check(1),
                Step::Check(2),
                Step::Check(0),
                Step::Check(1),
                Step::Check(2)
            ]
        );
    }

    #[test]
    fn test_centers() {
        // S = 0 with neighbors 1, 2, 3; T = 5 with neighbors 2, 4
        let adj: [&[usize]; 6] = [&[1, 2, 3], &[0], &[0, 5], &[0], &[5], &[2, 4]];
        let mut alg = TwoPath::with_radius(1, 6);
        run(&mut alg, &adj, 2);
        assert_eq!(alg.ball(Side::U1).center(), Some(1));
        assert_eq!(alg.ball(Side::U2).center(), Some(2));
        // 2 is in the ball of u₂, so it cannot be v₁
        assert_eq!(alg.ball(Side::V1).center(), Some(4));
        assert_eq!(alg.ball(Side::V2).center(), Some(2));
        // The secondary group already intersects in 2
        assert_eq!(alg.secondary, vec![0, 2, 5]);
        assert!(alg.primary.is_empty());
    }

    #[test]
    fn test_isolated_source() {
        let adj: [&[usize]; 3] = [&[], &[2], &[1]];
        let mut alg = TwoPath::with_radius(1, 3);
        for _ in 0..3 {
            for _ in 0..alg.phase_len() {
                let v = alg.probe_input();
                // T and v₁ are the only vertices that can be probed
                match alg.phase_pos() {
                    1 => assert_eq!(v, 2),
                    5 => assert_eq!(v, 1),
                    _ => assert_eq!(v, 0),
                }
                alg.set_probe_result(adj[v]);
                assert!(alg.answer().is_empty());
            }
        }
    }
}
