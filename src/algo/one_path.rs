/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{reconstruct, Ball};
use crate::traits::{phase_radius, ProbeAlgorithm};

/// The single-path algorithm.
///
/// A phase lasts 2R rounds. During the first R rounds a [`Ball`] is grown
/// around the start vertex S; during the last R rounds a second ball is grown
/// around the end vertex T. As soon as the two balls intersect (or one of
/// them contains the center of the other) a path is reconstructed from the
/// parent pointers of the balls.
///
/// The path found during a phase (or the empty path, if none was found) is
/// committed at the last round of the phase, and it is the
/// [answer](ProbeAlgorithm::answer) for the whole following phase.
///
/// # Examples
///
/// ```
/// use dynconn::prelude::*;
///
/// // 0 - 1 - 2 - 3
/// let graph = DynGraph::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
/// let mut alg = OnePath::with_radius(2, 4);
/// for _ in 0..alg.phase_len() {
///     assert!(alg.answer().is_empty());
///     let v = alg.probe_input();
///     alg.set_probe_result(&graph.probe(v));
/// }
/// assert_eq!(alg.answer(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct OnePath {
    radius: usize,
    num_nodes: usize,
    s: usize,
    t: usize,
    /// The position of the next round in the current phase.
    pos: usize,
    ball_s: Ball,
    ball_t: Ball,
    /// The path found during the current phase, if any.
    working: Vec<usize>,
    /// The path committed at the end of the last phase.
    committed: Vec<usize>,
}

impl OnePath {
    /// Creates a new single-path algorithm for a graph with `n` vertices,
    /// with radius `⌈√(c·n / ln n)⌉`.
    ///
    /// The start and end vertices are 0 and `n` − 1.
    pub fn new(c: f64, n: usize) -> Self {
        Self::with_radius(phase_radius(c, n), n)
    }

    /// Creates a new single-path algorithm for a graph with `n` vertices
    /// with the given radius.
    pub fn with_radius(radius: usize, n: usize) -> Self {
        assert!(radius > 0, "The radius must be positive");
        assert!(n >= 2, "The graph must have at least two vertices (got {})", n);
        let mut alg = Self {
            radius,
            num_nodes: n,
            s: 0,
            t: n - 1,
            pos: 0,
            ball_s: Ball::new(n),
            ball_t: Ball::new(n),
            working: vec![],
            committed: vec![],
        };
        alg.restart_phase();
        alg
    }

    fn restart_phase(&mut self) {
        self.pos = 0;
        self.ball_s.start(self.s, None);
        self.ball_t.reset();
        self.working.clear();
    }

    /// The ball grown in the current half of the phase.
    fn current(&self) -> &Ball {
        if self.pos < self.radius {
            &self.ball_s
        } else {
            &self.ball_t
        }
    }

    /// Returns the ball around the start vertex.
    pub fn ball_s(&self) -> &Ball {
        &self.ball_s
    }

    /// Returns the ball around the end vertex.
    pub fn ball_t(&self) -> &Ball {
        &self.ball_t
    }
}

impl ProbeAlgorithm for OnePath {
    fn name(&self) -> &'static str {
        "one_path"
    }

    fn radius(&self) -> usize {
        self.radius
    }

    fn phase_len(&self) -> usize {
        2 * self.radius
    }

    fn phase_pos(&self) -> usize {
        self.pos
    }

    fn probe_input(&self) -> usize {
        // Both balls always contain at least their center when they are grown
        self.current()
            .next_probe()
            .expect("the ball being grown is never empty")
    }

    fn set_probe_result(&mut self, neighbors: &[usize]) {
        let probed = self.probe_input();
        let (s, t) = (self.s, self.t);
        let (ball, other, target) = if self.pos < self.radius {
            (&mut self.ball_s, &self.ball_t, t)
        } else {
            (&mut self.ball_t, &self.ball_s, s)
        };

        let meeting = ball
            .absorb(neighbors, probed, |_| true)
            .iter()
            .copied()
            .find(|&v| v == target || other.contains(v));
        if self.working.is_empty() {
            if let Some(meeting) = meeting {
                self.working = reconstruct(
                    meeting,
                    self.ball_s.parents(),
                    self.ball_t.parents(),
                    s,
                    t,
                );
                log::debug!(
                    "Found path of length {} at round {} of the phase",
                    self.working.len(),
                    self.pos
                );
            }
        }

        self.pos += 1;
        if self.pos == self.radius {
            self.ball_t.start(t, None);
        } else if self.pos == self.phase_len() {
            self.committed = std::mem::take(&mut self.working);
            log::debug!("Committed path {:?}", self.committed);
            self.restart_phase();
        }
    }

    fn answer(&self) -> &[usize] {
        &self.committed
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
        // The committed path joins the old endpoints
        self.committed.clear();
        self.restart_phase();
    }
}
