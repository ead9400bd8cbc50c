/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// A round-driven algorithm tracking a path between a start and an end
/// vertex of a graph it can only observe through probes.
///
/// The algorithm never accesses the graph: a driver asks for the vertex to
/// probe with [`probe_input`](ProbeAlgorithm::probe_input), resolves the
/// probe against a [`GraphOracle`](crate::traits::GraphOracle), and passes
/// the neighbors back with
/// [`set_probe_result`](ProbeAlgorithm::set_probe_result). Calls must
/// alternate strictly: the phase position is the only source of truth for
/// what a probe result refers to.
///
/// The externally visible [`answer`](ProbeAlgorithm::answer) is updated
/// once per phase, at its last round, and stays constant in between.
pub trait ProbeAlgorithm {
    /// A short name for logs and CSV files.
    fn name(&self) -> &'static str;

    /// The phase radius R.
    fn radius(&self) -> usize;

    /// The number of rounds in a phase.
    fn phase_len(&self) -> usize;

    /// The position of the next round within the current phase.
    fn phase_pos(&self) -> usize;

    /// The vertex the next probe should be performed on.
    ///
    /// This method is a pure function of the current state: calling it
    /// multiple times before the next
    /// [`set_probe_result`](ProbeAlgorithm::set_probe_result) returns the
    /// same vertex.
    fn probe_input(&self) -> usize;

    /// Consumes the neighbors of the vertex returned by the last call to
    /// [`probe_input`](ProbeAlgorithm::probe_input) and advances the round.
    ///
    /// The order of `neighbors` is significant whenever the algorithm has to
    /// pick among them.
    fn set_probe_result(&mut self, neighbors: &[usize]);

    /// The path currently asserted, from the start vertex to the end vertex;
    /// an empty slice means that no path is currently known.
    fn answer(&self) -> &[usize];

    /// Whether the path committed at the end of the last phase has not been
    /// found broken during the current phase.
    ///
    /// Algorithms that do not revalidate their answer always return true.
    fn primary_valid(&self) -> bool {
        true
    }

    /// The start vertex S.
    fn start_vertex(&self) -> usize;

    /// The end vertex T.
    fn end_vertex(&self) -> usize;

    /// Sets both the start vertex S and the end vertex T, restarting the
    /// current phase and discarding the committed answer.
    ///
    /// # Panics
    ///
    /// If a vertex does not exist or if `s` and `t` are equal.
    fn set_endpoints(&mut self, s: usize, t: usize);

    /// Sets the start vertex S, restarting the current phase.
    fn set_start_vertex(&mut self, s: usize) {
        self.set_endpoints(s, self.end_vertex());
    }

    /// Sets the end vertex T, restarting the current phase.
    fn set_end_vertex(&mut self, t: usize) {
        self.set_endpoints(self.start_vertex(), t);
    }
}

/// Computes the phase radius `⌈√(c·n / ln n)⌉`, clamped to be at least one.
///
/// # Panics
///
/// If `n < 2` (the logarithm would vanish) or if `c` is not a positive
/// finite number.
pub fn phase_radius(c: f64, n: usize) -> usize {
    assert!(n >= 2, "The graph must have at least two vertices (got {})", n);
    assert!(
        c.is_finite() && c > 0.0,
        "The tuning constant must be positive and finite (got {})",
        c
    );
    let n = n as f64;
    ((c * n / n.ln()).sqrt().ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_radius() {
        // √(1000 / ln 1000) = 12.03...
        assert_eq!(phase_radius(1.0, 1000), 13);
        // √(0.5 · 1000 / ln 1000) = 8.5...
        assert_eq!(phase_radius(0.5, 1000), 9);
        assert_eq!(phase_radius(1E-9, 10), 1);
        assert_eq!(phase_radius(1.0, 2), 2);
    }

    #[test]
    #[should_panic]
    fn test_phase_radius_single_vertex() {
        phase_radius(1.0, 1);
    }

    #[test]
    #[should_panic]
    fn test_phase_radius_bad_constant() {
        phase_radius(-1.0, 100);
    }
}
