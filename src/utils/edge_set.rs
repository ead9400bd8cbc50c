/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::Rng;
use std::collections::HashMap;

/// A set of undirected edges supporting constant-time insertion, removal,
/// and uniform random choice.
///
/// Edges are stored in normalized form `(u, v)` with `u < v` in a vector,
/// together with a map from each edge to its position in the vector. Removal
/// swaps the removed edge with the last one.
///
/// # Examples
///
/// ```
/// use dynconn::utils::EdgeSet;
///
/// let mut edges = EdgeSet::new();
/// assert!(edges.insert(3, 1));
/// assert!(!edges.insert(1, 3));
/// assert!(edges.contains(3, 1));
/// assert!(edges.remove(1, 3));
/// assert!(edges.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<(usize, usize)>,
    positions: HashMap<(usize, usize), usize>,
}

#[inline(always)]
fn normalize(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl EdgeSet {
    /// Creates an empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns whether the edge `{u, v}` is in the set.
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.positions.contains_key(&normalize(u, v))
    }

    /// Adds the edge `{u, v}`, returning whether it is a new one.
    pub fn insert(&mut self, u: usize, v: usize) -> bool {
        let edge = normalize(u, v);
        if self.positions.contains_key(&edge) {
            return false;
        }
        self.positions.insert(edge, self.edges.len());
        self.edges.push(edge);
        true
    }

    /// Removes the edge `{u, v}`, returning whether it was present.
    pub fn remove(&mut self, u: usize, v: usize) -> bool {
        let Some(pos) = self.positions.remove(&normalize(u, v)) else {
            return false;
        };
        self.edges.swap_remove(pos);
        if let Some(&moved) = self.edges.get(pos) {
            self.positions.insert(moved, pos);
        }
        true
    }

    /// Returns a uniformly random edge, or `None` if the set is empty.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        if self.edges.is_empty() {
            None
        } else {
            Some(self.edges[rng.random_range(0..self.edges.len())])
        }
    }

    /// Returns an iterator over the edges, in normalized form.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_swap_remove() {
        let mut edges = EdgeSet::new();
        for i in 0..10 {
            assert!(edges.insert(i, i + 1));
        }
        assert!(edges.remove(0, 1));
        assert!(!edges.remove(0, 1));
        assert!(edges.remove(5, 4));
        assert_eq!(edges.len(), 8);
        let mut sorted = edges.iter().collect::<Vec<_>>();
        sorted.sort();
        assert_eq!(
            sorted,
            vec![(1, 2), (2, 3), (3, 4), (5, 6), (6, 7), (7, 8), (8, 9), (9, 10)]
        );
        for i in 0..10 {
            assert_eq!(edges.contains(i + 1, i), i != 0 && i != 4);
        }
        // Positions must still be consistent after the swaps
        for i in 1..10 {
            edges.remove(i, i + 1);
        }
        assert!(edges.is_empty());
    }

    #[test]
    fn test_choose() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut edges = EdgeSet::new();
        assert_eq!(edges.choose(&mut rng), None);
        edges.insert(2, 7);
        edges.insert(1, 3);
        let mut seen = [false; 2];
        for _ in 0..100 {
            match edges.choose(&mut rng) {
                Some((2, 7)) => seen[0] = true,
                Some((1, 3)) => seen[1] = true,
                e => panic!("Unexpected edge {:?}", e),
            }
        }
        assert_eq!(seen, [true, true]);
    }
}
