/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use itertools::Itertools;

/// Reconstructs a path from `s` to `t` passing through `meeting`.
///
/// `from_s` and `from_t` are parent arenas of trees rooted at `s` and `t`,
/// respectively: the path is obtained by following `from_s` from `meeting`
/// back to `s`, and then, unless `meeting` is `t`, by following `from_t`
/// from `meeting` to `t`.
///
/// # Panics
///
/// If a parent chain is broken or longer than the number of vertices, that
/// is, if the arenas are not trees rooted at `s` and `t`.
///
/// # Examples
///
/// ```
/// use dynconn::algo::reconstruct;
///
/// let from_s = [None, Some(0), Some(1), None, None];
/// let from_t = [None, None, Some(3), Some(4), None];
/// assert_eq!(reconstruct(2, &from_s, &from_t, 0, 4), vec![0, 1, 2, 3, 4]);
/// ```
pub fn reconstruct(
    meeting: usize,
    from_s: &[Option<usize>],
    from_t: &[Option<usize>],
    s: usize,
    t: usize,
) -> Vec<usize> {
    let mut path = vec![meeting];
    let mut node = meeting;
    while node != s {
        node = from_s[node]
            .unwrap_or_else(|| panic!("Vertex {} has no parent towards {}", node, s));
        path.push(node);
        assert!(
            path.len() <= from_s.len(),
            "Cycle in the parent pointers towards {}",
            s
        );
    }
    path.reverse();

    let mut node = meeting;
    while node != t {
        node = from_t[node]
            .unwrap_or_else(|| panic!("Vertex {} has no parent towards {}", node, t));
        path.push(node);
        assert!(
            path.len() <= from_s.len() + from_t.len(),
            "Cycle in the parent pointers towards {}",
            t
        );
    }

    debug_assert!(
        path.iter().all_unique(),
        "Reconstructed path {:?} contains a repeated vertex",
        path
    );
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_at_t() {
        let from_s = [None, Some(0), Some(1), Some(2)];
        assert_eq!(reconstruct(3, &from_s, &[None; 4], 0, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_meeting_at_s() {
        let from_t = [Some(2), None, Some(3), None];
        assert_eq!(reconstruct(0, &[None; 4], &from_t, 0, 3), vec![0, 2, 3]);
    }

    #[test]
    fn test_adjacent_endpoints() {
        let from_s = [None, Some(0)];
        assert_eq!(reconstruct(1, &from_s, &[None; 2], 0, 1), vec![0, 1]);
    }

    #[test]
    #[should_panic]
    fn test_broken_chain() {
        let from_s = [None, None, Some(1)];
        reconstruct(2, &from_s, &[None; 3], 0, 2);
    }

    #[test]
    #[should_panic]
    fn test_cycle() {
        let from_s = [None, Some(2), Some(1)];
        reconstruct(1, &from_s, &[None; 3], 0, 2);
    }
}
