/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dynconn::prelude::*;
use std::collections::HashSet;

fn round(alg: &mut TwoPath, graph: &impl GraphOracle) {
    let v = alg.probe_input();
    alg.set_probe_result(&graph.probe(v));
}

/// Checks that no vertex other than S and T belongs to balls of different
/// groups.
fn assert_groups_disjoint(alg: &TwoPath) {
    let (s, t) = (alg.start_vertex(), alg.end_vertex());
    let group = |a: Side, b: Side| {
        alg.ball(a)
            .vertices()
            .iter()
            .chain(alg.ball(b).vertices())
            .copied()
            .filter(|&v| v != s && v != t)
            .collect::<HashSet<_>>()
    };
    let first = group(Side::U1, Side::V1);
    let second = group(Side::U2, Side::V2);
    assert!(
        first.is_disjoint(&second),
        "Groups intersect: {:?} and {:?}",
        first,
        second
    );
    assert!(alg.groups_disjoint());
}

#[test]
fn test_disjoint_balls() {
    let graph = DynGraph::from_edges(
        10,
        [
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (1, 2),
            (2, 3),
            (3, 4),
            (1, 4),
            (9, 5),
            (9, 6),
            (9, 7),
            (9, 8),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 5),
            (2, 6),
            (3, 5),
            (4, 8),
            (1, 7),
        ],
    );
    let mut alg = TwoPath::with_radius(3, 10);
    for _ in 0..20 * alg.phase_len() {
        round(&mut alg, &graph);
        assert_groups_disjoint(&alg);
    }
    assert_eq!(alg.last_primary(), &[0, 1, 7, 9]);
    assert_eq!(alg.last_secondary(), &[0, 2, 6, 9]);
}

#[test]
fn test_disjoint_balls_random() -> Result<()> {
    let mut graph = RandomGraph::new(100, 1215, ChangeModel::Swap, 0)?;
    let mut alg = TwoPath::new(1.0, 100);
    for _ in 0..200 * alg.phase_len() {
        round(&mut alg, &graph);
        assert_groups_disjoint(&alg);
        assert_ne!(graph.validate(alg.answer()), Validation::Malformed);
        graph.change();
    }
    Ok(())
}

const LADDER: [(usize, usize); 12] = [
    (0, 1),
    (0, 3),
    (1, 2),
    (3, 4),
    (2, 6),
    (2, 8),
    (4, 6),
    (4, 8),
    (6, 5),
    (8, 7),
    (5, 9),
    (7, 9),
];

#[test]
fn test_radius_too_small() {
    let graph = DynGraph::from_edges(10, LADDER);
    let mut alg = TwoPath::with_radius(1, 10);
    for _ in 0..10 * alg.phase_len() {
        round(&mut alg, &graph);
        assert!(alg.answer().is_empty());
        assert_eq!(graph.validate(alg.answer()), Validation::InvalidEmpty);
    }
}

#[test]
fn test_path_found() {
    let graph = DynGraph::from_edges(10, LADDER);
    let mut alg = TwoPath::with_radius(2, 10);
    for _ in 0..alg.phase_len() - 1 {
        round(&mut alg, &graph);
        assert!(alg.answer().is_empty());
    }
    let candidates: [&[usize]; 4] = [
        &[0, 1, 2, 6, 5, 9],
        &[0, 1, 2, 8, 7, 9],
        &[0, 3, 4, 6, 5, 9],
        &[0, 3, 4, 8, 7, 9],
    ];
    for _ in 0..10 * alg.phase_len() {
        round(&mut alg, &graph);
        assert!(candidates.contains(&alg.answer()));
        assert_eq!(graph.validate(alg.answer()), Validation::ValidPath);
    }
}

#[test]
fn test_centers_preventing_paths() {
    // T is probed after the centers around S are chosen, and its first
    // neighbor 5 can only reach T through the group of u₁ = 1
    let graph = DynGraph::from_edges(
        10,
        [
            (0, 1),
            (1, 2),
            (2, 6),
            (6, 7),
            (7, 9),
            (0, 3),
            (3, 4),
            (4, 8),
            (8, 5),
            (5, 9),
        ],
    );
    let mut alg = TwoPath::with_radius(5, 10);
    for _ in 0..10 * alg.phase_len() {
        round(&mut alg, &graph);
        if alg.phase_pos() == 2 {
            assert_eq!(alg.ball(Side::U1).center(), Some(1));
            assert_eq!(alg.ball(Side::U2).center(), Some(3));
            assert_eq!(alg.ball(Side::V1).center(), Some(5));
            assert_eq!(alg.ball(Side::V2).center(), Some(7));
        }
        assert!(alg.answer().is_empty());
        assert_eq!(graph.validate(alg.answer()), Validation::InvalidEmpty);
    }
}

#[test]
fn test_fallback_to_secondary() {
    let mut graph = DynGraph::from_edges(
        10,
        [
            (0, 1),
            (1, 2),
            (2, 6),
            (6, 5),
            (5, 9),
            (0, 3),
            (3, 4),
            (4, 8),
            (8, 7),
            (7, 9),
        ],
    );
    let mut alg = TwoPath::with_radius(5, 10);
    for _ in 0..2 * alg.phase_len() {
        round(&mut alg, &graph);
    }
    assert_eq!(alg.phase_pos(), 0);
    assert_eq!(alg.last_primary(), &[0, 1, 2, 6, 5, 9]);
    assert_eq!(alg.last_secondary(), &[0, 3, 4, 8, 7, 9]);
    assert_eq!(alg.answer(), alg.last_primary());

    graph.remove_edge(2, 6);
    // Arcs are checked at even positions starting from 4, so the arc
    // (2, 6) is checked at position 8
    while alg.primary_valid() {
        assert!(alg.phase_pos() <= 8);
        round(&mut alg, &graph);
    }
    assert_eq!(alg.phase_pos(), 9);
    while alg.phase_pos() != alg.phase_len() - 1 {
        round(&mut alg, &graph);
        assert!(!alg.primary_valid());
        assert_eq!(alg.answer(), &[0, 3, 4, 8, 7, 9]);
        assert_eq!(graph.validate(alg.answer()), Validation::ValidPath);
    }
    // At the end of the phase only the secondary group has found a path,
    // and the (empty) primary path is valid again
    round(&mut alg, &graph);
    assert!(alg.primary_valid());
    assert!(alg.last_primary().is_empty());
    assert_eq!(alg.last_secondary(), &[0, 3, 4, 8, 7, 9]);
    assert!(alg.answer().is_empty());
}

#[test]
fn test_fallback_mid_phase() {
    // Primary path 0 - 1 - 2 - 3 - 8, secondary path 0 - 4 - 5 - 6 - 8
    let mut graph = DynGraph::from_edges(
        9,
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 8),
            (0, 4),
            (4, 5),
            (5, 6),
            (6, 8),
        ],
    );
    let mut alg = TwoPath::with_radius(2, 9);
    for _ in 0..2 * alg.phase_len() {
        round(&mut alg, &graph);
    }
    assert_eq!(alg.last_primary(), &[0, 1, 2, 3, 8]);
    assert_eq!(alg.last_secondary(), &[0, 4, 5, 6, 8]);

    while alg.phase_pos() != 5 {
        round(&mut alg, &graph);
        assert!(alg.primary_valid());
    }
    graph.remove_edge(2, 3);
    // The arc (2, 3) is the third arc of the path, checked at position 8
    while alg.phase_pos() != 9 {
        assert!(alg.primary_valid());
        assert_eq!(graph.validate(alg.answer()), Validation::InvalidPath);
        round(&mut alg, &graph);
    }
    while alg.phase_pos() != 0 {
        assert!(!alg.primary_valid());
        assert_eq!(alg.answer(), &[0, 4, 5, 6, 8]);
        assert_eq!(graph.validate(alg.answer()), Validation::ValidPath);
        round(&mut alg, &graph);
    }
    // The primary group met before the removal, so the committed primary
    // path is stale and is caught again during the next phase
    assert!(alg.primary_valid());
    assert_eq!(alg.answer(), &[0, 1, 2, 3, 8]);
    assert_eq!(graph.validate(alg.answer()), Validation::InvalidPath);
    for _ in 0..alg.phase_len() {
        round(&mut alg, &graph);
    }
    assert!(alg.last_primary().is_empty());
    assert_eq!(alg.last_secondary(), &[0, 4, 5, 6, 8]);
}

#[test]
fn test_missing_st_edge() {
    // K₅ minus the edge between S and T
    let mut graph = DynGraph::empty(5);
    for u in 0..5 {
        for v in u + 1..5 {
            if (u, v) != (0, 4) {
                graph.add_edge(u, v);
            }
        }
    }
    let mut alg = TwoPath::with_radius(1, 5);
    for _ in 0..alg.phase_len() {
        round(&mut alg, &graph);
    }
    assert_eq!(alg.last_primary(), &[0, 1, 4]);
    assert_eq!(alg.last_secondary(), &[0, 2, 4]);
    for _ in 0..10 * alg.phase_len() {
        round(&mut alg, &graph);
        assert_eq!(alg.answer(), &[0, 1, 4]);
        assert_eq!(graph.validate(alg.answer()), Validation::ValidPath);
    }
}

#[test]
fn test_changes_between_phases() -> Result<()> {
    let mut graph = RandomGraph::new(6, 11, ChangeModel::Swap, 0)?;
    let mut alg = TwoPath::with_radius(2, 6);
    for _ in 0..1000 {
        for _ in 0..alg.phase_len() {
            round(&mut alg, &graph);
        }
        assert!(alg.primary_valid());
        for path in [alg.last_primary(), alg.last_secondary()] {
            let validation = graph.validate(path);
            assert!(validation.is_correct() || validation == Validation::InvalidEmpty);
        }
        for _ in 0..10 {
            graph.change();
        }
    }
    Ok(())
}
