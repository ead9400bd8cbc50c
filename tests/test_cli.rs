/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "cli")]

use anyhow::Result;
use dynconn::cli::cli_main;

#[test]
fn test_random() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let csv = dir.path().join("random.csv");
    for alg in ["one", "two"] {
        cli_main([
            "dynconn",
            "random",
            "--alg",
            alg,
            "--n",
            "200",
            "--m",
            "1500",
            "--rounds",
            "500",
            "--model",
            "swap-or-remove",
            "--csv",
            csv.to_str().unwrap(),
        ])?;
    }
    let content = std::fs::read_to_string(&csv)?;
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("alg,n,m,c0,radius,phase_len,probe,change,model,seed,rounds,"));
    assert!(lines[1].starts_with("one_path,200,1500,0.5,"));
    assert!(lines[2].starts_with("two_path,200,1500,0.5,"));
    assert!(lines[1].contains(",SwapOrRemove,0,500,"), "{}", lines[1]);
    Ok(())
}

#[test]
fn test_dataset() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let deltas = dir.path().join("deltas.txt");
    std::fs::write(&deltas, "0 + 0 1\n0 + 1 2\n10 - 1 2\n20 + 2 3\n")?;
    let csv = dir.path().join("out").join("dataset.csv");
    cli_main([
        "dynconn",
        "dataset",
        "--alg",
        "two",
        "--deltas",
        deltas.to_str().unwrap(),
        "--start",
        "2",
        "--end",
        "0",
        "--radius",
        "1",
        "--visualization",
        "5",
        "--csv",
        csv.to_str().unwrap(),
    ])?;
    let content = std::fs::read_to_string(&csv)?;
    assert!(content.lines().nth(1).unwrap().starts_with("two_path,4,deltas.txt,"));

    // Vertex 3 does not exist in a graph with 3 vertices
    assert!(cli_main([
        "dynconn",
        "dataset",
        "--alg",
        "one",
        "--n",
        "3",
        "--deltas",
        deltas.to_str().unwrap(),
    ])
    .is_err());
    Ok(())
}
