/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Traits
//! This modules contains the two contracts the crate is built around: the
//! [probing algorithm](ProbeAlgorithm) and the [graph oracle](GraphOracle)
//! answering its probes. They are collected into a module so you can do
//! `use dynconn::traits::*;` for ease of use.

mod algorithm;
pub use algorithm::*;

mod oracle;
pub use oracle::*;
