/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Probe-based algorithms tracking a path between two fixed vertices.
//!
//! Both algorithms work in phases: during a phase they grow [balls](Ball)
//! by probing one vertex per round, and at the end of the phase they commit
//! the path found (if any), which is then the answer for the whole following
//! phase.

pub mod ball;
pub use ball::Ball;

pub mod path;
pub use path::reconstruct;

mod one_path;
pub use one_path::OnePath;

mod two_path;
pub use two_path::{Side, TwoPath};
