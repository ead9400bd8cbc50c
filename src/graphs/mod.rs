/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of dynamic graphs.

pub mod delta;
pub mod dyn_graph;
pub use dyn_graph::DynGraph;
pub mod random;

pub mod prelude {
    pub use super::delta::{DeltaError, DeltaStream};
    pub use super::dyn_graph::DynGraph;
    pub use super::random::{Change, ChangeModel, ModelError, RandomGraph};
}
