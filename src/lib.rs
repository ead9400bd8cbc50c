/*
 * SPDX-FileCopyrightText: 2025 The dynconn developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
// for now we don't need any new feature but we might remove this in the future
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

pub mod algo;
#[cfg(feature = "cli")]
pub mod cli;
pub mod graphs;
pub mod runner;
pub mod traits;
pub mod utils;

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::algo::*;
    pub use crate::graphs::prelude::*;
    pub use crate::runner::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
