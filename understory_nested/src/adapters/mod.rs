// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in selection adapters.
//!
//! ## Available Adapters
//!
//! - [`Independent`] / [`SingleIndependent`]: every node is selected on its own;
//!   the single variant keeps at most one node selected.
//! - [`Leaf`] / [`SingleLeaf`]: like the independent variants, but nodes with
//!   children cannot be selected.
//! - [`Classic`]: checkbox-tree semantics. Selecting a node selects its enabled
//!   descendants, and ancestors become on or indeterminate to match. Reports leaves.
//! - [`Trunk`]: the same propagation as [`Classic`], but reports the highest
//!   fully-selected nodes instead of leaves.

mod classic;
mod independent;
mod leaf;

pub use classic::{Classic, Trunk};
pub use independent::{Independent, SingleIndependent};
pub use leaf::{Leaf, SingleLeaf};
