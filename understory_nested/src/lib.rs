// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_nested --heading-base-level=0

//! Understory Nested: selection strategies for trees.
//!
//! Flat selection containers treat every id alike. Trees need more: checking a
//! folder might check everything below it, a parent might show a partial state,
//! or only leaves might be selectable at all. This crate separates those rules
//! from the data:
//!
//! - [`TreeContext`] holds parent/child structure and disabled flags.
//! - [`NestedSelection`] maps ids to [`NodeState`] (on, off, indeterminate).
//! - A [`SelectionAdapter`] turns a [`SelectRequest`] into the next state, and
//!   converts between that state and a flat list of selected ids.
//! - [`Nested`] ties the three together with open/closed tracking for tree views.
//!
//! Six adapters are built in (see [`adapters`]) and addressable by name through
//! [`Strategy`].
//!
//! ## Example
//!
//! ```rust
//! use understory_nested::{SelectRequest, SelectionAdapter, Strategy, TreeContext};
//!
//! let mut tree = TreeContext::new();
//! tree.insert(None, "root");
//! tree.insert(Some(&"root"), "a");
//! tree.insert(Some(&"root"), "b");
//!
//! let trunk: Strategy = "trunk".parse().unwrap();
//! let state = trunk.transform_in(&["a", "b"], &tree);
//! assert_eq!(trunk.transform_out(&state, &tree), ["root"]);
//!
//! // Unselecting the only selected subtree is refused when mandatory.
//! let next = trunk.select(SelectRequest {
//!     id: &"root",
//!     value: false,
//!     current: &state,
//!     context: &tree,
//!     mandatory: true,
//! });
//! assert_eq!(next, state);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
pub mod adapters;
mod nested;
mod state;
mod strategy;
mod tree;

pub use adapter::{SelectRequest, SelectionAdapter};
pub use nested::{Nested, NestedOptions};
pub use state::{NestedSelection, NodeState};
pub use strategy::{ParseStrategyError, Strategy};
pub use tree::{DepthFirst, NodeKey, TreeContext};
