// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: headless selection containers.
//!
//! Each container is composed over an [`understory_registry::Registry`] and adds a
//! selection policy on top. Layers wrap the previous one rather than inheriting
//! from it, so every container exposes only the operations that make sense for it:
//!
//! - [`Selection`]: a set of selected ids with mandatory, enroll, and disabled policies.
//! - [`Single`]: at most one selected ticket, with singular accessors.
//! - [`Group`]: multi-select with `select_all`/`unselect_all`/`toggle_all` and a
//!   none/all/mixed summary for "select all" checkboxes.
//! - [`Step`]: a [`Single`] with first/last/next/prev navigation that skips disabled tickets.
//!
//! The containers are plain, synchronous state. They do not render anything and do
//! not depend on a UI framework; a host binds them to its own reactivity by calling
//! the mutators and, optionally, draining change events (see [`SelectionOptions::events`]).
//!
//! ## Example
//!
//! ```rust
//! use understory_registry::Item;
//! use understory_selection::{Group, Mandatory, SelectionOptions};
//!
//! let mut filters = Group::with_options(SelectionOptions::new().mandatory(Mandatory::On));
//! filters.onboard([
//!     Item::new("open", ()),
//!     Item::new("closed", ()),
//!     Item::new("archived", ()).disabled(true),
//! ]);
//!
//! filters.select_all();
//! assert!(filters.is_all_selected());
//! assert!(!filters.is_selected(&"archived"));
//!
//! // Mandatory selection keeps the first ticket when everything is cleared.
//! filters.unselect_all();
//! assert_eq!(filters.selected_ids().collect::<Vec<_>>(), [&"open"]);
//! ```
//!
//! ## Failure model
//!
//! Nothing here returns an error. Unknown ids, disabled tickets, and requests
//! that would break the mandatory policy are refused and reported as `false`
//! (or `None`), leaving the state unchanged.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod group;
mod options;
mod selection;
mod single;
mod step;

pub use group::Group;
pub use options::{Mandatory, SelectionOptions};
pub use selection::Selection;
pub use single::Single;
pub use step::{Step, StepOptions};
