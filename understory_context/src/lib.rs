// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_context --heading-base-level=0

//! Understory Context: explicit scopes for sharing named instances.
//!
//! A component that owns a selection container (tabs, a wizard, a filter group)
//! often needs to hand it to descendants without threading it through every
//! call. A [`Scope`] is a plain value that maps [`ContextKey`] names to instances;
//! child scopes borrow their parent and see its provisions. There is no global
//! registry and nothing is shared implicitly.
//!
//! Resolution failures are programmer errors and come back as [`ContextError`],
//! naming the key that was asked for.
//!
//! ## Example
//!
//! ```rust
//! use understory_context::{ContextKey, Scope};
//! use understory_registry::Item;
//! use understory_selection::Single;
//!
//! const TABS: ContextKey<Single<&str, &str>> = ContextKey::new("tabs");
//!
//! let mut app = Scope::new();
//! let mut tabs = Single::new();
//! tabs.onboard([Item::new("home", "Home"), Item::new("about", "About")]);
//! app.provide(TABS, tabs);
//!
//! app.resolve_mut(TABS).unwrap().select(&"about");
//!
//! let panel = app.child();
//! let tabs = panel.resolve(TABS).unwrap();
//! assert_eq!(tabs.selected_value(), Some(&"About"));
//!
//! let err = panel.resolve(ContextKey::<u8>::new("missing")).unwrap_err();
//! assert_eq!(err.to_string(), "no provision for context key `missing`");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod scope;

pub use error::ContextError;
pub use scope::{ContextKey, Scope};
