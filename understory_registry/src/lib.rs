// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_registry --heading-base-level=0

//! Understory Registry: ordered, keyed collections of registered items.
//!
//! A [`Registry`] holds [`Ticket`]s: small records pairing a caller-chosen id with a
//! payload, a disabled flag, and a positional index. It is the storage layer the
//! selection containers in `understory_selection` are composed over, and it knows
//! nothing about selection, rendering, or any UI framework.
//!
//! - Insertion order is significant and drives [`Ticket::index`] and [`Seek`].
//! - Indices are always the dense sequence `0..len`; removal reindexes.
//! - Lookups by id are constant time.
//! - An optional event queue ([`Event`]) reports every change so a host can bridge
//!   the registry into its own reactivity system.
//!
//! [`Timeline`] builds a bounded undo/redo history on top of a registry.
//!
//! ## Example
//!
//! ```rust
//! use understory_registry::{Event, Item, Registry, RegistryOptions};
//!
//! let mut registry = Registry::with_options(RegistryOptions::new().events(true));
//! registry.register(Item::new(1_u32, "first"));
//! registry.register(Item::new(2, "second").disabled(true));
//!
//! assert_eq!(registry.len(), 2);
//! assert!(registry.get(&2).is_some_and(|t| t.disabled));
//!
//! registry.unregister(&1);
//! assert_eq!(registry.get(&2).map(|t| t.index), Some(0));
//! assert_eq!(registry.take_events().last(), Some(&Event::Unregistered(1)));
//! ```
//!
//! ## Duplicate ids
//!
//! [`Registry::register`] is idempotent: an id that is already present keeps its
//! existing ticket. [`Registry::try_register`] reports [`RegistryError::DuplicateId`]
//! instead, and [`Registry::upsert`] replaces the value in place.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod event;
mod registry;
mod timeline;
mod types;

pub use error::RegistryError;
pub use event::Event;
pub use registry::{Registry, RegistryOptions};
pub use timeline::{Timeline, TimelineOptions};
pub use types::{GeneratedId, Item, Key, Seek, Ticket};
