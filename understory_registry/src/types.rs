// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: keys, tickets, registration input, and seek direction.

use alloc::{format, string::String};
use core::fmt::Debug;
use core::hash::Hash;

/// Identifier bound for registered items.
///
/// Blanket-implemented for every small, hashable, cloneable handle, so callers
/// can use integers, interned strings, or application-specific ids directly.
pub trait Key: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Key for T {}

/// Ids the registry can mint on its own.
///
/// Used by [`Registry::register_value`](crate::Registry::register_value) when the
/// caller does not supply an id.
pub trait GeneratedId: Key {
    /// Build an id from a monotonically increasing sequence number.
    fn from_sequence(sequence: u64) -> Self;
}

impl GeneratedId for u64 {
    fn from_sequence(sequence: u64) -> Self {
        sequence
    }
}

impl GeneratedId for u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Generated 32-bit ids wrap; collisions with live ids are skipped by the registry."
    )]
    fn from_sequence(sequence: u64) -> Self {
        sequence as Self
    }
}

impl GeneratedId for usize {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Generated ids wrap on 32-bit targets; collisions with live ids are skipped by the registry."
    )]
    fn from_sequence(sequence: u64) -> Self {
        sequence as Self
    }
}

impl GeneratedId for String {
    fn from_sequence(sequence: u64) -> Self {
        format!("ticket-{sequence}")
    }
}

/// A registered item.
///
/// Tickets are owned by their [`Registry`](crate::Registry) and only handed out
/// by reference; `index` always reflects the ticket's current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<K, V> {
    /// Identity of the ticket.
    pub id: K,
    /// Position in insertion order, dense over `0..len`.
    pub index: usize,
    /// Caller payload.
    pub value: V,
    /// Disabled tickets stay registered but are skipped by selection and navigation.
    pub disabled: bool,
}

impl<K, V> Ticket<K, V> {
    /// Convert back into registration input, dropping the positional index.
    pub fn into_item(self) -> Item<K, V> {
        Item {
            id: self.id,
            value: self.value,
            disabled: self.disabled,
        }
    }
}

/// Registration input for a single ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K, V> {
    /// Identity of the ticket to create.
    pub id: K,
    /// Caller payload.
    pub value: V,
    /// Whether the ticket starts out disabled.
    pub disabled: bool,
}

impl<K, V> Item<K, V> {
    /// Create an enabled item.
    pub fn new(id: K, value: V) -> Self {
        Self {
            id,
            value,
            disabled: false,
        }
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl<K, V> From<Ticket<K, V>> for Item<K, V> {
    fn from(ticket: Ticket<K, V>) -> Self {
        ticket.into_item()
    }
}

/// Which end of the registry to search from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Seek {
    /// Start at the oldest ticket and move forward.
    First,
    /// Start at the newest ticket and move backward.
    Last,
}
