// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded history over a registry with undo/redo and an overflow queue.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::event::Event;
use crate::registry::{Registry, RegistryOptions};
use crate::types::{Item, Key, Seek, Ticket};

const TARGET: &str = "understory_registry::timeline";

/// Construction options for a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Capacity of the visible window and of the overflow queue. Clamped to at least 1.
    pub size: usize,
    /// Record [`Event`]s for every mutation.
    pub events: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            size: 10,
            events: false,
        }
    }
}

impl TimelineOptions {
    /// Create default options (`size` 10, events disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window capacity.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Enable or disable event recording.
    #[must_use]
    pub fn events(mut self, events: bool) -> Self {
        self.events = events;
        self
    }
}

/// A bounded, linear history of tickets.
///
/// The timeline keeps at most `size` freshly registered tickets visible.
/// Registering past capacity evicts the oldest visible ticket into an overflow
/// queue (itself capped at `size`) instead of dropping it. [`Timeline::undo`]
/// removes the newest ticket and restores the most recently evicted one to the
/// front, so no visible data is lost. Tickets restored this way are carried in
/// front of the window and do not count against its capacity until they are
/// evicted again.
///
/// Registering a new ticket clears the redo stack; the history never branches.
///
/// ## Example
///
/// ```rust
/// use understory_registry::{Item, Timeline, TimelineOptions};
///
/// let mut timeline = Timeline::with_options(TimelineOptions::new().size(2));
/// for id in ["a", "b", "c"] {
///     timeline.register(Item::new(id, ()));
/// }
/// assert_eq!(timeline.keys().copied().collect::<Vec<_>>(), ["b", "c"]);
///
/// timeline.undo();
/// assert_eq!(timeline.keys().copied().collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Clone, Debug)]
pub struct Timeline<K, V> {
    registry: Registry<K, V>,
    size: usize,
    /// Number of leading tickets restored from overflow by `undo`.
    carried: usize,
    overflow: VecDeque<Item<K, V>>,
    redo: Vec<Item<K, V>>,
}

impl<K: Key, V: Clone> Default for Timeline<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V: Clone> Timeline<K, V> {
    /// Create an empty timeline with default options.
    pub fn new() -> Self {
        Self::with_options(TimelineOptions::default())
    }

    /// Create an empty timeline with explicit options.
    pub fn with_options(options: TimelineOptions) -> Self {
        Self {
            registry: Registry::with_options(RegistryOptions::new().events(options.events)),
            size: options.size.max(1),
            carried: 0,
            overflow: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    /// Append a ticket, evicting the oldest visible ticket into overflow when full.
    ///
    /// A new registration clears the redo stack. Registering an id that is
    /// already visible returns the existing ticket and changes nothing.
    pub fn register(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        if let Some(index) = self.registry.index_of(&item.id) {
            return &self.registry.as_slice()[index];
        }
        self.redo.clear();
        while self.registry.len() - self.carried >= self.size {
            if !self.evict_oldest() {
                break;
            }
        }
        self.registry.register(item)
    }

    /// Undo the newest registration.
    ///
    /// The newest ticket moves onto the redo stack. If anything was evicted
    /// earlier, the most recently evicted ticket is restored to the front.
    /// Returns `None` when nothing is visible.
    pub fn undo(&mut self) -> Option<Ticket<K, V>> {
        let newest = self.registry.seek(Seek::Last)?.id.clone();
        let ticket = self.registry.unregister(&newest)?;
        self.carried = self.carried.min(self.registry.len());
        self.redo.push(ticket.clone().into_item());
        if let Some(restored) = self.overflow.pop_back() {
            self.registry.insert(0, restored);
            self.carried += 1;
        }
        self.registry.reindex();
        tracing::trace!(target: TARGET, id = ?ticket.id, carried = self.carried, "undo");
        Some(ticket)
    }

    /// Re-append the most recently undone ticket.
    ///
    /// Returns `None` when there is nothing to redo, including after a new
    /// registration invalidated the redo stack.
    pub fn redo(&mut self) -> Option<&Ticket<K, V>> {
        let item = self.redo.pop()?;
        tracing::trace!(target: TARGET, id = ?item.id, "redo");
        let position = self.registry.len();
        self.registry.insert(position, item);
        self.registry.reindex();
        self.registry.seek(Seek::Last)
    }

    /// Returns `true` if [`Timeline::undo`] would remove something.
    pub fn can_undo(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Returns `true` if [`Timeline::redo`] would restore something.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Drop every visible ticket and all history.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.overflow.clear();
        self.redo.clear();
        self.carried = 0;
    }

    /// Capacity of the visible window.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of evicted tickets available to undo.
    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    /// Number of undone tickets available to redo.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// The visible tickets as a registry.
    pub fn registry(&self) -> &Registry<K, V> {
        &self.registry
    }

    /// Look up a visible ticket.
    pub fn get(&self, id: &K) -> Option<&Ticket<K, V>> {
        self.registry.get(id)
    }

    /// Returns `true` if `id` is visible.
    pub fn has(&self, id: &K) -> bool {
        self.registry.has(id)
    }

    /// Visible tickets, oldest first.
    pub fn values(&self) -> core::slice::Iter<'_, Ticket<K, V>> {
        self.registry.values()
    }

    /// Visible ids, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.registry.keys()
    }

    /// Number of visible tickets.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The oldest or newest visible ticket.
    pub fn seek(&self, direction: Seek) -> Option<&Ticket<K, V>> {
        self.registry.seek(direction)
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<Event<K>> {
        self.registry.take_events()
    }

    fn evict_oldest(&mut self) -> bool {
        let Some(oldest) = self.registry.seek(Seek::First).map(|t| t.id.clone()) else {
            return false;
        };
        let Some(ticket) = self.registry.unregister(&oldest) else {
            return false;
        };
        self.carried = self.carried.saturating_sub(1);
        if self.overflow.len() >= self.size {
            self.overflow.pop_front();
        }
        tracing::trace!(target: TARGET, id = ?ticket.id, "evicted into overflow");
        self.overflow.push_back(ticket.into_item());
        true
    }
}
