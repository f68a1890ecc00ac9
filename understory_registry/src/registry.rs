// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered keyed registry: registration, lookup, seeking, and reindexing.

use alloc::vec::Vec;
use core::mem;

use hashbrown::HashMap;

use crate::error::RegistryError;
use crate::event::Event;
use crate::types::{GeneratedId, Item, Key, Seek, Ticket};

const TARGET: &str = "understory_registry";

/// Construction options for a [`Registry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Record [`Event`]s for every mutation; drain them with [`Registry::take_events`].
    pub events: bool,
}

impl RegistryOptions {
    /// Create default options (events disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable event recording.
    #[must_use]
    pub fn events(mut self, events: bool) -> Self {
        self.events = events;
        self
    }
}

/// An insertion-ordered collection of [`Ticket`]s keyed by id.
///
/// Every live id maps to exactly one ticket, and ticket indices are always the
/// dense sequence `0..len` in iteration order. Removal reindexes immediately.
///
/// Registering an id that is already present keeps the existing ticket and
/// returns it unchanged; use [`Registry::try_register`] to get an error
/// instead, or [`Registry::upsert`] to replace the existing value.
///
/// ## Example
///
/// ```rust
/// use understory_registry::{Item, Registry, Seek};
///
/// let mut registry = Registry::new();
/// registry.onboard([Item::new("a", 1), Item::new("b", 2), Item::new("c", 3)]);
/// registry.unregister(&"a");
///
/// assert_eq!(registry.get(&"b").map(|t| t.index), Some(0));
/// assert_eq!(registry.seek(Seek::Last).map(|t| t.id), Some("c"));
/// ```
#[derive(Clone, Debug)]
pub struct Registry<K, V> {
    tickets: Vec<Ticket<K, V>>,
    /// id -> position in `tickets`
    lookup: HashMap<K, usize>,
    next_sequence: u64,
    events: Option<Vec<Event<K>>>,
}

impl<K: Key, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> Registry<K, V> {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Create an empty registry with explicit options.
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            tickets: Vec::new(),
            lookup: HashMap::new(),
            next_sequence: 0,
            events: options.events.then(Vec::new),
        }
    }

    /// Register a ticket at the end of the collection.
    ///
    /// If the id is already registered, the existing ticket is returned untouched.
    pub fn register(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        if let Some(&position) = self.lookup.get(&item.id) {
            tracing::debug!(target: TARGET, id = ?item.id, "id already registered; keeping existing ticket");
            return &self.tickets[position];
        }
        let position = self.push(item);
        &self.tickets[position]
    }

    /// Register a ticket, failing if the id is already present.
    pub fn try_register(&mut self, item: Item<K, V>) -> Result<&Ticket<K, V>, RegistryError<K>> {
        if self.lookup.contains_key(&item.id) {
            return Err(RegistryError::DuplicateId(item.id));
        }
        let position = self.push(item);
        Ok(&self.tickets[position])
    }

    /// Replace an existing ticket's value and disabled flag in place, or register it.
    ///
    /// The ticket keeps its position when it already exists.
    pub fn upsert(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        let Some(&position) = self.lookup.get(&item.id) else {
            let position = self.push(item);
            return &self.tickets[position];
        };
        let ticket = &mut self.tickets[position];
        ticket.value = item.value;
        ticket.disabled = item.disabled;
        let id = ticket.id.clone();
        tracing::trace!(target: TARGET, ?id, "updated ticket");
        self.emit(Event::Updated(id));
        &self.tickets[position]
    }

    /// Register a ticket at `position`, shifting later tickets back.
    ///
    /// `position` is clamped to `len`. Duplicate ids follow the same policy as
    /// [`Registry::register`].
    pub fn insert(&mut self, position: usize, item: Item<K, V>) -> &Ticket<K, V> {
        if let Some(&existing) = self.lookup.get(&item.id) {
            tracing::debug!(target: TARGET, id = ?item.id, "id already registered; keeping existing ticket");
            return &self.tickets[existing];
        }
        let position = position.min(self.tickets.len());
        let id = item.id.clone();
        self.tickets.insert(
            position,
            Ticket {
                id: item.id,
                index: position,
                value: item.value,
                disabled: item.disabled,
            },
        );
        self.reindex();
        tracing::trace!(target: TARGET, ?id, position, "inserted ticket");
        self.emit(Event::Registered(id));
        &self.tickets[position]
    }

    /// Register several tickets, preserving argument order as insertion order.
    pub fn onboard<I>(&mut self, items: I) -> Vec<&Ticket<K, V>>
    where
        I: IntoIterator<Item = Item<K, V>>,
    {
        let ids: Vec<K> = items
            .into_iter()
            .map(|item| self.register(item).id.clone())
            .collect();
        ids.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Remove a ticket, returning it. Absent ids are a no-op.
    pub fn unregister(&mut self, id: &K) -> Option<Ticket<K, V>> {
        let position = self.lookup.remove(id)?;
        let ticket = self.tickets.remove(position);
        self.reindex();
        tracing::trace!(target: TARGET, ?id, "unregistered ticket");
        self.emit(Event::Unregistered(ticket.id.clone()));
        Some(ticket)
    }

    /// Remove several tickets, reindexing once. Returns the removed tickets in registry order.
    pub fn offboard<'a, I>(&mut self, ids: I) -> Vec<Ticket<K, V>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut doomed = false;
        for id in ids {
            doomed |= self.lookup.remove(id).is_some();
        }
        if !doomed {
            return Vec::new();
        }
        let (kept, removed): (Vec<_>, Vec<_>) = mem::take(&mut self.tickets)
            .into_iter()
            .partition(|ticket| self.lookup.contains_key(&ticket.id));
        self.tickets = kept;
        self.reindex();
        for ticket in &removed {
            tracing::trace!(target: TARGET, id = ?ticket.id, "unregistered ticket");
            self.emit(Event::Unregistered(ticket.id.clone()));
        }
        removed
    }

    /// Remove every ticket.
    pub fn clear(&mut self) {
        if self.tickets.is_empty() {
            return;
        }
        self.tickets.clear();
        self.lookup.clear();
        tracing::trace!(target: TARGET, "cleared registry");
        self.emit(Event::Cleared);
    }

    /// Recompute every ticket's index to match the current order.
    ///
    /// Called automatically after structural changes; exposed for composed
    /// containers that reorder through [`Registry::insert`] and friends.
    pub fn reindex(&mut self) {
        self.lookup.clear();
        for (index, ticket) in self.tickets.iter_mut().enumerate() {
            ticket.index = index;
            self.lookup.insert(ticket.id.clone(), index);
        }
    }

    /// Set a ticket's disabled flag. Returns `true` if the flag changed.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        let Some(&position) = self.lookup.get(id) else {
            return false;
        };
        let ticket = &mut self.tickets[position];
        if ticket.disabled == disabled {
            return false;
        }
        ticket.disabled = disabled;
        self.emit(Event::Updated(id.clone()));
        true
    }

    /// Look up a ticket by id.
    pub fn get(&self, id: &K) -> Option<&Ticket<K, V>> {
        self.lookup.get(id).map(|&position| &self.tickets[position])
    }

    /// Returns `true` if `id` is registered.
    pub fn has(&self, id: &K) -> bool {
        self.lookup.contains_key(id)
    }

    /// Ticket at `index` in the current order.
    pub fn at(&self, index: usize) -> Option<&Ticket<K, V>> {
        self.tickets.get(index)
    }

    /// Current index of `id`.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    /// Tickets in insertion order.
    pub fn values(&self) -> core::slice::Iter<'_, Ticket<K, V>> {
        self.tickets.iter()
    }

    /// Tickets in insertion order, as a slice indexed by [`Ticket::index`].
    pub fn as_slice(&self) -> &[Ticket<K, V>] {
        &self.tickets
    }

    /// Ids in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.tickets.iter().map(|ticket| &ticket.id)
    }

    /// Number of registered tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// The oldest or newest ticket.
    pub fn seek(&self, direction: Seek) -> Option<&Ticket<K, V>> {
        match direction {
            Seek::First => self.tickets.first(),
            Seek::Last => self.tickets.last(),
        }
    }

    /// The first ticket matching `predicate`, searching in `direction`.
    ///
    /// When `from` is given the search starts at that index (inclusive) instead
    /// of at the boundary. An out-of-range `from` starts at the nearest end.
    pub fn seek_where<F>(
        &self,
        direction: Seek,
        from: Option<usize>,
        mut predicate: F,
    ) -> Option<&Ticket<K, V>>
    where
        F: FnMut(&Ticket<K, V>) -> bool,
    {
        let len = self.tickets.len();
        match direction {
            Seek::First => {
                let start = from.unwrap_or(0).min(len);
                self.tickets[start..].iter().find(|t| predicate(t))
            }
            Seek::Last => {
                let end = from.map_or(len, |from| from.saturating_add(1).min(len));
                self.tickets[..end].iter().rev().find(|t| predicate(t))
            }
        }
    }

    /// Record an event if events are enabled.
    ///
    /// Containers composed over a registry use this to report their own
    /// changes (for example [`Event::Selected`]) through the same queue.
    pub fn emit(&mut self, event: Event<K>) {
        if let Some(events) = self.events.as_mut() {
            events.push(event);
        }
    }

    /// Returns `true` if this registry records events.
    pub fn events_enabled(&self) -> bool {
        self.events.is_some()
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<Event<K>> {
        self.events.as_mut().map(mem::take).unwrap_or_default()
    }

    fn push(&mut self, item: Item<K, V>) -> usize {
        let position = self.tickets.len();
        let id = item.id.clone();
        self.lookup.insert(item.id.clone(), position);
        self.tickets.push(Ticket {
            id: item.id,
            index: position,
            value: item.value,
            disabled: item.disabled,
        });
        tracing::trace!(target: TARGET, ?id, index = position, "registered ticket");
        self.emit(Event::Registered(id));
        position
    }
}

impl<K: GeneratedId, V> Registry<K, V> {
    /// Register `value` under a freshly generated id.
    pub fn register_value(&mut self, value: V) -> &Ticket<K, V> {
        let id = self.generate_id();
        let position = self.push(Item::new(id, value));
        &self.tickets[position]
    }

    /// Mint an id that is not currently registered.
    pub fn generate_id(&mut self) -> K {
        loop {
            let id = K::from_sequence(self.next_sequence);
            self.next_sequence = self.next_sequence.wrapping_add(1);
            if !self.lookup.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn assert_dense<K: Key, V>(registry: &Registry<K, V>) {
        for (position, ticket) in registry.values().enumerate() {
            assert_eq!(ticket.index, position, "index must match iteration order");
            assert_eq!(registry.index_of(&ticket.id), Some(position));
        }
    }

    #[test]
    fn register_assigns_sequential_indices() {
        let mut registry = Registry::new();
        let a = registry.register(Item::new("a", 1)).index;
        let b = registry.register(Item::new("b", 2)).index;
        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.len(), 2);
        assert!(registry.has(&"a"));
        assert_eq!(registry.get(&"b").map(|t| t.value), Some(2));
    }

    #[test]
    fn unregister_reindexes_and_ignores_missing() {
        let mut registry = Registry::new();
        registry.onboard([Item::new(1_u32, 'a'), Item::new(2, 'b'), Item::new(3, 'c')]);
        let removed = registry.unregister(&2);
        assert_eq!(removed.map(|t| t.value), Some('b'));
        assert!(registry.unregister(&42).is_none());
        assert_dense(&registry);
        let ids: Vec<_> = registry.keys().copied().collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn mixed_register_unregister_sequences_stay_dense() {
        let mut registry = Registry::new();
        for round in 0_u32..6 {
            for n in 0..4 {
                registry.register(Item::new(round * 10 + n, ()));
            }
            registry.unregister(&(round * 10 + 1));
            if round % 2 == 0 {
                registry.unregister(&(round * 10));
            }
            assert_dense(&registry);
        }
        assert_eq!(registry.len(), 6 * 4 - 6 - 3);
    }

    #[test]
    fn duplicate_register_keeps_existing_ticket() {
        let mut registry = Registry::new();
        registry.register(Item::new("a", 1));
        let ticket = registry.register(Item::new("a", 99).disabled(true));
        assert_eq!(ticket.value, 1);
        assert!(!ticket.disabled);
        assert_eq!(registry.len(), 1);

        assert_eq!(
            registry.try_register(Item::new("a", 5)).err(),
            Some(RegistryError::DuplicateId("a"))
        );
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut registry = Registry::new();
        registry.onboard([Item::new("a", 1), Item::new("b", 2)]);
        let ticket = registry.upsert(Item::new("a", 10).disabled(true));
        assert_eq!((ticket.index, ticket.value, ticket.disabled), (0, 10, true));
        let fresh = registry.upsert(Item::new("c", 3));
        assert_eq!(fresh.index, 2);
    }

    #[test]
    fn onboard_preserves_argument_order() {
        let mut registry = Registry::new();
        let tickets = registry.onboard([Item::new("z", 0), Item::new("a", 0), Item::new("m", 0)]);
        let ids: Vec<_> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn offboard_removes_in_one_pass() {
        let mut registry = Registry::new();
        registry.onboard((0_u32..5).map(|n| Item::new(n, n)));
        let removed = registry.offboard(&[3, 1, 9]);
        let removed_ids: Vec<_> = removed.iter().map(|t| t.id).collect();
        assert_eq!(removed_ids, vec![1, 3]);
        assert_dense(&registry);
        assert_eq!(registry.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn seek_boundaries() {
        let mut registry: Registry<u32, ()> = Registry::new();
        assert!(registry.seek(Seek::First).is_none());
        assert!(registry.seek(Seek::Last).is_none());
        registry.onboard([Item::new(7, ()), Item::new(8, ()), Item::new(9, ())]);
        assert_eq!(registry.seek(Seek::First).map(|t| t.id), Some(7));
        assert_eq!(registry.seek(Seek::Last).map(|t| t.id), Some(9));
    }

    #[test]
    fn seek_where_skips_and_starts_from_index() {
        let mut registry = Registry::new();
        registry.onboard([
            Item::new("a", ()).disabled(true),
            Item::new("b", ()),
            Item::new("c", ()),
            Item::new("d", ()).disabled(true),
        ]);
        let enabled = |t: &Ticket<&str, ()>| !t.disabled;
        assert_eq!(registry.seek_where(Seek::First, None, enabled).map(|t| t.id), Some("b"));
        assert_eq!(registry.seek_where(Seek::Last, None, enabled).map(|t| t.id), Some("c"));
        assert_eq!(registry.seek_where(Seek::First, Some(2), enabled).map(|t| t.id), Some("c"));
        assert_eq!(registry.seek_where(Seek::Last, Some(1), enabled).map(|t| t.id), Some("b"));
        assert!(registry.seek_where(Seek::First, Some(3), enabled).is_none());
    }

    #[test]
    fn insert_at_front_reindexes() {
        let mut registry = Registry::new();
        registry.onboard([Item::new("b", ()), Item::new("c", ())]);
        let ticket = registry.insert(0, Item::new("a", ()));
        assert_eq!(ticket.index, 0);
        assert_dense(&registry);
        assert_eq!(registry.keys().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        // Past-the-end positions clamp to an append.
        registry.insert(100, Item::new("d", ()));
        assert_eq!(registry.seek(Seek::Last).map(|t| t.id), Some("d"));
    }

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let mut registry: Registry<u32, &str> = Registry::new();
        registry.register(Item::new(0, "explicit"));
        let generated = registry.register_value("generated").id;
        assert_eq!(generated, 1);

        let mut named: Registry<String, ()> = Registry::new();
        let id = named.register_value(()).id.clone();
        assert_eq!(id, "ticket-0");
    }

    #[test]
    fn events_are_recorded_only_when_enabled() {
        let mut quiet = Registry::new();
        quiet.register(Item::new(1_u8, ()));
        assert!(quiet.take_events().is_empty());

        let mut loud = Registry::with_options(RegistryOptions::new().events(true));
        loud.register(Item::new(1_u8, ()));
        loud.set_disabled(&1, true);
        loud.unregister(&1);
        loud.register(Item::new(2, ()));
        loud.clear();
        assert_eq!(
            loud.take_events(),
            vec![
                Event::Registered(1),
                Event::Updated(1),
                Event::Unregistered(1),
                Event::Registered(2),
                Event::Cleared,
            ]
        );
        assert!(loud.take_events().is_empty(), "take_events drains the queue");
    }
}
