// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-select container with singular accessors.

use alloc::vec::Vec;

use understory_registry::{Event, GeneratedId, Item, Key, Seek, Ticket};

use crate::options::SelectionOptions;
use crate::selection::Selection;

/// A [`Selection`] that holds at most one selected ticket.
///
/// Selecting a ticket replaces the previous selection. Instead of set-based
/// views it exposes the sole selected id, ticket, index, and value.
///
/// ## Example
///
/// ```rust
/// use understory_registry::Item;
/// use understory_selection::{Mandatory, SelectionOptions, Single};
///
/// let mut tabs = Single::with_options(SelectionOptions::new().mandatory(Mandatory::Force));
/// tabs.onboard([Item::new("a", "Home"), Item::new("b", "Settings")]);
/// assert_eq!(tabs.selected_id(), Some(&"a"));
///
/// tabs.select(&"b");
/// assert_eq!(tabs.selected_value(), Some(&"Settings"));
/// assert_eq!(tabs.selected_index(), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Single<K, V> {
    selection: Selection<K, V>,
}

impl<K: Key, V> Default for Single<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> Single<K, V> {
    /// Create an empty single-select container.
    pub fn new() -> Self {
        Self::with_options(SelectionOptions::default())
    }

    /// Create an empty container; `multiple` is forced off.
    pub fn with_options(options: SelectionOptions) -> Self {
        Self {
            selection: Selection::with_options(options.multiple(false)),
        }
    }

    /// The id of the selected ticket.
    pub fn selected_id(&self) -> Option<&K> {
        self.selection.selected_ids().next()
    }

    /// The selected ticket.
    pub fn selected_item(&self) -> Option<&Ticket<K, V>> {
        self.selection.selected_items().next()
    }

    /// Index of the selected ticket, or `None` when nothing is selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_item().map(|ticket| ticket.index)
    }

    /// Value of the selected ticket.
    pub fn selected_value(&self) -> Option<&V> {
        self.selected_item().map(|ticket| &ticket.value)
    }

    /// Select a ticket, replacing the current selection.
    pub fn select(&mut self, id: &K) -> bool {
        self.selection.select(id)
    }

    /// Unselect a ticket, unless it is the mandatory selection.
    pub fn unselect(&mut self, id: &K) -> bool {
        self.selection.unselect(id)
    }

    /// Toggle a ticket.
    pub fn toggle(&mut self, id: &K) -> bool {
        self.selection.toggle(id)
    }

    /// Clear the selection regardless of policy, then re-apply forced selection.
    pub fn reset(&mut self) {
        self.selection.reset();
    }

    /// Under forced mandatory selection, select the first eligible ticket if nothing is selected.
    pub fn mandate(&mut self) -> bool {
        self.selection.mandate()
    }

    /// Returns `true` if `id` is the selected ticket.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selection.is_selected(id)
    }

    /// Register a ticket, applying enroll and forced-mandatory policies.
    pub fn register(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        self.selection.register(item)
    }

    /// Register several tickets in order.
    pub fn onboard<I>(&mut self, items: I) -> Vec<&Ticket<K, V>>
    where
        I: IntoIterator<Item = Item<K, V>>,
    {
        self.selection.onboard(items)
    }

    /// Replace or register a ticket.
    pub fn upsert(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        self.selection.upsert(item)
    }

    /// Remove a ticket.
    pub fn unregister(&mut self, id: &K) -> Option<Ticket<K, V>> {
        self.selection.unregister(id)
    }

    /// Remove several tickets.
    pub fn offboard<'a, I>(&mut self, ids: I) -> Vec<Ticket<K, V>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.selection.offboard(ids)
    }

    /// Remove every ticket.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Set a ticket's disabled flag.
    pub fn set_ticket_disabled(&mut self, id: &K, disabled: bool) -> bool {
        self.selection.set_ticket_disabled(id, disabled)
    }

    /// Enable or disable the whole container.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.selection.set_disabled(disabled);
    }

    /// The underlying selection.
    pub fn selection(&self) -> &Selection<K, V> {
        &self.selection
    }

    /// Look up a ticket.
    pub fn get(&self, id: &K) -> Option<&Ticket<K, V>> {
        self.selection.get(id)
    }

    /// Returns `true` if `id` is registered.
    pub fn has(&self, id: &K) -> bool {
        self.selection.has(id)
    }

    /// Tickets in registry order.
    pub fn values(&self) -> core::slice::Iter<'_, Ticket<K, V>> {
        self.selection.values()
    }

    /// Number of registered tickets.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// The oldest or newest ticket.
    pub fn seek(&self, direction: Seek) -> Option<&Ticket<K, V>> {
        self.selection.seek(direction)
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<Event<K>> {
        self.selection.take_events()
    }
}

impl<K: GeneratedId, V> Single<K, V> {
    /// Register `value` under a freshly generated id.
    pub fn register_value(&mut self, value: V) -> &Ticket<K, V> {
        self.selection.register_value(value)
    }
}
