// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The base selection container: a registry plus a set of selected ids.

use alloc::vec::Vec;

use hashbrown::HashSet;
use understory_registry::{
    Event, GeneratedId, Item, Key, Registry, RegistryOptions, Seek, Ticket,
};

use crate::options::{Mandatory, SelectionOptions};

const TARGET: &str = "understory_selection";

/// A [`Registry`] with a set of selected ids.
///
/// The selected set is always a subset of the registered ids: removing a ticket
/// also unselects it. Disabled tickets (and every ticket while the container
/// itself is disabled) are skipped by `select`, `unselect`, and `toggle`.
///
/// Selection changes report whether anything changed; refused or meaningless
/// requests return `false` and leave the state untouched.
///
/// ## Example
///
/// ```rust
/// use understory_registry::Item;
/// use understory_selection::{Mandatory, Selection, SelectionOptions};
///
/// let mut selection = Selection::with_options(SelectionOptions::new().mandatory(Mandatory::On));
/// selection.onboard([Item::new("a", 1), Item::new("b", 2), Item::new("c", 3)]);
///
/// selection.select(&"a");
/// selection.select(&"c");
/// assert_eq!(selection.selected_values().copied().collect::<Vec<_>>(), [1, 3]);
///
/// selection.unselect(&"a");
/// // The last selected ticket cannot be unselected while selection is mandatory.
/// assert!(!selection.unselect(&"c"));
/// assert!(selection.is_selected(&"c"));
/// ```
#[derive(Clone, Debug)]
pub struct Selection<K, V> {
    registry: Registry<K, V>,
    selected: HashSet<K>,
    options: SelectionOptions,
}

impl<K: Key, V> Default for Selection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> Selection<K, V> {
    /// Create an empty multi-select container.
    pub fn new() -> Self {
        Self::with_options(SelectionOptions::default())
    }

    /// Create an empty container with explicit options.
    pub fn with_options(options: SelectionOptions) -> Self {
        Self {
            registry: Registry::with_options(RegistryOptions::new().events(options.events)),
            selected: HashSet::new(),
            options,
        }
    }

    /// The options this container was built with.
    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Enable or disable the whole container.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Returns `true` if the whole container is disabled.
    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    // --- registration -----------------------------------------------------

    /// Register a ticket, then apply enroll and forced-mandatory policies.
    ///
    /// Duplicate ids keep their existing ticket, as in [`Registry::register`].
    pub fn register(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        let existed = self.registry.has(&item.id);
        let index = self.registry.register(item).index;
        if !existed {
            self.admit(index);
        }
        &self.registry.as_slice()[index]
    }

    /// Register several tickets in order.
    pub fn onboard<I>(&mut self, items: I) -> Vec<&Ticket<K, V>>
    where
        I: IntoIterator<Item = Item<K, V>>,
    {
        let ids: Vec<K> = items
            .into_iter()
            .map(|item| self.register(item).id.clone())
            .collect();
        ids.iter().filter_map(|id| self.registry.get(id)).collect()
    }

    /// Replace a ticket's value and disabled flag, or register it.
    ///
    /// A ticket that becomes disabled keeps its current selection state.
    pub fn upsert(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        let existed = self.registry.has(&item.id);
        let index = self.registry.upsert(item).index;
        if !existed {
            self.admit(index);
        }
        &self.registry.as_slice()[index]
    }

    /// Remove a ticket and drop it from the selection.
    pub fn unregister(&mut self, id: &K) -> Option<Ticket<K, V>> {
        let ticket = self.registry.unregister(id)?;
        if self.selected.remove(id) {
            self.registry.emit(Event::Unselected(id.clone()));
        }
        self.mandate();
        Some(ticket)
    }

    /// Remove several tickets and drop them from the selection.
    pub fn offboard<'a, I>(&mut self, ids: I) -> Vec<Ticket<K, V>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let removed = self.registry.offboard(ids);
        for ticket in &removed {
            if self.selected.remove(&ticket.id) {
                self.registry.emit(Event::Unselected(ticket.id.clone()));
            }
        }
        if !removed.is_empty() {
            self.mandate();
        }
        removed
    }

    /// Remove every ticket and the whole selection.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.registry.clear();
    }

    /// Set a ticket's disabled flag. Returns `true` if it changed.
    pub fn set_ticket_disabled(&mut self, id: &K, disabled: bool) -> bool {
        self.registry.set_disabled(id, disabled)
    }

    // --- selection --------------------------------------------------------

    /// Select a ticket. In single mode any other selection is cleared first.
    pub fn select(&mut self, id: &K) -> bool {
        if !self.is_selectable(id) || self.selected.contains(id) {
            return false;
        }
        if !self.options.multiple {
            let previous: Vec<K> = self.selected.drain().collect();
            for other in previous {
                self.registry.emit(Event::Unselected(other));
            }
        }
        self.selected.insert(id.clone());
        self.registry.emit(Event::Selected(id.clone()));
        true
    }

    /// Unselect a ticket, unless doing so would violate the mandatory policy.
    pub fn unselect(&mut self, id: &K) -> bool {
        if !self.is_selectable(id) || !self.selected.contains(id) {
            return false;
        }
        if self.options.mandatory.is_required() && self.selected.len() == 1 {
            tracing::debug!(target: TARGET, ?id, "refusing to unselect the last mandatory selection");
            return false;
        }
        self.selected.remove(id);
        self.registry.emit(Event::Unselected(id.clone()));
        true
    }

    /// Select an unselected ticket or unselect a selected one.
    pub fn toggle(&mut self, id: &K) -> bool {
        if self.selected.contains(id) {
            self.unselect(id)
        } else {
            self.select(id)
        }
    }

    /// Select each id in turn. Returns `true` if anything changed.
    pub fn select_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        ids.into_iter().fold(false, |changed, id| self.select(id) | changed)
    }

    /// Unselect each id in turn. Returns `true` if anything changed.
    pub fn unselect_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        ids.into_iter().fold(false, |changed, id| self.unselect(id) | changed)
    }

    /// Toggle each id in turn. Returns `true` if anything changed.
    pub fn toggle_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        ids.into_iter().fold(false, |changed, id| self.toggle(id) | changed)
    }

    /// Unselect every enabled ticket.
    ///
    /// Under a mandatory policy the first selected ticket (in registry order)
    /// stays selected.
    pub fn unselect_all(&mut self) -> bool {
        if self.options.disabled {
            return false;
        }
        let mut doomed: Vec<K> = self
            .selected_items()
            .filter(|ticket| !ticket.disabled)
            .map(|ticket| ticket.id.clone())
            .collect();
        if self.options.mandatory.is_required()
            && !doomed.is_empty()
            && doomed.len() == self.selected.len()
        {
            let kept = doomed.remove(0);
            tracing::debug!(target: TARGET, id = ?kept, "keeping mandatory selection");
        }
        for id in &doomed {
            self.selected.remove(id);
            self.registry.emit(Event::Unselected(id.clone()));
        }
        !doomed.is_empty()
    }

    /// Clear the selection regardless of policy, then re-apply [`Mandatory::Force`].
    pub fn reset(&mut self) {
        let previous: Vec<K> = self.selected_ids().cloned().collect();
        self.selected.clear();
        for id in previous {
            self.registry.emit(Event::Unselected(id));
        }
        self.mandate();
    }

    /// Under [`Mandatory::Force`], select the first eligible ticket if nothing is selected.
    ///
    /// Returns `true` if a ticket was selected.
    pub fn mandate(&mut self) -> bool {
        if self.options.mandatory != Mandatory::Force
            || self.options.disabled
            || !self.selected.is_empty()
        {
            return false;
        }
        let Some(id) = self.first_eligible().map(|ticket| ticket.id.clone()) else {
            return false;
        };
        tracing::trace!(target: TARGET, ?id, "mandating selection");
        self.selected.insert(id.clone());
        self.registry.emit(Event::Selected(id));
        true
    }

    // --- queries ----------------------------------------------------------

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.contains(id)
    }

    /// Returns `true` if `id` is registered, enabled, and the container is enabled.
    pub fn is_selectable(&self, id: &K) -> bool {
        !self.options.disabled && self.registry.get(id).is_some_and(|ticket| !ticket.disabled)
    }

    /// The live set of selected ids.
    pub fn selected(&self) -> &HashSet<K> {
        &self.selected
    }

    /// Number of selected tickets.
    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if at least one ticket is selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected ids in registry order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.selected_items().map(|ticket| &ticket.id)
    }

    /// Selected tickets in registry order.
    pub fn selected_items(&self) -> impl Iterator<Item = &Ticket<K, V>> + '_ {
        let selected = &self.selected;
        self.registry
            .values()
            .filter(move |ticket| selected.contains(&ticket.id))
    }

    /// Values of the selected tickets in registry order.
    pub fn selected_values(&self) -> impl Iterator<Item = &V> + '_ {
        self.selected_items().map(|ticket| &ticket.value)
    }

    /// Enabled tickets in registry order.
    pub fn eligible(&self) -> impl Iterator<Item = &Ticket<K, V>> + '_ {
        self.registry.values().filter(|ticket| !ticket.disabled)
    }

    /// The first enabled ticket.
    pub fn first_eligible(&self) -> Option<&Ticket<K, V>> {
        self.registry.seek_where(Seek::First, None, |ticket| !ticket.disabled)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry<K, V> {
        &self.registry
    }

    /// Look up a ticket.
    pub fn get(&self, id: &K) -> Option<&Ticket<K, V>> {
        self.registry.get(id)
    }

    /// Returns `true` if `id` is registered.
    pub fn has(&self, id: &K) -> bool {
        self.registry.has(id)
    }

    /// Tickets in registry order.
    pub fn values(&self) -> core::slice::Iter<'_, Ticket<K, V>> {
        self.registry.values()
    }

    /// Number of registered tickets.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The oldest or newest ticket.
    pub fn seek(&self, direction: Seek) -> Option<&Ticket<K, V>> {
        self.registry.seek(direction)
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<Event<K>> {
        self.registry.take_events()
    }

    pub(crate) fn emit(&mut self, event: Event<K>) {
        self.registry.emit(event);
    }

    /// Apply enroll and forced-mandatory policies to a newly registered ticket.
    fn admit(&mut self, index: usize) {
        if self.options.enroll {
            let id = self.registry.as_slice()[index].id.clone();
            self.select(&id);
        }
        self.mandate();
    }
}

impl<K: GeneratedId, V> Selection<K, V> {
    /// Register `value` under a freshly generated id.
    pub fn register_value(&mut self, value: V) -> &Ticket<K, V> {
        let id = self.registry.generate_id();
        self.register(Item::new(id, value))
    }
}
