// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-select container with batch operations and tri-state summaries.

use alloc::vec::Vec;

use hashbrown::HashSet;
use understory_registry::{Event, GeneratedId, Item, Key, Seek, Ticket};

use crate::options::SelectionOptions;
use crate::selection::Selection;

/// A multi-select [`Selection`] with batch operations.
///
/// The `is_none_selected` / `is_all_selected` / `is_mixed` trio summarizes the
/// selection over enabled tickets, which is what a "select all" checkbox needs.
/// Individual tickets can also be put into a mixed state with [`Group::mix`],
/// for example to mirror a partially selected child list; a mixed ticket is
/// never selected at the same time.
///
/// ## Example
///
/// ```rust
/// use understory_registry::Item;
/// use understory_selection::Group;
///
/// let mut group = Group::new();
/// group.onboard([Item::new("a", ()), Item::new("b", ()), Item::new("c", ())]);
///
/// group.select(&"a");
/// assert!(group.is_mixed());
///
/// group.toggle_all();
/// assert!(group.is_all_selected());
///
/// group.toggle_all();
/// assert!(group.is_none_selected());
/// ```
#[derive(Clone, Debug)]
pub struct Group<K, V> {
    selection: Selection<K, V>,
    mixed: HashSet<K>,
}

impl<K: Key, V> Default for Group<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> Group<K, V> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::with_options(SelectionOptions::default())
    }

    /// Create an empty group; `multiple` is forced on.
    pub fn with_options(options: SelectionOptions) -> Self {
        Self {
            selection: Selection::with_options(options.multiple(true)),
            mixed: HashSet::new(),
        }
    }

    // --- batch operations -------------------------------------------------

    /// Select every enabled ticket. Returns `true` if anything changed.
    pub fn select_all(&mut self) -> bool {
        let ids: Vec<K> = self
            .selection
            .eligible()
            .map(|ticket| ticket.id.clone())
            .collect();
        ids.iter().fold(false, |changed, id| self.select(id) | changed)
    }

    /// Unselect every enabled ticket, keeping one under a mandatory policy.
    pub fn unselect_all(&mut self) -> bool {
        self.selection.unselect_all()
    }

    /// Unselect everything if every enabled ticket is selected, otherwise select everything.
    ///
    /// Selected tickets that have since been disabled do not affect the choice.
    pub fn toggle_all(&mut self) -> bool {
        if self.covers_eligible().is_some() {
            self.unselect_all()
        } else {
            self.select_all()
        }
    }

    /// Returns `true` if nothing is selected.
    pub fn is_none_selected(&self) -> bool {
        !self.selection.has_selection()
    }

    /// Returns `true` if the selected set is exactly the non-empty set of enabled tickets.
    ///
    /// A selected ticket that was disabled afterwards makes this `false`.
    pub fn is_all_selected(&self) -> bool {
        self.covers_eligible() == Some(self.selection.selected_len())
    }

    /// Returns `true` if something is selected but the selection is not exactly
    /// the set of enabled tickets.
    pub fn is_mixed(&self) -> bool {
        !self.is_none_selected() && !self.is_all_selected()
    }

    /// Number of enabled tickets if there is at least one and all are selected.
    fn covers_eligible(&self) -> Option<usize> {
        let mut count = 0;
        for ticket in self.selection.eligible() {
            if !self.selection.is_selected(&ticket.id) {
                return None;
            }
            count += 1;
        }
        (count > 0).then_some(count)
    }

    // --- per-ticket mixed state ---------------------------------------------

    /// Put a ticket into the mixed state, unselecting it first.
    ///
    /// Refused for disabled tickets and when unselecting would violate the
    /// mandatory policy.
    pub fn mix(&mut self, id: &K) -> bool {
        if !self.selection.is_selectable(id) || self.mixed.contains(id) {
            return false;
        }
        if self.selection.is_selected(id) && !self.selection.unselect(id) {
            return false;
        }
        self.mixed.insert(id.clone());
        self.selection.emit(Event::Mixed(id.clone()));
        true
    }

    /// Clear a ticket's mixed state.
    pub fn unmix(&mut self, id: &K) -> bool {
        if !self.mixed.remove(id) {
            return false;
        }
        self.selection.emit(Event::Unmixed(id.clone()));
        true
    }

    /// Returns `true` if the ticket is in the mixed state.
    pub fn is_item_mixed(&self, id: &K) -> bool {
        self.mixed.contains(id)
    }

    /// Mixed ids in registry order.
    pub fn mixed_ids(&self) -> impl Iterator<Item = &K> + '_ {
        let mixed = &self.mixed;
        self.selection
            .values()
            .map(|ticket| &ticket.id)
            .filter(move |id| mixed.contains(*id))
    }

    // --- single-ticket operations -------------------------------------------

    /// Select a ticket, clearing its mixed state.
    pub fn select(&mut self, id: &K) -> bool {
        let selected = self.selection.select(id);
        if selected {
            self.unmix(id);
        }
        selected
    }

    /// Unselect a ticket, unless it is the last mandatory selection.
    pub fn unselect(&mut self, id: &K) -> bool {
        self.selection.unselect(id)
    }

    /// Toggle a ticket.
    pub fn toggle(&mut self, id: &K) -> bool {
        if self.selection.is_selected(id) {
            self.unselect(id)
        } else {
            self.select(id)
        }
    }

    /// Select several tickets.
    pub fn select_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        ids.into_iter().fold(false, |changed, id| self.select(id) | changed)
    }

    /// Unselect several tickets.
    pub fn unselect_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.selection.unselect_many(ids)
    }

    /// Toggle several tickets. Selecting clears the mixed state, as in [`Group::select`].
    pub fn toggle_many<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        ids.into_iter().fold(false, |changed, id| self.toggle(id) | changed)
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected ids in registry order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.selection.selected_ids()
    }

    /// Selected tickets in registry order.
    pub fn selected_items(&self) -> impl Iterator<Item = &Ticket<K, V>> + '_ {
        self.selection.selected_items()
    }

    /// Values of the selected tickets in registry order.
    pub fn selected_values(&self) -> impl Iterator<Item = &V> + '_ {
        self.selection.selected_values()
    }

    /// Clear selection and mixed state regardless of policy, then re-apply forced selection.
    pub fn reset(&mut self) {
        let mixed: Vec<K> = self.mixed_ids().cloned().collect();
        for id in &mixed {
            self.unmix(id);
        }
        self.selection.reset();
    }

    // --- registration -----------------------------------------------------

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

    /// Remove a ticket and its selection and mixed state.
    pub fn unregister(&mut self, id: &K) -> Option<Ticket<K, V>> {
        let ticket = self.selection.unregister(id)?;
        self.mixed.remove(id);
        Some(ticket)
    }

    /// Remove several tickets.
    pub fn offboard<'a, I>(&mut self, ids: I) -> Vec<Ticket<K, V>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let removed = self.selection.offboard(ids);
        for ticket in &removed {
            self.mixed.remove(&ticket.id);
        }
        removed
    }

    /// Remove every ticket.
    pub fn clear(&mut self) {
        self.mixed.clear();
        self.selection.clear();
    }

    /// Set a ticket's disabled flag.
    pub fn set_ticket_disabled(&mut self, id: &K, disabled: bool) -> bool {
        self.selection.set_ticket_disabled(id, disabled)
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

impl<K: GeneratedId, V> Group<K, V> {
    /// Register `value` under a freshly generated id.
    pub fn register_value(&mut self, value: V) -> &Ticket<K, V> {
        self.selection.register_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mandatory;
    use alloc::vec;

    fn abc(options: SelectionOptions) -> Group<&'static str, ()> {
        let mut group = Group::with_options(options);
        group.onboard([Item::new("a", ()), Item::new("b", ()), Item::new("c", ())]);
        group
    }

    #[test]
    fn tri_state_summary() {
        let mut group = abc(SelectionOptions::new());
        assert!(group.is_none_selected());
        assert!(!group.is_mixed());
        group.select(&"a");
        assert!(group.is_mixed());
        assert!(!group.is_all_selected());
        group.select_all();
        assert!(group.is_all_selected());
        assert!(!group.is_mixed());
        assert!(!group.is_none_selected());
    }

    #[test]
    fn empty_group_is_never_all_selected() {
        let group: Group<u8, ()> = Group::new();
        assert!(!group.is_all_selected());
        assert!(group.is_none_selected());
    }

    #[test]
    fn disabled_tickets_do_not_block_all_selected() {
        let mut group = abc(SelectionOptions::new());
        group.register(Item::new("d", ()).disabled(true));
        group.select_all();
        assert!(group.is_all_selected());
        assert!(!group.is_selected(&"d"));
        assert_eq!(group.selected_ids().count(), 3);
    }

    #[test]
    fn disabled_selection_breaks_all_selected() {
        let mut group = abc(SelectionOptions::new());
        group.register(Item::new("d", ()));
        group.select_all();
        assert!(group.is_all_selected());
        group.set_ticket_disabled(&"d", true);
        assert!(group.is_selected(&"d"));
        assert!(!group.is_all_selected());
        assert!(group.is_mixed());
        // Every enabled ticket is selected, so toggling clears them; "d" is skipped.
        assert!(group.toggle_all());
        assert_eq!(group.selected_ids().copied().collect::<Vec<_>>(), vec!["d"]);
    }

    #[test]
    fn toggle_many_clears_mixed_on_select() {
        let mut group = abc(SelectionOptions::new());
        group.select(&"a");
        group.mix(&"b");
        assert!(group.toggle_many(&["a", "b", "c"]));
        assert_eq!(group.selected_ids().copied().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(group.mixed_ids().count(), 0);
        assert!(!group.toggle_many(&["zzz"]));
    }

    #[test]
    fn toggle_all_flips_between_extremes() {
        let mut group = abc(SelectionOptions::new());
        group.select(&"b");
        assert!(group.toggle_all());
        assert!(group.is_all_selected());
        assert!(group.toggle_all());
        assert!(group.is_none_selected());
    }

    #[test]
    fn mandatory_unselect_all_keeps_one() {
        let mut group = abc(SelectionOptions::new().mandatory(Mandatory::On));
        group.select_all();
        group.unselect_all();
        assert_eq!(group.selected_ids().copied().collect::<Vec<_>>(), vec!["a"]);
        assert!(group.is_mixed());
    }

    #[test]
    fn multiple_is_forced_on() {
        let mut group = abc(SelectionOptions::new().multiple(false));
        group.select_many(&["a", "b"]);
        assert_eq!(group.selected_ids().count(), 2);
    }

    #[test]
    fn mix_and_select_are_exclusive() {
        let mut group = abc(SelectionOptions::new().events(true));
        group.take_events();
        group.select(&"a");
        assert!(group.mix(&"a"));
        assert!(!group.is_selected(&"a"));
        assert!(group.is_item_mixed(&"a"));
        assert!(group.select(&"a"));
        assert!(!group.is_item_mixed(&"a"));
        assert_eq!(
            group.take_events(),
            vec![
                Event::Selected("a"),
                Event::Unselected("a"),
                Event::Mixed("a"),
                Event::Selected("a"),
                Event::Unmixed("a"),
            ]
        );
    }

    #[test]
    fn mix_respects_mandatory_and_disabled() {
        let mut group = abc(SelectionOptions::new().mandatory(Mandatory::On));
        group.register(Item::new("d", ()).disabled(true));
        group.select(&"a");
        assert!(!group.mix(&"a"), "unselecting the last selection is refused");
        assert!(!group.mix(&"d"));
        assert!(group.mix(&"b"));
        assert_eq!(group.mixed_ids().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn unregister_drops_mixed_state() {
        let mut group = abc(SelectionOptions::new());
        group.mix(&"b");
        group.mix(&"c");
        group.unregister(&"b");
        group.offboard(&["c"]);
        assert_eq!(group.mixed_ids().count(), 0);
        group.register(Item::new("b", ()));
        assert!(!group.is_item_mixed(&"b"));
    }

    #[test]
    fn reset_clears_mixed_and_selected() {
        let mut group = abc(SelectionOptions::new());
        group.select(&"a");
        group.mix(&"b");
        group.reset();
        assert!(group.is_none_selected());
        assert_eq!(group.mixed_ids().count(), 0);
    }
}
