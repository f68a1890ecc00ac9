// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordinal navigation over a single-select container.

use alloc::vec::Vec;

use understory_registry::{Event, GeneratedId, Item, Key, Seek, Ticket};

use crate::options::SelectionOptions;
use crate::single::Single;

/// Options for a [`Step`] container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepOptions {
    /// Options for the underlying single-select container.
    pub selection: SelectionOptions,
    /// Wrap around at the ends instead of stopping at the first/last enabled ticket.
    pub circular: bool,
}

impl StepOptions {
    /// Create default options (non-circular).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options for the underlying single-select container.
    #[must_use]
    pub fn selection(mut self, selection: SelectionOptions) -> Self {
        self.selection = selection;
        self
    }

    /// Wrap around at the ends.
    #[must_use]
    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }
}

/// A [`Single`] with wizard/tab-style navigation.
///
/// Navigation counts enabled tickets only. Without `circular`, moving past either
/// end stops at the first or last enabled ticket. With nothing selected, forward
/// moves start from the first enabled ticket and backward moves from the last.
/// When no ticket is enabled, navigation does nothing.
///
/// ## Example
///
/// ```rust
/// use understory_registry::Item;
/// use understory_selection::Step;
///
/// let mut wizard = Step::new();
/// wizard.onboard([
///     Item::new(1_u8, "account"),
///     Item::new(2, "billing").disabled(true),
///     Item::new(3, "confirm"),
/// ]);
///
/// wizard.first();
/// wizard.next();
/// assert_eq!(wizard.selected_value(), Some(&"confirm"));
///
/// // Stepping past the end stays on the last enabled ticket.
/// wizard.step(5);
/// assert_eq!(wizard.selected_id(), Some(&3));
/// ```
#[derive(Clone, Debug)]
pub struct Step<K, V> {
    single: Single<K, V>,
    circular: bool,
}

impl<K: Key, V> Default for Step<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> Step<K, V> {
    /// Create an empty, non-circular step container.
    pub fn new() -> Self {
        Self::with_options(StepOptions::default())
    }

    /// Create an empty step container with explicit options.
    pub fn with_options(options: StepOptions) -> Self {
        Self {
            single: Single::with_options(options.selection),
            circular: options.circular,
        }
    }

    /// Returns `true` if navigation wraps around.
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Select the first enabled ticket.
    pub fn first(&mut self) -> bool {
        let Some(id) = self.single.selection().first_eligible().map(|t| t.id.clone()) else {
            return false;
        };
        self.single.select(&id)
    }

    /// Select the last enabled ticket.
    pub fn last(&mut self) -> bool {
        let Some(id) = self
            .single
            .selection()
            .registry()
            .seek_where(Seek::Last, None, |ticket| !ticket.disabled)
            .map(|ticket| ticket.id.clone())
        else {
            return false;
        };
        self.single.select(&id)
    }

    /// Move one enabled ticket forward.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Move one enabled ticket backward.
    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    /// Move `count` enabled tickets forward (positive) or backward (negative).
    ///
    /// Returns `true` if the selection changed.
    pub fn step(&mut self, count: isize) -> bool {
        let Some(id) = self.target(count) else {
            return false;
        };
        self.single.select(&id)
    }

    /// Resolve the ticket `count` enabled steps away from the current selection.
    fn target(&self, count: isize) -> Option<K> {
        if count == 0 {
            return None;
        }
        let eligible: Vec<&Ticket<K, V>> = self.single.selection().eligible().collect();
        let len = isize::try_from(eligible.len()).ok()?;
        if len == 0 {
            return None;
        }
        // Rank of the current position among enabled tickets. A selected ticket
        // that has since been disabled sits between two ranks.
        let rank = match self.single.selected_index() {
            None if count > 0 => count.saturating_sub(1),
            None => len.saturating_add(count),
            Some(current) => {
                let before = eligible.iter().take_while(|t| t.index < current).count();
                let on_current = eligible.get(before).is_some_and(|t| t.index == current);
                let before = isize::try_from(before).ok()?;
                if on_current || count < 0 {
                    before.saturating_add(count)
                } else {
                    (before - 1).saturating_add(count)
                }
            }
        };
        let rank = if self.circular {
            rank.rem_euclid(len)
        } else {
            rank.clamp(0, len - 1)
        };
        let ticket = eligible.get(usize::try_from(rank).ok()?)?;
        Some(ticket.id.clone())
    }

    /// The id of the selected ticket.
    pub fn selected_id(&self) -> Option<&K> {
        self.single.selected_id()
    }

    /// The selected ticket.
    pub fn selected_item(&self) -> Option<&Ticket<K, V>> {
        self.single.selected_item()
    }

    /// Index of the selected ticket.
    pub fn selected_index(&self) -> Option<usize> {
        self.single.selected_index()
    }

    /// Value of the selected ticket.
    pub fn selected_value(&self) -> Option<&V> {
        self.single.selected_value()
    }

    /// Select a ticket directly.
    pub fn select(&mut self, id: &K) -> bool {
        self.single.select(id)
    }

    /// Unselect a ticket, unless it is the mandatory selection.
    pub fn unselect(&mut self, id: &K) -> bool {
        self.single.unselect(id)
    }

    /// Toggle a ticket.
    pub fn toggle(&mut self, id: &K) -> bool {
        self.single.toggle(id)
    }

    /// Clear the selection regardless of policy, then re-apply forced selection.
    pub fn reset(&mut self) {
        self.single.reset();
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.single.is_selected(id)
    }

    /// Register a ticket.
    pub fn register(&mut self, item: Item<K, V>) -> &Ticket<K, V> {
        self.single.register(item)
    }

    /// Register several tickets in order.
    pub fn onboard<I>(&mut self, items: I) -> Vec<&Ticket<K, V>>
    where
        I: IntoIterator<Item = Item<K, V>>,
    {
        self.single.onboard(items)
    }

    /// Remove a ticket.
    pub fn unregister(&mut self, id: &K) -> Option<Ticket<K, V>> {
        self.single.unregister(id)
    }

    /// Remove every ticket.
    pub fn clear(&mut self) {
        self.single.clear();
    }

    /// Set a ticket's disabled flag.
    pub fn set_ticket_disabled(&mut self, id: &K, disabled: bool) -> bool {
        self.single.set_ticket_disabled(id, disabled)
    }

    /// The underlying single-select container.
    pub fn single(&self) -> &Single<K, V> {
        &self.single
    }

    /// Look up a ticket.
    pub fn get(&self, id: &K) -> Option<&Ticket<K, V>> {
        self.single.get(id)
    }

    /// Tickets in registry order.
    pub fn values(&self) -> core::slice::Iter<'_, Ticket<K, V>> {
        self.single.values()
    }

    /// Number of registered tickets.
    pub fn len(&self) -> usize {
        self.single.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.single.is_empty()
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<Event<K>> {
        self.single.take_events()
    }
}

impl<K: GeneratedId, V> Step<K, V> {
    /// Register `value` under a freshly generated id.
    pub fn register_value(&mut self, value: V) -> &Ticket<K, V> {
        self.single.register_value(value)
    }
}
