// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node selection state.

use hashbrown::HashMap;

use crate::tree::NodeKey;

/// Tri-state value of a tree node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Not selected.
    #[default]
    Off,
    /// Selected.
    On,
    /// Some, but not all, enabled descendants are selected.
    Indeterminate,
}

/// Map from node id to [`NodeState`]. Absent ids are [`NodeState::Off`].
///
/// Adapters treat this as an immutable value: each request produces a new map.
#[derive(Clone, Debug)]
pub struct NestedSelection<K> {
    states: HashMap<K, NodeState>,
}

impl<K: NodeKey> Default for NestedSelection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> PartialEq for NestedSelection<K> {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
    }
}

impl<K: NodeKey> Eq for NestedSelection<K> {}

impl<K: NodeKey> NestedSelection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// State of `id`.
    pub fn state(&self, id: &K) -> NodeState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Set the state of `id`. Setting [`NodeState::Off`] removes the entry.
    pub fn set(&mut self, id: K, state: NodeState) {
        if state == NodeState::Off {
            self.states.remove(&id);
        } else {
            self.states.insert(id, state);
        }
    }

    /// Drop the entry for `id`.
    pub fn remove(&mut self, id: &K) {
        self.states.remove(id);
    }

    /// Returns `true` if `id` is [`NodeState::On`].
    pub fn is_on(&self, id: &K) -> bool {
        self.state(id) == NodeState::On
    }

    /// Number of nodes that are [`NodeState::On`].
    pub fn on_count(&self) -> usize {
        self.states.values().filter(|s| **s == NodeState::On).count()
    }

    /// Returns `true` if no node is on or indeterminate.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Reset every node to [`NodeState::Off`].
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Nodes that are not [`NodeState::Off`], in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, NodeState)> + '_ {
        self.states.iter().map(|(id, state)| (id, *state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_is_absent() {
        let mut state = NestedSelection::new();
        state.set("a", NodeState::On);
        state.set("b", NodeState::Indeterminate);
        assert_eq!(state.on_count(), 1);
        state.set("a", NodeState::Off);
        assert_eq!(state.state(&"a"), NodeState::Off);
        assert_eq!(state.iter().count(), 1);
        assert_eq!(state, {
            let mut other = NestedSelection::new();
            other.set("b", NodeState::Indeterminate);
            other
        });
    }
}
