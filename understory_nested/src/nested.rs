// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tree of nodes with a selection strategy and open/closed state.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::adapter::{SelectRequest, SelectionAdapter, TARGET};
use crate::state::{NestedSelection, NodeState};
use crate::strategy::Strategy;
use crate::tree::{NodeKey, TreeContext};

/// Options for a [`Nested`] container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NestedOptions {
    /// Built-in strategy to use.
    pub strategy: Strategy,
    /// Refuse unselects that would leave nothing selected.
    pub mandatory: bool,
}

impl NestedOptions {
    /// Create default options ([`Strategy::Classic`], not mandatory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the mandatory policy.
    #[must_use]
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }
}

enum Adapter<K> {
    Builtin(Strategy),
    Custom(Box<dyn SelectionAdapter<K>>),
}

impl<K: NodeKey> Adapter<K> {
    fn get(&self) -> &dyn SelectionAdapter<K> {
        match self {
            Self::Builtin(strategy) => strategy,
            Self::Custom(adapter) => adapter.as_ref(),
        }
    }
}

impl<K> fmt::Debug for Adapter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(strategy) => f.debug_tuple("Builtin").field(strategy).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

/// Tree nodes plus their selection and expansion state.
///
/// Structure lives in a [`TreeContext`]; every select, unselect, or toggle is
/// routed through the configured [`SelectionAdapter`]. After structural changes
/// the selection is re-derived from its external form, so a node that gains
/// children under [`Strategy::Leaf`] drops out of the selection, and parents
/// under [`Strategy::Classic`] are recomputed.
///
/// ## Example
///
/// ```rust
/// use understory_nested::{Nested, NestedOptions, NodeState, Strategy};
///
/// let mut tree = Nested::with_options(NestedOptions::new().strategy(Strategy::Classic));
/// tree.register(None, "docs");
/// tree.register(Some(&"docs"), "guide");
/// tree.register(Some(&"docs"), "api");
///
/// tree.select(&"guide");
/// assert_eq!(tree.state_of(&"docs"), NodeState::Indeterminate);
///
/// tree.select(&"api");
/// assert_eq!(tree.state_of(&"docs"), NodeState::On);
/// assert_eq!(tree.selected_ids(), ["guide", "api"]);
/// ```
pub struct Nested<K> {
    context: TreeContext<K>,
    state: NestedSelection<K>,
    adapter: Adapter<K>,
    mandatory: bool,
    opened: HashSet<K>,
}

impl<K: NodeKey> fmt::Debug for Nested<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nested")
            .field("context", &self.context)
            .field("state", &self.state)
            .field("adapter", &self.adapter)
            .field("mandatory", &self.mandatory)
            .field("opened", &self.opened)
            .finish()
    }
}

impl<K: NodeKey> Default for Nested<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> Nested<K> {
    /// Create an empty tree with default options.
    pub fn new() -> Self {
        Self::with_options(NestedOptions::default())
    }

    /// Create an empty tree with a built-in strategy.
    pub fn with_options(options: NestedOptions) -> Self {
        Self {
            context: TreeContext::new(),
            state: NestedSelection::new(),
            adapter: Adapter::Builtin(options.strategy),
            mandatory: options.mandatory,
            opened: HashSet::new(),
        }
    }

    /// Create a tree over an existing structure with a custom adapter.
    pub fn with_adapter(
        context: TreeContext<K>,
        adapter: impl SelectionAdapter<K> + 'static,
        mandatory: bool,
    ) -> Self {
        Self {
            context,
            state: NestedSelection::new(),
            adapter: Adapter::Custom(Box::new(adapter)),
            mandatory,
            opened: HashSet::new(),
        }
    }

    /// The built-in strategy, or `None` for a custom adapter.
    pub fn strategy(&self) -> Option<Strategy> {
        match self.adapter {
            Adapter::Builtin(strategy) => Some(strategy),
            Adapter::Custom(_) => None,
        }
    }

    /// Switch to another built-in strategy, keeping the externally visible selection
    /// where the new strategy allows it.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        let ids = self.selected_ids();
        self.adapter = Adapter::Builtin(strategy);
        self.rebuild(&ids);
    }

    /// Returns `true` if unselecting the last node is refused.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Change the mandatory policy.
    pub fn set_mandatory(&mut self, mandatory: bool) {
        self.mandatory = mandatory;
    }

    // --- structure ---

    /// Add a node under `parent`, or as a root.
    ///
    /// Returns `false` if `id` already exists or `parent` is unknown.
    pub fn register(&mut self, parent: Option<&K>, id: K) -> bool {
        if !self.context.insert(parent, id) {
            return false;
        }
        self.resync();
        true
    }

    /// Remove a node and its subtree. Returns the removed ids.
    pub fn unregister(&mut self, id: &K) -> Vec<K> {
        let removed = self.context.remove(id);
        if removed.is_empty() {
            return removed;
        }
        for node in &removed {
            self.state.remove(node);
            self.opened.remove(node);
        }
        self.resync();
        tracing::trace!(target: TARGET, ?id, count = removed.len(), "unregistered subtree");
        removed
    }

    /// Enable or disable a node. Its current state is kept, including across
    /// structural changes and strategy switches.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        self.context.set_disabled(id, disabled)
    }

    /// The tree structure.
    pub fn context(&self) -> &TreeContext<K> {
        &self.context
    }

    fn resync(&mut self) {
        let ids = self.selected_ids();
        self.rebuild(&ids);
    }

    /// Re-derive the state from external ids. Adapters refuse disabled nodes,
    /// so those keep their previous state.
    fn rebuild(&mut self, ids: &[K]) {
        let mut next = self.adapter.get().transform_in(ids, &self.context);
        for (id, state) in self.state.iter() {
            if self.context.is_disabled(id) {
                next.set(id.clone(), state);
            }
        }
        self.state = next;
    }

    // --- selection ---

    /// Select a node. Returns `true` if the state changed.
    pub fn select(&mut self, id: &K) -> bool {
        self.apply(id, true)
    }

    /// Unselect a node. Returns `true` if the state changed.
    pub fn unselect(&mut self, id: &K) -> bool {
        self.apply(id, false)
    }

    /// Select a node that is not on, or unselect one that is.
    pub fn toggle(&mut self, id: &K) -> bool {
        let value = !self.state.is_on(id);
        self.apply(id, value)
    }

    fn apply(&mut self, id: &K, value: bool) -> bool {
        let next = self.adapter.get().select(SelectRequest {
            id,
            value,
            current: &self.state,
            context: &self.context,
            mandatory: self.mandatory,
        });
        if next == self.state {
            return false;
        }
        tracing::trace!(target: TARGET, ?id, value, "selection changed");
        self.state = next;
        true
    }

    /// Replace the selection from external ids, ignoring the mandatory policy.
    pub fn set_selected(&mut self, ids: &[K]) {
        self.state = self.adapter.get().transform_in(ids, &self.context);
    }

    /// Clear the selection, ignoring the mandatory policy.
    pub fn clear_selection(&mut self) {
        self.state.clear();
    }

    /// Selected ids as reported by the strategy, in tree order.
    pub fn selected_ids(&self) -> Vec<K> {
        self.adapter.get().transform_out(&self.state, &self.context)
    }

    /// State of a node.
    pub fn state_of(&self, id: &K) -> NodeState {
        self.state.state(id)
    }

    /// Returns `true` if the node is [`NodeState::On`].
    pub fn is_selected(&self, id: &K) -> bool {
        self.state.is_on(id)
    }

    /// Returns `true` if the node is [`NodeState::Indeterminate`].
    pub fn is_indeterminate(&self, id: &K) -> bool {
        self.state.state(id) == NodeState::Indeterminate
    }

    /// The full per-node state.
    pub fn state(&self) -> &NestedSelection<K> {
        &self.state
    }

    // --- expansion ---

    /// Open a node. Returns `true` if it was closed.
    pub fn open(&mut self, id: &K) -> bool {
        self.context.contains(id) && self.opened.insert(id.clone())
    }

    /// Close a node. Returns `true` if it was open.
    pub fn close(&mut self, id: &K) -> bool {
        self.opened.remove(id)
    }

    /// Flip a node between open and closed.
    pub fn toggle_open(&mut self, id: &K) -> bool {
        if self.is_open(id) {
            self.close(id)
        } else {
            self.open(id)
        }
    }

    /// Returns `true` if the node is open.
    pub fn is_open(&self, id: &K) -> bool {
        self.opened.contains(id)
    }

    /// Open every node that has children.
    pub fn expand_all(&mut self) {
        let context = &self.context;
        self.opened.extend(
            context
                .depth_first()
                .filter(|id| context.has_children(id))
                .cloned(),
        );
    }

    /// Close every node.
    pub fn collapse_all(&mut self) {
        self.opened.clear();
    }

    /// Open nodes in tree order.
    pub fn opened_ids(&self) -> Vec<&K> {
        self.context
            .depth_first()
            .filter(|id| self.opened.contains(*id))
            .collect()
    }

    /// Nodes whose ancestors are all open, in tree order.
    ///
    /// This is the flattened list a tree view renders.
    pub fn visible_ids(&self) -> Vec<&K> {
        self.context
            .depth_first()
            .filter(|id| self.context.ancestors(id).all(|a| self.opened.contains(a)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn files(strategy: Strategy) -> Nested<&'static str> {
        // src ─┬─ lib ─┬─ a
        //      │       └─ b
        //      └─ main
        let mut tree = Nested::with_options(NestedOptions::new().strategy(strategy));
        tree.register(None, "src");
        tree.register(Some(&"src"), "lib");
        tree.register(Some(&"lib"), "a");
        tree.register(Some(&"lib"), "b");
        tree.register(Some(&"src"), "main");
        tree
    }

    #[test]
    fn classic_reports_leaves_trunk_reports_roots() {
        let mut classic = files(Strategy::Classic);
        classic.select(&"src");
        assert_eq!(classic.selected_ids(), vec!["a", "b", "main"]);

        let mut trunk = files(Strategy::Trunk);
        trunk.select(&"a");
        trunk.select(&"b");
        assert_eq!(trunk.selected_ids(), vec!["lib"]);
        trunk.select(&"main");
        assert_eq!(trunk.selected_ids(), vec!["src"]);
    }

    #[test]
    fn toggle_reports_change() {
        let mut tree = files(Strategy::Independent);
        assert!(tree.toggle(&"lib"));
        assert!(tree.is_selected(&"lib"));
        assert!(tree.toggle(&"lib"));
        assert!(!tree.is_selected(&"lib"));
        assert!(!tree.unselect(&"lib"), "already off");
        assert!(!tree.select(&"missing"));
    }

    #[test]
    fn mandatory_refuses_last_unselect() {
        let mut tree = Nested::with_options(
            NestedOptions::new()
                .strategy(Strategy::SingleIndependent)
                .mandatory(true),
        );
        tree.register(None, 1_u32);
        tree.register(None, 2);
        tree.select(&1);
        assert!(!tree.unselect(&1));
        assert!(tree.select(&2));
        assert_eq!(tree.selected_ids(), vec![2]);
        tree.clear_selection();
        assert!(tree.selected_ids().is_empty());
    }

    #[test]
    fn structure_changes_resync_state() {
        let mut tree = files(Strategy::Classic);
        tree.select(&"a");
        tree.select(&"b");
        assert_eq!(tree.state_of(&"lib"), NodeState::On);
        tree.register(Some(&"lib"), "c");
        assert_eq!(tree.state_of(&"lib"), NodeState::Indeterminate);
        tree.unregister(&"c");
        assert_eq!(tree.state_of(&"lib"), NodeState::On);

        let mut leaf = files(Strategy::Leaf);
        leaf.select(&"main");
        leaf.register(Some(&"main"), "rs");
        assert!(leaf.selected_ids().is_empty(), "main became a branch");
    }

    #[test]
    fn disabled_selection_survives_structure_changes() {
        let mut tree = Nested::with_options(NestedOptions::new().strategy(Strategy::Classic));
        tree.register(None, "a");
        tree.register(None, "b");
        tree.select(&"a");
        tree.set_disabled(&"a", true);
        tree.register(None, "c");
        assert!(tree.is_selected(&"a"), "register kept the disabled selection");
        tree.unregister(&"b");
        assert!(tree.is_selected(&"a"), "unregister kept the disabled selection");
        tree.set_strategy(Strategy::Independent);
        assert!(tree.is_selected(&"a"), "strategy switch kept the disabled selection");
        assert_eq!(tree.selected_ids(), vec!["a"]);

        tree.set_disabled(&"a", false);
        assert!(tree.unselect(&"a"));
        tree.register(Some(&"c"), "c1");
        assert!(!tree.is_selected(&"a"));
    }

    #[test]
    fn branch_with_only_disabled_children_survives_resync() {
        let mut tree = files(Strategy::Classic);
        tree.set_disabled(&"a", true);
        tree.set_disabled(&"b", true);
        assert!(tree.select(&"lib"));
        assert_eq!(tree.selected_ids(), vec!["lib"]);
        tree.register(None, "docs");
        assert!(tree.is_selected(&"lib"));
        assert!(tree.is_indeterminate(&"src"));
    }

    #[test]
    fn set_selected_and_strategy_switch() {
        let mut tree = files(Strategy::Classic);
        tree.set_selected(&["a", "b"]);
        assert!(tree.is_selected(&"lib"));
        assert!(tree.is_indeterminate(&"src"));
        tree.set_strategy(Strategy::Independent);
        assert_eq!(tree.strategy(), Some(Strategy::Independent));
        assert_eq!(tree.selected_ids(), vec!["a", "b"]);
        assert!(!tree.is_selected(&"lib"));
    }

    #[test]
    fn expansion() {
        let mut tree = files(Strategy::Classic);
        assert_eq!(tree.visible_ids(), vec![&"src"]);
        assert!(tree.open(&"src"));
        assert!(!tree.open(&"src"));
        assert!(!tree.open(&"nope"));
        assert_eq!(tree.visible_ids(), vec![&"src", &"lib", &"main"]);
        tree.expand_all();
        assert_eq!(tree.opened_ids(), vec![&"src", &"lib"]);
        assert_eq!(tree.visible_ids().len(), 5);
        assert!(tree.toggle_open(&"lib"));
        assert!(!tree.is_open(&"lib"));
        tree.collapse_all();
        assert!(tree.opened_ids().is_empty());
        tree.open(&"lib");
        tree.unregister(&"lib");
        assert!(!tree.is_open(&"lib"));
    }

    #[test]
    fn custom_adapter() {
        #[derive(Debug)]
        struct RootsOnly;

        impl SelectionAdapter<u8> for RootsOnly {
            fn select(&self, request: SelectRequest<'_, u8>) -> NestedSelection<u8> {
                let mut next = request.current.clone();
                if request.context.parent(request.id).is_none() {
                    let state = if request.value {
                        NodeState::On
                    } else {
                        NodeState::Off
                    };
                    next.set(*request.id, state);
                }
                next
            }
        }

        let mut context = TreeContext::new();
        context.insert(None, 1);
        context.insert(Some(&1), 2);
        let mut tree = Nested::with_adapter(context, RootsOnly, false);
        assert_eq!(tree.strategy(), None);
        assert!(!tree.select(&2));
        assert!(tree.select(&1));
        assert_eq!(tree.selected_ids(), vec![1]);
    }
}
