// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::adapter::{SelectRequest, SelectionAdapter, guard_mandatory, reject_unselectable};
use crate::state::{NestedSelection, NodeState};
use crate::tree::{NodeKey, TreeContext};

/// Checkbox-tree semantics.
///
/// Selecting a node sets it and every enabled descendant to the requested value;
/// disabled subtrees keep their state. Each ancestor is then recomputed from its
/// enabled children: on if all are on, off if none are on or indeterminate, and
/// indeterminate otherwise. Selected ids are reported as on leaves, where a
/// branch whose children are all disabled counts as a leaf.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Classic;

impl<K: NodeKey> SelectionAdapter<K> for Classic {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        if let Some(current) = reject_unselectable(&request) {
            return current;
        }
        let next = propagate(&request);
        guard_mandatory(&request, next)
    }

    fn transform_out(&self, state: &NestedSelection<K>, context: &TreeContext<K>) -> Vec<K> {
        context
            .depth_first()
            .filter(|id| state.is_on(id) && !has_enabled_children(context, id))
            .cloned()
            .collect()
    }
}

/// [`Classic`] propagation, reporting the highest fully-selected nodes.
///
/// A node is fully selected when it is on and all of its enabled children are
/// fully selected. Descendants of a reported node are not reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Trunk;

impl<K: NodeKey> SelectionAdapter<K> for Trunk {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        Classic.select(request)
    }

    fn transform_out(&self, state: &NestedSelection<K>, context: &TreeContext<K>) -> Vec<K> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[&K; 16]> = context.roots().iter().rev().collect();
        while let Some(node) = stack.pop() {
            if fully_selected(state, context, node) {
                out.push(node.clone());
                continue;
            }
            stack.extend(context.children(node).iter().rev());
        }
        out
    }
}

fn has_enabled_children<K: NodeKey>(context: &TreeContext<K>, node: &K) -> bool {
    context
        .children(node)
        .iter()
        .any(|child| !context.is_disabled(child))
}

fn propagate<K: NodeKey>(request: &SelectRequest<'_, K>) -> NestedSelection<K> {
    let context = request.context;
    let mut next = request.current.clone();
    let target = if request.value {
        NodeState::On
    } else {
        NodeState::Off
    };

    let mut stack: SmallVec<[&K; 16]> = SmallVec::new();
    stack.push(request.id);
    while let Some(node) = stack.pop() {
        if context.is_disabled(node) {
            continue;
        }
        next.set(node.clone(), target);
        stack.extend(context.children(node));
    }

    for ancestor in context.ancestors(request.id) {
        if let Some(state) = derive_state(&next, context, ancestor) {
            next.set(ancestor.clone(), state);
        }
    }
    next
}

/// State implied by the enabled children of `node`, or `None` if it has none.
fn derive_state<K: NodeKey>(
    state: &NestedSelection<K>,
    context: &TreeContext<K>,
    node: &K,
) -> Option<NodeState> {
    let mut total = 0_usize;
    let mut on = 0_usize;
    let mut partial = false;
    for child in context.children(node) {
        if context.is_disabled(child) {
            continue;
        }
        total += 1;
        match state.state(child) {
            NodeState::On => on += 1,
            NodeState::Indeterminate => partial = true,
            NodeState::Off => {}
        }
    }
    if total == 0 {
        return None;
    }
    Some(if on == total {
        NodeState::On
    } else if on == 0 && !partial {
        NodeState::Off
    } else {
        NodeState::Indeterminate
    })
}

fn fully_selected<K: NodeKey>(
    state: &NestedSelection<K>,
    context: &TreeContext<K>,
    node: &K,
) -> bool {
    state.is_on(node)
        && context
            .children(node)
            .iter()
            .filter(|child| !context.is_disabled(child))
            .all(|child| fully_selected(state, context, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tree() -> TreeContext<&'static str> {
        // root ─┬─ a ─┬─ a1
        //       │     └─ a2
        //       └─ b
        let mut tree = TreeContext::new();
        tree.insert(None, "root");
        tree.insert(Some(&"root"), "a");
        tree.insert(Some(&"a"), "a1");
        tree.insert(Some(&"a"), "a2");
        tree.insert(Some(&"root"), "b");
        tree
    }

    fn select(
        adapter: &impl SelectionAdapter<&'static str>,
        tree: &TreeContext<&'static str>,
        state: &NestedSelection<&'static str>,
        id: &'static str,
        value: bool,
    ) -> NestedSelection<&'static str> {
        adapter.select(SelectRequest {
            id: &id,
            value,
            current: state,
            context: tree,
            mandatory: false,
        })
    }

    #[test]
    fn children_drive_parent_state() {
        let tree = tree();
        let state = select(&Classic, &tree, &NestedSelection::new(), "a1", true);
        assert_eq!(state.state(&"a"), NodeState::Indeterminate);
        assert_eq!(state.state(&"root"), NodeState::Indeterminate);

        let state = select(&Classic, &tree, &state, "a2", true);
        assert_eq!(state.state(&"a"), NodeState::On);
        assert_eq!(state.state(&"root"), NodeState::Indeterminate);

        let state = select(&Classic, &tree, &state, "b", true);
        assert_eq!(state.state(&"root"), NodeState::On);
        assert_eq!(Classic.transform_out(&state, &tree), vec!["a1", "a2", "b"]);
        assert_eq!(Trunk.transform_out(&state, &tree), vec!["root"]);
    }

    #[test]
    fn selecting_a_branch_selects_descendants() {
        let tree = tree();
        let state = select(&Classic, &tree, &NestedSelection::new(), "a", true);
        assert!(state.is_on(&"a1") && state.is_on(&"a2"));
        assert_eq!(state.state(&"root"), NodeState::Indeterminate);
        assert_eq!(Trunk.transform_out(&state, &tree), vec!["a"]);

        let state = select(&Classic, &tree, &state, "a", false);
        assert!(state.is_empty());
    }

    #[test]
    fn disabled_children_are_skipped() {
        let mut tree = tree();
        tree.set_disabled(&"b", true);
        let state = select(&Classic, &tree, &NestedSelection::new(), "root", true);
        assert!(!state.is_on(&"b"));
        assert_eq!(state.state(&"root"), NodeState::On);
        assert_eq!(Trunk.transform_out(&state, &tree), vec!["root"]);

        let state = select(&Classic, &tree, &NestedSelection::new(), "a", true);
        assert_eq!(state.state(&"root"), NodeState::On, "b does not count");
    }

    #[test]
    fn branch_without_enabled_children_is_reported() {
        let mut tree = tree();
        tree.set_disabled(&"a1", true);
        tree.set_disabled(&"a2", true);
        let state = select(&Classic, &tree, &NestedSelection::new(), "a", true);
        assert!(state.is_on(&"a"));
        assert!(!state.is_on(&"a1"));
        assert_eq!(Classic.transform_out(&state, &tree), vec!["a"]);
        assert_eq!(Classic.transform_in(&["a"], &tree), state);
    }

    #[test]
    fn transform_in_round_trips_leaves() {
        let tree = tree();
        let state = Classic.transform_in(&["a1", "b"], &tree);
        assert_eq!(state.state(&"a"), NodeState::Indeterminate);
        assert_eq!(Classic.transform_out(&state, &tree), vec!["a1", "b"]);
        assert_eq!(Trunk.transform_out(&state, &tree), vec!["a1", "b"]);
    }
}
