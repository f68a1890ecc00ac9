// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adapter trait that maps select requests onto tree state.

use alloc::vec::Vec;

use crate::state::NestedSelection;
use crate::tree::{NodeKey, TreeContext};

pub(crate) const TARGET: &str = "understory_nested";

/// A single select or unselect request against the current state.
#[derive(Debug)]
pub struct SelectRequest<'a, K> {
    /// Node being selected or unselected.
    pub id: &'a K,
    /// `true` to select, `false` to unselect.
    pub value: bool,
    /// State before the request.
    pub current: &'a NestedSelection<K>,
    /// Tree structure.
    pub context: &'a TreeContext<K>,
    /// Refuse requests that would leave nothing selected.
    pub mandatory: bool,
}

/// Selection strategy for a tree.
///
/// Implementations are pure: `select` returns the next state and never mutates
/// the current one. Requests for unknown or disabled ids return the current
/// state unchanged.
pub trait SelectionAdapter<K: NodeKey> {
    /// Compute the state after applying `request`.
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K>;

    /// Build a state from an external list of selected ids.
    ///
    /// The default folds `select(id, true)` over `ids` starting from an empty
    /// state, without the mandatory policy.
    fn transform_in(&self, ids: &[K], context: &TreeContext<K>) -> NestedSelection<K> {
        let mut state = NestedSelection::new();
        for id in ids {
            state = self.select(SelectRequest {
                id,
                value: true,
                current: &state,
                context,
                mandatory: false,
            });
        }
        state
    }

    /// Report the selected ids in tree order.
    ///
    /// The default reports every [`NodeState::On`](crate::NodeState::On) node.
    fn transform_out(&self, state: &NestedSelection<K>, context: &TreeContext<K>) -> Vec<K> {
        context
            .depth_first()
            .filter(|id| state.is_on(id))
            .cloned()
            .collect()
    }
}

/// Return `next`, or the current state if `next` would drop the last selection
/// while the request is mandatory.
pub(crate) fn guard_mandatory<K: NodeKey>(
    request: &SelectRequest<'_, K>,
    next: NestedSelection<K>,
) -> NestedSelection<K> {
    if request.mandatory
        && !request.value
        && next.on_count() == 0
        && request.current.on_count() > 0
    {
        tracing::debug!(
            target: TARGET,
            id = ?request.id,
            "refusing to clear the last selected node"
        );
        return request.current.clone();
    }
    next
}

/// Return `Some(current)` if `request` targets an unknown or disabled node.
pub(crate) fn reject_unselectable<K: NodeKey>(
    request: &SelectRequest<'_, K>,
) -> Option<NestedSelection<K>> {
    if request.context.is_selectable(request.id) {
        return None;
    }
    tracing::debug!(target: TARGET, id = ?request.id, "node is unknown or disabled");
    Some(request.current.clone())
}
