// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::adapter::{SelectRequest, SelectionAdapter, guard_mandatory, reject_unselectable};
use crate::state::{NestedSelection, NodeState};
use crate::tree::NodeKey;

/// Each node is selected or unselected on its own; no propagation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Independent;

impl<K: NodeKey> SelectionAdapter<K> for Independent {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        if let Some(current) = reject_unselectable(&request) {
            return current;
        }
        let mut next = request.current.clone();
        let state = if request.value {
            NodeState::On
        } else {
            NodeState::Off
        };
        next.set(request.id.clone(), state);
        guard_mandatory(&request, next)
    }
}

/// Like [`Independent`], but selecting a node clears every other node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleIndependent;

impl<K: NodeKey> SelectionAdapter<K> for SingleIndependent {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        if !request.value {
            return Independent.select(request);
        }
        if let Some(current) = reject_unselectable(&request) {
            return current;
        }
        let mut next = NestedSelection::new();
        next.set(request.id.clone(), NodeState::On);
        next
    }
}
