// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::adapter::{SelectRequest, SelectionAdapter, TARGET};
use crate::adapters::{Independent, SingleIndependent};
use crate::state::NestedSelection;
use crate::tree::NodeKey;

fn rejects_branch<K: NodeKey>(request: &SelectRequest<'_, K>) -> bool {
    if request.value && request.context.has_children(request.id) {
        tracing::debug!(target: TARGET, id = ?request.id, "only leaves can be selected");
        return true;
    }
    false
}

/// [`Independent`] restricted to nodes without children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaf;

impl<K: NodeKey> SelectionAdapter<K> for Leaf {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        if rejects_branch(&request) {
            return request.current.clone();
        }
        Independent.select(request)
    }
}

/// [`SingleIndependent`] restricted to nodes without children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleLeaf;

impl<K: NodeKey> SelectionAdapter<K> for SingleLeaf {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        if rejects_branch(&request) {
            return request.current.clone();
        }
        SingleIndependent.select(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeContext;
    use alloc::vec;

    fn tree() -> TreeContext<&'static str> {
        let mut tree = TreeContext::new();
        tree.insert(None, "folder");
        tree.insert(Some(&"folder"), "a");
        tree.insert(Some(&"folder"), "b");
        tree
    }

    #[test]
    fn leaf_rejects_branches() {
        let tree = tree();
        let state = Leaf.transform_in(&["folder", "a", "b"], &tree);
        assert!(!state.is_on(&"folder"));
        assert_eq!(Leaf.transform_out(&state, &tree), vec!["a", "b"]);
    }

    #[test]
    fn single_leaf_keeps_one() {
        let tree = tree();
        let state = SingleLeaf.transform_in(&["a", "folder", "b"], &tree);
        assert_eq!(SingleLeaf.transform_out(&state, &tree), vec!["b"]);
    }
}
