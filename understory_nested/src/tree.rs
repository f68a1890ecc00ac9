// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent/child relationships consulted by selection adapters.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::adapter::TARGET;

/// Identifier bound for tree nodes.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

/// Read-only tree structure for selection adapters.
///
/// Children are ordered; that order (roots first, then depth-first) is the
/// order adapters report selected ids in. Disabled nodes stay in the tree but
/// cannot be selected directly and are skipped by propagation.
#[derive(Clone, Debug)]
pub struct TreeContext<K> {
    roots: Vec<K>,
    children: HashMap<K, Vec<K>>,
    parents: HashMap<K, K>,
    disabled: HashSet<K>,
}

impl<K: NodeKey> Default for TreeContext<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> TreeContext<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            children: HashMap::new(),
            parents: HashMap::new(),
            disabled: HashSet::new(),
        }
    }

    /// Add `id` as the last child of `parent`, or as the last root.
    ///
    /// Returns `false` (and changes nothing) if `id` is already present or
    /// `parent` is unknown.
    pub fn insert(&mut self, parent: Option<&K>, id: K) -> bool {
        if self.contains(&id) {
            tracing::debug!(target: TARGET, ?id, "node already present");
            return false;
        }
        match parent {
            Some(parent) => {
                let Some(siblings) = self.children.get_mut(parent) else {
                    tracing::debug!(target: TARGET, ?id, ?parent, "unknown parent");
                    return false;
                };
                siblings.push(id.clone());
                self.parents.insert(id.clone(), parent.clone());
            }
            None => self.roots.push(id.clone()),
        }
        self.children.insert(id, Vec::new());
        true
    }

    /// Remove `id` and its whole subtree. Returns the removed ids, parents first.
    pub fn remove(&mut self, id: &K) -> Vec<K> {
        let removed: Vec<K> = self.subtree(id).cloned().collect();
        if removed.is_empty() {
            return removed;
        }
        match self.parents.get(id) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(parent) {
                    siblings.retain(|sibling| sibling != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
        for node in &removed {
            self.children.remove(node);
            self.parents.remove(node);
            self.disabled.remove(node);
        }
        removed
    }

    /// Mark a node disabled or enabled. Returns `true` if the flag changed.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        if !self.contains(id) {
            return false;
        }
        if disabled {
            self.disabled.insert(id.clone())
        } else {
            self.disabled.remove(id)
        }
    }

    /// Returns `true` if `id` is part of the tree.
    pub fn contains(&self, id: &K) -> bool {
        self.children.contains_key(id)
    }

    /// Returns `true` if `id` is disabled.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.disabled.contains(id)
    }

    /// Returns `true` if `id` is present and enabled.
    pub fn is_selectable(&self, id: &K) -> bool {
        self.contains(id) && !self.is_disabled(id)
    }

    /// Ordered children of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: &K) -> &[K] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `id` has at least one child.
    pub fn has_children(&self, id: &K) -> bool {
        !self.children(id).is_empty()
    }

    /// Parent of `id`, or `None` for roots and unknown ids.
    pub fn parent(&self, id: &K) -> Option<&K> {
        self.parents.get(id)
    }

    /// Ordered root nodes.
    pub fn roots(&self) -> &[K] {
        &self.roots
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors<'a>(&'a self, id: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        core::iter::successors(self.parent(id), |node| self.parent(node))
    }

    /// Every node in depth-first, pre-order tree order.
    pub fn depth_first(&self) -> DepthFirst<'_, K> {
        DepthFirst {
            context: self,
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// `id` and its descendants in depth-first, pre-order tree order.
    pub fn subtree<'a>(&'a self, id: &K) -> DepthFirst<'a, K> {
        let mut stack = SmallVec::new();
        if let Some((key, _)) = self.children.get_key_value(id) {
            stack.push(key);
        }
        DepthFirst {
            context: self,
            stack,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Depth-first, pre-order iterator over a [`TreeContext`].
#[derive(Clone, Debug)]
pub struct DepthFirst<'a, K> {
    context: &'a TreeContext<K>,
    stack: SmallVec<[&'a K; 16]>,
}

impl<'a, K: NodeKey> Iterator for DepthFirst<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(self.context.children(node).iter().rev());
        Some(node)
    }
}
