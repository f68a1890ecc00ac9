// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named built-in strategies.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::adapter::{SelectRequest, SelectionAdapter};
use crate::adapters::{Classic, Independent, Leaf, SingleIndependent, SingleLeaf, Trunk};
use crate::state::NestedSelection;
use crate::tree::{NodeKey, TreeContext};

/// One of the built-in adapters, selectable by name.
///
/// The names (`"independent"`, `"single-independent"`, `"leaf"`,
/// `"single-leaf"`, `"classic"`, `"trunk"`) round-trip through
/// [`FromStr`] and [`Display`](fmt::Display).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// See [`Independent`].
    Independent,
    /// See [`SingleIndependent`].
    SingleIndependent,
    /// See [`Leaf`].
    Leaf,
    /// See [`SingleLeaf`].
    SingleLeaf,
    /// See [`Classic`].
    #[default]
    Classic,
    /// See [`Trunk`].
    Trunk,
}

impl Strategy {
    /// Every built-in strategy.
    pub const ALL: [Self; 6] = [
        Self::Independent,
        Self::SingleIndependent,
        Self::Leaf,
        Self::SingleLeaf,
        Self::Classic,
        Self::Trunk,
    ];

    /// The strategy's name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::SingleIndependent => "single-independent",
            Self::Leaf => "leaf",
            Self::SingleLeaf => "single-leaf",
            Self::Classic => "classic",
            Self::Trunk => "trunk",
        }
    }

    fn adapter<'a, K: NodeKey + 'a>(self) -> &'a (dyn SelectionAdapter<K> + 'a) {
        match self {
            Self::Independent => &Independent,
            Self::SingleIndependent => &SingleIndependent,
            Self::Leaf => &Leaf,
            Self::SingleLeaf => &SingleLeaf,
            Self::Classic => &Classic,
            Self::Trunk => &Trunk,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection strategy `{name}`")]
pub struct ParseStrategyError {
    name: String,
}

impl ParseStrategyError {
    /// The name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseStrategyError {
                name: s.to_string(),
            })
    }
}

impl<K: NodeKey> SelectionAdapter<K> for Strategy {
    fn select(&self, request: SelectRequest<'_, K>) -> NestedSelection<K> {
        self.adapter().select(request)
    }

    fn transform_in(&self, ids: &[K], context: &TreeContext<K>) -> NestedSelection<K> {
        self.adapter().transform_in(ids, context)
    }

    fn transform_out(&self, state: &NestedSelection<K>, context: &TreeContext<K>) -> Vec<K> {
        self.adapter().transform_out(state, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
            assert_eq!(format!("{strategy}"), strategy.as_str());
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "sideways".parse::<Strategy>().unwrap_err();
        assert_eq!(err.name(), "sideways");
        assert_eq!(format!("{err}"), "unknown selection strategy `sideways`");
    }

    #[test]
    fn dispatches_to_builtin() {
        let mut tree = TreeContext::new();
        tree.insert(None, 1_u8);
        tree.insert(Some(&1), 2);
        let state = Strategy::Leaf.transform_in(&[1, 2], &tree);
        assert_eq!(Strategy::Leaf.transform_out(&state, &tree), [2]);
        let state = Strategy::Trunk.transform_in(&[2], &tree);
        assert_eq!(Strategy::Trunk.transform_out(&state, &tree), [1]);
    }
}
