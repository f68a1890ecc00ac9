// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Failure to resolve a provision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// Neither the scope nor any ancestor provides the key.
    #[error("no provision for context key `{key}`")]
    Missing {
        /// The requested key.
        key: &'static str,
    },
    /// The nearest provision for the key holds a different type.
    #[error("context key `{key}` does not hold a `{expected}`")]
    TypeMismatch {
        /// The requested key.
        key: &'static str,
        /// Name of the requested type.
        expected: &'static str,
    },
}

impl ContextError {
    /// The key that failed to resolve.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Missing { key } | Self::TypeMismatch { key, .. } => *key,
        }
    }
}
