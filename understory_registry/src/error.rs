// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

/// Errors reported by the strict registration entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError<K: Debug> {
    /// A ticket with this id is already registered.
    #[error("ticket id {0:?} is already registered")]
    DuplicateId(K),
}
