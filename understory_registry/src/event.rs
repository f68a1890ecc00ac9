// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications recorded by containers with events enabled.

/// A state change recorded by a registry or by a container composed over one.
///
/// Events are only recorded when the owning container was built with
/// `events: true`; drain them with `take_events`. A binding layer can use the
/// drained sequence to drive its own reactivity without this crate knowing
/// about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<K> {
    /// A ticket was added.
    Registered(K),
    /// A ticket was removed.
    Unregistered(K),
    /// An existing ticket's value or disabled flag was replaced.
    Updated(K),
    /// All tickets were removed at once.
    Cleared,
    /// A ticket joined the selection set.
    Selected(K),
    /// A ticket left the selection set.
    Unselected(K),
    /// A ticket entered the mixed (indeterminate) state.
    Mixed(K),
    /// A ticket left the mixed state.
    Unmixed(K),
}
