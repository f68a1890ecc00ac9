// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options shared by the selection containers.

/// How strictly a container keeps at least one ticket selected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mandatory {
    /// The selection may become empty.
    #[default]
    Off,
    /// Unselecting (or toggling off) the last selected ticket is refused.
    On,
    /// Like [`Mandatory::On`], and the first eligible ticket is selected
    /// automatically whenever the selection is empty after a registration or removal.
    Force,
}

impl Mandatory {
    /// Returns `true` for [`Mandatory::On`] and [`Mandatory::Force`].
    pub const fn is_required(self) -> bool {
        matches!(self, Self::On | Self::Force)
    }
}

impl From<bool> for Mandatory {
    fn from(required: bool) -> Self {
        if required { Self::On } else { Self::Off }
    }
}

/// Options for [`Selection`](crate::Selection) and the containers built on it.
///
/// ## Enroll policy
///
/// With `enroll` set, registration selects tickets automatically. A multi-select
/// container selects every eligible ticket as it registers; a single-select
/// container selects each newly registered eligible ticket in turn, so the last
/// one registered wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Allow more than one selected ticket. Single-select containers force this off.
    pub multiple: bool,
    /// Minimum-selection policy.
    pub mandatory: Mandatory,
    /// Select tickets as they register.
    pub enroll: bool,
    /// Disable the whole container: every selection change becomes a no-op.
    pub disabled: bool,
    /// Record [`Event`](understory_registry::Event)s for registry and selection changes.
    pub events: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            multiple: true,
            mandatory: Mandatory::Off,
            enroll: false,
            disabled: false,
            events: false,
        }
    }
}

impl SelectionOptions {
    /// Create default options: multi-select, nothing mandatory, no enroll, no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or forbid multiple selected tickets.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the minimum-selection policy.
    #[must_use]
    pub fn mandatory(mut self, mandatory: impl Into<Mandatory>) -> Self {
        self.mandatory = mandatory.into();
        self
    }

    /// Select tickets as they register.
    #[must_use]
    pub fn enroll(mut self, enroll: bool) -> Self {
        self.enroll = enroll;
        self
    }

    /// Disable the whole container.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Enable or disable event recording.
    #[must_use]
    pub fn events(mut self, events: bool) -> Self {
        self.events = events;
        self
    }
}
