// SPDX-License-Identifier: MPL-2.0
//! Active slot state machine.
//!
//! This module defines the phases of the queue's single display slot.

use super::AlertId;

/// Represents the current phase of the active display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPhase {
    /// Nothing is shown and nothing is closing.
    #[default]
    Idle,
    /// The given alert is visible.
    Active(AlertId),
    /// A close is settling; no alert may be activated yet.
    Closing,
}

impl SlotPhase {
    /// Returns true if nothing is shown and a new alert may be activated.
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if the close transition is still settling.
    #[must_use]
    pub fn is_closing(self) -> bool {
        matches!(self, Self::Closing)
    }

    /// Returns the visible alert, if any.
    #[must_use]
    pub fn active_id(self) -> Option<AlertId> {
        match self {
            Self::Active(id) => Some(id),
            Self::Idle | Self::Closing => None,
        }
    }
}
