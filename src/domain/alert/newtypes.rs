// SPDX-License-Identifier: MPL-2.0
//! Alert newtypes.
//!
//! This module provides type-safe wrappers for alert identity and timing
//! values, ensuring they are always within valid ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// =============================================================================
// AlertId
// =============================================================================

/// Identity of one alert request.
///
/// Ids are minted by the queue that owns the alert, start at 1 and are never
/// reused within that queue, even after the alert has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(u64);

impl AlertId {
    /// The first id handed out by a fresh queue.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Settling Delay Bounds
// =============================================================================

/// Settling delay bounds in milliseconds (0 to 5000).
pub mod settling_delay_bounds {
    /// Minimum settling delay.
    pub const MIN: u64 = 0;
    /// Maximum settling delay.
    pub const MAX: u64 = 5000;
    /// Default settling delay, matching the modal's close animation.
    pub const DEFAULT: u64 = 400;
}

// =============================================================================
// SettlingDelay
// =============================================================================

/// Interval between a close and the next activation, in milliseconds.
///
/// While this interval runs the active slot is unavailable, so a queued alert
/// cannot appear on top of the closing animation.
///
/// # Example
///
/// ```
/// use alert_queue::domain::alert::SettlingDelay;
///
/// let delay = SettlingDelay::new(250);
/// assert_eq!(delay.value(), 250);
///
/// // Values outside range are clamped
/// assert_eq!(SettlingDelay::new(60_000).value(), 5000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlingDelay(u64);

impl SettlingDelay {
    /// Creates a new settling delay, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(settling_delay_bounds::MIN, settling_delay_bounds::MAX))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= settling_delay_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= settling_delay_bounds::MAX
    }
}

impl Default for SettlingDelay {
    fn default() -> Self {
        Self(settling_delay_bounds::DEFAULT)
    }
}
