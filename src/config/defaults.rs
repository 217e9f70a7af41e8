// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! Bounds of the clamped domain newtypes are re-exported here so the settings
//! file, the command line and the queue agree on a single set of numbers.
//!
//! # Categories
//!
//! - **Queue**: Settling delay and pending notice
//! - **Diagnostics**: Event buffer capacity
//! - **Locale**: Fallback language

use crate::domain::alert::settling_delay_bounds;
use crate::domain::diagnostics::buffer_capacity_bounds;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default wait between a close and the next activation (in milliseconds).
pub const DEFAULT_SETTLING_DELAY_MS: u64 = settling_delay_bounds::DEFAULT;

/// Minimum settling delay (in milliseconds).
pub const MIN_SETTLING_DELAY_MS: u64 = settling_delay_bounds::MIN;

/// Maximum settling delay (in milliseconds).
pub const MAX_SETTLING_DELAY_MS: u64 = settling_delay_bounds::MAX;

/// Whether the visible dialog shows the "N unread alerts" notice by default.
pub const DEFAULT_SHOW_PENDING_MESSAGE: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_CAPACITY: usize = buffer_capacity_bounds::MAX;

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when neither CLI, settings nor OS name an available one.
pub const DEFAULT_LOCALE: &str = "en-US";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MAX_SETTLING_DELAY_MS >= MIN_SETTLING_DELAY_MS);
    assert!(DEFAULT_SETTLING_DELAY_MS >= MIN_SETTLING_DELAY_MS);
    assert!(DEFAULT_SETTLING_DELAY_MS <= MAX_SETTLING_DELAY_MS);

    assert!(MIN_DIAGNOSTICS_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY <= MAX_DIAGNOSTICS_CAPACITY);
};
