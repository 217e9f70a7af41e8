// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

/// Event buffer bounds (64 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 64;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10_000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1000;
}

/// Number of diagnostic events kept by the collector before the oldest are
/// evicted. Always within [`buffer_capacity_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}
