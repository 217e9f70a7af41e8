// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`BufferCapacity`]: How many queue and host events the collector retains

mod newtypes;

pub use newtypes::{buffer_capacity_bounds, BufferCapacity};
