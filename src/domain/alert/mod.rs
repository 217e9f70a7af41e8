// SPDX-License-Identifier: MPL-2.0
//! Alert domain types.
//!
//! - [`AlertConfig`]: Opaque display configuration
//! - [`AlertId`]: Identity assigned by the queue at enqueue time
//! - [`AlertValue`]: Result value delivered to completion callbacks
//! - [`SlotPhase`]: Phase of the single active slot
//! - [`SettlingDelay`]: Delay between a close and the next activation

mod config;
mod newtypes;
mod phase;
mod value;

pub use config::AlertConfig;
pub use newtypes::{settling_delay_bounds, AlertId, SettlingDelay};
pub use phase::SlotPhase;
pub use value::AlertValue;
