// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core alert types and value objects.
//!
//! This module contains pure domain types shared by the queue service and
//! the host adapter. Apart from `serde` derives (for the wire and diagnostics
//! representation) it has no external dependencies.
//!
//! # Modules
//!
//! - [`alert`]: Alert identity and lifecycle types ([`AlertId`](alert::AlertId),
//!   [`AlertValue`](alert::AlertValue), [`SlotPhase`](alert::SlotPhase),
//!   [`SettlingDelay`](alert::SettlingDelay))
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))

pub mod alert;
pub mod diagnostics;
