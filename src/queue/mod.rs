// SPDX-License-Identifier: MPL-2.0
//! Queueing of modal dialogs onto a single-dialog primitive.
//!
//! The primitive shows one dialog at a time and cannot show a new one right
//! after closing the old one. [`AlertQueue`] shows the first request at once,
//! keeps the others in FIFO order, and waits a settling delay after every
//! close before activating the next.
//!
//! ```text
//! Idle ──enqueue──▶ Active(id) ──close / user answer──▶ Closing
//!  ▲                                                      │
//!  └──────────── settling delay, queue empty ─────────────┤
//!                settling delay, queue non-empty ─────────▶ Active(next)
//! ```

mod request;
mod service;
mod state;

pub use request::{AlertCallback, AlertRequest, DisplayArgs};
pub use service::{AlertQueue, CloseOutcome, QueueOptions, Transition, WeakAlertQueue};
