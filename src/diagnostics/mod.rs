// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording what the queue and the adapter did.
//!
//! Events are sent through a cheap [`DiagnosticsHandle`], stored by the
//! [`DiagnosticsCollector`] in a memory-bounded [`CircularBuffer`], and can be
//! exported as a JSON [`DiagnosticReport`].
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped [`DiagnosticEventKind`]
//! - [`QueueEvent`] / [`HostEvent`]: Structured lifecycle steps

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, HostEvent, QueueEvent};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
