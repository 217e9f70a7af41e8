// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events are emitted by the queue service and the host adapter and describe
//! every lifecycle step an alert goes through.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::alert::AlertId;
use crate::queue::CloseOutcome;

/// Lifecycle steps recorded by [`AlertQueue`](crate::queue::AlertQueue).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum QueueEvent {
    /// A request received its id.
    Enqueued {
        id: AlertId,
        /// True if it went to the pending queue instead of being shown.
        queued: bool,
    },

    /// An alert became the visible one.
    Activated { id: AlertId },

    /// `close` or `close_and_fire_callback` was called.
    CloseRequested {
        /// Requested target; absent means "whatever is active".
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<AlertId>,
        outcome: CloseOutcome,
        fire_callback: bool,
    },

    /// The modal reported a close and the settling delay started.
    Closed { id: AlertId },

    /// A completion callback ran because of a programmatic dismissal.
    CallbackFired { id: AlertId },

    /// The settling delay elapsed.
    Settled {
        /// The alert activated next, if any was waiting.
        #[serde(skip_serializing_if = "Option::is_none")]
        next: Option<AlertId>,
    },
}

/// Steps recorded by [`HostAdapter`](crate::adapter::HostAdapter).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum HostEvent {
    /// A host message was parsed.
    MessageReceived { action: String },

    /// A host message could not be handled.
    MessageRejected { reason: String },

    /// An auto-dismiss timer started counting.
    TimerArmed { id: AlertId, delay_ms: u64 },

    /// An auto-dismiss timer elapsed.
    TimerFired {
        id: AlertId,
        /// False when the alert was already gone.
        acted: bool,
    },

    /// A result value was published on a host input.
    ResponseRelayed { input: String },
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    /// The type and data of the event.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Queue lifecycle step.
    Queue { event: QueueEvent },

    /// Host adapter step.
    Host { event: HostEvent },

    /// Something unexpected that did not stop processing.
    Warning { message: String },

    /// A failure reported back to the caller.
    Error { message: String },
}
