// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report structure for JSON export.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    /// Version of the crate that produced the report
    pub crate_version: String,
    /// When collection started (RFC 3339)
    pub collection_started_at: String,
    /// Duration of collection in milliseconds
    pub collection_duration_ms: u64,
    /// Number of events in the report
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

/// An event with its time expressed relative to the start of collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub offset_ms: u64,
    /// The event payload
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // offsets in ms fit in u64
    pub fn new(timestamp: Instant, started_at: Instant, kind: DiagnosticEventKind) -> Self {
        Self {
            offset_ms: timestamp.saturating_duration_since(started_at).as_millis() as u64,
            kind,
        }
    }
}

/// Complete exported report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        Self { metadata, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::QueueEvent;
    use crate::domain::alert::AlertId;
    use std::time::Duration;

    #[test]
    fn event_offset_is_relative_to_start() {
        let start = Instant::now();
        let event = SerializableEvent::new(
            start + Duration::from_millis(1500),
            start,
            DiagnosticEventKind::Queue {
                event: QueueEvent::Activated { id: AlertId::new(1) },
            },
        );
        assert_eq!(event.offset_ms, 1500);
    }

    #[test]
    fn event_before_start_saturates_to_zero() {
        let start = Instant::now() + Duration::from_millis(10);
        let event = SerializableEvent::new(
            Instant::now(),
            start,
            DiagnosticEventKind::Warning {
                message: "early".into(),
            },
        );
        assert_eq!(event.offset_ms, 0);
    }

    #[test]
    fn serializable_event_flattens_kind() {
        let event = SerializableEvent {
            offset_ms: 3,
            kind: DiagnosticEventKind::Error {
                message: "boom".into(),
            },
        };
        let json = serde_json::to_string(&event).expect("serialization should succeed");
        assert_eq!(json, r#"{"offset_ms":3,"type":"error","message":"boom"}"#);
    }

    #[test]
    fn metadata_records_version_and_count() {
        let metadata = ReportMetadata::new(Utc::now(), 42, 7);
        assert_eq!(metadata.crate_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(metadata.event_count, 7);
        assert_eq!(metadata.collection_duration_ms, 42);
    }
}
