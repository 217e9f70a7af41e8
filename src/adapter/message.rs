// SPDX-License-Identifier: MPL-2.0
//! Messages the host application sends to the adapter.
//!
//! Every message is one JSON object tagged by `action`:
//!
//! ```json
//! {"action": "show", "title": "Saved", "timer": 2000, "cbid": "saved_ack"}
//! {"action": "close", "key": "upload-progress"}
//! {"action": "dismiss", "id": 3, "value": "timeout"}
//! ```
//!
//! Fields of `show` other than the ones listed on [`ShowParams`] are display
//! configuration and reach the modal primitive untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::alert::{AlertConfig, AlertId, AlertValue};

/// A request from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostMessage {
    /// Queue a dialog.
    Show(ShowParams),
    /// Close a dialog without running its callback.
    Close(CloseParams),
    /// Close a dialog and run its callback with a value.
    Dismiss(DismissParams),
}

impl HostMessage {
    /// Returns the `action` tag.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::Close(_) => "close",
            Self::Dismiss(_) => "dismiss",
        }
    }
}

/// Parameters of a `show` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowParams {
    /// Named callback to run with the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<CallbackDescriptor>,

    /// Host input that receives the result. Takes precedence over `callback`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbid: Option<String>,

    /// Auto-dismiss after this many milliseconds of visibility; 0 means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u64>,

    /// External key the host uses to address this alert later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Everything else: display configuration.
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl ShowParams {
    /// Returns the display configuration.
    #[must_use]
    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig::from(self.config.clone())
    }

    /// Returns the auto-dismiss timer, if one is requested.
    #[must_use]
    pub fn timer_ms(&self) -> Option<u64> {
        self.timer.filter(|ms| *ms > 0)
    }
}

/// How a `show` request names its callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallbackDescriptor {
    /// `"callback": "refresh"`
    Name(String),
    /// `"callback": {"name": "refresh", "args": {...}}`
    Full {
        name: String,
        #[serde(default)]
        args: Value,
    },
}

impl CallbackDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Full { name, .. } => name,
        }
    }

    /// Returns the bound arguments; `Null` for the bare-name form.
    #[must_use]
    pub fn args(&self) -> Value {
        match self {
            Self::Name(_) => Value::Null,
            Self::Full { args, .. } => args.clone(),
        }
    }
}

/// Parameters of a `close` request.
///
/// `key` wins over `id`; with neither the visible alert is closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlertId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Parameters of a `dismiss` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DismissParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlertId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Value handed to the callback; defaults to [`AlertValue::dismissed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AlertValue>,
}

impl DismissParams {
    #[must_use]
    pub fn value_or_dismissed(&self) -> AlertValue {
        self.value.clone().unwrap_or_else(AlertValue::dismissed)
    }
}
