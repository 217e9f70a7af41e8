// SPDX-License-Identifier: MPL-2.0
//! Result value delivered to alert completion callbacks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value an alert resolves with.
///
/// Confirm/cancel dialogs resolve with a boolean, input dialogs with text.
/// Programmatic dismissals use whatever value the caller supplies, usually
/// [`AlertValue::dismissed`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertValue {
    /// Confirmed (`true`) or cancelled (`false`).
    Bool(bool),
    /// Numeric input.
    Number(f64),
    /// Text input.
    Text(String),
    /// No value.
    #[default]
    Null,
}

impl AlertValue {
    /// The value reported when an alert is dismissed without user input.
    #[must_use]
    pub const fn dismissed() -> Self {
        Self::Bool(false)
    }

    /// Returns true for `Bool(true)`, any number and any non-empty text.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => !text.is_empty(),
            Self::Number(_) => true,
            Self::Null => false,
        }
    }
}

impl From<bool> for AlertValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AlertValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AlertValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AlertValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for AlertValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertValue::Bool(value) => write!(f, "{value}"),
            AlertValue::Number(value) => write!(f, "{value}"),
            AlertValue::Text(text) => write!(f, "\"{text}\""),
            AlertValue::Null => write!(f, "null"),
        }
    }
}
