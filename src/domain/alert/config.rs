// SPDX-License-Identifier: MPL-2.0
//! Opaque display configuration handed to the modal primitive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display configuration for one alert (title, text, buttons, ...).
///
/// The queue never inspects or validates it; it is passed through unchanged
/// to [`ModalPrimitive::show`](crate::application::port::ModalPrimitive::show).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertConfig(Map<String, Value>);

impl AlertConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new().with("title", title.into())
    }

    /// Sets a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the `title` field when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for AlertConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = AlertConfig::titled("Saved")
            .with("text", "Your file was saved")
            .with("showCancelButton", true);

        assert_eq!(config.title(), Some("Saved"));
        assert_eq!(config.get("showCancelButton"), Some(&Value::Bool(true)));
        assert!(!config.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let config = AlertConfig::titled("Hi");
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(json, r#"{"title":"Hi"}"#);
    }
}
