// SPDX-License-Identifier: MPL-2.0
//! Fixed dispatch table for host-named callbacks.
//!
//! Hosts refer to callbacks by name only. Names are resolved against entries
//! registered up front by the embedding application; nothing the host sends
//! is ever executed.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::message::CallbackDescriptor;
use crate::domain::alert::AlertValue;
use crate::error::{Error, Result};

/// A registered callback: receives the alert result and the descriptor's
/// `args`.
pub type NamedCallback = Rc<dyn Fn(&AlertValue, &Value)>;

/// Name → callback table.
///
/// # Example
///
/// ```
/// use alert_queue::adapter::{CallbackDescriptor, CallbackRegistry};
/// use alert_queue::domain::alert::AlertValue;
///
/// let mut registry = CallbackRegistry::new();
/// registry.register("log", |value, _args| println!("result: {value}"));
///
/// let bound = registry
///     .resolve(&CallbackDescriptor::Name("log".into()))
///     .expect("registered");
/// bound(AlertValue::from(true));
///
/// assert!(registry.resolve(&CallbackDescriptor::Name("rm -rf".into())).is_err());
/// ```
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    entries: HashMap<String, NamedCallback>,
}

impl CallbackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`, replacing any earlier entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&AlertValue, &Value) + 'static,
    ) -> &mut Self {
        self.entries.insert(name.into(), Rc::new(callback));
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds a descriptor to its registered callback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCallback`] if the name is not registered.
    pub fn resolve(&self, descriptor: &CallbackDescriptor) -> Result<impl Fn(AlertValue)> {
        let callback = self
            .entries
            .get(descriptor.name())
            .cloned()
            .ok_or_else(|| Error::UnknownCallback(descriptor.name().to_string()))?;
        let args = descriptor.args();
        Ok(move |value: AlertValue| callback(&value, &args))
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("CallbackRegistry")
            .field("names", &names)
            .finish()
    }
}
