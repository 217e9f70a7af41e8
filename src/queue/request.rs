// SPDX-License-Identifier: MPL-2.0
//! Alert requests and their completion callbacks.

use crate::domain::alert::{AlertConfig, AlertId, AlertValue};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Completion callback; receives exactly one argument, the result value.
pub type AlertCallback = Box<dyn FnOnce(AlertValue)>;

/// What the caller hands to [`AlertQueue::enqueue`](super::AlertQueue::enqueue).
///
/// # Example
///
/// ```
/// use alert_queue::domain::alert::AlertConfig;
/// use alert_queue::queue::DisplayArgs;
///
/// let args = DisplayArgs::new(AlertConfig::titled("Delete file?"))
///     .with_callback(|value| println!("user chose {value}"))
///     .with_correlation_key("delete-confirm");
///
/// assert!(args.has_callback());
/// assert_eq!(args.correlation_key(), Some("delete-confirm"));
/// ```
pub struct DisplayArgs {
    config: AlertConfig,
    callback: Option<AlertCallback>,
    correlation_key: Option<String>,
}

impl DisplayArgs {
    /// Creates display arguments without a callback.
    #[must_use]
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            callback: None,
            correlation_key: None,
        }
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnOnce(AlertValue) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Sets a host-supplied key that identifies this alert outside the queue.
    #[must_use]
    pub fn with_correlation_key(mut self, key: impl Into<String>) -> Self {
        self.correlation_key = Some(key.into());
        self
    }

    /// Returns the display configuration.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Returns whether a completion callback is attached.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Returns the correlation key, if any.
    #[must_use]
    pub fn correlation_key(&self) -> Option<&str> {
        self.correlation_key.as_deref()
    }
}

impl From<AlertConfig> for DisplayArgs {
    fn from(config: AlertConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for DisplayArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayArgs")
            .field("config", &self.config)
            .field("has_callback", &self.callback.is_some())
            .field("correlation_key", &self.correlation_key)
            .finish()
    }
}

/// One request to show a dialog, owned by the queue until it closes.
#[derive(Debug)]
pub struct AlertRequest {
    id: AlertId,
    args: DisplayArgs,
}

impl AlertRequest {
    pub(crate) fn new(id: AlertId, args: DisplayArgs) -> Self {
        Self { id, args }
    }

    /// Returns the queue-assigned id.
    #[must_use]
    pub fn id(&self) -> AlertId {
        self.id
    }

    /// Returns the display configuration.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.args.config
    }

    /// Returns the correlation key, if any.
    #[must_use]
    pub fn correlation_key(&self) -> Option<&str> {
        self.args.correlation_key()
    }

    pub(crate) fn into_parts(self) -> (AlertConfig, CallbackSlot, Option<String>) {
        let DisplayArgs {
            config,
            callback,
            correlation_key,
        } = self.args;
        (config, CallbackSlot::new(callback), correlation_key)
    }

    pub(crate) fn into_callback(self) -> Option<AlertCallback> {
        self.args.callback
    }
}

/// Take-once holder for a completion callback.
///
/// The same slot is shared by the user-interaction path (through the
/// primitive's result callback) and by programmatic dismissal, so whichever
/// path fires first consumes the callback and the other finds it empty.
#[derive(Clone, Default)]
pub(crate) struct CallbackSlot(Rc<RefCell<Option<AlertCallback>>>);

impl CallbackSlot {
    pub(crate) fn new(callback: Option<AlertCallback>) -> Self {
        Self(Rc::new(RefCell::new(callback)))
    }

    /// Invokes the callback if it has not fired yet. Returns whether it ran.
    pub(crate) fn fire(&self, value: AlertValue) -> bool {
        let callback = self.0.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackSlot").field(&!self.is_spent()).finish()
    }
}
