// SPDX-License-Identifier: MPL-2.0
//! Host application adapter.
//!
//! The host speaks JSON messages (`show`, `close`, `dismiss`). This module
//! parses them, resolves callback names through a fixed registry, keeps the
//! correlation-key and timer bookkeeping, and relays alert results back over
//! a [`HostChannel`](crate::application::port::HostChannel).
//!
//! # Example
//!
//! ```
//! use alert_queue::adapter::{CallbackRegistry, HostAdapter};
//! use alert_queue::application::port::HostChannel;
//! use alert_queue::domain::alert::{AlertId, AlertValue};
//! use alert_queue::infrastructure::HeadlessModal;
//! use alert_queue::queue::{AlertQueue, QueueOptions};
//!
//! struct Discard;
//! impl HostChannel for Discard {
//!     fn send_input(&self, _input_id: &str, _value: &AlertValue) {}
//! }
//!
//! let queue = AlertQueue::new(HeadlessModal::new(), QueueOptions::default());
//! let adapter = HostAdapter::new(queue, Discard, CallbackRegistry::new());
//!
//! let id = adapter
//!     .handle_json(r#"{"action":"show","title":"Hello","key":"greeting"}"#)
//!     .expect("valid message");
//! assert_eq!(id, Some(AlertId::new(1)));
//! assert_eq!(adapter.id_for_key("greeting"), id);
//! ```

mod host_adapter;
mod message;
mod registry;

pub use host_adapter::HostAdapter;
pub use message::{CallbackDescriptor, CloseParams, DismissParams, HostMessage, ShowParams};
pub use registry::{CallbackRegistry, NamedCallback};
