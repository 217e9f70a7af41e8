// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`modal`]: The single-dialog display primitive wrapped by the queue
//! - [`host`]: The response channel back to the host application
//!
//! # Design Notes
//!
//! - All methods take `&self`; implementors own their interior state and must
//!   not hold their own borrows while invoking observers or callbacks, since
//!   those re-enter the queue
//! - Everything runs on one thread, so nothing here is `Send`
//!
//! # Example
//!
//! ```ignore
//! use alert_queue::application::port::ModalPrimitive;
//! use alert_queue::domain::alert::AlertConfig;
//!
//! fn flash(modal: &impl ModalPrimitive, title: &str) {
//!     modal.show(&AlertConfig::titled(title), Box::new(|_| {}));
//!     modal.close_active();
//! }
//! ```

pub mod host;
pub mod modal;

pub use host::HostChannel;
pub use modal::{CloseObserver, ModalPrimitive, ResultCallback};
