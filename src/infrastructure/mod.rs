// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`headless`]: In-memory modal primitive (implements [`ModalPrimitive`])
//! - [`console`]: Console modal, stdout host channel and the line-driven
//!   console host used by the binary
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - None of them renders anything; a real dialog library plugs in through
//!   the same trait
//!
//! [`ModalPrimitive`]: crate::application::port::ModalPrimitive

pub mod console;
pub mod headless;

pub use console::{ConsoleHost, ConsoleModal, LineSink, StdoutChannel};
pub use headless::HeadlessModal;
