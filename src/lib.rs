// SPDX-License-Identifier: MPL-2.0
//! `alert_queue` serializes requests to show modal alerts onto a dialog
//! library that can only display one dialog at a time.
//!
//! Alerts are shown in FIFO order, can be cancelled by id while waiting or
//! closed while visible, and resolve their completion callback exactly once
//! whether the user answered or the close was programmatic. A host adapter
//! maps JSON host messages onto the queue, with correlation keys,
//! auto-dismiss timers and result relaying.
//!
//! # Layers
//!
//! - [`domain`]: Value types (ids, result values, clamped settings)
//! - [`application`]: Port traits for the modal primitive and the host channel
//! - [`queue`]: The alert queue service
//! - [`adapter`]: Host message handling
//! - [`infrastructure`]: Headless and console implementations of the ports
//! - [`config`], [`i18n`], [`diagnostics`], [`error`]: Supporting services

#![doc(html_root_url = "https://docs.rs/alert_queue/0.1.0")]

pub mod adapter;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod queue;
