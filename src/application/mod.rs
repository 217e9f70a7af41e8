// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the queue and adapter depend on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - The queue service and host adapter depend only on these traits
//! - Infrastructure implements them ([`HeadlessModal`], [`ConsoleModal`])
//!
//! [`HeadlessModal`]: crate::infrastructure::HeadlessModal
//! [`ConsoleModal`]: crate::infrastructure::ConsoleModal

pub mod port;
