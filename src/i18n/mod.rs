// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! The pending-alerts notice and the console host's output are localized with
//! the Fluent localization system.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Translation files embedded at compile time
//! - Plural-aware notice text
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
