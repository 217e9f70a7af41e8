// SPDX-License-Identifier: MPL-2.0
//! Modal display port definition.
//!
//! This module defines the [`ModalPrimitive`] trait: the minimal contract of a
//! dialog library that can show exactly one modal at a time.
//!
//! # Design Notes
//!
//! - The primitive cannot say *which* dialog a close refers to; the queue only
//!   ever calls [`ModalPrimitive::close_active`] for its own active alert
//! - Every close, whether the user dismissed the dialog or the queue forced it,
//!   must be reported to the registered [`CloseObserver`]

use crate::domain::alert::{AlertConfig, AlertValue};
use std::rc::Rc;

/// Invoked at most once with the value the user chose.
pub type ResultCallback = Box<dyn FnOnce(AlertValue)>;

/// Invoked on every close of the visible dialog.
pub type CloseObserver = Rc<dyn Fn()>;

/// A modal dialog library that can display one dialog at a time.
pub trait ModalPrimitive {
    /// Displays a dialog. Returns immediately.
    ///
    /// `on_result` is invoked at most once, when the user interacts with the
    /// dialog. Programmatic closes never invoke it.
    fn show(&self, config: &AlertConfig, on_result: ResultCallback);

    /// Forcibly closes whatever dialog is visible.
    ///
    /// Must notify the close observer and must not invoke `on_result`.
    fn close_active(&self);

    /// Registers the observer notified on every close.
    ///
    /// Called once by the queue when it is constructed. A later registration
    /// replaces the earlier one.
    fn set_close_observer(&self, observer: CloseObserver);

    /// Updates the "N unread alerts" notice shown inside the visible dialog.
    ///
    /// `None` clears it. Primitives without such a slot can ignore this.
    fn set_pending_notice(&self, notice: Option<&str>) {
        let _ = notice;
    }
}

impl<M: ModalPrimitive + ?Sized> ModalPrimitive for Rc<M> {
    fn show(&self, config: &AlertConfig, on_result: ResultCallback) {
        (**self).show(config, on_result);
    }

    fn close_active(&self) {
        (**self).close_active();
    }

    fn set_close_observer(&self, observer: CloseObserver) {
        (**self).set_close_observer(observer);
    }

    fn set_pending_notice(&self, notice: Option<&str>) {
        (**self).set_pending_notice(notice);
    }
}
