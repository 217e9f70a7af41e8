// SPDX-License-Identifier: MPL-2.0
//! In-memory modal primitive.
//!
//! [`HeadlessModal`] implements [`ModalPrimitive`] without any rendering. It
//! records every dialog it was asked to show, the latest pending notice and
//! how often it was force-closed, and lets callers play the user through
//! [`HeadlessModal::respond`]. The console binary builds on it and the test
//! suites drive the queue with it.
//!
//! # Example
//!
//! ```
//! use alert_queue::application::port::ModalPrimitive;
//! use alert_queue::domain::alert::{AlertConfig, AlertValue};
//! use alert_queue::infrastructure::HeadlessModal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let modal = HeadlessModal::new();
//! let answered = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&answered);
//!
//! modal.show(&AlertConfig::titled("Proceed?"), Box::new(move |value: AlertValue| {
//!     flag.set(value.is_confirmed());
//! }));
//! assert_eq!(modal.visible_title().as_deref(), Some("Proceed?"));
//!
//! assert!(modal.respond(AlertValue::from(true)));
//! assert!(answered.get());
//! assert!(!modal.is_visible());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::application::port::{CloseObserver, ModalPrimitive, ResultCallback};
use crate::domain::alert::{AlertConfig, AlertValue};

struct VisibleDialog {
    config: AlertConfig,
    on_result: ResultCallback,
}

#[derive(Default)]
struct HeadlessState {
    visible: Option<VisibleDialog>,
    observer: Option<CloseObserver>,
    shown: Vec<AlertConfig>,
    notice: Option<String>,
    close_calls: usize,
}

/// Modal primitive that keeps its single dialog in memory.
///
/// Cloning yields another handle to the same dialog slot.
#[derive(Clone, Default)]
pub struct HeadlessModal {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user answering the visible dialog with `value`.
    ///
    /// The dialog closes, the close observer runs, then the dialog's result
    /// callback receives `value`. Returns false if nothing was visible.
    ///
    /// # Panics
    ///
    /// When the observer is an [`AlertQueue`](crate::queue::AlertQueue), the
    /// close schedules its settling delay with `tokio::task::spawn_local`,
    /// which panics outside a [`tokio::task::LocalSet`].
    pub fn respond(&self, value: AlertValue) -> bool {
        let (dialog, observer) = {
            let mut state = self.state.borrow_mut();
            (state.visible.take(), state.observer.clone())
        };
        let Some(dialog) = dialog else {
            return false;
        };

        if let Some(observer) = observer {
            observer();
        }
        (dialog.on_result)(value);
        true
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible.is_some()
    }

    /// Returns the configuration of the visible dialog.
    #[must_use]
    pub fn visible_config(&self) -> Option<AlertConfig> {
        self.state
            .borrow()
            .visible
            .as_ref()
            .map(|dialog| dialog.config.clone())
    }

    /// Returns the title of the visible dialog.
    #[must_use]
    pub fn visible_title(&self) -> Option<String> {
        self.visible_config()
            .and_then(|config| config.title().map(str::to_owned))
    }

    /// Returns every configuration passed to `show`, oldest first.
    #[must_use]
    pub fn shown(&self) -> Vec<AlertConfig> {
        self.state.borrow().shown.clone()
    }

    /// Returns the titles of every shown dialog; untitled ones map to "".
    #[must_use]
    pub fn shown_titles(&self) -> Vec<String> {
        self.state
            .borrow()
            .shown
            .iter()
            .map(|config| config.title().unwrap_or_default().to_string())
            .collect()
    }

    /// Returns the latest pending notice.
    #[must_use]
    pub fn pending_notice(&self) -> Option<String> {
        self.state.borrow().notice.clone()
    }

    /// Returns how often `close_active` was called.
    #[must_use]
    pub fn close_calls(&self) -> usize {
        self.state.borrow().close_calls
    }
}

impl ModalPrimitive for HeadlessModal {
    fn show(&self, config: &AlertConfig, on_result: ResultCallback) {
        let mut state = self.state.borrow_mut();
        state.shown.push(config.clone());
        state.visible = Some(VisibleDialog {
            config: config.clone(),
            on_result,
        });
    }

    fn close_active(&self) {
        let (dialog, observer) = {
            let mut state = self.state.borrow_mut();
            state.close_calls += 1;
            (state.visible.take(), state.observer.clone())
        };
        // The result callback is dropped unfired.
        if dialog.is_some() {
            if let Some(observer) = observer {
                observer();
            }
        }
    }

    fn set_close_observer(&self, observer: CloseObserver) {
        self.state.borrow_mut().observer = Some(observer);
    }

    fn set_pending_notice(&self, notice: Option<&str>) {
        self.state.borrow_mut().notice = notice.map(str::to_owned);
    }
}

impl fmt::Debug for HeadlessModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessModal")
            .field(
                "visible",
                &state.visible.as_ref().map(|dialog| &dialog.config),
            )
            .field("shown", &state.shown.len())
            .field("notice", &state.notice)
            .field("close_calls", &state.close_calls)
            .finish()
    }
}
