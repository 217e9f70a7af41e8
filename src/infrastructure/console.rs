// SPDX-License-Identifier: MPL-2.0
//! Console adapters used by the `alert_queue` binary.
//!
//! [`ConsoleModal`] is a [`HeadlessModal`] that also prints what a real dialog
//! would display. [`StdoutChannel`] prints the values relayed to the host.
//! Both print localized lines through a [`LineSink`], which is stdout unless a
//! test swaps it. [`ConsoleHost`] feeds input lines to both.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use fluent_bundle::FluentValue;
use serde::Deserialize;

use super::HeadlessModal;
use crate::adapter::HostAdapter;
use crate::application::port::{CloseObserver, HostChannel, ModalPrimitive, ResultCallback};
use crate::domain::alert::{AlertConfig, AlertValue};
use crate::i18n::fluent::I18n;

/// Destination of printed lines.
pub type LineSink = Rc<dyn Fn(&str)>;

fn stdout_sink() -> LineSink {
    Rc::new(|line: &str| println!("{line}"))
}

/// Modal primitive that renders dialogs as console lines.
#[derive(Clone)]
pub struct ConsoleModal {
    inner: HeadlessModal,
    i18n: Rc<I18n>,
    sink: LineSink,
}

impl ConsoleModal {
    #[must_use]
    pub fn new(i18n: Rc<I18n>) -> Self {
        Self::with_sink(i18n, stdout_sink())
    }

    #[must_use]
    pub fn with_sink(i18n: Rc<I18n>, sink: LineSink) -> Self {
        Self {
            inner: HeadlessModal::new(),
            i18n,
            sink,
        }
    }

    /// Answers the visible dialog as the user would.
    ///
    /// Prints a notice and returns false when nothing is visible.
    pub fn respond(&self, value: AlertValue) -> bool {
        let answered = self.inner.respond(value);
        if !answered {
            (self.sink)(&self.i18n.tr("console-nothing-visible"));
        }
        answered
    }

    /// Returns the underlying in-memory state.
    #[must_use]
    pub fn headless(&self) -> &HeadlessModal {
        &self.inner
    }

    /// Prints that a host message was rejected.
    pub fn report_rejected(&self, reason: &str) {
        let line = self.i18n.tr_with_args(
            "console-message-rejected",
            &[("reason", FluentValue::from(reason))],
        );
        (self.sink)(&line);
    }
}

impl ModalPrimitive for ConsoleModal {
    fn show(&self, config: &AlertConfig, on_result: ResultCallback) {
        let title = config
            .title()
            .map_or_else(|| self.i18n.tr("console-modal-untitled"), str::to_owned);
        let line = self
            .i18n
            .tr_with_args("console-modal-shown", &[("title", FluentValue::from(title))]);
        (self.sink)(&line);
        if let Some(text) = config.get("text").and_then(serde_json::Value::as_str) {
            (self.sink)(&format!("  {text}"));
        }
        self.inner.show(config, on_result);
    }

    fn close_active(&self) {
        self.inner.close_active();
    }

    fn set_close_observer(&self, observer: CloseObserver) {
        let sink = Rc::clone(&self.sink);
        let closed = self.i18n.tr("console-modal-closed");
        self.inner.set_close_observer(Rc::new(move || {
            sink(&closed);
            observer();
        }));
    }

    fn set_pending_notice(&self, notice: Option<&str>) {
        if let Some(notice) = notice {
            let line = self
                .i18n
                .tr_with_args("console-modal-notice", &[("notice", FluentValue::from(notice))]);
            (self.sink)(&line);
        }
        self.inner.set_pending_notice(notice);
    }
}

impl fmt::Debug for ConsoleModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleModal")
            .field("inner", &self.inner)
            .field("locale", self.i18n.current_locale())
            .finish()
    }
}

/// Host channel that prints every relayed value.
pub struct StdoutChannel {
    i18n: Rc<I18n>,
    sink: LineSink,
}

impl StdoutChannel {
    #[must_use]
    pub fn new(i18n: Rc<I18n>) -> Self {
        Self::with_sink(i18n, stdout_sink())
    }

    #[must_use]
    pub fn with_sink(i18n: Rc<I18n>, sink: LineSink) -> Self {
        Self { i18n, sink }
    }
}

impl HostChannel for StdoutChannel {
    fn send_input(&self, input_id: &str, value: &AlertValue) {
        let line = self.i18n.tr_with_args(
            "console-host-input",
            &[
                ("input", FluentValue::from(input_id)),
                ("value", FluentValue::from(value.to_string())),
            ],
        );
        (self.sink)(&line);
    }
}

/// How often [`ConsoleHost`] rechecks the queue while it waits.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Simulated user interaction, handled by the console rather than the adapter.
#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ConsoleInput {
    Respond {
        #[serde(default)]
        value: AlertValue,
    },
}

/// Drives a [`ConsoleModal`] and a [`HostAdapter`] from JSON input lines.
///
/// `{"action":"respond","value":...}` answers a dialog as the user would.
/// Every other line is a host message for the adapter. Must run inside a
/// [`tokio::task::LocalSet`].
pub struct ConsoleHost<H: HostChannel + 'static> {
    modal: ConsoleModal,
    adapter: HostAdapter<ConsoleModal, H>,
}

impl<H: HostChannel + 'static> ConsoleHost<H> {
    /// `modal` must be the primitive wrapped by the adapter's queue.
    #[must_use]
    pub fn new(modal: ConsoleModal, adapter: HostAdapter<ConsoleModal, H>) -> Self {
        Self { modal, adapter }
    }

    #[must_use]
    pub fn adapter(&self) -> &HostAdapter<ConsoleModal, H> {
        &self.adapter
    }

    /// Handles one input line. Blank lines are skipped, rejected host
    /// messages are printed.
    pub async fn handle_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if let Ok(ConsoleInput::Respond { value }) = serde_json::from_str(line) {
            self.respond(value).await;
        } else if let Err(e) = self.adapter.handle_json(line) {
            self.modal.report_rejected(&e.to_string());
        }
    }

    /// Answers the next dialog to become visible.
    ///
    /// While a close is settling in front of pending alerts the answer waits
    /// for the next one to show. With nothing visible or pending it is
    /// dropped and reported.
    pub async fn respond(&self, value: AlertValue) -> bool {
        let queue = self.adapter.queue();
        while !self.modal.headless().is_visible()
            && queue.is_closing()
            && queue.pending_count() > 0
        {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        self.modal.respond(value)
    }

    /// Waits until nothing can change without further input: no close is
    /// settling and no auto-dismiss timer is counting down.
    ///
    /// A visible alert without a timer stays up.
    pub async fn drain(&self) {
        while self.adapter.queue().is_closing() || self.adapter.has_armed_timers() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl<H: HostChannel + 'static> fmt::Debug for ConsoleHost<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleHost")
            .field("modal", &self.modal)
            .field("queue", self.adapter.queue())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn capture() -> (LineSink, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let store = Rc::clone(&lines);
        let sink: LineSink = Rc::new(move |line: &str| store.borrow_mut().push(line.to_string()));
        (sink, lines)
    }

    #[test]
    fn console_modal_prints_show_notice_and_close() {
        let (sink, lines) = capture();
        let modal = ConsoleModal::with_sink(Rc::new(I18n::fallback()), sink);
        modal.set_close_observer(Rc::new(|| {}));

        let config = AlertConfig::titled("Saved").with("text", "All changes stored");
        modal.show(&config, Box::new(|_| {}));
        modal.set_pending_notice(Some("1 unread alert"));
        modal.close_active();

        assert_eq!(
            *lines.borrow(),
            vec![
                "[alert] Saved".to_string(),
                "  All changes stored".to_string(),
                "[1 unread alert]".to_string(),
                "[alert closed]".to_string(),
            ]
        );
        assert!(!modal.headless().is_visible());
    }

    #[test]
    fn untitled_dialog_uses_placeholder() {
        let (sink, lines) = capture();
        let modal = ConsoleModal::with_sink(Rc::new(I18n::fallback()), sink);
        modal.show(&AlertConfig::new(), Box::new(|_| {}));
        assert_eq!(lines.borrow()[0], "[alert] (untitled)");
    }

    #[test]
    fn respond_without_dialog_is_reported() {
        let (sink, lines) = capture();
        let modal = ConsoleModal::with_sink(Rc::new(I18n::fallback()), sink);
        assert!(!modal.respond(AlertValue::from(true)));
        assert_eq!(lines.borrow()[0], "[no alert is visible]");
    }

    #[test]
    fn stdout_channel_prints_input_and_value() {
        let (sink, lines) = capture();
        let channel = StdoutChannel::with_sink(Rc::new(I18n::fallback()), sink);
        channel.send_input("confirm_delete", &AlertValue::from("yes"));
        assert_eq!(lines.borrow()[0], "[host] confirm_delete <- \"yes\"");
    }
}
