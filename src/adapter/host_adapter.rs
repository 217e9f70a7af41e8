// SPDX-License-Identifier: MPL-2.0
//! Glue between host messages and the alert queue.
//!
//! [`HostAdapter`] turns [`HostMessage`]s into queue calls. It keeps the
//! bookkeeping the queue deliberately does not: correlation keys, auto-dismiss
//! timers, and where each alert's result goes.
//!
//! # Timers
//!
//! A timer only starts counting once its alert is visible. It carries its
//! alert id by value and, when it elapses, dismisses that alert only if it is
//! still the visible one. Timers of alerts that closed or were cancelled are
//! aborted as soon as the queue reports the transition; the check at fire
//! time covers a timer that outlives that notification.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::message::{CloseParams, DismissParams, HostMessage, ShowParams};
use super::registry::CallbackRegistry;
use crate::application::port::{HostChannel, ModalPrimitive};
use crate::diagnostics::{DiagnosticsHandle, HostEvent};
use crate::domain::alert::{AlertId, AlertValue};
use crate::error::Result;
use crate::queue::{AlertQueue, DisplayArgs, Transition, WeakAlertQueue};

#[derive(Default)]
struct Bookkeeping {
    /// Correlation key → alert.
    keys: HashMap<String, AlertId>,
    /// Timers waiting for their alert to become visible, in milliseconds.
    waiting: HashMap<AlertId, u64>,
    /// Timers counting down.
    armed: HashMap<AlertId, JoinHandle<()>>,
}

#[derive(Default)]
struct Shared {
    book: RefCell<Bookkeeping>,
    diagnostics: RefCell<Option<DiagnosticsHandle>>,
}

impl Shared {
    fn log(&self, event: HostEvent) {
        if let Some(handle) = self.diagnostics.borrow().as_ref() {
            handle.log_host(event);
        }
    }

    fn warn(&self, message: String) {
        if let Some(handle) = self.diagnostics.borrow().as_ref() {
            handle.log_warning(message);
        }
    }

    /// Drops every trace of an alert that left the queue.
    fn forget(&self, id: AlertId) {
        let armed = {
            let mut book = self.book.borrow_mut();
            book.keys.retain(|_, mapped| *mapped != id);
            book.waiting.remove(&id);
            book.armed.remove(&id)
        };
        if let Some(handle) = armed {
            handle.abort();
        }
    }
}

/// Translates host messages into [`AlertQueue`] calls.
///
/// Must be driven from inside a [`tokio::task::LocalSet`].
pub struct HostAdapter<M: ModalPrimitive + 'static, H: HostChannel + 'static> {
    queue: AlertQueue<M>,
    channel: Rc<H>,
    registry: CallbackRegistry,
    shared: Rc<Shared>,
}

impl<M: ModalPrimitive + 'static, H: HostChannel + 'static> HostAdapter<M, H> {
    /// Creates an adapter and subscribes it to `queue`.
    pub fn new(queue: AlertQueue<M>, channel: H, registry: CallbackRegistry) -> Self {
        let shared = Rc::new(Shared::default());

        let weak_shared = Rc::downgrade(&shared);
        let weak_queue = queue.downgrade();
        queue.subscribe(move |transition| {
            let Some(shared) = weak_shared.upgrade() else {
                return;
            };
            match *transition {
                Transition::Activated(id) => {
                    let delay = shared.book.borrow_mut().waiting.remove(&id);
                    if let Some(delay) = delay {
                        arm_timer(&shared, weak_queue.clone(), id, delay);
                    }
                }
                Transition::Closed(id) | Transition::Cancelled(id) => shared.forget(id),
            }
        });

        Self {
            queue,
            channel: Rc::new(channel),
            registry,
            shared,
        }
    }

    /// Sets the diagnostics handle for logging host events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *self.shared.diagnostics.borrow_mut() = Some(handle);
    }

    #[must_use]
    pub fn queue(&self) -> &AlertQueue<M> {
        &self.queue
    }

    #[must_use]
    pub fn channel(&self) -> &H {
        &self.channel
    }

    /// Returns the alert currently registered under `key`.
    #[must_use]
    pub fn id_for_key(&self, key: &str) -> Option<AlertId> {
        self.shared.book.borrow().keys.get(key).copied()
    }

    /// Returns true if a timer is counting down for `id`.
    #[must_use]
    pub fn has_armed_timer(&self, id: AlertId) -> bool {
        self.shared.book.borrow().armed.contains_key(&id)
    }

    /// Returns true if any timer is counting down.
    #[must_use]
    pub fn has_armed_timers(&self) -> bool {
        !self.shared.book.borrow().armed.is_empty()
    }

    /// Parses one JSON host message and handles it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`](crate::error::Error::Protocol) for malformed
    /// JSON and the errors of [`handle`](Self::handle).
    pub fn handle_json(&self, json: &str) -> Result<Option<AlertId>> {
        let message: HostMessage = serde_json::from_str(json).map_err(|e| {
            self.shared.log(HostEvent::MessageRejected {
                reason: e.to_string(),
            });
            e
        })?;
        self.handle(message)
    }

    /// Handles one host message.
    ///
    /// Returns the id of the shown, closed or dismissed alert, or `None` when
    /// the message matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCallback`](crate::error::Error::UnknownCallback)
    /// if a `show` names a callback that is not registered. Nothing is queued
    /// in that case.
    pub fn handle(&self, message: HostMessage) -> Result<Option<AlertId>> {
        self.shared.log(HostEvent::MessageReceived {
            action: message.action().to_string(),
        });

        let result = match message {
            HostMessage::Show(params) => self.show(params).map(Some),
            HostMessage::Close(params) => Ok(self.close(&params)),
            HostMessage::Dismiss(params) => Ok(self.dismiss(&params)),
        };

        if let Err(e) = &result {
            self.shared.log(HostEvent::MessageRejected {
                reason: e.to_string(),
            });
        }
        result
    }

    fn show(&self, params: ShowParams) -> Result<AlertId> {
        let named = match (&params.cbid, &params.callback) {
            (None, Some(descriptor)) => Some(self.registry.resolve(descriptor)?),
            _ => None,
        };

        let mut args = DisplayArgs::new(params.alert_config());
        if let Some(input) = params.cbid.clone() {
            if let Some(descriptor) = &params.callback {
                self.shared.warn(format!(
                    "callback '{}' ignored: result goes to input '{input}'",
                    descriptor.name()
                ));
            }
            let channel = Rc::clone(&self.channel);
            let shared = Rc::downgrade(&self.shared);
            args = args.with_callback(move |value| {
                channel.send_input(&input, &value);
                if let Some(shared) = shared.upgrade() {
                    shared.log(HostEvent::ResponseRelayed { input });
                }
            });
        } else if let Some(callback) = named {
            args = args.with_callback(callback);
        }
        if let Some(key) = &params.key {
            args = args.with_correlation_key(key.clone());
        }

        let id = self.queue.enqueue(args);

        let timer = params.timer_ms();
        {
            let mut book = self.shared.book.borrow_mut();
            if let Some(key) = params.key {
                book.keys.insert(key, id);
            }
            if let Some(delay) = timer {
                if !self.queue.is_active(id) {
                    book.waiting.insert(id, delay);
                }
            }
        }
        if let Some(delay) = timer {
            if self.queue.is_active(id) {
                arm_timer(&self.shared, self.queue.downgrade(), id, delay);
            }
        }

        Ok(id)
    }

    fn close(&self, params: &CloseParams) -> Option<AlertId> {
        let target = self.resolve_target(params.id, params.key.as_deref())?;
        self.queue.close(target).id()
    }

    fn dismiss(&self, params: &DismissParams) -> Option<AlertId> {
        let target = self.resolve_target(params.id, params.key.as_deref())?;
        self.queue
            .close_and_fire_callback(target, params.value_or_dismissed())
            .id()
    }

    /// `key` wins over `id`. An unknown key matches nothing; it does not
    /// fall back to the visible alert.
    fn resolve_target(&self, id: Option<AlertId>, key: Option<&str>) -> Option<Option<AlertId>> {
        match key {
            Some(key) => self.id_for_key(key).map(Some),
            None => Some(id),
        }
    }
}

fn arm_timer<M: ModalPrimitive + 'static>(
    shared: &Rc<Shared>,
    queue: WeakAlertQueue<M>,
    id: AlertId,
    delay_ms: u64,
) {
    let weak_shared = Rc::downgrade(shared);
    let handle = tokio::task::spawn_local(async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let shared = weak_shared.upgrade();
        if let Some(shared) = &shared {
            shared.book.borrow_mut().armed.remove(&id);
        }

        let acted = match queue.upgrade() {
            Some(queue) if queue.is_active(id) => {
                queue.close_and_fire_callback(Some(id), AlertValue::dismissed());
                true
            }
            _ => false,
        };

        if let Some(shared) = &shared {
            shared.log(HostEvent::TimerFired { id, acted });
        }
    });

    shared.book.borrow_mut().armed.insert(id, handle);
    shared.log(HostEvent::TimerArmed { id, delay_ms });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
    use crate::infrastructure::HeadlessModal;
    use crate::queue::QueueOptions;
    use std::cell::RefCell;
    use tokio::task::LocalSet;

    #[derive(Default)]
    struct RecordingChannel {
        sent: RefCell<Vec<(String, AlertValue)>>,
    }

    impl HostChannel for RecordingChannel {
        fn send_input(&self, input_id: &str, value: &AlertValue) {
            self.sent
                .borrow_mut()
                .push((input_id.to_string(), value.clone()));
        }
    }

    fn adapter() -> (HeadlessModal, HostAdapter<HeadlessModal, RecordingChannel>) {
        let modal = HeadlessModal::new();
        let queue = AlertQueue::new(modal.clone(), QueueOptions::default());
        let adapter = HostAdapter::new(queue, RecordingChannel::default(), CallbackRegistry::new());
        (modal, adapter)
    }

    #[test]
    fn show_returns_ids_in_order() {
        let (modal, adapter) = adapter();
        let a = adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
        let b = adapter.handle_json(r#"{"action":"show","title":"B"}"#).expect("ok");
        assert_eq!(a, Some(AlertId::new(1)));
        assert_eq!(b, Some(AlertId::new(2)));
        assert_eq!(modal.visible_title().as_deref(), Some("A"));
    }

    #[test]
    fn malformed_json_is_a_protocol_error() {
        let (_modal, adapter) = adapter();
        let result = adapter.handle_json("{\"action\":");
        assert!(matches!(result, Err(crate::error::Error::Protocol(_))));
        assert_eq!(adapter.queue().pending_count(), 0);
    }

    #[test]
    fn unknown_callback_queues_nothing() {
        let (modal, adapter) = adapter();
        let result = adapter.handle_json(r#"{"action":"show","callback":"nope"}"#);
        assert!(matches!(
            result,
            Err(crate::error::Error::UnknownCallback(name)) if name == "nope"
        ));
        assert!(modal.shown().is_empty());
    }

    #[test]
    fn close_by_key_removes_pending_alert() {
        let (_modal, adapter) = adapter();
        adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
        let b = adapter
            .handle_json(r#"{"action":"show","title":"B","key":"upload"}"#)
            .expect("ok");
        assert_eq!(adapter.id_for_key("upload"), b);

        let closed = adapter.handle_json(r#"{"action":"close","key":"upload"}"#).expect("ok");
        assert_eq!(closed, b);
        assert_eq!(adapter.queue().pending_count(), 0);
        assert_eq!(adapter.id_for_key("upload"), None);
    }

    #[test]
    fn unknown_key_matches_nothing() {
        let (modal, adapter) = adapter();
        adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
        let closed = adapter.handle_json(r#"{"action":"close","key":"ghost"}"#).expect("ok");
        assert_eq!(closed, None);
        assert_eq!(modal.close_calls(), 0);
    }

    #[test]
    fn dismissing_pending_relays_value_to_input() {
        let (_modal, adapter) = adapter();
        adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
        adapter
            .handle_json(r#"{"action":"show","title":"B","cbid":"b_result"}"#)
            .expect("ok");

        adapter
            .handle_json(r#"{"action":"dismiss","id":2,"value":"skipped"}"#)
            .expect("ok");
        assert_eq!(
            *adapter.channel().sent.borrow(),
            vec![("b_result".to_string(), AlertValue::from("skipped"))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn user_answer_is_relayed_once() {
        LocalSet::new()
            .run_until(async {
                let (modal, adapter) = adapter();
                adapter
                    .handle_json(r#"{"action":"show","title":"Delete?","cbid":"confirm"}"#)
                    .expect("ok");

                assert!(modal.respond(AlertValue::from(true)));
                adapter.handle_json(r#"{"action":"dismiss","id":1}"#).expect("ok");

                assert_eq!(
                    *adapter.channel().sent.borrow(),
                    vec![("confirm".to_string(), AlertValue::from(true))]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn timer_starts_only_when_alert_becomes_visible() {
        LocalSet::new()
            .run_until(async {
                let (modal, adapter) = adapter();
                adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
                let b = adapter
                    .handle_json(r#"{"action":"show","title":"B","timer":1000}"#)
                    .expect("ok")
                    .expect("id");
                assert!(!adapter.has_armed_timer(b));

                // A stays up longer than B's timer.
                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert!(adapter.queue().is_pending(b));

                modal.respond(AlertValue::from(true));
                tokio::time::sleep(Duration::from_millis(401)).await;
                assert!(adapter.queue().is_active(b));
                assert!(adapter.has_armed_timer(b));

                tokio::time::sleep(Duration::from_millis(1000)).await;
                assert!(!adapter.queue().contains(b));
                assert!(!adapter.has_armed_timer(b));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn timer_left_running_does_not_close_another_alert() {
        LocalSet::new()
            .run_until(async {
                let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
                let (modal, adapter) = adapter();
                adapter.set_diagnostics(collector.handle());
                let a = adapter
                    .handle_json(r#"{"action":"show","title":"A"}"#)
                    .expect("ok")
                    .expect("id");
                let b = adapter
                    .handle_json(r#"{"action":"show","title":"B","cbid":"b"}"#)
                    .expect("ok")
                    .expect("id");

                // B is still waiting when this timer elapses.
                arm_timer(&adapter.shared, adapter.queue().downgrade(), b, 10);
                tokio::time::sleep(Duration::from_millis(11)).await;
                collector.process_pending();

                assert!(adapter.queue().is_active(a));
                assert!(adapter.queue().is_pending(b));
                assert!(modal.is_visible());
                assert!(adapter.channel().sent.borrow().is_empty());
                assert!(!adapter.has_armed_timers());
                assert!(collector.kinds().contains(&DiagnosticEventKind::Host {
                    event: HostEvent::TimerFired { id: b, acted: false },
                }));
            })
            .await;
    }
}
