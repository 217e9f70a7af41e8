// SPDX-License-Identifier: MPL-2.0
//! The alert queue service.
//!
//! [`AlertQueue`] wraps a [`ModalPrimitive`] that can only show one dialog at
//! a time. It hands out ids, shows requests in FIFO order, removes pending
//! requests on demand, and waits for the settling delay after every close
//! before showing the next one.
//!
//! # Runtime
//!
//! The settling delay is a `tokio::task::spawn_local` task, so any call that
//! may close the active alert must run inside a [`tokio::task::LocalSet`].
//! Scheduled tasks only hold a weak reference: dropping the last queue handle
//! turns them into no-ops.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use super::request::{AlertRequest, CallbackSlot, DisplayArgs};
use super::state::{ActiveAlert, Located, QueueState};
use crate::application::port::{ModalPrimitive, ResultCallback};
use crate::diagnostics::{DiagnosticsHandle, QueueEvent};
use crate::domain::alert::{AlertId, AlertValue, SettlingDelay, SlotPhase};
use crate::i18n::fluent::I18n;

/// Tunables of one queue instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueOptions {
    /// Wait between a close and the next activation.
    pub settling_delay: SettlingDelay,
    /// Whether the visible dialog shows the "N unread alerts" notice.
    pub show_pending_message: bool,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            settling_delay: SettlingDelay::default(),
            show_pending_message: true,
        }
    }
}

/// What a close request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    /// The visible alert was closed through the primitive.
    ClosedActive(AlertId),
    /// A waiting alert was dropped from the queue; it was never shown.
    RemovedPending(AlertId),
    /// Nothing matched. Closing twice lands here.
    NotFound,
}

impl CloseOutcome {
    /// Returns the affected alert, if any.
    #[must_use]
    pub fn id(self) -> Option<AlertId> {
        match self {
            Self::ClosedActive(id) | Self::RemovedPending(id) => Some(id),
            Self::NotFound => None,
        }
    }
}

/// Lifecycle notifications delivered to [`AlertQueue::subscribe`] listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The alert is now visible.
    Activated(AlertId),
    /// The visible alert closed; the settling delay is running.
    Closed(AlertId),
    /// A pending alert was removed before it was ever shown.
    Cancelled(AlertId),
}

type Listener = Rc<dyn Fn(&Transition)>;

struct Inner<M> {
    state: RefCell<QueueState>,
    modal: M,
    options: QueueOptions,
    i18n: Rc<I18n>,
    listeners: RefCell<Vec<Listener>>,
    diagnostics: RefCell<Option<DiagnosticsHandle>>,
}

/// Serializes alerts onto a single-dialog modal primitive.
///
/// Cloning yields another handle to the same queue.
///
/// # Example
///
/// ```
/// use alert_queue::domain::alert::{AlertConfig, AlertId};
/// use alert_queue::infrastructure::HeadlessModal;
/// use alert_queue::queue::{AlertQueue, DisplayArgs, QueueOptions};
///
/// let modal = HeadlessModal::new();
/// let queue = AlertQueue::new(modal.clone(), QueueOptions::default());
///
/// let first = queue.enqueue(DisplayArgs::new(AlertConfig::titled("First")));
/// let second = queue.enqueue(DisplayArgs::new(AlertConfig::titled("Second")));
///
/// assert_eq!(first, AlertId::new(1));
/// assert_eq!(queue.active_id(), Some(first));
/// assert_eq!(queue.pending_ids(), vec![second]);
/// assert_eq!(modal.pending_notice().as_deref(), Some("1 unread alert"));
/// ```
pub struct AlertQueue<M: ModalPrimitive + 'static> {
    inner: Rc<Inner<M>>,
}

impl<M: ModalPrimitive + 'static> Clone for AlertQueue<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning handle; see [`AlertQueue::downgrade`].
pub struct WeakAlertQueue<M: ModalPrimitive + 'static> {
    inner: Weak<Inner<M>>,
}

impl<M: ModalPrimitive + 'static> Clone for WeakAlertQueue<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<M: ModalPrimitive + 'static> WeakAlertQueue<M> {
    /// Returns the queue if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<AlertQueue<M>> {
        self.inner.upgrade().map(|inner| AlertQueue { inner })
    }
}

impl<M: ModalPrimitive + 'static> AlertQueue<M> {
    /// Creates a queue with the built-in English notice text.
    #[must_use]
    pub fn new(modal: M, options: QueueOptions) -> Self {
        Self::with_i18n(modal, options, Rc::new(I18n::fallback()))
    }

    /// Creates a queue whose pending notice is localized by `i18n`.
    ///
    /// Registers the queue's close observer on `modal`.
    #[must_use]
    pub fn with_i18n(modal: M, options: QueueOptions, i18n: Rc<I18n>) -> Self {
        let inner = Rc::new(Inner {
            state: RefCell::new(QueueState::new()),
            modal,
            options,
            i18n,
            listeners: RefCell::new(Vec::new()),
            diagnostics: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        inner.modal.set_close_observer(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                AlertQueue { inner }.on_modal_closed();
            }
        }));

        Self { inner }
    }

    /// Sets the diagnostics handle for logging lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *self.inner.diagnostics.borrow_mut() = Some(handle);
    }

    /// Registers a listener for activations, closes and cancellations.
    ///
    /// Listeners run after the queue has released its internal state, so they
    /// may call back into the queue.
    pub fn subscribe(&self, listener: impl Fn(&Transition) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Returns a handle that does not keep the queue alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakAlertQueue<M> {
        WeakAlertQueue {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns the wrapped primitive.
    #[must_use]
    pub fn modal(&self) -> &M {
        &self.inner.modal
    }

    #[must_use]
    pub fn options(&self) -> QueueOptions {
        self.inner.options
    }

    // --- Operations ---

    /// Queues a dialog and returns its id.
    ///
    /// The dialog is shown at once when nothing is visible and no close is
    /// settling; otherwise it waits behind the already pending ones. Either
    /// way the id is returned immediately and is the only handle for a later
    /// [`close`](Self::close).
    pub fn enqueue(&self, args: DisplayArgs) -> AlertId {
        let (id, ready) = {
            let mut state = self.inner.state.borrow_mut();
            let request = state.mint(args);
            let id = request.id();
            if state.can_activate() {
                (id, Some(request))
            } else {
                state.push_pending(request);
                (id, None)
            }
        };

        self.log(QueueEvent::Enqueued {
            id,
            queued: ready.is_none(),
        });

        match ready {
            Some(request) => self.activate(request),
            None => self.refresh_pending_notice(),
        }
        id
    }

    /// Closes an alert without running its callback.
    ///
    /// - `None`, or the active id: the primitive closes the visible dialog and
    ///   the settling delay starts.
    /// - A pending id: the request is dropped from the queue and never shown.
    /// - Anything else: nothing happens.
    ///
    /// # Panics
    ///
    /// Closing the visible alert schedules the settling delay with
    /// `tokio::task::spawn_local`, which panics outside a
    /// [`tokio::task::LocalSet`]. Removing a pending alert does not.
    pub fn close(&self, id: Option<AlertId>) -> CloseOutcome {
        let outcome = match self.take_target(id) {
            Target::Active(active_id, _) => {
                self.close_active(active_id);
                CloseOutcome::ClosedActive(active_id)
            }
            Target::Pending(request) => {
                let removed = request.id();
                drop(request);
                self.after_pending_removed(removed);
                CloseOutcome::RemovedPending(removed)
            }
            Target::Missing => CloseOutcome::NotFound,
        };

        self.log(QueueEvent::CloseRequested {
            target: id,
            outcome,
            fire_callback: false,
        });
        outcome
    }

    /// Closes an alert like [`close`](Self::close), then runs its callback
    /// with `value`.
    ///
    /// The callback runs at most once over the alert's lifetime: if the user
    /// already answered, or this is a repeated call, it is not run again.
    ///
    /// # Panics
    ///
    /// Closing the visible alert schedules the settling delay with
    /// `tokio::task::spawn_local`, which panics outside a
    /// [`tokio::task::LocalSet`]. Removing a pending alert does not.
    pub fn close_and_fire_callback(&self, id: Option<AlertId>, value: AlertValue) -> CloseOutcome {
        let outcome = match self.take_target(id) {
            Target::Active(active_id, callback) => {
                self.close_active(active_id);
                if callback.fire(value) {
                    self.log(QueueEvent::CallbackFired { id: active_id });
                }
                CloseOutcome::ClosedActive(active_id)
            }
            Target::Pending(request) => {
                let removed = request.id();
                let callback = request.into_callback();
                self.after_pending_removed(removed);
                if let Some(callback) = callback {
                    callback(value);
                    self.log(QueueEvent::CallbackFired { id: removed });
                }
                CloseOutcome::RemovedPending(removed)
            }
            Target::Missing => CloseOutcome::NotFound,
        };

        self.log(QueueEvent::CloseRequested {
            target: id,
            outcome,
            fire_callback: true,
        });
        outcome
    }

    // --- State Queries ---

    /// Returns the phase of the display slot.
    #[must_use]
    pub fn phase(&self) -> SlotPhase {
        self.inner.state.borrow().phase()
    }

    /// Returns the id of the visible alert.
    #[must_use]
    pub fn active_id(&self) -> Option<AlertId> {
        self.inner.state.borrow().active_id()
    }

    /// Returns the correlation key of the visible alert.
    #[must_use]
    pub fn active_correlation_key(&self) -> Option<String> {
        self.inner.state.borrow().active_key().map(str::to_owned)
    }

    /// Returns the waiting ids in display order.
    #[must_use]
    pub fn pending_ids(&self) -> Vec<AlertId> {
        self.inner.state.borrow().pending_ids()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.state.borrow().pending_len()
    }

    #[must_use]
    pub fn is_active(&self, id: AlertId) -> bool {
        self.active_id() == Some(id)
    }

    #[must_use]
    pub fn is_pending(&self, id: AlertId) -> bool {
        self.inner.state.borrow().is_pending(id)
    }

    /// Returns true while a close is settling.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.inner.state.borrow().is_closing()
    }

    /// Returns true if the alert is visible or waiting.
    #[must_use]
    pub fn contains(&self, id: AlertId) -> bool {
        self.is_active(id) || self.is_pending(id)
    }

    // --- Internals ---

    fn take_target(&self, id: Option<AlertId>) -> Target {
        let mut state = self.inner.state.borrow_mut();
        match state.locate(id) {
            Located::Active(active_id) => {
                let callback = state.active_callback().unwrap_or_default();
                Target::Active(active_id, callback)
            }
            Located::Pending(pending_id) => match state.remove_pending(pending_id) {
                Some(request) => Target::Pending(request),
                None => Target::Missing,
            },
            Located::Missing => Target::Missing,
        }
    }

    fn activate(&self, request: AlertRequest) {
        let id = request.id();
        let (config, callback, correlation_key) = request.into_parts();

        self.inner
            .state
            .borrow_mut()
            .install_active(ActiveAlert::new(id, correlation_key, callback.clone()));

        let on_result: ResultCallback = Box::new(move |value| {
            callback.fire(value);
        });
        self.inner.modal.show(&config, on_result);

        self.log(QueueEvent::Activated { id });
        self.refresh_pending_notice();
        self.notify(Transition::Activated(id));
    }

    fn close_active(&self, id: AlertId) {
        self.inner.modal.close_active();
        // The close observer normally ran the transition already.
        if self.is_active(id) {
            self.on_modal_closed();
        }
    }

    fn after_pending_removed(&self, id: AlertId) {
        self.refresh_pending_notice();
        self.notify(Transition::Cancelled(id));
    }

    /// `Active → ClosingTransition`, for user and programmatic closes alike.
    fn on_modal_closed(&self) {
        let closed = self.inner.state.borrow_mut().begin_closing();
        let Some(closed) = closed else {
            return;
        };
        let id = closed.id();
        drop(closed);

        self.log(QueueEvent::Closed { id });
        self.schedule_settle();
        self.notify(Transition::Closed(id));
    }

    fn schedule_settle(&self) {
        let weak = Rc::downgrade(&self.inner);
        let delay = self.inner.options.settling_delay.as_duration();
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                AlertQueue { inner }.finish_transition();
            }
        });
    }

    /// `ClosingTransition → Idle`, then activates the next pending alert.
    fn finish_transition(&self) {
        let next = self.inner.state.borrow_mut().finish_closing();
        self.log(QueueEvent::Settled {
            next: next.as_ref().map(AlertRequest::id),
        });
        match next {
            Some(request) => self.activate(request),
            None => self.refresh_pending_notice(),
        }
    }

    fn refresh_pending_notice(&self) {
        if !self.inner.options.show_pending_message {
            return;
        }
        let count = self.pending_count();
        let notice = (count > 0).then(|| self.inner.i18n.pending_notice(count));
        self.inner.modal.set_pending_notice(notice.as_deref());
    }

    fn notify(&self, transition: Transition) {
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&transition);
        }
    }

    fn log(&self, event: QueueEvent) {
        if let Some(handle) = self.inner.diagnostics.borrow().as_ref() {
            handle.log_queue(event);
        }
    }
}

impl<M: ModalPrimitive + 'static> fmt::Debug for AlertQueue<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("AlertQueue")
            .field("phase", &state.phase())
            .field("pending", &state.pending_ids())
            .field("options", &self.inner.options)
            .finish()
    }
}

enum Target {
    Active(AlertId, CallbackSlot),
    Pending(AlertRequest),
    Missing,
}
