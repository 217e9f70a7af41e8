// SPDX-License-Identifier: MPL-2.0
//! Queue bookkeeping without side effects.
//!
//! [`QueueState`] only moves requests between the pending queue and the
//! active slot. Calling the modal primitive, firing callbacks and scheduling
//! the settling delay is left to [`AlertQueue`](super::AlertQueue), which
//! never holds a borrow of this state while doing so.

use super::request::{AlertRequest, CallbackSlot, DisplayArgs};
use crate::domain::alert::{AlertId, SlotPhase};
use std::collections::VecDeque;

/// The alert currently visible.
#[derive(Debug)]
pub(crate) struct ActiveAlert {
    id: AlertId,
    correlation_key: Option<String>,
    callback: CallbackSlot,
}

impl ActiveAlert {
    pub(crate) fn new(id: AlertId, correlation_key: Option<String>, callback: CallbackSlot) -> Self {
        Self {
            id,
            correlation_key,
            callback,
        }
    }

    pub(crate) fn id(&self) -> AlertId {
        self.id
    }

    pub(crate) fn correlation_key(&self) -> Option<&str> {
        self.correlation_key.as_deref()
    }
}

/// Where a close request landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Located {
    Active(AlertId),
    Pending(AlertId),
    Missing,
}

/// Pending queue, active slot, closing flag and id counter.
///
/// # Invariants
///
/// - `active` holds at most one alert and its id is never in `pending`.
/// - `next_id` only grows; ids are never handed out twice.
/// - While `closing` is set, `active` is empty and nothing may be installed.
#[derive(Debug)]
pub(crate) struct QueueState {
    pending: VecDeque<AlertRequest>,
    active: Option<ActiveAlert>,
    closing: bool,
    next_id: AlertId,
}

impl Default for QueueState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueState {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            active: None,
            closing: false,
            next_id: AlertId::FIRST,
        }
    }

    /// Wraps `args` in a request carrying a fresh id.
    pub(crate) fn mint(&mut self, args: DisplayArgs) -> AlertRequest {
        let id = self.next_id;
        self.next_id = id.next();
        AlertRequest::new(id, args)
    }

    /// True when nothing is visible and no close is settling.
    pub(crate) fn can_activate(&self) -> bool {
        self.active.is_none() && !self.closing
    }

    pub(crate) fn push_pending(&mut self, request: AlertRequest) {
        self.pending.push_back(request);
    }

    pub(crate) fn install_active(&mut self, active: ActiveAlert) {
        debug_assert!(self.can_activate(), "active slot is occupied");
        self.active = Some(active);
    }

    /// Resolves a close target. `None` means "whatever is active".
    pub(crate) fn locate(&self, target: Option<AlertId>) -> Located {
        match (target, &self.active) {
            (None, Some(active)) => Located::Active(active.id),
            (None, None) => Located::Missing,
            (Some(id), Some(active)) if active.id == id => Located::Active(id),
            (Some(id), _) if self.pending.iter().any(|r| r.id() == id) => Located::Pending(id),
            (Some(_), _) => Located::Missing,
        }
    }

    /// Removes a pending request, keeping the order of the others.
    pub(crate) fn remove_pending(&mut self, id: AlertId) -> Option<AlertRequest> {
        let pos = self.pending.iter().position(|r| r.id() == id)?;
        self.pending.remove(pos)
    }

    /// Returns a handle on the active alert's callback without detaching it.
    pub(crate) fn active_callback(&self) -> Option<CallbackSlot> {
        self.active.as_ref().map(|active| active.callback.clone())
    }

    /// `Active → ClosingTransition`. Returns the alert that just closed.
    pub(crate) fn begin_closing(&mut self) -> Option<ActiveAlert> {
        let closed = self.active.take()?;
        self.closing = true;
        Some(closed)
    }

    /// `ClosingTransition → Idle`. Returns the next request to activate.
    pub(crate) fn finish_closing(&mut self) -> Option<AlertRequest> {
        self.closing = false;
        if self.can_activate() {
            self.pending.pop_front()
        } else {
            None
        }
    }

    pub(crate) fn phase(&self) -> SlotPhase {
        match (&self.active, self.closing) {
            (Some(active), _) => SlotPhase::Active(active.id),
            (None, true) => SlotPhase::Closing,
            (None, false) => SlotPhase::Idle,
        }
    }

    pub(crate) fn active_id(&self) -> Option<AlertId> {
        self.active.as_ref().map(ActiveAlert::id)
    }

    pub(crate) fn active_key(&self) -> Option<&str> {
        self.active.as_ref().and_then(ActiveAlert::correlation_key)
    }

    pub(crate) fn pending_ids(&self) -> Vec<AlertId> {
        self.pending.iter().map(AlertRequest::id).collect()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_pending(&self, id: AlertId) -> bool {
        self.pending.iter().any(|r| r.id() == id)
    }

    pub(crate) fn is_closing(&self) -> bool {
        self.closing
    }

    #[cfg(test)]
    pub(crate) fn next_id(&self) -> AlertId {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::AlertConfig;

    fn args(title: &str) -> DisplayArgs {
        DisplayArgs::new(AlertConfig::titled(title))
    }

    fn activate(state: &mut QueueState, request: AlertRequest) {
        let id = request.id();
        let (_, slot, key) = request.into_parts();
        state.install_active(ActiveAlert::new(id, key, slot));
    }

    #[test]
    fn new_state_is_idle_and_starts_at_one() {
        let state = QueueState::new();
        assert_eq!(state.phase(), SlotPhase::Idle);
        assert_eq!(state.next_id(), AlertId::FIRST);
        assert!(state.can_activate());
    }

    #[test]
    fn minted_ids_strictly_increase() {
        let mut state = QueueState::new();
        let a = state.mint(args("a")).id();
        let b = state.mint(args("b")).id();
        let c = state.mint(args("c")).id();
        assert_eq!((a.value(), b.value(), c.value()), (1, 2, 3));
    }

    #[test]
    fn locate_prefers_active_then_pending() {
        let mut state = QueueState::new();
        let first = state.mint(args("a"));
        activate(&mut state, first);
        let second = state.mint(args("b"));
        state.push_pending(second);

        assert_eq!(state.locate(None), Located::Active(AlertId::new(1)));
        assert_eq!(state.locate(Some(AlertId::new(1))), Located::Active(AlertId::new(1)));
        assert_eq!(state.locate(Some(AlertId::new(2))), Located::Pending(AlertId::new(2)));
        assert_eq!(state.locate(Some(AlertId::new(99))), Located::Missing);
    }

    #[test]
    fn locate_without_target_on_idle_is_missing() {
        let state = QueueState::new();
        assert_eq!(state.locate(None), Located::Missing);
    }

    #[test]
    fn remove_pending_keeps_relative_order() {
        let mut state = QueueState::new();
        for title in ["a", "b", "c", "d"] {
            let request = state.mint(args(title));
            state.push_pending(request);
        }

        let removed = state.remove_pending(AlertId::new(2)).expect("pending");
        assert_eq!(removed.id(), AlertId::new(2));
        assert_eq!(
            state.pending_ids(),
            vec![AlertId::new(1), AlertId::new(3), AlertId::new(4)]
        );
        assert!(state.remove_pending(AlertId::new(2)).is_none());
    }

    #[test]
    fn closing_blocks_activation_until_finished() {
        let mut state = QueueState::new();
        let first = state.mint(args("a"));
        activate(&mut state, first);
        let second = state.mint(args("b"));
        state.push_pending(second);

        let closed = state.begin_closing().expect("active alert");
        assert_eq!(closed.id(), AlertId::new(1));
        assert_eq!(state.phase(), SlotPhase::Closing);
        assert!(!state.can_activate());
        assert!(state.begin_closing().is_none());

        let next = state.finish_closing().expect("pending alert");
        assert_eq!(next.id(), AlertId::new(2));
        assert_eq!(state.phase(), SlotPhase::Idle);
        assert_eq!(state.pending_len(), 0);
    }

    #[test]
    fn finish_closing_with_empty_queue_goes_idle() {
        let mut state = QueueState::new();
        let first = state.mint(args("a"));
        activate(&mut state, first);
        state.begin_closing();

        assert!(state.finish_closing().is_none());
        assert!(state.can_activate());
        assert!(!state.is_closing());
    }

    #[test]
    fn active_key_and_callback_are_exposed() {
        let mut state = QueueState::new();
        let request = state.mint(args("a").with_callback(|_| {}).with_correlation_key("key"));
        activate(&mut state, request);

        assert_eq!(state.active_key(), Some("key"));
        let slot = state.active_callback().expect("active");
        assert!(!slot.is_spent());
    }
}
