// SPDX-License-Identifier: MPL-2.0
//! Host response channel port.
//!
//! The host application learns the outcome of an alert through this channel.
//! Which input a value lands on is chosen by the host when it sends the show
//! request.

use crate::domain::alert::AlertValue;
use std::rc::Rc;

/// Delivers alert results back to the host application.
pub trait HostChannel {
    /// Publishes `value` on the host input named `input_id`.
    fn send_input(&self, input_id: &str, value: &AlertValue);
}

impl<H: HostChannel + ?Sized> HostChannel for Rc<H> {
    fn send_input(&self, input_id: &str, value: &AlertValue) {
        (**self).send_input(input_id, value);
    }
}
