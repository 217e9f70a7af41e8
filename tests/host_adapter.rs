// SPDX-License-Identifier: MPL-2.0
//! Host adapter scenarios: timers, keys, callbacks and relaying.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use alert_queue::adapter::{CallbackRegistry, HostAdapter, HostMessage};
use alert_queue::application::port::HostChannel;
use alert_queue::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector, HostEvent};
use alert_queue::domain::alert::{AlertId, AlertValue};
use alert_queue::infrastructure::HeadlessModal;
use alert_queue::queue::{AlertQueue, QueueOptions};
use serde_json::Value;
use tokio::task::LocalSet;

#[derive(Clone, Default)]
struct Inputs(Rc<RefCell<Vec<(String, AlertValue)>>>);

impl HostChannel for Inputs {
    fn send_input(&self, input_id: &str, value: &AlertValue) {
        self.0.borrow_mut().push((input_id.to_string(), value.clone()));
    }
}

type Calls = Rc<RefCell<Vec<(AlertValue, Value)>>>;

fn setup() -> (HeadlessModal, HostAdapter<HeadlessModal, Inputs>, Inputs, Calls) {
    let modal = HeadlessModal::new();
    let queue = AlertQueue::new(modal.clone(), QueueOptions::default());
    let inputs = Inputs::default();
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&calls);
    let mut registry = CallbackRegistry::new();
    registry.register("record", move |value, args| {
        sink.borrow_mut().push((value.clone(), args.clone()));
    });

    let adapter = HostAdapter::new(queue, inputs.clone(), registry);
    (modal, adapter, inputs, calls)
}

async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn timer_is_noop_after_user_closed_alert() {
    LocalSet::new()
        .run_until(async {
            let (modal, adapter, inputs, _) = setup();
            let a = adapter
                .handle_json(r#"{"action":"show","title":"A","timer":1000,"cbid":"a"}"#)
                .expect("ok")
                .expect("id");
            assert!(adapter.has_armed_timer(a));

            wait_ms(300).await;
            assert!(modal.respond(AlertValue::from(true)));
            assert!(!adapter.has_armed_timer(a));

            // Something else is visible by the time A's timer would fire.
            adapter
                .handle_json(r#"{"action":"show","title":"B"}"#)
                .expect("ok");
            wait_ms(1000).await;

            assert_eq!(modal.visible_title().as_deref(), Some("B"));
            assert_eq!(
                *inputs.0.borrow(),
                vec![("a".to_string(), AlertValue::from(true))]
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn timer_dismisses_visible_alert() {
    LocalSet::new()
        .run_until(async {
            let (modal, adapter, inputs, _) = setup();
            let a = adapter
                .handle_json(r#"{"action":"show","title":"A","timer":500,"cbid":"a"}"#)
                .expect("ok")
                .expect("id");

            wait_ms(499).await;
            assert!(adapter.queue().is_active(a));
            wait_ms(2).await;

            assert!(!modal.is_visible());
            assert_eq!(
                *inputs.0.borrow(),
                vec![("a".to_string(), AlertValue::dismissed())]
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn cancelled_pending_alert_never_arms_its_timer() {
    LocalSet::new()
        .run_until(async {
            let (modal, adapter, _, calls) = setup();
            adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
            let b = adapter
                .handle_json(r#"{"action":"show","title":"B","timer":100,"callback":"record","key":"b"}"#)
                .expect("ok")
                .expect("id");

            adapter.handle_json(r#"{"action":"close","key":"b"}"#).expect("ok");
            adapter.handle_json(r#"{"action":"close"}"#).expect("ok");
            wait_ms(1000).await;

            assert!(!adapter.queue().contains(b));
            assert!(!adapter.has_armed_timer(b));
            assert_eq!(modal.shown_titles(), vec!["A".to_string()]);
            assert!(calls.borrow().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn named_callback_receives_value_and_args() {
    LocalSet::new()
        .run_until(async {
            let (modal, adapter, _, calls) = setup();
            adapter
                .handle_json(
                    r#"{"action":"show","title":"Rename","callback":{"name":"record","args":{"row":3}}}"#,
                )
                .expect("ok");

            modal.respond(AlertValue::from("new-name"));
            assert_eq!(
                *calls.borrow(),
                vec![(AlertValue::from("new-name"), serde_json::json!({"row": 3}))]
            );
        })
        .await;
}

#[test]
fn input_id_takes_precedence_over_named_callback() {
    let (_modal, adapter, inputs, calls) = setup();
    adapter.handle_json(r#"{"action":"show","title":"A"}"#).expect("ok");
    adapter
        .handle_json(r#"{"action":"show","title":"B","cbid":"b","callback":"record"}"#)
        .expect("ok");

    adapter
        .handle_json(r#"{"action":"dismiss","id":2,"value":false}"#)
        .expect("ok");
    assert_eq!(*inputs.0.borrow(), vec![("b".to_string(), AlertValue::from(false))]);
    assert!(calls.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dismiss_by_key_targets_active_alert() {
    LocalSet::new()
        .run_until(async {
            let (_modal, adapter, _, calls) = setup();
            let a = adapter
                .handle_json(r#"{"action":"show","title":"A","key":"job","callback":"record"}"#)
                .expect("ok");

            let dismissed = adapter
                .handle_json(r#"{"action":"dismiss","key":"job","value":"cancelled"}"#)
                .expect("ok");
            assert_eq!(dismissed, a);
            assert_eq!(adapter.id_for_key("job"), None);
            assert_eq!(calls.borrow()[0].0, AlertValue::from("cancelled"));
        })
        .await;
}

#[test]
fn typed_messages_bypass_json() {
    let (_modal, adapter, _, _) = setup();
    let message: HostMessage =
        serde_json::from_value(serde_json::json!({"action": "show", "title": "typed"}))
            .expect("valid message");
    assert_eq!(adapter.handle(message).expect("ok"), Some(AlertId::new(1)));
}

#[tokio::test(start_paused = true)]
async fn host_events_reach_diagnostics() {
    LocalSet::new()
        .run_until(async {
            let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
            let (_modal, adapter, _, _) = setup();
            adapter.set_diagnostics(collector.handle());

            let a = adapter
                .handle_json(r#"{"action":"show","title":"A","timer":10,"cbid":"a"}"#)
                .expect("ok")
                .expect("id");
            assert!(adapter.handle_json("not json").is_err());
            wait_ms(11).await;
            collector.process_pending();

            let events: Vec<HostEvent> = collector
                .kinds()
                .into_iter()
                .filter_map(|kind| match kind {
                    DiagnosticEventKind::Host { event } => Some(event),
                    _ => None,
                })
                .collect();

            assert_eq!(
                events[0],
                HostEvent::MessageReceived {
                    action: "show".into()
                }
            );
            assert_eq!(events[1], HostEvent::TimerArmed { id: a, delay_ms: 10 });
            assert!(matches!(events[2], HostEvent::MessageRejected { .. }));
            assert_eq!(
                events[3],
                HostEvent::ResponseRelayed { input: "a".into() }
            );
            assert_eq!(events[4], HostEvent::TimerFired { id: a, acted: true });
        })
        .await;
}
