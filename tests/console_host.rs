// SPDX-License-Identifier: MPL-2.0
//! Console host driven by input lines on virtual time.

use std::cell::RefCell;
use std::rc::Rc;

use alert_queue::adapter::{CallbackRegistry, HostAdapter};
use alert_queue::i18n::fluent::I18n;
use alert_queue::infrastructure::{ConsoleHost, ConsoleModal, LineSink, StdoutChannel};
use alert_queue::queue::{AlertQueue, QueueOptions};
use tokio::task::LocalSet;

type Lines = Rc<RefCell<Vec<String>>>;

fn console() -> (ConsoleHost<StdoutChannel>, Lines) {
    let lines: Lines = Rc::new(RefCell::new(Vec::new()));
    let store = Rc::clone(&lines);
    let sink: LineSink = Rc::new(move |line: &str| store.borrow_mut().push(line.to_string()));

    let i18n = Rc::new(I18n::fallback());
    let modal = ConsoleModal::with_sink(Rc::clone(&i18n), Rc::clone(&sink));
    let queue = AlertQueue::with_i18n(modal.clone(), QueueOptions::default(), Rc::clone(&i18n));
    let adapter = HostAdapter::new(
        queue,
        StdoutChannel::with_sink(i18n, sink),
        CallbackRegistry::new(),
    );
    (ConsoleHost::new(modal, adapter), lines)
}

async fn feed(host: &ConsoleHost<StdoutChannel>, input: &[&str]) {
    for line in input {
        host.handle_line(line).await;
    }
    host.drain().await;
}

#[tokio::test(start_paused = true)]
async fn readme_sequence_runs_the_timer_to_completion() {
    LocalSet::new()
        .run_until(async {
            let (host, lines) = console();
            feed(
                &host,
                &[
                    r#"{"action":"show","title":"First","cbid":"first"}"#,
                    r#"{"action":"show","title":"Second","timer":1000,"cbid":"second"}"#,
                    r#"{"action":"respond","value":true}"#,
                ],
            )
            .await;

            assert_eq!(
                *lines.borrow(),
                vec![
                    "[alert] First",
                    "[1 unread alert]",
                    "[alert closed]",
                    "[host] first <- true",
                    "[alert] Second",
                    "[alert closed]",
                    "[host] second <- false",
                ]
            );
            let queue = host.adapter().queue();
            assert_eq!(queue.active_id(), None);
            assert!(!queue.is_closing());
            assert!(!host.adapter().has_armed_timers());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn answers_wait_for_the_next_alert_to_show() {
    LocalSet::new()
        .run_until(async {
            let (host, lines) = console();
            feed(
                &host,
                &[
                    r#"{"action":"show","title":"A","cbid":"a"}"#,
                    r#"{"action":"show","title":"B","cbid":"b"}"#,
                    r#"{"action":"show","title":"C","cbid":"c"}"#,
                    r#"{"action":"respond","value":true}"#,
                    r#"{"action":"respond","value":"x"}"#,
                    r#"{"action":"respond","value":3}"#,
                ],
            )
            .await;

            assert_eq!(
                *lines.borrow(),
                vec![
                    "[alert] A",
                    "[1 unread alert]",
                    "[2 unread alerts]",
                    "[alert closed]",
                    "[host] a <- true",
                    "[alert] B",
                    "[1 unread alert]",
                    "[alert closed]",
                    "[host] b <- \"x\"",
                    "[alert] C",
                    "[alert closed]",
                    "[host] c <- 3",
                ]
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn answer_with_nothing_queued_is_reported() {
    LocalSet::new()
        .run_until(async {
            let (host, lines) = console();
            feed(
                &host,
                &[
                    r#"{"action":"show","title":"A","cbid":"a"}"#,
                    r#"{"action":"respond","value":true}"#,
                    r#"{"action":"respond","value":false}"#,
                    "",
                    r#"{"action":"bogus"}"#,
                ],
            )
            .await;

            let lines = lines.borrow();
            assert_eq!(lines[3], "[no alert is visible]");
            assert!(lines[4].starts_with("[rejected] "));
            assert_eq!(lines.len(), 5);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn untimed_alert_stays_visible_after_drain() {
    LocalSet::new()
        .run_until(async {
            let (host, lines) = console();
            feed(
                &host,
                &[
                    r#"{"action":"show","title":"A"}"#,
                    r#"{"action":"show","title":"B"}"#,
                    r#"{"action":"close"}"#,
                ],
            )
            .await;

            assert_eq!(
                *lines.borrow(),
                vec!["[alert] A", "[1 unread alert]", "[alert closed]", "[alert] B"]
            );
            assert!(host.adapter().queue().active_id().is_some());
        })
        .await;
}
