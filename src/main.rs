// SPDX-License-Identifier: MPL-2.0
//! Console host for the alert queue.
//!
//! Reads one JSON message per line from stdin. Host messages (`show`,
//! `close`, `dismiss`) go to the adapter; `{"action":"respond","value":...}`
//! answers the next visible dialog as a user would. At end of input the host
//! waits for settling closes and running auto-dismiss timers.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use alert_queue::adapter::{CallbackRegistry, HostAdapter};
use alert_queue::config::{self, Config};
use alert_queue::diagnostics::DiagnosticsCollector;
use alert_queue::i18n::fluent::I18n;
use alert_queue::infrastructure::{ConsoleHost, ConsoleModal, StdoutChannel};
use alert_queue::queue::AlertQueue;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

const HELP: &str = "\
alert_queue: show queued alerts from JSON lines on stdin

USAGE:
  alert_queue [OPTIONS] < messages.jsonl

OPTIONS:
  --lang <id>           UI language (en-US, fr)
  --config <path>       settings file to use instead of the default one
  --settling-ms <n>     delay between a close and the next alert
  --diagnostics <path>  write a JSON diagnostics report on exit
  -h, --help            print this help
";

struct Flags {
    lang: Option<String>,
    config: Option<PathBuf>,
    settling_ms: Option<u64>,
    diagnostics: Option<PathBuf>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config: args.opt_value_from_str("--config")?,
        settling_ms: args.opt_value_from_str("--settling-ms")?,
        diagnostics: args.opt_value_from_str("--diagnostics")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("alert_queue: ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Config {
    let loaded = match &flags.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("alert_queue: using default settings: {e}");
        Config::default()
    });
    if let Some(ms) = flags.settling_ms {
        config.settling_delay_ms = ms;
    }
    config
}

fn default_registry() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    registry.register("echo", |value, args| {
        if args.is_null() {
            println!("[echo] {value}");
        } else {
            println!("[echo] {value} {args}");
        }
    });
    registry
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("alert_queue: {e}");
            eprint!("{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let config = load_config(&flags);
    let i18n = Rc::new(I18n::new(flags.lang.clone(), &config));
    let mut collector = DiagnosticsCollector::new(config.diagnostics_capacity());

    let modal = ConsoleModal::new(Rc::clone(&i18n));
    let queue = AlertQueue::with_i18n(modal.clone(), config.queue_options(), Rc::clone(&i18n));
    queue.set_diagnostics(collector.handle());

    let adapter = HostAdapter::new(queue, StdoutChannel::new(Rc::clone(&i18n)), default_registry());
    adapter.set_diagnostics(collector.handle());
    let host = ConsoleHost::new(modal, adapter);

    let local = LocalSet::new();
    let read_result = local
        .run_until(async {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                host.handle_line(&line).await;
                collector.process_pending();
            }
            host.drain().await;
            Ok::<(), std::io::Error>(())
        })
        .await;

    let mut status = ExitCode::SUCCESS;
    if let Err(e) = read_result {
        eprintln!("alert_queue: failed to read stdin: {e}");
        collector.handle().log_error(format!("failed to read stdin: {e}"));
        status = ExitCode::FAILURE;
    }

    collector.process_pending();
    if let Some(path) = &flags.diagnostics {
        match collector.export_to_file(path) {
            Ok(written) => eprintln!("alert_queue: diagnostics written to {}", written.display()),
            Err(e) => {
                eprintln!("alert_queue: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    status
}
