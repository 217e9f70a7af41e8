// SPDX-License-Identifier: MPL-2.0
use alert_queue::domain::alert::{AlertConfig, AlertId, AlertValue};
use alert_queue::infrastructure::HeadlessModal;
use alert_queue::queue::{AlertQueue, DisplayArgs, QueueOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn fill(queue: &AlertQueue<HeadlessModal>, count: usize) -> Vec<AlertId> {
    (0..count)
        .map(|i| {
            let args = DisplayArgs::new(AlertConfig::titled(format!("alert {i}")))
                .with_callback(|value| {
                    black_box(value);
                });
            queue.enqueue(args)
        })
        .collect()
}

fn queue_throughput_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_throughput");

    for count in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("enqueue", count), &count, |b, &count| {
            b.iter(|| {
                let queue = AlertQueue::new(HeadlessModal::new(), QueueOptions::default());
                black_box(fill(&queue, count));
            });
        });

        // Removes waiting alerts back to front; none of them is ever shown.
        group.bench_with_input(
            BenchmarkId::new("cancel_pending", count),
            &count,
            |b, &count| {
                b.iter(|| {
                    let queue = AlertQueue::new(HeadlessModal::new(), QueueOptions::default());
                    let ids = fill(&queue, count);
                    for id in ids.iter().skip(1).rev() {
                        black_box(queue.close_and_fire_callback(Some(*id), AlertValue::dismissed()));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, queue_throughput_benchmark);
criterion_main!(benches);
