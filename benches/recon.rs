use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use wallet_recon::{Amount, ShortfallPolicy, TopUp, Transfer, reconcile};

const ACCOUNT: &str = "driver-1";

/// Deterministic wallet history of the given size.
///
/// Pattern per four events (repeating):
/// 1. Paid top-up of 100
/// 2. Promotional top-up of 25
/// 3. Incoming transfer of 40
/// 4. Outgoing transfer of 15
///
/// Credits outweigh debits, so the aggregate stays positive.
fn history(events: usize) -> (Vec<TopUp>, Vec<Transfer>) {
    let mut top_ups = Vec::new();
    let mut transfers = Vec::new();

    for n in 0..events {
        match n % 4 {
            0 => top_ups.push(TopUp {
                amount: Amount::from_float(100.0),
                discounted: false,
            }),
            1 => top_ups.push(TopUp {
                amount: Amount::from_float(25.0),
                discounted: true,
            }),
            2 => transfers.push(Transfer {
                amount: Amount::from_float(40.0),
                discounted: false,
                sender: Some("other".to_string()),
                receiver: Some(ACCOUNT.to_string()),
            }),
            _ => transfers.push(Transfer {
                amount: Amount::from_float(15.0),
                discounted: false,
                sender: Some(ACCOUNT.to_string()),
                receiver: Some("other".to_string()),
            }),
        }
    }

    (top_ups, transfers)
}

fn bench_history_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_size");

    for events in [1_000usize, 10_000, 100_000] {
        let (top_ups, transfers) = history(events);
        // Stored total well below the aggregate: exercises the scale-down path
        let total = Amount::from_float(events as f64 * 10.0);

        group.bench_with_input(BenchmarkId::from_parameter(events), &events, |b, _| {
            b.iter(|| {
                black_box(reconcile(
                    &top_ups,
                    &transfers,
                    total,
                    ACCOUNT,
                    ShortfallPolicy::Actual,
                ))
            });
        });
    }

    group.finish();
}

fn bench_reconciliation_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");

    let events = 10_000usize;
    let (top_ups, transfers) = history(events);
    // Each group of four events nets 100 + 25 + 40 - 15 = 150
    let aggregate = Amount::from_float(events as f64 / 4.0 * 150.0);

    let cases = [
        ("matched", aggregate),
        ("scale_down", Amount::from_float(events as f64 * 10.0)),
        ("shortfall", aggregate + Amount::from_float(50_000.0)),
    ];

    for (name, total) in cases {
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(reconcile(
                    &top_ups,
                    &transfers,
                    total,
                    ACCOUNT,
                    ShortfallPolicy::Actual,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_history_sizes, bench_reconciliation_paths);
criterion_main!(benches);
