//! Tests for the fan-out reducer.

use std::num::ParseIntError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use proptest::prelude::*;

use super::*;

fn parse_and_multiply(expr: &str) -> Result<u64, ParseIntError> {
    let (a, b) = expr
        .trim_start_matches("mul(")
        .trim_end_matches(')')
        .split_once(',')
        .unwrap_or((expr, ""));
    Ok(a.parse::<u64>()? * b.parse::<u64>()?)
}

#[test]
fn test_sum_of_products() {
    let items = vec!["mul(2,3)", "mul(4,5)"];
    let reduction = FanOut::new().sum(items, parse_and_multiply).unwrap();

    assert_eq!(reduction.aggregate, 26);
    assert_eq!(reduction.evaluated, 2);
    assert!(reduction.skipped.is_empty());
}

#[test]
fn test_count_true_reduction() {
    let safety = vec![true, false, true, true];
    assert_eq!(FanOut::new().count_true(safety, |safe| safe), 3);
}

#[test]
fn test_empty_input_returns_identity() {
    let reduction = FanOut::new()
        .reduce(Vec::<u32>::new(), 17u64, |n| Ok::<_, ParseIntError>(n), |a, _| a + 1)
        .unwrap();
    assert_eq!(reduction.aggregate, 17);
    assert_eq!(reduction.dispatched(), 0);

    assert_eq!(FanOut::new().count_true(Vec::<u8>::new(), |_| true), 0);
}

#[test]
fn test_evaluate_called_once_per_item() {
    let calls = AtomicUsize::new(0);
    let items: Vec<u64> = (1..=200).collect();

    let reduction = FanOut::with_threads(4)
        .unwrap()
        .sum(items, |n| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok::<_, ParseIntError>(n)
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), 200);
    assert_eq!(reduction.aggregate, 200 * 201 / 2);
    assert_eq!(reduction.dispatched(), 200);
}

#[test]
fn test_fail_fast_returns_typed_error() {
    let items = vec!["mul(2,3)", "mul(x,5)", "mul(4,5)"];
    let err = FanOut::new().sum(items, parse_and_multiply).unwrap_err();

    assert_eq!(err.index, 1);
    assert!(err.to_string().starts_with("work item 1 failed"));
}

#[test]
fn test_fail_fast_cancels_items_not_yet_started() {
    let evaluated = AtomicUsize::new(0);
    // A single worker runs items one at a time: whichever runs first fails
    // and every later item sees the cancellation flag
    let fan_out = FanOut::with_threads(1).unwrap();
    let items: Vec<usize> = (0..50).collect();

    let result = fan_out.sum(items, |n| {
        evaluated.fetch_add(1, Ordering::Relaxed);
        Err::<usize, _>(format!("item {n} rejected"))
    });

    let err = result.unwrap_err();
    assert_eq!(err.error, format!("item {} rejected", err.index));
    assert_eq!(evaluated.load(Ordering::Relaxed), 1);
}

#[test]
fn test_skip_policy_counts_failures_without_sentinels() {
    let items = vec!["mul(2,3)", "mul(x,5)", "mul(4,5)", "mul(1,)"];
    let reduction = FanOut::new()
        .policy(FailurePolicy::Skip)
        .sum(items, parse_and_multiply)
        .unwrap();

    assert_eq!(reduction.aggregate, 26);
    assert_eq!(reduction.evaluated, 2);
    let mut skipped: Vec<usize> = reduction.skipped.iter().map(|e| e.index).collect();
    skipped.sort_unstable();
    assert_eq!(skipped, vec![1, 3]);
    assert_eq!(reduction.dispatched(), 4);
}

#[test]
fn test_results_folded_in_arrival_order() {
    // Earlier items sleep longer, so they tend to arrive last
    let items: Vec<u64> = (0..8).collect();
    let reduction = FanOut::with_threads(8)
        .unwrap()
        .reduce(
            items,
            Vec::new(),
            |n| {
                thread::sleep(Duration::from_millis((8 - n) * 5));
                Ok::<_, ParseIntError>(n)
            },
            |mut seen, n| {
                seen.push(n);
                seen
            },
        )
        .unwrap();

    let mut seen = reduction.aggregate;
    assert_eq!(seen.len(), 8);
    seen.sort_unstable();
    assert_eq!(seen, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_borrowed_items_and_nested_pools() {
    let text = String::from("1 2 3\n4 5 6\n7 8 9");
    let lines: Vec<&str> = text.lines().collect();
    let outer = FanOut::with_threads(2).unwrap();

    let reduction = outer
        .sum(lines, |line| {
            let fields: Vec<&str> = line.split(' ').collect();
            FanOut::new()
                .sum(fields, |f| f.parse::<u32>())
                .map(Reduction::into_aggregate)
                .map_err(|e| e.error)
        })
        .unwrap();

    assert_eq!(reduction.aggregate, 45);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sum_matches_sequential(values in prop::collection::vec(0u64..1_000, 0..64)) {
        let expected: u64 = values.iter().sum();
        let fan_out = FanOut::with_threads(3).unwrap();

        for _ in 0..3 {
            let reduction = fan_out
                .sum(values.clone(), Ok::<_, ParseIntError>)
                .unwrap();
            prop_assert_eq!(reduction.aggregate, expected);
            prop_assert_eq!(reduction.dispatched(), values.len());
        }
    }

    #[test]
    fn prop_skip_accounts_for_every_item(values in prop::collection::vec(-50i32..50, 0..64)) {
        let reduction = FanOut::new()
            .policy(FailurePolicy::Skip)
            .sum(values.clone(), |v| if v < 0 { Err(format!("negative {v}")) } else { Ok(v) })
            .unwrap();

        let negatives = values.iter().filter(|v| **v < 0).count();
        let expected: i32 = values.iter().filter(|v| **v >= 0).sum();
        prop_assert_eq!(reduction.aggregate, expected);
        prop_assert_eq!(reduction.skipped.len(), negatives);
        prop_assert_eq!(reduction.dispatched(), values.len());
    }
}
