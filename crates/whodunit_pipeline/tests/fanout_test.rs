//! Tests for the ordered concurrent map.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use whodunit_pipeline::map_concurrent;

#[tokio::test]
async fn test_order_preserved_when_tasks_finish_in_reverse() {
    let inputs = vec!["A", "B", "C", "D"];
    let finished = std::sync::Mutex::new(Vec::new());

    let outputs = map_concurrent(inputs, 4, |idx, name| {
        let finished = &finished;
        async move {
            tokio::time::sleep(Duration::from_millis(10 * (4 - idx as u64))).await;
            finished.lock().unwrap().push(name);
            format!("bio-{name}")
        }
    })
    .await;

    assert_eq!(outputs, vec!["bio-A", "bio-B", "bio-C", "bio-D"]);
    assert_eq!(*finished.lock().unwrap(), vec!["D", "C", "B", "A"]);
}

#[tokio::test]
async fn test_failure_does_not_cancel_siblings() {
    let outputs = map_concurrent(vec![1, 2, 3], 3, |_, n| async move {
        if n == 2 {
            Err(format!("task {n} failed"))
        } else {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(n * 10)
        }
    })
    .await;

    assert_eq!(outputs, vec![Ok(10), Err("task 2 failed".to_string()), Ok(30)]);
}

#[tokio::test]
async fn test_concurrency_is_capped() {
    let in_flight = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    let outputs = map_concurrent((0..8).collect(), 2, |_, n: u32| {
        let (in_flight, peak) = (&in_flight, &peak);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            n
        }
    })
    .await;

    assert_eq!(outputs, (0..8).collect::<Vec<_>>());
    assert_eq!(peak.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_zero_limit_still_runs_sequentially() {
    let in_flight = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    let outputs = map_concurrent(vec!["x", "y"], 0, |_, s| {
        let (in_flight, peak) = (&in_flight, &peak);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            s.to_uppercase()
        }
    })
    .await;

    assert_eq!(outputs, vec!["X", "Y"]);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_input() {
    let outputs: Vec<u8> = map_concurrent(Vec::<u8>::new(), 4, |_, n| async move { n }).await;
    assert!(outputs.is_empty());
}
