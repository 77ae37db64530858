// core/tests/cancellation.rs

//! The fork contract: single settlement, cancellation, re-execution.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tealoop::{Task, TeaError};
use tokio::time::sleep;

const SETTLE_WAIT: Duration = Duration::from_millis(100);

#[tokio::test]
async fn fork_invokes_the_success_callback_exactly_once() {
  common::setup_tracing();
  let successes = Arc::new(AtomicUsize::new(0));
  let failures = Arc::new(AtomicUsize::new(0));

  let task = Task::<TeaError, i32>::succeed(5);
  let s = successes.clone();
  let f = failures.clone();
  task.fork(
    move |_error| {
      f.fetch_add(1, Ordering::SeqCst);
    },
    move |_value| {
      s.fetch_add(1, Ordering::SeqCst);
    },
  );

  sleep(SETTLE_WAIT).await;
  assert_eq!(successes.load(Ordering::SeqCst), 1);
  assert_eq!(failures.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fork_invokes_the_failure_callback_on_rejection() {
  common::setup_tracing();
  let successes = Arc::new(AtomicUsize::new(0));
  let failures = Arc::new(AtomicUsize::new(0));

  let task = Task::<TeaError, i32>::fail(TeaError::Effect("rejected".into()));
  let s = successes.clone();
  let f = failures.clone();
  task.fork(
    move |error| {
      assert!(matches!(error, TeaError::Effect(ref m) if m == "rejected"));
      f.fetch_add(1, Ordering::SeqCst);
    },
    move |_value| {
      s.fetch_add(1, Ordering::SeqCst);
    },
  );

  sleep(SETTLE_WAIT).await;
  assert_eq!(failures.load(Ordering::SeqCst), 1);
  assert_eq!(successes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cancel_before_settlement_suppresses_both_callbacks() {
  common::setup_tracing();
  let succeeded = Arc::new(AtomicBool::new(false));
  let failed = Arc::new(AtomicBool::new(false));

  let task: Task<TeaError, i32> = Task::perform(|| async {
    sleep(Duration::from_millis(250)).await;
    5
  });

  let s = succeeded.clone();
  let f = failed.clone();
  let handle = task.fork(
    move |_error| f.store(true, Ordering::SeqCst),
    move |_value| s.store(true, Ordering::SeqCst),
  );

  sleep(Duration::from_millis(20)).await;
  handle.cancel();
  // Cancellation is idempotent.
  handle.cancel();

  sleep(Duration::from_millis(400)).await;
  assert!(!succeeded.load(Ordering::SeqCst), "success callback fired after cancel");
  assert!(!failed.load(Ordering::SeqCst), "failure callback fired after cancel");
  assert!(handle.is_settled());
}

#[tokio::test]
async fn cancel_after_settlement_is_a_noop() {
  common::setup_tracing();
  let succeeded = Arc::new(AtomicBool::new(false));

  let task = Task::<TeaError, i32>::succeed(1);
  let s = succeeded.clone();
  let handle = task.fork(|_error| {}, move |_value| s.store(true, Ordering::SeqCst));

  sleep(SETTLE_WAIT).await;
  assert!(succeeded.load(Ordering::SeqCst));
  handle.cancel();
  assert!(handle.is_settled());
}

#[tokio::test]
async fn executing_again_after_settlement_reruns_the_computation() {
  common::setup_tracing();
  let runs = Arc::new(AtomicUsize::new(0));
  let probe = runs.clone();
  let task: Task<TeaError, usize> = Task::perform(move || {
    let probe = probe.clone();
    async move { probe.fetch_add(1, Ordering::SeqCst) + 1 }
  });

  assert_eq!(task.run().await.unwrap(), 1);
  assert_eq!(task.run().await.unwrap(), 2);
  assert_eq!(runs.load(Ordering::SeqCst), 2);
}
