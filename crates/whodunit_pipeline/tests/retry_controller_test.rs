//! Tests for the bounded retry loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use whodunit_error::{ServiceError, ServiceErrorKind, WhodunitResult};
use whodunit_pipeline::{Expectation, RetryController, Shape, StageOutcome};

fn reply(text: &str) -> WhodunitResult<String> {
    Ok(text.to_string())
}

#[tokio::test]
async fn test_unparsable_replies_degrade_after_three_calls() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("premise", &Expectation::structured(Shape::Object), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { reply(&format!("抱歉，第{n}次也没有结构")) }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome, StageOutcome::Degraded("抱歉，第3次也没有结构".to_string()));
}

#[tokio::test]
async fn test_malformed_then_valid_reply_validates_on_third_call() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("roster", &Expectation::structured(Shape::Array), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match n {
                    0 => reply("我先想一想"),
                    1 => reply("角色有：林雪、刀鱼哥"),
                    _ => reply("好的：[\"林雪\", \"刀鱼哥\"]"),
                }
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        outcome,
        StageOutcome::Validated(serde_json::json!(["林雪", "刀鱼哥"]))
    );
}

#[tokio::test]
async fn test_service_errors_are_retried() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("clues", &Expectation::structured(Shape::Object), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(ServiceError::new(ServiceErrorKind::RateLimit).into())
                } else {
                    reply("{\"s\": {\"场景名称\": \"Hall\", \"线索\": []}}")
                }
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(outcome.is_validated());
}

#[tokio::test]
async fn test_service_never_answering_degrades_to_empty_text() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("discussion", &Expectation::structured(Shape::Object), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<String, _>(
                    ServiceError::new(ServiceErrorKind::Http("timeout".to_string())).into(),
                )
            }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome, StageOutcome::Degraded(String::new()));
}

#[tokio::test]
async fn test_fallback_is_last_text_reply_even_if_service_failed_after() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("premise", &Expectation::structured(Shape::Object), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    reply("只有文字")
                } else {
                    Err(ServiceError::new(ServiceErrorKind::EmptyResponse).into())
                }
            }
        })
        .await;

    assert_eq!(outcome, StageOutcome::Degraded("只有文字".to_string()));
}

#[tokio::test]
async fn test_custom_attempt_budget() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::new(5);

    let outcome = controller
        .run("premise", &Expectation::structured(Shape::Object), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { reply("no") }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert!(!outcome.is_validated());
}

#[tokio::test]
async fn test_free_text_validates_first_time() {
    let calls = AtomicUsize::new(0);
    let controller = RetryController::default();

    let outcome = controller
        .run("character", &Expectation::Text, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { reply("## 林雪\n你是一名心理医生。") }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(outcome.is_validated());
}
