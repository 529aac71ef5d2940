//! HTTP-level integration tests for the agent-facing `/internal/task`
//! endpoints: claiming, result submission and reconciliation with the
//! parent expression.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use calc_api::router::build_app_router;
use calc_api::state::AppState;
use calc_core::evaluation::{self, EvalError};
use calc_core::store::TaskStore;
use calc_core::task::TaskTemplate;
use calc_core::types::{Operation, Task};
use common::{body_json, get, post_json, post_raw, send};

/// Build an app whose generated tasks use the given template.
fn app_with_template(template: TaskTemplate) -> (AppState, axum::Router) {
    let config = common::test_config();
    let state = AppState {
        store: Arc::new(TaskStore::with_template(template)),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state.clone(), &config);
    (state, app)
}

async fn submit_expression(app: &axum::Router, text: &str) -> String {
    let json = body_json(
        post_json(
            app.clone(),
            "/api/v1/calculate",
            serde_json::json!({"expression": text}),
        )
        .await,
    )
    .await;
    json["id"].as_str().unwrap().to_string()
}

async fn claim(app: &axum::Router) -> Task {
    let response = get(app.clone(), "/internal/task").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    serde_json::from_value(json["task"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Claim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claim_on_empty_queue_returns_404() {
    let (_state, app) = common::build_test_app();
    let response = get(app, "/internal/task").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_TASKS");
    assert_eq!(json["error"], "no tasks");
}

#[tokio::test]
async fn claimed_task_has_wire_shape_and_references_parent() {
    let (_state, app) = common::build_test_app();
    let id = submit_expression(&app, "anything").await;

    let response = get(app, "/internal/task").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let task = &json["task"];

    assert!(task["id"].is_string());
    assert_eq!(task["expression_id"], id.as_str());
    assert_eq!(task["arg1"], 2.0);
    assert_eq!(task["arg2"], 2.0);
    assert_eq!(task["operation"], "*");
    assert_eq!(task["operation_time"], 0);
}

#[tokio::test]
async fn task_is_claimed_only_once() {
    let (_state, app) = common::build_test_app();
    submit_expression(&app, "x").await;

    claim(&app).await;
    let response = get(app, "/internal/task").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn claim_leaves_expression_pending() {
    let (_state, app) = common::build_test_app();
    let id = submit_expression(&app, "x").await;
    claim(&app).await;

    let json = body_json(get(app, &format!("/api/v1/expressions/{id}")).await).await;
    assert_eq!(json["expression"]["status"], "pending");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_claims_deliver_one_task_once() {
    const N: usize = 16;
    let (_state, app) = common::build_test_app();
    submit_expression(&app, "only one").await;

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { get(app, "/internal/task").await.status() })
        })
        .collect();

    let mut ok = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::NOT_FOUND => not_found += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(not_found, N - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_create_independent_tasks() {
    const M: usize = 20;
    let (state, app) = common::build_test_app();

    let handles: Vec<_> = (0..M)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { submit_expression(&app, &format!("{i} + {i}")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), M);
    assert_eq!(state.store.pending_count().await, M);

    let mut task_ids = HashSet::new();
    for _ in 0..M {
        let task = claim(&app).await;
        assert!(ids.contains(&task.expression_id));
        task_ids.insert(task.id);
    }
    assert_eq!(task_ids.len(), M);
}

#[tokio::test]
async fn task_with_unsupported_method_returns_405() {
    let (_state, app) = common::build_test_app();
    let response = send(
        app,
        Method::DELETE,
        "/internal/task",
        axum::body::Body::empty(),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Submit result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn round_trip_two_plus_two() {
    let (_state, app) = app_with_template(TaskTemplate {
        arg1: 2.0,
        arg2: 2.0,
        operation: Operation::Add,
        operation_time: 0,
    });
    let id = submit_expression(&app, "2 + 2").await;

    let task = claim(&app).await;
    assert_eq!(task.expression_id, id);
    assert_eq!(task.operation, Operation::Add);
    let result = evaluation::evaluate(&task).unwrap();

    let response = post_json(
        app.clone(),
        "/internal/task",
        serde_json::json!({"id": task.id, "result": result}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("/api/v1/expressions/{id}")).await).await;
    assert_eq!(json["expression"]["status"], "done");
    assert_eq!(json["expression"]["result"], 4.0);
}

#[tokio::test]
async fn resubmission_returns_404_and_keeps_first_result() {
    let (_state, app) = common::build_test_app();
    let id = submit_expression(&app, "2 * 2").await;
    let task = claim(&app).await;

    let first = post_json(
        app.clone(),
        "/internal/task",
        serde_json::json!({"id": task.id, "result": 4.0}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        app.clone(),
        "/internal/task",
        serde_json::json!({"id": task.id, "result": 5.0}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    let json = body_json(second).await;
    assert_eq!(json["error"], "task not found");

    let json = body_json(get(app, &format!("/api/v1/expressions/{id}")).await).await;
    assert_eq!(json["expression"]["status"], "done");
    assert_eq!(json["expression"]["result"], 4.0);
}

#[tokio::test]
async fn submit_for_unknown_task_returns_404() {
    let (_state, app) = common::build_test_app();
    let response = post_json(
        app,
        "/internal/task",
        serde_json::json!({"id": "never-claimed", "result": 1.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn submit_with_malformed_json_returns_422() {
    let (_state, app) = common::build_test_app();
    let response = post_raw(app.clone(), "/internal/task", "not json").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json(
        app,
        "/internal/task",
        serde_json::json!({"id": "t", "result": "four"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn division_by_zero_leaves_expression_pending() {
    let (state, app) = app_with_template(TaskTemplate {
        arg1: 1.0,
        arg2: 0.0,
        operation: Operation::Divide,
        operation_time: 0,
    });
    let id = submit_expression(&app, "1 / 0").await;

    let task = claim(&app).await;
    assert_eq!(evaluation::evaluate(&task), Err(EvalError::DivisionByZero));
    // The agent submits nothing on evaluation failure.

    let json = body_json(get(app.clone(), &format!("/api/v1/expressions/{id}")).await).await;
    assert_eq!(json["expression"]["status"], "pending");
    assert_eq!(json["expression"]["result"], 0.0);

    assert_eq!(state.store.pending_count().await, 0);
    assert_eq!(state.store.in_flight_count().await, 1);
    assert_eq!(
        get(app, "/internal/task").await.status(),
        StatusCode::NOT_FOUND
    );
}
