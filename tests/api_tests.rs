// tests/api_tests.rs
// End-to-end checks of the task API through the router


use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use taskquip::commentary::prompt;
use taskquip::tasks::EventType;
use test_helpers::{create_test_app, send, send_raw, BrokenGenerator, CannedGenerator, SlowGenerator};

fn is_fallback(event_type: EventType, text: &str) -> bool {
    prompt::fallbacks(event_type).contains(&text)
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let (app, store) = create_test_app(None).await;

    for title in ["", "   ", "\t \n"] {
        let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": title }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required");
    }

    let (status, body) = send(&app, "POST", "/tasks", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_task_returns_201_with_comment() {
    let (app, store) = create_test_app(Some(Arc::new(CannedGenerator("Milk. Sure.")))).await;

    let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": "Buy milk" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["status"], "todo");
    assert_eq!(body["ai_text"], "Milk. Sure.");
    assert!(body["created_at"].is_string());

    let id = body["id"].as_i64().unwrap();
    let comments = store.list_comments(id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].event_type, EventType::Created);
}

#[tokio::test]
async fn test_create_without_credential_uses_fallback() {
    let (app, _store) = create_test_app(None).await;

    for _ in 0..5 {
        let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": "Buy milk" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let text = body["ai_text"].as_str().unwrap();
        assert!(!text.is_empty());
        assert!(is_fallback(EventType::Created, text), "unexpected text: {}", text);
    }
}

#[tokio::test]
async fn test_generator_failure_is_not_an_http_error() {
    let (app, store) = create_test_app(Some(Arc::new(BrokenGenerator))).await;

    let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": "Fix bike" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(is_fallback(EventType::Created, body["ai_text"].as_str().unwrap()));

    let id = body["id"].as_i64().unwrap();
    assert_eq!(store.list_comments(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_dropped_create_request_still_stores_comment() {
    let generator = SlowGenerator {
        delay: Duration::from_millis(300),
        text: "Took you long enough.",
    };
    let (app, store) = create_test_app(Some(Arc::new(generator))).await;

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "Walk dog" }).to_string()))
        .unwrap();

    // The client gives up while the comment is still being generated
    let outcome = tokio::time::timeout(Duration::from_millis(50), app.clone().oneshot(request)).await;
    assert!(outcome.is_err());

    let mut comments = Vec::new();
    for _ in 0..40 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if let Some(task) = store.list().await.unwrap().first() {
            comments = store.list_comments(task.id).await.unwrap();
            if !comments.is_empty() {
                break;
            }
        }
    }

    assert_eq!(store.list().await.unwrap().len(), 1);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].event_type, EventType::Created);
    assert_eq!(comments[0].ai_text, "Took you long enough.");
}

#[tokio::test]
async fn test_dropped_complete_request_still_stores_comment() {
    let generator = SlowGenerator {
        delay: Duration::from_millis(300),
        text: "Finally.",
    };
    let (app, store) = create_test_app(Some(Arc::new(generator))).await;
    let task = store.create("Mow lawn").await.unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tasks/{}", task.id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "done" }).to_string()))
        .unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(50), app.clone().oneshot(request)).await;
    assert!(outcome.is_err());

    let mut comments = Vec::new();
    for _ in 0..40 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        comments = store.list_comments(task.id).await.unwrap();
        if !comments.is_empty() {
            break;
        }
    }

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].event_type, EventType::Completed);
    assert_eq!(comments[0].ai_text, "Finally.");
}

#[tokio::test]
async fn test_complete_unknown_task_is_404() {
    let (app, store) = create_test_app(None).await;

    let (status, body) = send(&app, "PUT", "/tasks/999", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert!(store.list_comments(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_task_appends_one_completed_comment() {
    let (app, _store) = create_test_app(None).await;

    let (_, created) = send(&app, "POST", "/tasks", Some(json!({ "title": "Pay rent" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/tasks/{}", id), Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");
    assert!(is_fallback(EventType::Completed, body["ai_text"].as_str().unwrap()));

    let (status, comments) = send(&app, "GET", &format!("/tasks/{}/ai-comments", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["event_type"], "created");
    assert_eq!(comments[1]["event_type"], "completed");
    assert_eq!(comments[1]["ai_text"], body["ai_text"]);
}

#[tokio::test]
async fn test_put_without_body_means_done() {
    let (app, _store) = create_test_app(None).await;

    let (_, created) = send(&app, "POST", "/tasks", Some(json!({ "title": "Sweep" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");
}

#[tokio::test]
async fn test_put_other_status_keeps_latest_comment() {
    let (app, store) = create_test_app(None).await;

    let (_, created) = send(&app, "POST", "/tasks", Some(json!({ "title": "Iron shirts" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, "PUT", &format!("/tasks/{}", id), Some(json!({ "status": "later" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "todo");
    assert_eq!(body["ai_text"], created["ai_text"]);
    assert_eq!(store.list_comments(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_is_newest_first_with_latest_comment() {
    let (app, _store) = create_test_app(None).await;

    let (_, first) = send(&app, "POST", "/tasks", Some(json!({ "title": "first" }))).await;
    let (_, second) = send(&app, "POST", "/tasks", Some(json!({ "title": "second" }))).await;
    let first_id = first["id"].as_i64().unwrap();
    let (_, done) = send(&app, "PUT", &format!("/tasks/{}", first_id), Some(json!({ "status": "done" }))).await;

    let (status, body) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], second["id"]);
    assert_eq!(tasks[1]["id"], first["id"]);
    assert_eq!(tasks[1]["status"], "done");
    assert_eq!(tasks[1]["ai_text"], done["ai_text"]);
}

#[tokio::test]
async fn test_delete_removes_task_from_list() {
    let (app, store) = create_test_app(None).await;

    let (_, created) = send(&app, "POST", "/tasks", Some(json!({ "title": "Temporary" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, list) = send(&app, "GET", "/tasks", None).await;
    assert!(list.as_array().unwrap().is_empty());
    assert!(store.list_comments(id).await.unwrap().is_empty());

    // Unknown ids still succeed
    let (status, body) = send(&app, "DELETE", "/tasks/12345", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_comments_for_unknown_task_is_empty() {
    let (app, _store) = create_test_app(None).await;

    let (status, body) = send(&app, "GET", "/tasks/77/ai-comments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, store) = create_test_app(None).await;

    let (status, body) = send_raw(&app, "POST", "/tasks", "{\"title\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let (app, _store) = create_test_app(None).await;

    let (status, _) = send(&app, "PUT", "/tasks/abc", Some(json!({ "status": "done" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_fallback_mode() {
    let (app, _store) = create_test_app(None).await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
    assert_eq!(body["commentary"], "fallback");
    assert_eq!(body["model"], "gemini-2.5-flash");
}
