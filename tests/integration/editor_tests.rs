//! Integration tests for the lesson editor view.

use axum::http::StatusCode;
use serde_json::Value;

use super::test_utils::*;

#[tokio::test]
async fn test_editor_renders_existing_lesson() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/editor/python/001/001").build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"data-course="python""#));
    assert!(body.contains(r#"data-chapter="001""#));
    assert!(body.contains(r#"data-lesson="001""#));
    // Course metadata is embedded for the editor scripts
    assert!(body.contains("window.lessonMeta"));
    assert!(body.contains("Python"));
}

#[tokio::test]
async fn test_editor_missing_lesson_is_404() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/editor/python/001/999")
            .accept("application/json")
            .build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["code"], "ERR_PAGE_NOT_FOUND");
}

#[tokio::test]
async fn test_editor_unknown_course_is_404() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/editor/rust/001/001").build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_editor_traversal_segments_rejected() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/editor/..%2F..%2Fpython/001/001").build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_editor_incomplete_path_falls_through_to_404() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/editor/python/001").build()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
