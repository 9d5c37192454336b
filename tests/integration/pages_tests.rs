//! Integration tests for site page rendering and negotiated error responses.

use axum::http::StatusCode;
use serde_json::Value;

use super::test_utils::*;

// =============================================================================
// Site Pages
// =============================================================================

#[tokio::test]
async fn test_homepage_renders_unauthenticated() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/").build()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("OpenCourse"));
    assert!(body.contains("Log In"));
    assert!(!body.contains("Log Out"));
}

#[tokio::test]
async fn test_index_aliases_render_homepage() {
    let (router, _store, _curriculum) = build_default_app();

    for path in ["/index", "/index.html"] {
        let response = send(&router, TestRequest::get(path).build()).await;
        assert_eq!(response.status(), StatusCode::OK, "alias {} failed", path);
        let body = body_string(response).await;
        assert!(body.contains("Learn to code"));
    }
}

#[tokio::test]
async fn test_catalogue_lists_scanned_courses() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/catalogue").build()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Python"));
    // The fixture has one readable course and one broken directory
    assert_eq!(body.matches("course-card").count(), 1);
}

#[tokio::test]
async fn test_marketing_pages_render() {
    let (router, _store, _curriculum) = build_default_app();

    for path in ["/pricing", "/about", "/tos", "/privacy"] {
        let response = send(&router, TestRequest::get(path).build()).await;
        assert_eq!(response.status(), StatusCode::OK, "page {} failed", path);
    }
}

#[tokio::test]
async fn test_account_forms_render() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/login").build()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("/api/v1/user/auth"));

    let response = send(&router, TestRequest::get("/signup").build()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("/api/v1/user/create"));
}

#[tokio::test]
async fn test_ping() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/ping").build()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "All Good :)");
}

// =============================================================================
// Negotiated 404s
// =============================================================================

#[tokio::test]
async fn test_unknown_route_renders_html_error_page() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/no-such-page").accept("text/html").build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_string(response).await;
    assert!(body.contains("404"));
    assert!(body.contains("ERR_PAGE_NOT_FOUND"));
    // handlebars escapes the apostrophe in the rendered message
    assert!(body.contains("Seems like this page doesn&#x27;t exist."));
}

#[tokio::test]
async fn test_unknown_route_without_accept_header_gets_html() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(&router, TestRequest::get("/no-such-page").build()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("<html"));
}

#[tokio::test]
async fn test_unknown_route_json() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/no-such-page")
            .accept("application/json")
            .build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], 404);
    assert_eq!(body["code"], "ERR_PAGE_NOT_FOUND");
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn test_unknown_route_plain_text() {
    let (router, _store, _curriculum) = build_default_app();

    let response = send(
        &router,
        TestRequest::get("/no-such-page").accept("text/csv").build(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Not Found");
}
