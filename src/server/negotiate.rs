//! Content-negotiated error presentation.
//!
//! Every error response in the platform goes through this one component: the
//! representation (HTML error page, JSON object, or plain text) is selected
//! from the request's `Accept` header, and the body always carries one of the
//! three machine codes.
//!
//! The module also provides the top-level pipeline wrapper that converts a
//! panicking handler into a content-negotiated 500.

use std::panic::AssertUnwindSafe;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use futures::FutureExt;
use serde_json::json;
use tracing::{error, warn};

use crate::user::UserStore;

use super::handlers::AppState;
use super::pages::{PageRenderer, ERROR_TEMPLATE};

// =============================================================================
// Error Taxonomy
// =============================================================================

/// The three terminal per-request error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed or duplicate input (HTTP 422)
    BadEntity,

    /// Missing resource or route (HTTP 404)
    PageNotFound,

    /// Uncaught server-side failure (HTTP 500)
    InternalServer,
}

impl ErrorCode {
    /// HTTP status for this error class.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::BadEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::PageNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::BadEntity => "ERR_BADENT",
            ErrorCode::PageNotFound => "ERR_PAGE_NOT_FOUND",
            ErrorCode::InternalServer => "ERR_INTERNAL_SERVER",
        }
    }

    /// Canonical reason phrase used for JSON and plain text bodies.
    pub fn reason(&self) -> &'static str {
        match self {
            ErrorCode::BadEntity => "Unprocessable Entity",
            ErrorCode::PageNotFound => "Not Found",
            ErrorCode::InternalServer => "Internal Server Error",
        }
    }
}

// =============================================================================
// Accept Header Negotiation
// =============================================================================

/// Response representation selected from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Representation {
    Html,
    Json,
    Text,
}

/// Pick the response representation for a request.
///
/// HTML is preferred whenever the client accepts it (including wildcard and
/// absent `Accept` headers), then JSON, then plain text. This matches the
/// check order the platform has always used.
fn preferred_representation(headers: &HeaderMap) -> Representation {
    let accept = match headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) {
        Some(value) => value,
        None => return Representation::Html,
    };

    let media_types = accept
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .collect::<Vec<_>>();

    if media_types
        .iter()
        .any(|m| matches!(*m, "text/html" | "text/*" | "*/*" | ""))
    {
        return Representation::Html;
    }

    if media_types
        .iter()
        .any(|m| matches!(*m, "application/json" | "application/*"))
    {
        return Representation::Json;
    }

    Representation::Text
}

// =============================================================================
// Error Responses
// =============================================================================

/// Build a content-negotiated error response.
///
/// The human-readable `message` appears on the HTML error page; JSON and
/// plain text bodies carry the canonical reason phrase, so API clients see a
/// stable string.
pub fn error_response(
    renderer: &PageRenderer,
    headers: &HeaderMap,
    code: ErrorCode,
    message: &str,
) -> Response {
    let status = code.status();

    match preferred_representation(headers) {
        Representation::Html => {
            let context = json!({
                "errNum": status.as_u16(),
                "code": code.code(),
                "message": message,
            });
            match renderer.render(ERROR_TEMPLATE, &context) {
                Ok(html) => (status, Html(html)).into_response(),
                Err(err) => {
                    // The error page itself failed to render; fall back to text
                    error!("failed to render error page: {}", err);
                    (status, code.reason().to_string()).into_response()
                }
            }
        }
        Representation::Json => {
            let body = json!({
                "error": status.as_u16(),
                "code": code.code(),
                "message": code.reason(),
            });
            (status, axum::Json(body)).into_response()
        }
        Representation::Text => (status, code.reason().to_string()).into_response(),
    }
}

// =============================================================================
// Pipeline Wrapper
// =============================================================================

/// Top-level wrapper converting a panicking handler chain into a negotiated
/// 500 response. Applied outside the session layer so it also covers
/// middleware panics.
pub async fn internal_error_middleware<S: UserStore>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers().clone();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("handler panicked: {}", detail);

            error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                super::handlers::INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

/// Log a 4xx/5xx error the way the platform expects: client errors at warn,
/// server errors at error.
pub fn log_error(code: ErrorCode, context: &str) {
    match code {
        ErrorCode::InternalServer => error!("{} ({})", context, code.code()),
        _ => warn!("{} ({})", context, code.code()),
    }
}

// =============================================================================
// Tests
// =============================================================================
