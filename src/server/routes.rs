//! Router configuration for the OpenCourse server.
//!
//! This module defines the HTTP routes and wires up the session, auth
//! context, and error-catching middleware.
//!
//! # Route Structure
//!
//! ```text
//! /  /index  /index.html              - Homepage (public)
//! /catalogue /pricing /about /tos /privacy - Site pages (public)
//! /login /signup                       - Account forms (unauthenticated only)
//! /editor/{course}/{chapter}/{lesson}  - Lesson editor (public)
//! /ping                                - Liveness check (public)
//! /api/v1/user/create                  - Account creation (unauthenticated only)
//! /api/v1/user/auth                    - Authentication (unauthenticated only)
//! /api/v1/user/deauth                  - Deauthentication (authenticated only)
//! /static/*                            - Static assets (optional)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use opencourse::server::routes::{create_router, RouterConfig};
//!
//! let config = RouterConfig::new(secret).with_static_dir("static".into());
//! let router = create_router(state, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use super::auth::{auth_context_middleware, require_authenticated, require_unauthenticated};
use super::handlers::{
    account_form_handler, authenticate_handler, create_user_handler, deauthenticate_handler,
    editor_handler, index_handler, not_found_handler, ping_handler, site_page_handler, AppState,
};
use super::negotiate::internal_error_middleware;
use crate::user::UserStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Secret used to sign session cookies (at least 32 bytes)
    pub session_secret: String,

    /// Name of the session cookie
    pub cookie_name: String,

    /// Session inactivity expiry
    pub session_max_age: time::Duration,

    /// Directory served under /static (None = no static assets)
    pub static_dir: Option<PathBuf>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given session secret.
    ///
    /// By default:
    /// - The session cookie is named `ocsid`
    /// - Sessions expire after one day of inactivity
    /// - No static assets are served
    /// - Tracing is enabled
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            cookie_name: "ocsid".to_string(),
            session_max_age: time::Duration::days(1),
            static_dir: None,
            enable_tracing: true,
        }
    }

    /// Set the session cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Set the session inactivity expiry.
    pub fn with_session_max_age(mut self, max_age: time::Duration) -> Self {
        self.session_max_age = max_age;
        self
    }

    /// Serve static assets from this directory under /static.
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public site pages and the editor
/// - The user API, gated by authentication state
/// - Signed session cookies backed by an in-memory store
/// - A top-level panic catcher producing negotiated 500s
/// - Request tracing (optional)
pub fn create_router<S: UserStore>(state: AppState<S>, config: RouterConfig) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(config.cookie_name.clone())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(config.session_max_age))
        .with_signed(Key::derive_from(config.session_secret.as_bytes()));

    let public_routes = Router::new()
        .route("/", get(index_handler::<S>))
        // Legacy homepage spellings
        .route("/index", get(index_handler::<S>))
        .route("/index.html", get(index_handler::<S>))
        .route("/catalogue", get(site_page_handler::<S>))
        .route("/pricing", get(site_page_handler::<S>))
        .route("/about", get(site_page_handler::<S>))
        .route("/tos", get(site_page_handler::<S>))
        .route("/privacy", get(site_page_handler::<S>))
        .route(
            "/editor/{course}/{chapter}/{lesson}",
            get(editor_handler::<S>),
        )
        .route("/ping", get(ping_handler));

    // Forms and account endpoints only make sense without a live session
    let unauthenticated_routes = Router::new()
        .route("/login", get(account_form_handler::<S>))
        .route("/signup", get(account_form_handler::<S>))
        .route("/api/v1/user/create", post(create_user_handler::<S>))
        .route("/api/v1/user/auth", post(authenticate_handler::<S>))
        .route_layer(middleware::from_fn(require_unauthenticated));

    let authenticated_routes = Router::new()
        .route("/api/v1/user/deauth", get(deauthenticate_handler::<S>))
        .route_layer(middleware::from_fn(require_authenticated));

    let mut router = Router::new()
        .merge(public_routes)
        .merge(unauthenticated_routes)
        .merge(authenticated_routes)
        .fallback(not_found_handler::<S>)
        .with_state(state.clone());

    if let Some(static_dir) = &config.static_dir {
        router = router.nest_service("/static", ServeDir::new(static_dir));
    }

    // First layer added is innermost: the auth context reads the session, so
    // the session layer must wrap it; the panic catcher wraps both.
    let router = router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_context_middleware::<S>,
        ))
        .layer(session_layer)
        .layer(middleware::from_fn_with_state(
            state,
            internal_error_middleware::<S>,
        ));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

// =============================================================================
// Tests
// =============================================================================
