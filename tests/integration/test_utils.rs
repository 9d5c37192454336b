//! Test utilities for integration tests.
//!
//! Provides an in-memory user store, a curriculum fixture builder, and
//! helpers for driving the router with `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::ServiceExt;

use opencourse::curriculum::CourseCatalog;
use opencourse::error::StoreError;
use opencourse::server::{create_router, AppState, PageRenderer, RouterConfig};
use opencourse::user::{BcryptVerifier, NewUser, User, UserStore};

/// Session secret used by all test routers.
pub const TEST_SESSION_SECRET: &str =
    "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// bcrypt cost used by tests; the minimum keeps hashing fast.
pub const TEST_HASH_COST: u32 = 4;

// =============================================================================
// In-Memory User Store
// =============================================================================

/// An in-memory user store keyed by assigned id.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built user directly, bypassing the trait.
    pub async fn seed(&self, mut user: User) -> User {
        if user.id.is_empty() {
            user.id = self.assign_id();
        }
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        user
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn assign_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        // Same shape as a hex ObjectId
        format!("{:024x}", n)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: self.assign_id(),
            display_name: new_user.display_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            banned: false,
            role: "user".to_string(),
        };
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

/// Build a user with a real bcrypt hash for `password`.
pub fn user_with_password(display_name: &str, email: &str, password: &str) -> User {
    User {
        id: String::new(),
        display_name: display_name.to_string(),
        email: email.to_string(),
        password_hash: bcrypt::hash(password, TEST_HASH_COST).unwrap(),
        banned: false,
        role: "user".to_string(),
    }
}

// =============================================================================
// Curriculum Fixture
// =============================================================================

/// Create a curriculum directory with one complete course ("python", with
/// lesson 001/001) and one broken course directory missing its metadata.
pub fn build_curriculum() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    let python = dir.path().join("python");
    std::fs::create_dir_all(python.join("content").join("chapter-001")).unwrap();
    std::fs::write(
        python.join("course.json"),
        r#"{
            "title": "Python",
            "description": "Learn Python from scratch",
            "author": "Ada",
            "chapters": [
                { "title": "Getting Started", "lessons": 3 },
                { "title": "Control Flow", "lessons": 4 }
            ]
        }"#,
    )
    .unwrap();
    std::fs::write(
        python.join("content").join("chapter-001").join("001"),
        "print('hello')",
    )
    .unwrap();

    // A course directory without course.json scans as a null entry
    std::fs::create_dir_all(dir.path().join("broken")).unwrap();

    dir
}

// =============================================================================
// Router Construction
// =============================================================================

fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Build a full application router over the given store and curriculum root.
pub fn build_app(store: Arc<MemoryUserStore>, curriculum_dir: PathBuf) -> Router {
    let renderer = Arc::new(PageRenderer::from_directory(&templates_dir()).unwrap());
    let catalog = Arc::new(CourseCatalog::new(curriculum_dir.clone()));

    let state = AppState::new(
        store,
        Arc::new(BcryptVerifier),
        renderer,
        catalog,
        curriculum_dir,
        TEST_HASH_COST,
    );

    let config = RouterConfig::new(TEST_SESSION_SECRET).with_tracing(false);
    create_router(state, config)
}

/// Build a router with a fresh store and curriculum, returning all three.
pub fn build_default_app() -> (Router, Arc<MemoryUserStore>, TempDir) {
    let store = Arc::new(MemoryUserStore::new());
    let curriculum = build_curriculum();
    let router = build_app(Arc::clone(&store), curriculum.path().to_path_buf());
    (router, store, curriculum)
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Builder for test requests.
pub struct TestRequest {
    method: &'static str,
    path: String,
    accept: Option<String>,
    cookie: Option<String>,
    form_body: Option<String>,
}

impl TestRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET",
            path: path.into(),
            accept: None,
            cookie: None,
            form_body: None,
        }
    }

    pub fn post_form(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST",
            path: path.into(),
            accept: None,
            cookie: None,
            form_body: Some(body.into()),
        }
    }

    pub fn accept(mut self, value: &str) -> Self {
        self.accept = Some(value.to_string());
        self
    }

    pub fn cookie(mut self, value: &str) -> Self {
        self.cookie = Some(value.to_string());
        self
    }

    pub fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.path);

        if let Some(accept) = self.accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        if let Some(cookie) = self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        match self.form_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }
}

/// Send a request through a clone of the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

/// Collect the response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extract the session cookie (name=value) from a response, if one was set.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// Assert a 302 redirect to the given location.
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}
