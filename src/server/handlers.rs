//! HTTP request handlers.
//!
//! # Endpoints
//!
//! - `GET /` and the marketing pages - server-rendered site pages
//! - `GET /login`, `GET /signup` - account forms (unauthenticated only)
//! - `POST /api/v1/user/create` - account creation
//! - `POST /api/v1/user/auth` - authentication
//! - `GET /api/v1/user/deauth` - deauthentication
//! - `GET /editor/{course}/{chapter}/{lesson}` - lesson editor view
//! - `GET /ping` - liveness check

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::{error, info, warn};
use validator::Validate;

use crate::curriculum::{read_course_metadata, validate_lesson_path, CourseCatalog};
use crate::user::{CreateUserForm, CredentialVerifier, NewUser, UserStore};

use super::auth::{AuthContext, SESSION_USER_ID_KEY};
use super::flash::{set_flash, take_flash, Flash};
use super::negotiate::{error_response, log_error, ErrorCode};
use super::pages::{PageContext, PageRenderer};

// =============================================================================
// Messages
// =============================================================================

/// Human-readable message for 404 pages.
pub const NOT_FOUND_MESSAGE: &str = "Seems like this page doesn't exist.";

/// Human-readable message for 500 pages.
pub const INTERNAL_ERROR_MESSAGE: &str = "Looks like something broke on our side";

/// Human-readable message for rejected signups.
pub const BAD_ENTITY_MESSAGE: &str = "Invalid Email, Username, or Password";

/// Flash shown after a failed login.
const LOGIN_FAILED_MESSAGE: &str = "Invalid Email or Password";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers.
pub struct AppState<S: UserStore> {
    /// User account store
    pub store: Arc<S>,

    /// Credential comparison strategy
    pub verifier: Arc<dyn CredentialVerifier>,

    /// Page renderer
    pub renderer: Arc<PageRenderer>,

    /// Course catalogue cache
    pub catalog: Arc<CourseCatalog>,

    /// Curriculum root, for lesson path validation and metadata reads
    pub curriculum_dir: PathBuf,

    /// bcrypt cost factor for new passwords
    pub hash_cost: u32,
}

impl<S: UserStore> AppState<S> {
    pub fn new(
        store: Arc<S>,
        verifier: Arc<dyn CredentialVerifier>,
        renderer: Arc<PageRenderer>,
        catalog: Arc<CourseCatalog>,
        curriculum_dir: PathBuf,
        hash_cost: u32,
    ) -> Self {
        Self {
            store,
            verifier,
            renderer,
            catalog,
            curriculum_dir,
            hash_cost,
        }
    }
}

impl<S: UserStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            verifier: Arc::clone(&self.verifier),
            renderer: Arc::clone(&self.renderer),
            catalog: Arc::clone(&self.catalog),
            curriculum_dir: self.curriculum_dir.clone(),
            hash_cost: self.hash_cost,
        }
    }
}

// =============================================================================
// Response Helpers
// =============================================================================

/// A 302 Found redirect.
///
/// `axum::response::Redirect` issues 303/307; the platform's clients expect
/// the classic 302 after form posts, so the response is built directly.
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Render a site page with the standard context, converting any failure into
/// a negotiated 500.
async fn render_site_page<S: UserStore>(
    state: &AppState<S>,
    context: &AuthContext,
    session: &Session,
    headers: &HeaderMap,
    template: &str,
) -> Response {
    let courses = match state.catalog.courses().await {
        Ok(courses) => courses,
        Err(err) => {
            error!("course catalogue scan failed: {}", err);
            return error_response(
                &state.renderer,
                headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            );
        }
    };

    let page = PageContext {
        auth: context.authenticated,
        display_name: context.display_name().map(|s| s.to_string()),
        courses,
        flash: take_flash(session).await,
    };

    match state.renderer.render(template, &page) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("failed to render {}: {}", template, err);
            error_response(
                &state.renderer,
                headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

// =============================================================================
// Site Pages
// =============================================================================

/// `GET /` - the homepage, rendered with the fixed `index` template.
pub async fn index_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    Extension(context): Extension<AuthContext>,
    session: Session,
    headers: HeaderMap,
) -> Response {
    render_site_page(&state, &context, &session, &headers, "index").await
}

/// Marketing pages - the template name is derived from the request path
/// (`/catalogue` renders the `catalogue` template, and so on).
pub async fn site_page_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    Extension(context): Extension<AuthContext>,
    session: Session,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let template = uri.path().trim_start_matches('/');
    render_site_page(&state, &context, &session, &headers, template).await
}

/// `GET /login` and `GET /signup` - account forms.
///
/// Gated to unauthenticated requests; the auth flag is forced off so the
/// navigation never shows a logged-in state on these pages.
pub async fn account_form_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let template = uri.path().trim_start_matches('/');
    let context = json!({
        "auth": false,
        "flash": take_flash(&session).await,
    });

    match state.renderer.render(template, &context) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("failed to render {}: {}", template, err);
            error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

/// `GET /ping` - liveness check used by the editor.
pub async fn ping_handler() -> impl IntoResponse {
    (StatusCode::OK, "All Good :)")
}

// =============================================================================
// User API
// =============================================================================

/// `POST /api/v1/user/create` - create a new account.
///
/// Rejects with 422 `ERR_BADENT` when any field is missing or malformed, or
/// when an account with the email already exists. The duplicate check is a
/// pre-check only; there is no store-level race protection.
pub async fn create_user_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    form: Result<Form<CreateUserForm>, FormRejection>,
) -> Response {
    // A body that does not even deserialize (missing field, bad encoding) is
    // the same class of failure as a field that fails validation
    let Ok(Form(form)) = form else {
        log_error(ErrorCode::BadEntity, "account creation body undecodable");
        return error_response(
            &state.renderer,
            &headers,
            ErrorCode::BadEntity,
            BAD_ENTITY_MESSAGE,
        );
    };

    if form.validate().is_err() {
        log_error(ErrorCode::BadEntity, "account creation failed validation");
        return error_response(
            &state.renderer,
            &headers,
            ErrorCode::BadEntity,
            BAD_ENTITY_MESSAGE,
        );
    }

    match state.store.find_by_email(&form.email).await {
        Ok(Some(_)) => {
            log_error(ErrorCode::BadEntity, "account creation for existing email");
            return error_response(
                &state.renderer,
                &headers,
                ErrorCode::BadEntity,
                BAD_ENTITY_MESSAGE,
            );
        }
        Ok(None) => {}
        Err(err) => {
            error!("user lookup failed: {}", err);
            return error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            );
        }
    }

    let password_hash = match bcrypt::hash(&form.password, state.hash_cost) {
        Ok(hash) => hash,
        Err(err) => {
            error!("password hashing failed: {}", err);
            return error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            );
        }
    };

    let new_user = NewUser {
        display_name: form.display_name,
        email: form.email,
        password_hash,
    };

    match state.store.insert(new_user).await {
        Ok(user) => {
            info!("created account for {}", user.email);
            redirect_found("/login")
        }
        Err(err) => {
            error!("user insert failed: {}", err);
            error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

/// Form body for `POST /api/v1/user/auth`.
#[derive(Debug, Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
}

/// `POST /api/v1/user/auth` - authenticate and establish a session.
///
/// Credential comparison is delegated to the configured
/// [`CredentialVerifier`]. Success redirects home with a success flash;
/// any failure redirects back to the login page with an error flash.
/// There is no lockout or backoff policy.
pub async fn authenticate_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    headers: HeaderMap,
    form: Result<Form<AuthForm>, FormRejection>,
) -> Response {
    // Missing credentials are just a failed login
    let Ok(Form(form)) = form else {
        set_flash(&session, Flash::error(LOGIN_FAILED_MESSAGE)).await;
        return redirect_found("/login");
    };

    let user = match state.store.find_by_email(&form.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            set_flash(&session, Flash::error(LOGIN_FAILED_MESSAGE)).await;
            return redirect_found("/login");
        }
        Err(err) => {
            error!("user lookup failed: {}", err);
            return error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            );
        }
    };

    if !state.verifier.verify(&user, &form.password) {
        warn!("failed login attempt for {}", user.email);
        set_flash(&session, Flash::error(LOGIN_FAILED_MESSAGE)).await;
        return redirect_found("/login");
    }

    if let Err(err) = session.insert(SESSION_USER_ID_KEY, user.id.clone()).await {
        error!("failed to establish session: {}", err);
        return error_response(
            &state.renderer,
            &headers,
            ErrorCode::InternalServer,
            INTERNAL_ERROR_MESSAGE,
        );
    }

    info!("user {} authenticated", user.email);
    set_flash(
        &session,
        Flash::success(format!("Welcome back, {}", user.display_name)),
    )
    .await;
    redirect_found("/")
}

/// `GET /api/v1/user/deauth` - destroy the session.
///
/// Gated to authenticated requests. The destroyed session can never satisfy
/// the authenticated gate again; a fresh login creates a new session record.
pub async fn deauthenticate_handler<S: UserStore>(
    State(_state): State<AppState<S>>,
    session: Session,
) -> Response {
    if let Err(err) = session.flush().await {
        // The cookie is still invalidated client-side on expiry; log and move on
        warn!("failed to destroy session: {}", err);
    }
    redirect_found("/")
}

// =============================================================================
// Editor
// =============================================================================

/// Path parameters for the editor route.
#[derive(Debug, Deserialize)]
pub struct EditorPathParams {
    pub course: String,
    pub chapter: String,
    pub lesson: String,
}

/// `GET /editor/{course}/{chapter}/{lesson}` - the lesson editor view.
///
/// Renders the editor with the lesson identifiers and the course's metadata
/// serialized into the page payload; an invalid lesson path yields a
/// negotiated 404.
pub async fn editor_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    Extension(context): Extension<AuthContext>,
    headers: HeaderMap,
    Path(params): Path<EditorPathParams>,
) -> Response {
    let valid = validate_lesson_path(
        &state.curriculum_dir,
        &params.course,
        Some(&params.chapter),
        Some(&params.lesson),
    )
    .await;

    if !valid {
        log_error(
            ErrorCode::PageNotFound,
            &format!(
                "invalid lesson path {}/{}/{}",
                params.course, params.chapter, params.lesson
            ),
        );
        return error_response(
            &state.renderer,
            &headers,
            ErrorCode::PageNotFound,
            NOT_FOUND_MESSAGE,
        );
    }

    let metadata = read_course_metadata(&state.curriculum_dir.join(&params.course)).await;
    let metadata_json =
        serde_json::to_string(&metadata).unwrap_or_else(|_| "null".to_string());

    let editor_context = json!({
        "auth": context.authenticated,
        "displayName": context.display_name(),
        "course": params.course,
        "chapter": params.chapter,
        "lesson": params.lesson,
        "lessonMeta": metadata_json,
    });

    match state.renderer.render("editor", &editor_context) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("failed to render editor: {}", err);
            error_response(
                &state.renderer,
                &headers,
                ErrorCode::InternalServer,
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

// =============================================================================
// Fallback
// =============================================================================

/// Catch-all for unmatched routes: a negotiated 404.
pub async fn not_found_handler<S: UserStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    log_error(
        ErrorCode::PageNotFound,
        &format!("no route for {}", uri.path()),
    );
    error_response(
        &state.renderer,
        &headers,
        ErrorCode::PageNotFound,
        NOT_FOUND_MESSAGE,
    )
}
