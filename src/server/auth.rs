//! Session authentication context and route gates.
//!
//! An [`AuthContext`] is built once per request by [`auth_context_middleware`]:
//! the session's stored user id (if any) is resolved through the user store,
//! and the result is inserted as a request extension. Handlers and gates read
//! the context instead of touching the session for identity.
//!
//! A session referencing a user that no longer resolves is downgraded to
//! unauthenticated; it never surfaces as an error.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;
use tracing::warn;

use crate::user::{User, UserStore};

use super::handlers::{redirect_found, AppState};

/// Session key under which the authenticated user's id is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";

// =============================================================================
// AuthContext
// =============================================================================

/// Per-request authentication state, available as a request extension.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Whether the request carries a valid authenticated session
    pub authenticated: bool,

    /// The resolved user, present iff `authenticated`
    pub user: Option<User>,
}

impl AuthContext {
    /// Context for a request with no (or an unresolvable) session user.
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    /// Context for a request whose session resolved to `user`.
    pub fn for_user(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    /// Display name of the authenticated user, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.display_name.as_str())
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Build the [`AuthContext`] for this request and insert it as an extension.
pub async fn auth_context_middleware<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let context = build_auth_context(state.store.as_ref(), &session).await;
    request.extensions_mut().insert(context);
    next.run(request).await
}

async fn build_auth_context<S: UserStore>(store: &S, session: &Session) -> AuthContext {
    let user_id = match session.get::<String>(SESSION_USER_ID_KEY).await {
        Ok(Some(id)) => id,
        Ok(None) => return AuthContext::unauthenticated(),
        Err(err) => {
            warn!("failed to read session: {}", err);
            return AuthContext::unauthenticated();
        }
    };

    match store.find_by_id(&user_id).await {
        Ok(Some(user)) => AuthContext::for_user(user),
        Ok(None) => {
            // Session points at a user that no longer exists; downgrade
            warn!("session references unknown user {}", user_id);
            AuthContext::unauthenticated()
        }
        Err(err) => {
            warn!("user lookup failed for session user {}: {}", user_id, err);
            AuthContext::unauthenticated()
        }
    }
}

// =============================================================================
// Gates
// =============================================================================

/// Gate: allow only authenticated requests; otherwise redirect to /login.
pub async fn require_authenticated(request: Request, next: Next) -> Response {
    if is_authenticated(&request) {
        next.run(request).await
    } else {
        redirect_found("/login")
    }
}

/// Gate: allow only unauthenticated requests; otherwise redirect to /.
pub async fn require_unauthenticated(request: Request, next: Next) -> Response {
    if is_authenticated(&request) {
        redirect_found("/")
    } else {
        next.run(request).await
    }
}

fn is_authenticated(request: &Request) -> bool {
    request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.authenticated)
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
