//! HTTP server layer for OpenCourse.
//!
//! This module provides the server-rendered site, the user API, and the
//! lesson editor view.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                          HTTP Layer                               │
//! │   GET /            GET /editor/{..}        POST /api/v1/user/..   │
//! │                                                                   │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌────────┐  │
//! │  │ handlers │ │   auth   │ │  pages   │ │ negotiate │ │ routes │  │
//! │  │(requests)│ │(sessions)│ │(rendering│ │ (errors)  │ │(router)│  │
//! │  └──────────┘ └──────────┘ └──────────┘ └───────────┘ └────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod flash;
pub mod handlers;
pub mod negotiate;
pub mod pages;
pub mod routes;

pub use auth::{
    auth_context_middleware, require_authenticated, require_unauthenticated, AuthContext,
    SESSION_USER_ID_KEY,
};
pub use flash::{set_flash, take_flash, Flash, FlashLevel, FLASH_KEY};
pub use handlers::{
    account_form_handler, authenticate_handler, create_user_handler, deauthenticate_handler,
    editor_handler, index_handler, not_found_handler, ping_handler, redirect_found,
    site_page_handler, AppState, AuthForm, EditorPathParams, INTERNAL_ERROR_MESSAGE,
    NOT_FOUND_MESSAGE,
};
pub use negotiate::{error_response, internal_error_middleware, log_error, ErrorCode};
pub use pages::{PageContext, PageRenderer, ERROR_TEMPLATE};
pub use routes::{create_router, RouterConfig};
