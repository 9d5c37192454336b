//! # OpenCourse
//!
//! A server-rendered platform for interactive programming courses.
//!
//! The server renders the marketing site and course catalogue from
//! handlebars templates, manages user accounts with cookie sessions backed
//! by MongoDB-stored credentials, and serves the in-browser lesson editor
//! for curriculum content laid out on disk.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`curriculum`] - Course metadata, directory scanning, and the catalogue cache
//! - [`user`] - User accounts, the store trait, and credential verification
//! - [`server`] - Axum-based HTTP server, sessions, and page rendering
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```ignore
//! use opencourse::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(store, verifier, renderer, catalog, curriculum_dir, cost);
//! let router = create_router(state, RouterConfig::new(secret));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod config;
pub mod curriculum;
pub mod error;
pub mod server;
pub mod user;

// Re-export commonly used types
pub use config::Config;
pub use curriculum::{
    read_course_metadata, scan_courses, validate_lesson_path, ChapterMetadata, CourseCatalog,
    CourseMetadata, COURSE_METADATA_FILE, RESERVED_INDEX_FILE,
};
pub use error::{CurriculumError, PageError, StoreError};
pub use server::{
    create_router, error_response, AppState, AuthContext, ErrorCode, Flash, FlashLevel,
    PageContext, PageRenderer, RouterConfig,
};
pub use user::{
    BcryptVerifier, CreateUserForm, CredentialVerifier, MongoUserStore, NewUser, User, UserStore,
};
