use thiserror::Error;

/// Errors from the user store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error surfaced by the database driver
    #[error("database error: {0}")]
    Backend(String),

    /// A user id that cannot be parsed into the store's id type
    #[error("malformed user id: {0}")]
    InvalidId(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Errors from scanning the curriculum directory.
///
/// Per-course metadata failures are NOT errors; the metadata reader returns
/// `None` for those. Only an unreadable curriculum root surfaces here.
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// The curriculum root could not be listed
    #[error("failed to read curriculum directory {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the template rendering layer.
#[derive(Debug, Error)]
pub enum PageError {
    /// Template registration failed at startup
    #[error("template registration failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Rendering a registered template failed
    #[error("render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}
