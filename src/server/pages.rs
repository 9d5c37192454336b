//! Page rendering.
//!
//! Wraps a handlebars registry loaded from the template directory. Every
//! server-rendered page receives the same context shape: the auth flag, the
//! display name when authenticated, the course list, and any pending flash
//! message.

use std::path::Path;

use handlebars::{DirectorySourceOptions, Handlebars};
use serde::Serialize;

use crate::curriculum::CourseMetadata;
use crate::error::PageError;

use super::flash::Flash;

/// Name of the error page template.
pub const ERROR_TEMPLATE: &str = "error";

// =============================================================================
// Page Context
// =============================================================================

/// Context passed to site page templates.
#[derive(Debug, Serialize)]
pub struct PageContext {
    /// Whether the request carries an authenticated session
    pub auth: bool,

    /// Display name of the authenticated user
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Available courses; broken entries are serialized as null
    pub courses: Vec<Option<CourseMetadata>>,

    /// Pending flash message, consumed by this render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

// =============================================================================
// Renderer
// =============================================================================

/// Handlebars-backed page renderer.
///
/// Templates are registered once at startup from the template directory;
/// template names are the file stems (`index.hbs` renders as `index`).
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    /// Load all templates from a directory.
    pub fn from_directory(dir: &Path) -> Result<Self, PageError> {
        let mut registry = Handlebars::new();
        registry
            .register_templates_directory(dir, DirectorySourceOptions::default())
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    /// Render a named template with the given data.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, PageError> {
        Ok(self.registry.render(template, data)?)
    }

    /// Whether a template with this name is registered.
    pub fn has_template(&self, template: &str) -> bool {
        self.registry.has_template(template)
    }
}

// =============================================================================
// Tests
// =============================================================================
