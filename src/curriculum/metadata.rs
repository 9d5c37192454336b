//! Course metadata reader.
//!
//! Each course directory carries a `course.json` file describing the course.
//! The reader is deliberately forgiving: any failure (missing file, unreadable
//! file, bad JSON) yields `None` rather than an error, so one broken course
//! never takes down a catalogue render.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the per-course metadata file.
pub const COURSE_METADATA_FILE: &str = "course.json";

// =============================================================================
// Types
// =============================================================================

/// Metadata for a single chapter of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterMetadata {
    /// Chapter title
    pub title: String,

    /// Number of lessons in this chapter
    #[serde(default)]
    pub lessons: u32,
}

/// Per-course metadata document.
///
/// Only `title` is required; everything else defaults so that minimal course
/// files still parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseMetadata {
    /// Course title
    pub title: String,

    /// Short description shown in the catalogue
    #[serde(default)]
    pub description: String,

    /// Course author
    #[serde(default)]
    pub author: String,

    /// Structural info: chapters in order
    #[serde(default)]
    pub chapters: Vec<ChapterMetadata>,
}

// =============================================================================
// Reader
// =============================================================================

/// Read and parse a course's metadata file.
///
/// Returns `None` on any failure: missing directory, missing or unreadable
/// `course.json`, or a parse error. Never errors to the caller.
pub async fn read_course_metadata(course_dir: &Path) -> Option<CourseMetadata> {
    let path = course_dir.join(COURSE_METADATA_FILE);

    let raw = match tokio::fs::read(&path).await {
        Ok(raw) => raw,
        Err(err) => {
            debug!("could not read {}: {}", path.display(), err);
            return None;
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            debug!("could not parse {}: {}", path.display(), err);
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
