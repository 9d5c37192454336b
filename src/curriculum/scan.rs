//! Course directory scanner.
//!
//! Lists the curriculum root and reads metadata for every entry except the
//! reserved index file. Entries whose metadata cannot be read appear as `None`
//! in the result; they are intentionally NOT filtered out, so the catalogue
//! surface reflects broken courses instead of silently hiding them.

use std::path::Path;

use crate::error::CurriculumError;

use super::metadata::{read_course_metadata, CourseMetadata};

/// Reserved index file skipped during the scan.
pub const RESERVED_INDEX_FILE: &str = "courses.json";

/// Scan the curriculum root and read metadata for every course entry.
///
/// Entries are visited in name order so repeated scans of an unchanged
/// directory produce the same list. Per-entry read failures yield `None`
/// entries; only an unlistable root is an error.
pub async fn scan_courses(root: &Path) -> Result<Vec<Option<CourseMetadata>>, CurriculumError> {
    let scan_err = |source: std::io::Error| CurriculumError::Scan {
        path: root.display().to_string(),
        source,
    };

    let mut dir = tokio::fs::read_dir(root).await.map_err(scan_err)?;

    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(scan_err)? {
        let name = entry.file_name();
        if name == RESERVED_INDEX_FILE {
            continue;
        }
        names.push(name);
    }
    names.sort();

    let mut courses = Vec::with_capacity(names.len());
    for name in names {
        courses.push(read_course_metadata(&root.join(&name)).await);
    }

    Ok(courses)
}

// =============================================================================
// Tests
// =============================================================================
