//! Lesson path validator.
//!
//! Checks whether a (course, chapter, lesson) triple corresponds to a readable
//! path under the curriculum root. Existence is the only property checked;
//! the validator never errors to its caller.

use std::path::{Path, PathBuf};

/// Check whether a course or lesson path exists under the curriculum root.
///
/// With `chapter` and `lesson` omitted, validates the course root
/// `<root>/<course>`. With both present, validates
/// `<root>/<course>/content/chapter-<chapter>/<lesson>`. A triple with only
/// one of chapter/lesson is invalid.
///
/// Identifier segments containing path separators or `.`/`..` are rejected
/// without touching the filesystem.
pub async fn validate_lesson_path(
    root: &Path,
    course: &str,
    chapter: Option<&str>,
    lesson: Option<&str>,
) -> bool {
    if !is_safe_segment(course) {
        return false;
    }

    let target: PathBuf = match (chapter, lesson) {
        (None, None) => root.join(course),
        (Some(chapter), Some(lesson)) => {
            if !is_safe_segment(chapter) || !is_safe_segment(lesson) {
                return false;
            }
            root.join(course)
                .join("content")
                .join(format!("chapter-{}", chapter))
                .join(lesson)
        }
        _ => return false,
    };

    tokio::fs::metadata(&target).await.is_ok()
}

/// Reject empty segments, relative-path components, and separators.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
}

// =============================================================================
// Tests
// =============================================================================
