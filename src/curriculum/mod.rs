//! Curriculum directory access.
//!
//! The curriculum is a directory tree on disk: one subdirectory per course,
//! each carrying a `course.json` metadata file and a `content/` tree of
//! chapters and lessons. Nothing here talks to the database.
//!
//! - [`metadata`] - per-course metadata reader
//! - [`scan`] - curriculum directory scanner
//! - [`path`] - lesson path validator
//! - [`catalog`] - read-through course catalogue cache

pub mod catalog;
pub mod metadata;
pub mod path;
pub mod scan;

pub use catalog::CourseCatalog;
pub use metadata::{read_course_metadata, ChapterMetadata, CourseMetadata, COURSE_METADATA_FILE};
pub use path::validate_lesson_path;
pub use scan::{scan_courses, RESERVED_INDEX_FILE};
