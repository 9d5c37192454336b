//! Read-through course catalogue cache.
//!
//! The catalogue is a pure function of the curriculum directory's current
//! contents, cached for a TTL so every page render does not hit the disk.
//! After the TTL elapses the next read re-scans; `invalidate()` forces the
//! next read to re-scan immediately.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::CurriculumError;

use super::metadata::CourseMetadata;
use super::scan::scan_courses;

/// Default TTL for the cached scan result.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(30);

/// A scan result with the time it was taken.
struct CachedScan {
    courses: Vec<Option<CourseMetadata>>,
    fetched_at: Instant,
}

/// TTL-bounded cache over [`scan_courses`].
///
/// Scan errors are never cached; a failed scan leaves the previous result in
/// place (if any) for the next attempt, but is still reported to the caller.
pub struct CourseCatalog {
    root: PathBuf,
    ttl: Duration,
    cached: RwLock<Option<CachedScan>>,
}

impl CourseCatalog {
    /// Create a catalogue over the given curriculum root with the default TTL.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_ttl(root, DEFAULT_CATALOG_TTL)
    }

    /// Create a catalogue with a custom TTL.
    pub fn with_ttl(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Get the current course list, re-scanning the directory if the cached
    /// result is missing or older than the TTL.
    pub async fn courses(&self) -> Result<Vec<Option<CourseMetadata>>, CurriculumError> {
        // Fast path: fresh cached scan
        {
            let cached = self.cached.read().await;
            if let Some(ref scan) = *cached {
                if scan.fetched_at.elapsed() < self.ttl {
                    return Ok(scan.courses.clone());
                }
            }
        }

        // Slow path: re-scan under the write lock, re-checking freshness in
        // case another request already refreshed it.
        let mut cached = self.cached.write().await;
        if let Some(ref scan) = *cached {
            if scan.fetched_at.elapsed() < self.ttl {
                return Ok(scan.courses.clone());
            }
        }

        debug!("re-scanning curriculum directory {}", self.root.display());
        let courses = scan_courses(&self.root).await?;
        *cached = Some(CachedScan {
            courses: courses.clone(),
            fetched_at: Instant::now(),
        });

        Ok(courses)
    }

    /// Drop the cached scan so the next read re-scans the directory.
    pub async fn invalidate(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }
}

// =============================================================================
// Tests
// =============================================================================
