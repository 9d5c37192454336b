//! One-time flash messages.
//!
//! A flash message is attached to the session by one request (e.g. a login
//! failure) and consumed by the next render. Taking the message removes it,
//! so it is shown exactly once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

/// Session key under which the pending flash message is stored.
pub const FLASH_KEY: &str = "flash";

/// Severity of a flash message; templates style the banner accordingly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// A one-time message attached to the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Attach a flash message to the session, replacing any pending one.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(err) = session.insert(FLASH_KEY, flash).await {
        // Losing a flash message is not worth failing the request over
        warn!("failed to store flash message: {}", err);
    }
}

/// Take the pending flash message, clearing it from the session.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(FLASH_KEY).await {
        Ok(flash) => flash,
        Err(err) => {
            warn!("failed to read flash message: {}", err);
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
