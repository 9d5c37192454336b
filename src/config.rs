//! Configuration management for the OpenCourse server.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `OC_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! All configuration options can be set via environment variables with the `OC_` prefix:
//!
//! - `OC_HOST` - Server bind address (default: 0.0.0.0)
//! - `OC_PORT` - Server port (default: 3080)
//! - `OC_MONGO_URI` - MongoDB connection string (default: mongodb://localhost:27017/opencourse)
//! - `OC_SESSION_SECRET` - Secret for signing session cookies (required, min 32 bytes)
//! - `OC_HASH_COST` - bcrypt cost factor for password hashing (default: 12)
//! - `OC_CURRICULUM_DIR` - Curriculum directory root (default: static/curriculum)
//! - `OC_TEMPLATES_DIR` - Handlebars template directory (default: templates)
//! - `OC_STATIC_DIR` - Static file directory (default: static)
//! - `OC_CATALOG_TTL` - Course catalogue cache TTL in seconds (default: 30)

use std::path::PathBuf;

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3080;

/// Default MongoDB connection string.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/opencourse";

/// Database name used when the connection string does not name one.
pub const DEFAULT_DATABASE_NAME: &str = "opencourse";

/// Default curriculum directory.
pub const DEFAULT_CURRICULUM_DIR: &str = "static/curriculum";

/// Default template directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default static file directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default course catalogue cache TTL in seconds.
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 30;

/// Minimum length for the session secret in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

// =============================================================================
// CLI Arguments
// =============================================================================

/// OpenCourse - a server-rendered educational platform.
///
/// Serves marketing pages, a course catalogue, user signup/login with
/// session-based authentication, and a coding-lesson editor view, backed by
/// MongoDB and an on-disk curriculum directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "opencourse")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "OC_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "OC_PORT")]
    pub port: u16,

    // =========================================================================
    // Database Configuration
    // =========================================================================
    /// MongoDB connection string.
    ///
    /// A database name in the URI path selects the database; otherwise
    /// "opencourse" is used.
    #[arg(long, default_value = DEFAULT_MONGO_URI, env = "OC_MONGO_URI")]
    pub mongo_uri: String,

    // =========================================================================
    // Session Configuration
    // =========================================================================
    /// Secret used to sign session cookies.
    ///
    /// Must be at least 32 bytes. If not provided the server will fail to start.
    #[arg(long, env = "OC_SESSION_SECRET")]
    pub session_secret: Option<String>,

    // =========================================================================
    // Password Hashing Configuration
    // =========================================================================
    /// bcrypt cost factor for password hashing (4-31).
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST, env = "OC_HASH_COST")]
    pub hash_cost: u32,

    // =========================================================================
    // Content Configuration
    // =========================================================================
    /// Root directory of the curriculum tree.
    #[arg(long, default_value = DEFAULT_CURRICULUM_DIR, env = "OC_CURRICULUM_DIR")]
    pub curriculum_dir: PathBuf,

    /// Directory containing the handlebars templates.
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR, env = "OC_TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Directory served under /static.
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "OC_STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Course catalogue cache TTL in seconds.
    ///
    /// The catalogue is re-scanned from disk when a request arrives after the
    /// TTL has elapsed.
    #[arg(long, default_value_t = DEFAULT_CATALOG_TTL_SECS, env = "OC_CATALOG_TTL")]
    pub catalog_ttl: u64,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self.session_secret {
            None => {
                return Err(
                    "Session secret is required. Set --session-secret or OC_SESSION_SECRET"
                        .to_string(),
                );
            }
            Some(ref secret) if secret.len() < MIN_SESSION_SECRET_LEN => {
                return Err(format!(
                    "Session secret must be at least {} bytes (got {})",
                    MIN_SESSION_SECRET_LEN,
                    secret.len()
                ));
            }
            Some(_) => {}
        }

        if self.mongo_uri.is_empty() {
            return Err("MongoDB URI is required. Set --mongo-uri or OC_MONGO_URI".to_string());
        }

        // bcrypt rejects costs outside this range at hash time; fail early
        if !(4..=31).contains(&self.hash_cost) {
            return Err("hash_cost must be between 4 and 31".to_string());
        }

        if self.catalog_ttl == 0 {
            return Err("catalog_ttl must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the session secret, or an empty string if not set (call validate() first).
    pub fn session_secret_or_empty(&self) -> &str {
        self.session_secret.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Tests
// =============================================================================
