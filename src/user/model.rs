//! User account types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// =============================================================================
// User
// =============================================================================

/// A user account.
///
/// The email is the unique, immutable identifier; the display name is mutable
/// and non-unique. Accounts are created by the create endpoint and never
/// deleted in-flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Store-assigned identifier (ObjectId hex for the MongoDB store)
    pub id: String,

    /// Display name shown on rendered pages
    pub display_name: String,

    /// Unique email address used to authenticate
    pub email: String,

    /// bcrypt hash of the user's password
    pub password_hash: String,

    /// Banned users cannot authenticate
    pub banned: bool,

    /// Role flag (currently "user" or "admin")
    pub role: String,
}

/// Fields required to create a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Default role assigned to new accounts.
pub const DEFAULT_ROLE: &str = "user";

// =============================================================================
// Signup Form
// =============================================================================

/// Form body for `POST /api/v1/user/create`.
///
/// Validation mirrors the platform rules: a well-formed email, a password of
/// 6-254 characters, and an alphanumeric display name of 3-254 characters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserForm {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 254))]
    pub password: String,

    #[serde(rename = "displayName")]
    #[validate(length(min = 3, max = 254), custom(function = validate_alphanumeric))]
    pub display_name: String,
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

// =============================================================================
// Tests
// =============================================================================
