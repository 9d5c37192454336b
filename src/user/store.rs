//! User persistence behind the [`UserStore`] trait.
//!
//! The trait abstracts the document database so that request handlers and the
//! auth middleware never touch the driver directly, and so that tests can use
//! an in-memory implementation.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::model::{NewUser, User, DEFAULT_ROLE};

/// Name of the MongoDB collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

// =============================================================================
// UserStore Trait
// =============================================================================

/// Trait for looking up and creating user accounts.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by their unique email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Find a user by their store-assigned id.
    ///
    /// A malformed id is a lookup miss from the caller's perspective, but is
    /// reported as [`StoreError::InvalidId`] so the boundary can log it.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user record and return it with its assigned id.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
}

// =============================================================================
// MongoDB Implementation
// =============================================================================

/// The on-disk shape of a user document.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    display_name: String,
    email: String,
    password_hash: String,
    banned: bool,
    role: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id.to_hex(),
            display_name: doc.display_name,
            email: doc.email,
            password_hash: doc.password_hash,
            banned: doc.banned,
            role: doc.role,
        }
    }
}

/// MongoDB-backed user store.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Create a store over the `users` collection of the given database.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let found = self.collection.find_one(doc! { "email": email }).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let oid =
            ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;
        let found = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(User::from))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let document = UserDocument {
            id: ObjectId::new(),
            display_name: new_user.display_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            banned: false,
            role: DEFAULT_ROLE.to_string(),
        };

        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
