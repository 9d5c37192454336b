//! User accounts and credential handling.
//!
//! - [`model`] - the User document and the signup form
//! - [`store`] - the [`UserStore`] trait and its MongoDB implementation
//! - [`verify`] - pluggable credential comparison strategy

pub mod model;
pub mod store;
pub mod verify;

pub use model::{CreateUserForm, NewUser, User};
pub use store::{MongoUserStore, UserStore, USERS_COLLECTION};
pub use verify::{BcryptVerifier, CredentialVerifier};
