//! User Entity

use kernel::id::UserId;

/// User entity
///
/// Immutable after registration: the core defines no update or delete
/// operations for users.
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: UserId,
    /// Unique username, matched case-sensitively
    pub username: String,
    /// Keyed hash of the password (opaque bytes)
    pub password_hash: Vec<u8>,
    /// Per-user salt, also the hash key (opaque bytes)
    pub password_salt: Vec<u8>,
    /// Required first name
    pub first_name: String,
    /// Optional last name
    pub last_name: Option<String>,
}

/// A user about to be persisted (no id yet)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub first_name: String,
    pub last_name: Option<String>,
}
