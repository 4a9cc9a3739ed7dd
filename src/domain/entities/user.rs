//! User entity and credential input.

use chrono::{DateTime, Utc};
use std::fmt;
use validator::Validate;

/// A registered account.
///
/// Users are immutable after registration and are never deleted in-app.
#[derive(Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, email: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input data for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Registration credentials.
#[derive(Debug, Clone, Validate)]
pub struct NewAccount {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl NewAccount {
    /// Builds the input with a normalized email.
    pub fn new(email: &str, password: String) -> Self {
        Self {
            email: normalize_email(email),
            password,
        }
    }
}

/// Login credentials.
#[derive(Debug, Clone, Validate)]
pub struct LoginAttempt {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginAttempt {
    /// Builds the input with a normalized email.
    pub fn new(email: &str, password: String) -> Self {
        Self {
            email: normalize_email(email),
            password,
        }
    }
}

/// Canonical form used for storage and lookups: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
