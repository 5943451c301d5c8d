//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::PasswordHash;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID
/// types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw integer.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer form of the ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// Retrieve existing users through a [UserStore](crate::stores::UserStore).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    username: String,
    email: EmailAddress,
    password_hash: PasswordHash,
    created_at: OffsetDateTime,
}

impl User {
    /// Create a user from its parts.
    ///
    /// This is intended for store implementations mapping database rows. To add a new user to the
    /// application, use [UserStore::create](crate::stores::UserStore::create) instead.
    pub fn new(
        id: UserID,
        username: String,
        email: EmailAddress,
        password_hash: PasswordHash,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The display name chosen by the user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The email address associated with the user.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// When the user registered.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
