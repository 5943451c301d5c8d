//! Defines the user store trait.

use email_address::EmailAddress;

use crate::{
    Error,
    models::{PasswordHash, User, UserID},
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user in the store.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if `email` is already registered.
    fn create(
        &mut self,
        username: &str,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Result<User, Error>;

    /// Retrieve a user by their ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no user has the given ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Retrieve a user by their email address.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no user has the given email.
    fn get_by_email(&self, email: &str) -> Result<User, Error>;
}
