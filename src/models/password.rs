//! This file defines types that handle password validation and hashing.
//! `ValidatedPassword` wraps a string and ensures it meets the password policy.
//! `PasswordHash` converts a `ValidatedPassword` into a salted and hashed password.

use std::fmt::Display;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The minimum number of characters a password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A password that has been validated, but not yet hashed.
///
/// This struct can be used to construct a [PasswordHash].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create and validate a new password from a string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password is shorter than
    /// [MIN_PASSWORD_LENGTH] characters.
    pub fn new(raw_password_string: &str) -> Result<Self, Error> {
        if raw_password_string.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }

        Ok(Self(raw_password_string.to_string()))
    }

    /// Create a new `ValidatedPassword` without any validation.
    ///
    /// The caller should ensure that `raw_password_string` is a valid password.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid
    /// password is provided it may cause incorrect behaviour but will not affect memory safety.
    pub fn new_unchecked(raw_password_string: &str) -> Self {
        Self(raw_password_string.to_string())
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Create a hashed password from a validated password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// A value of at least 12 is recommended. Pass in [PasswordHash::DEFAULT_COST] to use the
    /// recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        match hash(&password.0, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid hash
    /// is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check whether `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying hashing library fails.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|e| Error::HashingError(e.to_string()))
    }

    /// The hash as a string for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{MIN_PASSWORD_LENGTH, PasswordHash, ValidatedPassword};

    const TEST_COST: u32 = 4;

    #[test]
    fn validation_rejects_short_password() {
        let result = ValidatedPassword::new("hunter2");

        assert_eq!(result, Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH)));
    }

    #[test]
    fn validation_accepts_password_at_minimum_length() {
        assert!(ValidatedPassword::new("okpasswd").is_ok());
    }

    #[test]
    fn verify_accepts_original_password() {
        let password = ValidatedPassword::new("averysafeandsecurepassword").unwrap();
        let hash = PasswordHash::new(password, TEST_COST).unwrap();

        assert!(hash.verify("averysafeandsecurepassword").unwrap());
    }

    #[test]
    fn verify_rejects_other_password() {
        let password = ValidatedPassword::new("averysafeandsecurepassword").unwrap();
        let hash = PasswordHash::new(password, TEST_COST).unwrap();

        assert!(!hash.verify("someotherpassword").unwrap());
    }

    #[test]
    fn display_does_not_leak_password() {
        let password = ValidatedPassword::new("averysafeandsecurepassword").unwrap();

        assert_eq!(password.to_string(), "********");
    }
}
