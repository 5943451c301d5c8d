//! Defines the endpoint for registering a new user.

use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error,
    models::{PasswordHash, ValidatedPassword},
    state::AppState,
    stores::UserStore,
    user::UserResponse,
};

/// The request body for registering a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The display name for the new user.
    pub username: String,
    /// The email address to register with.
    pub email: String,
    /// The plain-text password, validated and hashed before storage.
    pub password: String,
}

/// A route handler for registering a new user.
///
/// # Errors
/// Responds with:
/// - 400 if the email is malformed or the password is too short,
/// - 409 if the email is already registered.
pub async fn register_user(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<UserResponse>), Error> {
    let email =
        EmailAddress::from_str(&form.email).map_err(|_| Error::InvalidEmail(form.email.clone()))?;
    let password = ValidatedPassword::new(&form.password)?;
    let password_hash = PasswordHash::new(password, PasswordHash::DEFAULT_COST)?;

    let mut user_store = state.user_store;
    let user = user_store.create(&form.username, email, password_hash)?;

    tracing::info!("registered user {}", user.id());

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
