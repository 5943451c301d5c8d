//! Defines the endpoint for logging in and receiving an auth token.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthError, encode_jwt},
    state::AppState,
    stores::UserStore,
};

/// The request body for logging in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// A route handler for log-in requests.
///
/// On success the response body is the signed bearer token as a JSON string.
///
/// # Errors
/// Responds with 401 if the email does not belong to a registered user or the password does not
/// match. The two cases are indistinguishable to the client on purpose.
pub async fn post_log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<String>, AuthError> {
    let user = state
        .user_store
        .get_by_email(&credentials.email)
        .map_err(|error| match error {
            Error::NotFound => AuthError::WrongCredentials,
            error => {
                tracing::error!("Error looking up user during log-in: {error}");
                AuthError::InternalError
            }
        })?;

    let password_is_correct = user
        .password_hash()
        .verify(&credentials.password)
        .map_err(|error| {
            tracing::error!("Error verifying password: {error}");
            AuthError::InternalError
        })?;

    if !password_is_correct {
        return Err(AuthError::WrongCredentials);
    }

    let token = encode_jwt(&user, &state.jwt_config)?;

    Ok(Json(token))
}
