//! Defines the endpoint for fetching the authenticated user's profile.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::Claims,
    models::{DatabaseID, User},
    state::AppState,
    stores::UserStore,
};

/// The public view of a user, without the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// The user's ID in the database.
    pub id: DatabaseID,
    /// The display name chosen by the user.
    pub username: String,
    /// The email address associated with the user.
    pub email: String,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// A route handler for fetching the profile of the authenticated user.
pub async fn get_current_user(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<UserResponse>, Error> {
    let user = state.user_store.get(claims.user_id())?;

    Ok(Json(UserResponse::from(&user)))
}
