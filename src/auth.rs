//! Bearer-token authentication for the protected routes.
//!
//! Handlers opt in to authentication by taking a [Claims] argument: the extractor reads the
//! `Authorization: Bearer` header and verifies the token signature and expiry. There is no
//! session state on the server.

use axum::{
    Json,
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::{Response, StatusCode, request::Parts},
    response::IntoResponse,
    RequestPartsExt,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::{
    models::{User, UserID},
    state::JwtConfig,
};

// Code in this module is adapted from https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: i64,
    /// The email address of the user the token was issued to.
    pub email: String,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// The ID of the authenticated user.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let jwt_config = JwtConfig::from_ref(state);

        let token_data = decode_jwt(bearer.token(), jwt_config.decoding_key())?;

        Ok(token_data.claims)
    }
}

/// The errors that may occur while authenticating a request.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The email and password combination did not match a registered user.
    WrongCredentials,
    /// The request did not carry a bearer token.
    MissingToken,
    /// The bearer token could not be verified (bad signature, malformed, or expired).
    InvalidToken,
    /// The token could not be created.
    TokenCreation,
    /// An unexpected error occurred in a third-party library.
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response<Body> {
        let (status, error_message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "Wrong credentials"),
            AuthError::MissingToken => (StatusCode::BAD_REQUEST, "Missing bearer token"),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, "Invalid token"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "Token creation error"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Create a signed token for `user`.
///
/// # Errors
/// Returns [AuthError::TokenCreation] if the token could not be signed.
pub fn encode_jwt(user: &User, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    let now = OffsetDateTime::now_utc();
    let exp = (now + jwt_config.validity()).unix_timestamp() as usize;
    let iat = now.unix_timestamp() as usize;

    let claims = Claims {
        sub: user.id().as_i64(),
        email: user.email().to_string(),
        iat,
        exp,
    };

    encode(&Header::default(), &claims, jwt_config.encoding_key())
        .map_err(|_| AuthError::TokenCreation)
}

fn decode_jwt(jwt_token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, AuthError> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use email_address::EmailAddress;
    use time::{Duration, OffsetDateTime};

    use crate::{
        models::{PasswordHash, User, UserID},
        state::JwtConfig,
    };

    use super::{AuthError, decode_jwt, encode_jwt};

    fn get_test_user() -> User {
        User::new(
            UserID::new(42),
            "tester".to_string(),
            EmailAddress::from_str("averyemail@email.com").unwrap(),
            PasswordHash::new_unchecked("hash"),
            OffsetDateTime::now_utc(),
        )
    }

    #[test]
    fn decode_jwt_gives_back_user_id_and_email() {
        let jwt_config = JwtConfig::new("foobar", Duration::hours(1));
        let user = get_test_user();

        let jwt = encode_jwt(&user, &jwt_config).unwrap();
        let claims = decode_jwt(&jwt, jwt_config.decoding_key()).unwrap().claims;

        assert_eq!(claims.user_id(), user.id());
        assert_eq!(claims.email, user.email().to_string());
    }

    #[test]
    fn decode_jwt_rejects_token_signed_with_other_secret() {
        let jwt_config = JwtConfig::new("foobar", Duration::hours(1));
        let other_config = JwtConfig::new("not foobar", Duration::hours(1));

        let jwt = encode_jwt(&get_test_user(), &other_config).unwrap();
        let result = decode_jwt(&jwt, jwt_config.decoding_key());

        assert_eq!(result.map(|_| ()), Err(AuthError::InvalidToken));
    }

    #[test]
    fn decode_jwt_rejects_expired_token() {
        let jwt_config = JwtConfig::new("foobar", Duration::hours(-1));

        let jwt = encode_jwt(&get_test_user(), &jwt_config).unwrap();
        let result = decode_jwt(&jwt, jwt_config.decoding_key());

        assert_eq!(result.map(|_| ()), Err(AuthError::InvalidToken));
    }

    #[test]
    fn decode_jwt_rejects_garbage() {
        let jwt_config = JwtConfig::new("foobar", Duration::hours(1));

        let result = decode_jwt("not.a.token", jwt_config.decoding_key());

        assert_eq!(result.map(|_| ()), Err(AuthError::InvalidToken));
    }
}
