//! Implements the structs that hold the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;
use time::Duration;

use crate::{
    Error,
    db::initialize,
    stores::sqlite::{
        SQLiteAssetStore, SQLiteSpendingStore, SQLiteTransactionStore, SQLiteUserStore,
    },
};

/// The default duration for which auth tokens are valid.
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::hours(24);

/// The keys and validity duration used for signing and verifying auth tokens.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl JwtConfig {
    /// Create the token config from a `secret` string.
    ///
    /// Tokens signed with a different secret will fail verification.
    pub fn new(secret: &str, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validity,
        }
    }

    /// The encoding key for signing tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The decoding key for verifying tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// How long a newly issued token remains valid.
    pub fn validity(&self) -> Duration {
        self.validity
    }
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The database connection shared by the stores.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config for issuing and verifying auth tokens.
    pub jwt_config: JwtConfig,
    /// The store for managing [users](crate::models::User).
    pub user_store: SQLiteUserStore,
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: SQLiteTransactionStore,
    /// The store for managing [assets](crate::models::Asset).
    pub asset_store: SQLiteAssetStore,
    /// The store backing the report aggregator.
    pub spending_store: SQLiteSpendingStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        jwt_secret: &str,
        token_validity: Duration,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            db_connection: connection.clone(),
            jwt_config: JwtConfig::new(jwt_secret, token_validity),
            user_store: SQLiteUserStore::new(connection.clone()),
            transaction_store: SQLiteTransactionStore::new(connection.clone()),
            asset_store: SQLiteAssetStore::new(connection.clone()),
            spending_store: SQLiteSpendingStore::new(connection),
        })
    }
}

// This impl lets the `Claims` extractor access the token keys from the app state.
impl FromRef<AppState> for JwtConfig {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_config.clone()
    }
}
