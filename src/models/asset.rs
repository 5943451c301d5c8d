//! This file defines the `Asset` type, a point-in-time snapshot of an account's value.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::models::{DatabaseID, UserID};

/// A snapshot of the value held in an account (e.g. a savings account) on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// The ID of the asset record.
    pub id: DatabaseID,
    /// The ID of the user that recorded this asset.
    pub user_id: UserID,
    /// The name of the account the money is held in.
    pub account: String,
    /// The value of the account in minor currency units (e.g. cents).
    pub amount: i64,
    /// The date the account value was observed.
    pub date: Date,
    /// A free-form note about the asset.
    pub notes: String,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The data needed to record a new asset snapshot.
///
/// This is the request payload for the asset create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// The name of the account the money is held in.
    pub account: String,
    /// The value of the account in minor currency units (e.g. cents).
    pub amount: i64,
    /// The date the account value was observed.
    pub date: Date,
    /// A free-form note about the asset.
    #[serde(default)]
    pub notes: String,
}
