//! Defines the endpoints for transaction CRUD and the monthly summary.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    auth::Claims,
    models::{DatabaseID, NewTransaction, Transaction},
    state::AppState,
    stores::{CategorySummary, TransactionQuery, TransactionStore},
};

/// The optional filters accepted by the transaction list endpoint.
#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    /// Include transactions on or after this date.
    pub date_start: Option<Date>,
    /// Include transactions on or before this date.
    pub date_end: Option<Date>,
    /// Include only transactions with this category.
    pub category: Option<String>,
}

/// A route handler for listing the user's transactions.
///
/// Results are ordered by date ascending and capped at 200 entries.
pub async fn get_transactions(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = state.transaction_store.get_query(
        claims.user_id(),
        TransactionQuery {
            date_start: params.date_start,
            date_end: params.date_end,
            category: params.category,
            limit: None,
        },
    )?;

    Ok(Json(transactions))
}

/// A route handler for getting a transaction by its database ID.
///
/// This function will return the status code 404 if the transaction does not exist, was deleted,
/// or belongs to another user, so unauthorized users cannot know whether another user's resource
/// exists.
pub async fn get_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<Transaction>, Error> {
    let transaction = state
        .transaction_store
        .get(claims.user_id(), transaction_id)?;

    Ok(Json(transaction))
}

/// A route handler for creating a new transaction.
pub async fn create_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let mut transaction_store = state.transaction_store;
    let transaction = transaction_store.create(claims.user_id(), new_transaction)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for overwriting an existing transaction's details.
pub async fn update_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error> {
    let mut transaction_store = state.transaction_store;
    let transaction =
        transaction_store.update(claims.user_id(), transaction_id, new_transaction)?;

    Ok(Json(transaction))
}

/// A route handler for deleting (deactivating) a transaction.
pub async fn delete_transaction(
    State(state): State<AppState>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    let mut transaction_store = state.transaction_store;
    transaction_store.delete(claims.user_id(), transaction_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// The date range for the monthly summary endpoint. Both bounds are required.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// The first date included in the summary.
    pub date_start: Date,
    /// The last date included in the summary.
    pub date_end: Date,
}

/// A route handler for totalling the user's spending per category over a date range.
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Vec<CategorySummary>>, Error> {
    let summary = state.transaction_store.category_summary(
        claims.user_id(),
        params.date_start,
        params.date_end,
    )?;

    Ok(Json(summary))
}
