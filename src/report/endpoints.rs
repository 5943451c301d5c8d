//! Defines the endpoints for quarterly spend reports and the annual cashflow report.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    auth::Claims,
    report::{
        ReportKind,
        aggregate::{MonthlyCashflow, QuarterReport, aggregate_annual_cashflow, aggregate_quarter},
    },
    state::AppState,
};

/// The query parameters selecting which quarter to report on.
#[derive(Debug, Deserialize)]
pub struct QuarterParams {
    /// The calendar year.
    pub year: i32,
    /// The quarter number, 1 through 4.
    pub q: u8,
}

/// The query parameters selecting which year to report on.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    /// The calendar year.
    pub year: i32,
}

/// A route handler for the essentials spend report.
pub async fn get_quarter_essentials(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<QuarterParams>,
) -> Result<Json<QuarterReport>, Error> {
    get_quarter_report(&state, claims, params, ReportKind::Essentials)
}

/// A route handler for the non-essentials spend report.
pub async fn get_quarter_non_essentials(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<QuarterParams>,
) -> Result<Json<QuarterReport>, Error> {
    get_quarter_report(&state, claims, params, ReportKind::NonEssentials)
}

/// A route handler for the shopping spend report.
pub async fn get_quarter_shopping(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<QuarterParams>,
) -> Result<Json<QuarterReport>, Error> {
    get_quarter_report(&state, claims, params, ReportKind::Shopping)
}

fn get_quarter_report(
    state: &AppState,
    claims: Claims,
    params: QuarterParams,
    kind: ReportKind,
) -> Result<Json<QuarterReport>, Error> {
    let report = aggregate_quarter(
        &state.spending_store,
        claims.user_id(),
        params.year,
        params.q,
        kind.categories(),
    )?;

    Ok(Json(report))
}

/// A route handler for the per-month income and expense totals of one year.
pub async fn get_annual_cashflow(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<YearParams>,
) -> Result<Json<Vec<MonthlyCashflow>>, Error> {
    let report = aggregate_annual_cashflow(&state.spending_store, claims.user_id(), params.year)?;

    Ok(Json(report))
}
