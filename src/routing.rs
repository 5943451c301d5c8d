//! Application router configuration and the CORS policy for browser clients.

use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    asset::{create_asset, get_assets},
    endpoints,
    log_in::post_log_in,
    register_user::register_user,
    report::endpoints::{
        get_annual_cashflow, get_quarter_essentials, get_quarter_non_essentials,
        get_quarter_shopping,
    },
    state::AppState,
    transaction::{
        create_transaction, delete_transaction, get_monthly_summary, get_transaction,
        get_transactions, update_transaction,
    },
    user::get_current_user,
};

/// Return a router with all the app's routes.
///
/// `client_url` is an extra origin allowed by the CORS policy, alongside the local development
/// client.
pub fn build_router(state: AppState, client_url: Option<&str>) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::USER, get(get_current_user))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::CREATE_TRANSACTION, post(create_transaction))
        .route(endpoints::MONTHLY_SUMMARY, get(get_monthly_summary))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route(endpoints::REPORT_ESSENTIALS, get(get_quarter_essentials))
        .route(
            endpoints::REPORT_NON_ESSENTIALS,
            get(get_quarter_non_essentials),
        )
        .route(endpoints::REPORT_SHOPPING, get(get_quarter_shopping))
        .route(endpoints::REPORT_ANNUAL_CASHFLOW, get(get_annual_cashflow))
        .route(endpoints::ASSETS, get(get_assets))
        .route(endpoints::CREATE_ASSET, post(create_asset))
        .layer(cors_layer(client_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A route handler reporting that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(client_url: Option<&str>) -> CorsLayer {
    let mut origins = vec![HeaderValue::from_static("http://localhost:3000")];

    if let Some(url) = client_url {
        match HeaderValue::from_str(url) {
            Ok(origin) => origins.push(origin),
            Err(error) => tracing::warn!("Ignoring invalid client URL {url:?}: {error}"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
