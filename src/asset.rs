//! Defines the endpoints for listing and recording asset snapshots.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    Error,
    auth::Claims,
    models::{Asset, NewAsset},
    state::AppState,
    stores::AssetStore,
};

/// A route handler for listing the user's asset snapshots, ordered by date ascending.
pub async fn get_assets(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<Asset>>, Error> {
    let assets = state.asset_store.get_by_user(claims.user_id())?;

    Ok(Json(assets))
}

/// A route handler for recording a new asset snapshot.
pub async fn create_asset(
    State(state): State<AppState>,
    claims: Claims,
    Json(new_asset): Json<NewAsset>,
) -> Result<(StatusCode, Json<Asset>), Error> {
    let mut asset_store = state.asset_store;
    let asset = asset_store.create(claims.user_id(), new_asset)?;

    Ok((StatusCode::CREATED, Json(asset)))
}
