//! The xwing server binary.

use std::{env, net::SocketAddr};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use xwing::{AppState, Config, build_router, graceful_shutdown};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let secret =
        env::var("JWT_SECRET").expect("The environment variable 'JWT_SECRET' must be set");

    let connection = Connection::open(&config.db_path).expect("Could not open the database.");
    let state = AppState::new(
        connection,
        &secret,
        Duration::hours(config.token_validity_hours),
    )
    .expect("Could not initialize the application state.");

    let router = build_router(state, config.client_url.as_deref());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("HTTP server listening on {addr}");

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}
