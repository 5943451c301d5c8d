//! Xwing is a REST API for tracking personal finances: transactions, asset snapshots, and
//! quarterly spend reports.
//!
//! Clients authenticate with a JWT bearer token obtained from the log-in endpoint. All data is
//! stored in a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod asset;
mod auth;
mod config;
mod db;
pub mod endpoints;
mod error;
mod log_in;
pub mod models;
mod register_user;
pub mod report;
mod routing;
mod state;
pub mod stores;
mod transaction;
mod user;

pub use config::Config;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use routing::build_router;
pub use state::{AppState, DEFAULT_TOKEN_VALIDITY, JwtConfig};
pub use user::UserResponse;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
