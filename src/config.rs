//! Command line configuration for the server binary.

use clap::Parser;

/// The REST API server for xwing, a personal finance tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "xwing.db")]
    pub db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// An extra origin allowed by the CORS policy, e.g. the deployed web client.
    #[arg(long)]
    pub client_url: Option<String>,

    /// How many hours a newly issued auth token remains valid.
    #[arg(long, default_value_t = 24)]
    pub token_validity_hours: i64,
}
