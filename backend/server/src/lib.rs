//! Backend for the certification info session RSVP form.
//!
//! # Endpoints
//!
//! - `POST /api/rsvp`: validate and store a submission
//! - `GET /api/rsvps`: every stored submission, oldest first
//!
//!
//!
//! # Flow
//!
//! - Payload is checked against [`schema`], nothing is stored on failure
//! - Email is looked up case-insensitively, a hit is a `409`
//! - Otherwise the store assigns the next id and timestamps the record
//! - Lookup and insert run under one lock so two tabs submitting at once still produce one record
//!
//!
//!
//! # Dashboard
//!
//! The admin dashboard reads `GET /api/rsvps`. Its password check happens in
//! the browser only, so the listing is effectively public. Keep the server off
//! the open internet if that matters.
//!
//!
//!
//! # Running
//!
//! In-memory store on the default port.
//! ```sh
//! RUST_LOG=info cargo run -p rsvp
//! ```
//!
//! Redis backed.
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 RUST_PORT=8080 cargo run -p rsvp
//! ```
//!
//! Smoke test a running server.
//! ```sh
//! cargo run -p tester -- --url http://127.0.0.1:1111 --email alee@bu.edu
//! ```
use std::{error::Error, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;

use config::Config;
use routes::{rsvp_handler, rsvps_handler};
use state::State;

pub async fn start_server() -> Result<(), Box<dyn Error + Send + Sync>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");
    let app = build_router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/rsvp", post(rsvp_handler))
        .route("/api/rsvps", get(rsvps_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
