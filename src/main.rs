//! Project NADIR - Rust/Axum Decision Engine
//!
//! Serves the glucose decision API for the dashboard. Streamlit
//! continues to handle the input form, charts, and the spreadsheet log;
//! every decision call lands here.

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod engine;
mod error;

use engine::Parameters;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub params: Arc<Parameters>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nadir_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Engine parameters: optional JSON override, defaults otherwise.
    // Parameters are immutable after startup; a policy change means a
    // new file and a restart, never an in-place edit.
    let params = match std::env::var("NADIR_PARAMS_FILE") {
        Ok(path) => {
            tracing::info!("Loading engine parameters from {}", path);
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        }
        Err(_) => Parameters::default(),
    };
    tracing::info!(
        "Engine configured: target {} mg/dL, carb factor {}, nadir window {:?} h",
        params.target_glucose,
        params.carb_factor,
        params.nadir_window
    );

    let state = AppState {
        params: Arc::new(params),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Decision engine API (called by Streamlit)
        .nest("/api/engine", engine::router())
        // State and middleware
        .with_state(state)
        .layer(CompressionLayer::new())
        // The dashboard dev server calls cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rust-engine"
    }))
}
