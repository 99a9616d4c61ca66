mod agents;
mod backend;
mod config;
mod errors;
mod forms;
mod routes;
mod state;
mod ui;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agents::interview::{FixedQuestionBank, InterviewSessions};
use crate::agents::ranking::CandidateCache;
use crate::backend::{BackendClient, MODEL_VERSION};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recruiting console v{}", env!("CARGO_PKG_VERSION"));

    // Initialize backend client
    let backend =
        BackendClient::new(config.backend_url.clone()).context("failed to build backend client")?;
    info!(
        "Backend client initialized ({}, model: {MODEL_VERSION})",
        backend.base_url()
    );

    // Opening interview questions come from the fixed bank
    let question_source = Arc::new(FixedQuestionBank::new(config.question_prep_delay));

    // Build app state
    let state = AppState {
        backend,
        config: config.clone(),
        question_source,
        interviews: InterviewSessions::new(),
        candidates: CandidateCache::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
