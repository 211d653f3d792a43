// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::ocr::ocr_handler;
use crate::config::{NodeConfig, OcrSettings};
use crate::vision::ocr::OcrEngine;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn OcrEngine>,
    pub settings: Arc<OcrSettings>,
}

impl AppState {
    pub fn new(engine: Arc<dyn OcrEngine>, settings: OcrSettings) -> Self {
        Self {
            engine,
            settings: Arc::new(settings),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/ocr", post(ocr_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &NodeConfig, engine: Arc<dyn OcrEngine>) -> anyhow::Result<()> {
    let app = create_app(AppState::new(engine, config.ocr_settings()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("OCR server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("OCR server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
