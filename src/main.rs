// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use kor_ocr_node::{
    api::http_server::start_server,
    config::NodeConfig,
    version,
    vision::ocr::{OcrEngine, TesseractEngine},
};
use std::{env, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = NodeConfig::parse();
    config.validate()?;

    info!("Starting {}", version::get_version_info());
    let engine = TesseractEngine::new(config.tesseract_config());
    info!(
        "Engine: {} (-l {}), preprocessing {}, timeout {}",
        engine.config().command.display(),
        engine.config().language,
        if config.no_preprocess { "off" } else { "on" },
        match config.ocr_settings().ocr_timeout {
            Some(limit) => format!("{}s", limit.as_secs()),
            None => "none".to_string(),
        }
    );

    // Startup diagnostic only: requests still fail individually if the
    // engine stays unusable.
    match engine.probe().await {
        Ok(banner) => info!("Found {}", banner),
        Err(e) => warn!("OCR engine check failed, requests will return 500: {}", e),
    }

    let engine: Arc<dyn OcrEngine> = Arc::new(engine);
    start_server(&config, engine).await
}
