// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine trait definition

use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

/// Errors reported by an OCR engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OCR engine not found at {0}")]
    NotFound(String),

    #[error("failed to run OCR engine: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image for OCR engine: {0}")]
    Encode(String),

    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("OCR engine produced invalid UTF-8 output: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("OCR engine timed out after {0:?}")]
    Timeout(Duration),
}

/// Trait for text extraction backends
///
/// Implementations must be safe to share between concurrent requests; the
/// server holds a single instance behind an `Arc`.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract text from a raster image
    ///
    /// Returns an empty string when the image contains no detectable text.
    async fn extract_text(&self, image: &DynamicImage) -> Result<String, EngineError>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}
