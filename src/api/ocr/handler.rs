// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR endpoint handler

use std::time::{Duration, Instant};

use axum::{extract::State, Json};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use image::DynamicImage;
use tracing::{debug, info};

use super::request::UploadedImage;
use super::response::OcrResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::image_utils::format_to_extension;
use crate::vision::ocr::{preprocess_for_ocr, EngineError, OcrEngine};
use crate::vision::decode_image_bytes;

/// POST /ocr - Extract text from an uploaded image
///
/// # Request
/// Multipart form with a file field named `image`. Any extension or content
/// type is accepted; the bytes are sniffed when decoding.
///
/// # Response
/// - `extracted_text`: text as returned by the engine (may be empty)
///
/// # Errors
/// - 400 Bad Request: no `image` field, or it has no filename (`"No selected file"`)
/// - 400 Bad Request: the multipart body could not be read
/// - 500 Internal Server Error: decode, preprocessing or engine failure
pub async fn ocr_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>, ApiError> {
    // A body that is not multipart at all carries no file either.
    let multipart = multipart.map_err(|e| {
        debug!("Rejected non-multipart OCR request: {}", e);
        ApiError::NoSelectedFile
    })?;

    let upload = UploadedImage::from_multipart(multipart).await?;
    info!(
        "OCR request received: {} ({} bytes, {})",
        upload.filename,
        upload.bytes.len(),
        upload.content_type.as_deref().unwrap_or("no content type")
    );

    let started = Instant::now();

    // Decoding and filtering are CPU-bound; keep them off the async workers.
    let preprocess = state.settings.preprocess;
    let image = tokio::task::spawn_blocking(move || prepare_image(&upload.bytes, preprocess))
        .await
        .map_err(|e| ApiError::InternalError(format!("image worker failed: {}", e)))??;

    let text = run_engine(state.engine.as_ref(), &image, state.settings.ocr_timeout).await?;

    info!(
        "OCR complete via {}: {} chars, {}ms",
        state.engine.name(),
        text.chars().count(),
        started.elapsed().as_millis()
    );

    Ok(Json(OcrResponse::new(text)))
}

/// Decode upload bytes and, if enabled, run the preprocessing pipeline
pub fn prepare_image(bytes: &[u8], preprocess: bool) -> Result<DynamicImage, ApiError> {
    let (image, info) = decode_image_bytes(bytes)?;
    debug!(
        "Decoded image: {}x{} {}, {} bytes",
        info.width,
        info.height,
        format_to_extension(info.format),
        info.size_bytes
    );

    if !preprocess {
        return Ok(image);
    }
    Ok(preprocess_for_ocr(image)?)
}

async fn run_engine(
    engine: &dyn OcrEngine,
    image: &DynamicImage,
    limit: Option<Duration>,
) -> Result<String, EngineError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, engine.extract_text(image))
            .await
            .map_err(|_| EngineError::Timeout(limit))?,
        None => engine.extract_text(image).await,
    }
}
