// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_extra::extract::multipart::MultipartError;
use axum_extra::extract::Multipart;

use crate::api::errors::ApiError;

/// Name of the multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// A file received in the `image` field of one request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename declared by the client (never empty)
    pub filename: String,
    /// Declared content type, informational only
    pub content_type: Option<String>,
    /// Raw file bytes
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Pull the `image` field out of a multipart body
    ///
    /// Other fields are skipped. A missing field or a field without a
    /// filename is reported as `ApiError::NoSelectedFile`, and so is a body
    /// that breaks before its first field (an empty body, for instance)
    /// unless it broke on the size limit. The content type and extension
    /// are not checked.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut seen_field = false;
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) if !seen_field && e.status() != StatusCode::PAYLOAD_TOO_LARGE => {
                    tracing::debug!("Multipart body has no readable field: {}", e.body_text());
                    return Err(ApiError::NoSelectedFile);
                }
                Err(e) => return Err(invalid_upload(e)),
            };
            seen_field = true;

            if field.name() != Some(IMAGE_FIELD) {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            if filename.is_empty() {
                return Err(ApiError::NoSelectedFile);
            }
            let content_type = field.content_type().map(str::to_string);

            let bytes = field
                .bytes()
                .await
                .map_err(invalid_upload)?;

            return Ok(Self {
                filename,
                content_type,
                bytes,
            });
        }

        Err(ApiError::NoSelectedFile)
    }
}

/// Keep the multer cause and its status; anything that is not a client
/// error is still the client's upload, so it becomes a 400.
fn invalid_upload(error: MultipartError) -> ApiError {
    let status = error.status();
    ApiError::InvalidUpload {
        status: if status.is_client_error() {
            status
        } else {
            StatusCode::BAD_REQUEST
        },
        detail: error.body_text(),
    }
}
