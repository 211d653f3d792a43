// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::vision::ocr::{EngineError, PreprocessError};
use crate::vision::ImageError;

pub const NO_SELECTED_FILE: &str = "No selected file";

/// Body of every non-200 response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No selected file")]
    NoSelectedFile,

    #[error("{detail}")]
    InvalidUpload { status: StatusCode, detail: String },

    #[error(transparent)]
    Decode(#[from] ImageError),

    #[error(transparent)]
    Processing(#[from] PreprocessError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoSelectedFile => StatusCode::BAD_REQUEST,
            ApiError::InvalidUpload { status, .. } => *status,
            ApiError::Decode(_)
            | ApiError::Processing(_)
            | ApiError::Engine(_)
            | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("OCR request failed: {}", self);
        } else {
            debug!("OCR request rejected: {}", self);
        }

        (status, Json(self.to_response())).into_response()
    }
}
