// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::vision::ocr::tesseract::{TesseractConfig, DEFAULT_LANGUAGE, DEFAULT_TESSERACT_CMD};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Maximum upload size (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("OCR language must not be empty")]
    EmptyLanguage,

    #[error("max upload size must be greater than zero")]
    ZeroUploadLimit,
}

/// Korean OCR node
///
/// Every flag can also be set through the environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(name = "kor-ocr-node")]
#[command(version)]
#[command(about = "HTTP OCR service backed by Tesseract", long_about = None)]
pub struct NodeConfig {
    /// Address to bind
    #[arg(long, env = "OCR_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "OCR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the tesseract executable
    #[arg(long, env = "TESSERACT_CMD", default_value = DEFAULT_TESSERACT_CMD)]
    pub tesseract_cmd: PathBuf,

    /// Tesseract language code
    #[arg(long, env = "OCR_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Send decoded uploads to the engine without preprocessing
    #[arg(long, env = "OCR_NO_PREPROCESS")]
    pub no_preprocess: bool,

    /// Upper bound on a single OCR call in seconds (0 disables)
    #[arg(long, env = "OCR_TIMEOUT_SECS", default_value_t = DEFAULT_OCR_TIMEOUT_SECS)]
    pub ocr_timeout_secs: u64,

    /// Maximum accepted request body in bytes
    #[arg(long, env = "OCR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl NodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tesseract_config(&self) -> TesseractConfig {
        TesseractConfig {
            command: self.tesseract_cmd.clone(),
            language: self.language.clone(),
        }
    }

    pub fn ocr_settings(&self) -> OcrSettings {
        OcrSettings {
            preprocess: !self.no_preprocess,
            ocr_timeout: (self.ocr_timeout_secs > 0)
                .then(|| Duration::from_secs(self.ocr_timeout_secs)),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Request-time settings shared by every handler invocation
#[derive(Debug, Clone)]
pub struct OcrSettings {
    /// Run the preprocessing pipeline before OCR
    pub preprocess: bool,
    /// Bound on the OCR engine call
    pub ocr_timeout: Option<Duration>,
    /// Request body limit
    pub max_upload_bytes: usize,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            preprocess: true,
            ocr_timeout: Some(Duration::from_secs(DEFAULT_OCR_TIMEOUT_SECS)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
