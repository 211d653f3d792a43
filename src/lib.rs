// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod version;
pub mod vision;

pub use api::{ApiError, ErrorResponse, OcrResponse};
pub use config::{NodeConfig, OcrSettings};
pub use vision::ocr::{EngineError, OcrEngine, TesseractConfig, TesseractEngine};
