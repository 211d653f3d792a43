// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text extraction from images
//!
//! Components:
//! - `preprocessing` - Grayscale, contrast, median and upscale stages
//! - `engine` - The `OcrEngine` seam
//! - `tesseract` - Tesseract CLI implementation of `OcrEngine`

pub mod engine;
pub mod preprocessing;
pub mod tesseract;

pub use engine::{EngineError, OcrEngine};
pub use preprocessing::{preprocess_for_ocr, PreprocessError};
pub use tesseract::{TesseractConfig, TesseractEngine};
