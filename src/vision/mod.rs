// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for the OCR endpoint
//!
//! This module provides:
//! - Decoding of uploaded image bytes
//! - OCR preprocessing and the Tesseract engine

pub mod image_utils;
pub mod ocr;

pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
