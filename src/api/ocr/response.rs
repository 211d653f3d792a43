// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR response types

use serde::{Deserialize, Serialize};

/// Response from OCR processing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrResponse {
    /// Text exactly as the engine returned it
    pub extracted_text: String,
}

impl OcrResponse {
    pub fn new(extracted_text: String) -> Self {
        Self { extracted_text }
    }
}
