// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Korean OCR node

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Full version string with feature description
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"), "-tesseract-kor");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multipart-upload",
    "grayscale",
    "contrast-boost",
    "median-denoise",
    "lanczos-upscale",
    "tesseract-cli",
    "ocr-timeout",
];

/// Get version information as a formatted string
pub fn get_version_info() -> String {
    format!(
        "Korean OCR Node {}\nFeatures: {}",
        VERSION,
        FEATURES.join(", ")
    )
}
