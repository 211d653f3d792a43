// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tesseract command-line engine
//!
//! Each call spawns `<command> stdin stdout -l <language>`, streams a PNG
//! encoding of the image into the child's stdin and reads the recognised
//! text from its stdout. Nothing touches the filesystem.

use std::io::Cursor;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use image::{ColorType, DynamicImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::engine::{EngineError, OcrEngine};

/// Default Tesseract install location on Debian/Ubuntu
pub const DEFAULT_TESSERACT_CMD: &str = "/usr/bin/tesseract";

/// Default recognition language (Korean traineddata)
pub const DEFAULT_LANGUAGE: &str = "kor";

/// Configuration for the Tesseract engine
#[derive(Debug, Clone)]
pub struct TesseractConfig {
    /// Path to the `tesseract` executable
    pub command: PathBuf,
    /// Language code passed with `-l`
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_TESSERACT_CMD),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// OCR engine backed by the Tesseract CLI
pub struct TesseractEngine {
    config: TesseractConfig,
}

impl TesseractEngine {
    pub fn new(config: TesseractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TesseractConfig {
        &self.config
    }

    /// Run `<command> --version` and return the first line of its report
    ///
    /// Used as a startup diagnostic only; request handling never depends on it.
    pub async fn probe(&self) -> Result<String, EngineError> {
        let output = Command::new(&self.config.command)
            .arg("--version")
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Older releases print the banner on stderr.
        let report = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let report = String::from_utf8_lossy(&report);
        Ok(report.lines().next().unwrap_or_default().trim().to_string())
    }

    fn spawn_error(&self, error: std::io::Error) -> EngineError {
        if error.kind() == std::io::ErrorKind::NotFound {
            EngineError::NotFound(self.config.command.display().to_string())
        } else {
            EngineError::Io(error)
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn extract_text(&self, image: &DynamicImage) -> Result<String, EngineError> {
        let png = encode_png(image)?;

        let mut child = Command::new(&self.config.command)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "OCR engine stdin unavailable",
            ))
        })?;

        let write_image = async move {
            stdin.write_all(&png).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write_image, child.wait_with_output());
        let output = output?;

        // A child that dies early breaks the pipe; its exit status is the
        // more useful error in that case.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("Tesseract exited with {}: {}", output.status, stderr);
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }
        written?;

        let text = String::from_utf8(output.stdout)?;
        debug!(
            "Tesseract ({}) returned {} chars",
            self.config.language,
            text.chars().count()
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Encode an image as PNG in memory
///
/// PNG holds 8- and 16-bit integer samples only; float images (HDR, EXR)
/// are converted to RGBA8 first.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, EngineError> {
    let converted;
    let encodable = match image.color() {
        ColorType::L8
        | ColorType::La8
        | ColorType::Rgb8
        | ColorType::Rgba8
        | ColorType::L16
        | ColorType::La16
        | ColorType::Rgb16
        | ColorType::Rgba16 => image,
        _ => {
            converted = DynamicImage::ImageRgba8(image.to_rgba8());
            &converted
        }
    };

    let mut bytes = Vec::new();
    encodable
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| EngineError::Encode(e.to_string()))?;
    Ok(bytes)
}
