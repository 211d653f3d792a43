// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage};
use kor_ocr_node::vision::ocr::{EngineError, OcrEngine};
use std::io::Cursor;
use std::sync::Mutex;

pub const BOUNDARY: &str = "kor-ocr-node-test-boundary";

/// What a fake engine was handed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeenImage {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

/// Engine that answers with fixed text and records every image it receives
pub struct RecordingEngine {
    text: String,
    seen: Mutex<Vec<SeenImage>>,
}

impl RecordingEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenImage> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrEngine for RecordingEngine {
    async fn extract_text(&self, image: &DynamicImage) -> Result<String, EngineError> {
        self.seen.lock().unwrap().push(SeenImage {
            width: image.width(),
            height: image.height(),
            color: image.color(),
        });
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Engine that behaves like a missing Tesseract install
pub struct MissingEngine;

#[async_trait]
impl OcrEngine for MissingEngine {
    async fn extract_text(&self, _image: &DynamicImage) -> Result<String, EngineError> {
        Err(EngineError::NotFound("/usr/bin/tesseract".to_string()))
    }

    fn name(&self) -> &'static str {
        "missing"
    }
}

/// Encode a solid RGB image
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 240, 240])));
    encode(&image, ImageFormat::Png)
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode fixture image");
    bytes
}

/// One part of a hand-built multipart body
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn image(filename: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "image",
            filename: Some(filename),
            content_type: Some("image/png"),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{}\"", filename));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
