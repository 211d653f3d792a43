// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing ahead of Tesseract
//!
//! Four fixed stages, always in this order:
//! 1. grayscale conversion
//! 2. contrast boost around the image mean
//! 3. 3x3 median noise filter (edge-extended borders)
//! 4. 2x Lanczos3 upscale

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::filter::median_filter;
use thiserror::Error;
use tracing::debug;

/// Contrast multiplier applied around the mean intensity
pub const CONTRAST_FACTOR: f32 = 2.0;

/// Median window radius (1 => 3x3 neighbourhood)
pub const MEDIAN_RADIUS: u32 = 1;

/// Width and height multiplier of the final resize
pub const UPSCALE_FACTOR: u32 = 2;

/// Resampling filter used for the upscale stage
pub const UPSCALE_FILTER: FilterType = FilterType::Lanczos3;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("image {width}x{height} is too large to upscale by {factor}x")]
    TooLargeToUpscale { width: u32, height: u32, factor: u32 },
}

/// Run the full preprocessing pipeline
///
/// The input is consumed; the output is always a `Luma8` image with exactly
/// twice the width and height of the input.
pub fn preprocess_for_ocr(image: DynamicImage) -> Result<DynamicImage, PreprocessError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PreprocessError::EmptyImage { width, height });
    }
    // Fail before doing any pixel work.
    scaled_dimensions(width, height, UPSCALE_FACTOR)?;

    let gray = to_grayscale(&image);
    drop(image);
    let contrasted = enhance_contrast(&gray, CONTRAST_FACTOR);
    let denoised = denoise(&contrasted);
    let upscaled = upscale(&denoised, UPSCALE_FACTOR)?;

    debug!(
        "Preprocessed {}x{} -> {}x{}",
        width,
        height,
        upscaled.width(),
        upscaled.height()
    );

    Ok(DynamicImage::ImageLuma8(upscaled))
}

/// Convert any colour mode to single-channel luminance
///
/// Alpha is discarded.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Scale contrast by `factor` around the rounded mean intensity
///
/// `out = mean + factor * (p - mean)`, saturated to 0..=255.
pub fn enhance_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let mean = mean_intensity(image);

    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        let value = mean + factor * (f32::from(pixel[0]) - mean);
        *pixel = Luma([value.round().clamp(0.0, 255.0) as u8]);
    }
    output
}

/// Replace every pixel with the median of its 3x3 neighbourhood
///
/// Pixels beyond the border take the value of the nearest edge pixel.
pub fn denoise(image: &GrayImage) -> GrayImage {
    median_filter(image, MEDIAN_RADIUS, MEDIAN_RADIUS)
}

/// Resize to exactly `factor` times the width and height
pub fn upscale(image: &GrayImage, factor: u32) -> Result<GrayImage, PreprocessError> {
    let (width, height) = scaled_dimensions(image.width(), image.height(), factor)?;
    Ok(imageops::resize(image, width, height, UPSCALE_FILTER))
}

/// Target dimensions of an upscale, rejecting overflow
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    factor: u32,
) -> Result<(u32, u32), PreprocessError> {
    match (width.checked_mul(factor), height.checked_mul(factor)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(PreprocessError::TooLargeToUpscale {
            width,
            height,
            factor,
        }),
    }
}

fn mean_intensity(image: &GrayImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| u64::from(p[0])).sum();
    ((sum as f64 / count as f64).round()) as f32
}
