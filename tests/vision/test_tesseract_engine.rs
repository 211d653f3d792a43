// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Process handling tests for TesseractEngine
//!
//! Stub shell scripts stand in for the tesseract binary so the spawn, pipe
//! and exit-status paths are covered without an OCR install. The real
//! Korean recognition test is ignored by default.

use image::{DynamicImage, GrayImage, Luma};
use kor_ocr_node::vision::ocr::{EngineError, OcrEngine, TesseractConfig, TesseractEngine};
use std::path::{Path, PathBuf};

fn engine_at(command: &Path) -> TesseractEngine {
    TesseractEngine::new(TesseractConfig {
        command: command.to_path_buf(),
        language: "kor".to_string(),
    })
}

fn sample_image() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 8, Luma([255])))
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// All scripts are written before any is spawned; executing a file that
/// another thread still holds open for writing fails with ETXTBSY.
#[cfg(unix)]
#[tokio::test]
async fn test_stub_engine_process_handling() {
    let dir = tempfile::tempdir().unwrap();

    let echo_korean = write_script(
        dir.path(),
        "echo_korean",
        "cat > /dev/null\nprintf '안녕하세요\\n'",
    );
    let echo_args = write_script(dir.path(), "echo_args", "cat > /dev/null\necho \"$@\"");
    let count_input = write_script(dir.path(), "count_input", "wc -c | tr -d ' '");
    let failing = write_script(
        dir.path(),
        "failing",
        "echo 'Error opening data file kor.traineddata' >&2\nexit 1",
    );
    let silent = write_script(dir.path(), "silent", "cat > /dev/null");
    let version = write_script(dir.path(), "version", "echo 'tesseract 5.3.0'\necho ' leptonica-1.82.0'");

    // UTF-8 output is returned untouched.
    let text = engine_at(&echo_korean)
        .extract_text(&sample_image())
        .await
        .unwrap();
    assert_eq!(text, "안녕하세요\n");

    // Command line: stdin stdout -l <language>
    let args = engine_at(&echo_args)
        .extract_text(&sample_image())
        .await
        .unwrap();
    assert_eq!(args.trim(), "stdin stdout -l kor");

    // The whole PNG reaches the child's stdin.
    let expected = kor_ocr_node::vision::ocr::tesseract::encode_png(&sample_image()).unwrap();
    let received = engine_at(&count_input)
        .extract_text(&sample_image())
        .await
        .unwrap();
    assert_eq!(received.trim(), expected.len().to_string());

    // Non-zero exit carries stderr.
    let err = engine_at(&failing)
        .extract_text(&sample_image())
        .await
        .unwrap_err();
    match err {
        EngineError::Failed { stderr, .. } => assert!(stderr.contains("kor.traineddata")),
        other => panic!("expected Failed, got {:?}", other),
    }

    // No text is an empty string, not an error.
    let empty = engine_at(&silent)
        .extract_text(&sample_image())
        .await
        .unwrap();
    assert!(empty.is_empty());

    // Probe reports the first line of the banner.
    let banner = engine_at(&version).probe().await.unwrap();
    assert_eq!(banner, "tesseract 5.3.0");
}

#[tokio::test]
async fn test_missing_engine_binary() {
    let engine = engine_at(Path::new("/definitely/not/here/tesseract"));

    let err = engine.extract_text(&sample_image()).await.unwrap_err();

    assert!(matches!(err, EngineError::NotFound(_)));
    assert_eq!(
        err.to_string(),
        "OCR engine not found at /definitely/not/here/tesseract"
    );
}

/// Needs tesseract with Korean traineddata and a fixture image containing
/// the printed text "안녕하세요" on white, given via OCR_TEST_KOREAN_IMAGE.
#[tokio::test]
#[ignore]
async fn test_real_tesseract_korean() {
    let path = std::env::var("OCR_TEST_KOREAN_IMAGE").expect("OCR_TEST_KOREAN_IMAGE not set");
    let bytes = std::fs::read(path).unwrap();

    let image = kor_ocr_node::api::ocr::prepare_image(&bytes, true).unwrap();
    let engine = TesseractEngine::new(TesseractConfig::default());
    let text = engine.extract_text(&image).await.unwrap();

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    assert!(compact.contains("안녕하세요"), "got {:?}", text);
}
