// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration, fixed at startup and read-only afterwards

pub mod node;

pub use node::{ConfigError, NodeConfig, OcrSettings};
