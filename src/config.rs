// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings are read from a YAML file named by `TYPESNAP_CONFIG`, or from
//! `typesnap.yaml` in the working directory. Every field is optional; a
//! missing file yields the built-in defaults.

use crate::util::color;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV_VAR: &str = "TYPESNAP_CONFIG";
const DEFAULT_CONFIG_NAME: &str = "typesnap.yaml";
const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub annotation: AnnotationDefaults,
    pub extraction: ExtractionConfig,
    pub notices: NoticeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            title: "TypeSnap".to_string(),
        }
    }
}

/// Values given to every newly added text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationDefaults {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size_vw: f32,
    pub color: String,
}

impl Default for AnnotationDefaults {
    fn default() -> Self {
        Self {
            text: "New Text".to_string(),
            // Slightly off-center
            x: 40.0,
            y: 40.0,
            font_size_vw: 3.0,
            color: "#333333".to_string(),
        }
    }
}

/// External command used for text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub program: Option<PathBuf>,
    pub args: Vec<String>,
    /// The command is killed when it runs longer than this
    pub timeout_secs: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            timeout_secs: DEFAULT_EXTRACTION_TIMEOUT.as_secs_f64(),
        }
    }
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(DEFAULT_EXTRACTION_TIMEOUT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub seconds: f64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self { seconds: 4.0 }
    }
}

impl AppConfig {
    /// Load from `TYPESNAP_CONFIG` or `typesnap.yaml`, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));

        let mut config = match Self::from_path(&path) {
            Ok(Some(config)) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring configuration: {:#}", e);
                Self::default()
            }
        };
        config.warn_if_invalid();
        config
    }

    /// Read a config file. Returns `Ok(None)` when the file does not exist.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))
            .map(Some)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Replace defaults that would break annotation invariants.
    pub fn warn_if_invalid(&mut self) {
        let fallback = AnnotationDefaults::default();
        let defaults = &mut self.annotation;

        if !(defaults.font_size_vw.is_finite() && defaults.font_size_vw > 0.0) {
            log::warn!(
                "annotation.font_size_vw {} is not positive, using {}",
                defaults.font_size_vw,
                fallback.font_size_vw
            );
            defaults.font_size_vw = fallback.font_size_vw;
        }
        if !(0.0..=100.0).contains(&defaults.x) {
            log::warn!("annotation.x {} is outside 0..100, using {}", defaults.x, fallback.x);
            defaults.x = fallback.x;
        }
        if !(0.0..=100.0).contains(&defaults.y) {
            log::warn!("annotation.y {} is outside 0..100, using {}", defaults.y, fallback.y);
            defaults.y = fallback.y;
        }
        if color::parse_hex(&defaults.color).is_none() {
            log::warn!(
                "annotation.color '{}' is not #rrggbb, using {}",
                defaults.color,
                fallback.color
            );
            defaults.color = fallback.color;
        }
        if !(self.notices.seconds.is_finite() && self.notices.seconds > 0.0) {
            self.notices.seconds = NoticeConfig::default().seconds;
        }
        let timeout = self.extraction.timeout_secs;
        if !Duration::try_from_secs_f64(timeout).is_ok_and(|d| !d.is_zero()) {
            let fallback = ExtractionConfig::default().timeout_secs;
            log::warn!("extraction.timeout_secs {} is not usable, using {}", timeout, fallback);
            self.extraction.timeout_secs = fallback;
        }
    }
}
