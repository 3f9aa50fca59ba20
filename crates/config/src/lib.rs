// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// UART4 line rate used by the demo firmware.
pub const UART4_BAUD_RATE: u32 = 115_200;

pub const TIM6_PRESCALER: u32 = 0;
pub const TIM6_PERIOD: u32 = 65_535;

/// GPIOD pins 12..=15 drive the four user LEDs on the STM32F4-Discovery.
pub const LED_PINS_MASK: u16 = 0xF000;
/// The LED blinked by the main loop (PD14).
pub const HEARTBEAT_PIN_MASK: u16 = 0x4000;

/// Delay requested once per main loop iteration. Unit-agnostic on the host.
pub const BLINK_DELAY_MS: u32 = 500;

pub const SYSTEM_CORE_CLOCK: u32 = 168_000_000;

pub const GPIOA_BASE: u32 = 0x4002_0000;
pub const GPIOB_BASE: u32 = 0x4002_0400;
pub const GPIOC_BASE: u32 = 0x4002_0800;
pub const GPIOD_BASE: u32 = 0x4002_0C00;
pub const UART4_BASE: u32 = 0x4000_4C00;
pub const TIM6_BASE: u32 = 0x4000_1000;

pub const SUPPORTED_SCHEMA: &str = "1.0";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported schema_version '{0}'. Supported versions: '1.0'")]
    UnsupportedSchema(String),
    #[error("'file_label' cannot be empty")]
    EmptyFileLabel,
    #[error("'json_report' path cannot be empty")]
    EmptyReportPath,
}

/// Presentation settings for the test executable.
///
/// None of these affect the behavior under test; they only shape how results
/// are printed and persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    pub schema_version: String,
    /// Label printed as the `file` component of every trace line.
    #[serde(default = "default_file_label")]
    pub file_label: String,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default)]
    pub json_report: Option<String>,
}

fn default_file_label() -> String {
    "tests/test_main.rs".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schema_version: SUPPORTED_SCHEMA.to_string(),
            file_label: default_file_label(),
            color: default_color(),
            json_report: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open runner config at {:?}", path.as_ref()))?;
        let config: Self =
            serde_yaml::from_reader(f).context("Failed to parse Runner Config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.schema_version != SUPPORTED_SCHEMA {
            return Err(ConfigError::UnsupportedSchema(self.schema_version.clone()));
        }
        if self.file_label.trim().is_empty() {
            return Err(ConfigError::EmptyFileLabel);
        }
        if matches!(&self.json_report, Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::EmptyReportPath);
        }
        Ok(())
    }
}
