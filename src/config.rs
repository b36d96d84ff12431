//! File configuration.
//!
//! A TOML file overriding the calculator defaults and adding presets. Every
//! section and field is optional; missing values fall back to the same
//! defaults [`Settings::default`] uses.
//!
//! ```toml
//! [fit]
//! step = 16
//! legacy = false
//! quantize_base = true
//!
//! [range]
//! multiplier = 4.0
//! positions = 250
//! min_step = 0.001
//!
//! [display]
//! max_denominator = 100
//! preview_box = 220
//! preview_min_side = 8
//!
//! [[presets]]
//! label = "cinema"
//! ratio = "2.39"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::Settings;
use crate::fit::{DEFAULT_STEP, FitMode};
use crate::preset::{DEFAULT_PRESETS, ParseRatioError, Preset, parse_ratio};
use crate::preview::{DEFAULT_BOX_SIZE, MIN_PREVIEW_SIDE};
use crate::range::{DEFAULT_MIN_STEP, DEFAULT_RANGE_MULTIPLIER, DEFAULT_RANGE_POSITIONS, RangeParams};
use crate::ratio::DEFAULT_MAX_DENOMINATOR;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fitting behavior.
    pub fit: FitConfig,
    /// Ratio control range.
    pub range: RangeConfig,
    /// Labels and preview.
    pub display: DisplayConfig,
    /// Extra presets, listed after the built-in ones.
    pub presets: Vec<PresetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Grid step for the quantized fitter. Must be non-zero unless `legacy`.
    pub step: u32,
    /// Use the grid-free legacy fitter.
    pub legacy: bool,
    /// Floor base dimensions to the grid.
    pub quantize_base: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            legacy: false,
            quantize_base: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub multiplier: f64,
    pub positions: u32,
    pub min_step: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_RANGE_MULTIPLIER,
            positions: DEFAULT_RANGE_POSITIONS,
            min_step: DEFAULT_MIN_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_denominator: u64,
    pub preview_box: u32,
    pub preview_min_side: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_denominator: DEFAULT_MAX_DENOMINATOR,
            preview_box: DEFAULT_BOX_SIZE,
            preview_min_side: MIN_PREVIEW_SIDE,
        }
    }
}

/// A user preset. `ratio` takes any form [`parse_ratio`] accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub label: String,
    pub ratio: String,
}

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("preset {label:?} has an invalid ratio: {source}")]
    Preset {
        label: String,
        #[source]
        source: ParseRatioError,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject values the calculator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fit.legacy && self.fit.step == 0 {
            return Err(ConfigError::Invalid("fit.step must be non-zero"));
        }
        if !(self.range.multiplier.is_finite() && self.range.multiplier >= 1.0) {
            return Err(ConfigError::Invalid("range.multiplier must be at least 1"));
        }
        if self.range.positions == 0 {
            return Err(ConfigError::Invalid("range.positions must be non-zero"));
        }
        if !(self.range.min_step.is_finite() && self.range.min_step > 0.0) {
            return Err(ConfigError::Invalid("range.min_step must be positive"));
        }
        if self.display.max_denominator == 0 {
            return Err(ConfigError::Invalid("display.max_denominator must be non-zero"));
        }
        if self.display.preview_box == 0 {
            return Err(ConfigError::Invalid("display.preview_box must be non-zero"));
        }
        self.user_presets().map(|_| ())
    }

    /// Calculator settings described by this config.
    pub fn settings(&self) -> Settings {
        let mode = if self.fit.legacy {
            FitMode::Legacy
        } else {
            FitMode::Quantized {
                step: self.fit.step,
            }
        };
        Settings::default()
            .mode(mode)
            .quantize_base(self.fit.quantize_base)
            .range(
                RangeParams::default()
                    .multiplier(self.range.multiplier)
                    .positions(self.range.positions)
                    .min_step(self.range.min_step),
            )
            .max_denominator(self.display.max_denominator)
            .preview_box(self.display.preview_box)
            .preview_min_side(self.display.preview_min_side)
    }

    /// Built-in presets followed by the user's.
    pub fn presets(&self) -> Result<Vec<Preset<'_>>, ConfigError> {
        let mut all: Vec<Preset<'_>> = DEFAULT_PRESETS.to_vec();
        all.extend(self.user_presets()?);
        Ok(all)
    }

    fn user_presets(&self) -> Result<Vec<Preset<'_>>, ConfigError> {
        self.presets
            .iter()
            .map(|entry| {
                parse_ratio(&entry.ratio)
                    .map(|ratio| Preset::new(&entry.label, ratio))
                    .map_err(|source| ConfigError::Preset {
                        label: entry.label.clone(),
                        source,
                    })
            })
            .collect()
    }
}
