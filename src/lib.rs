//! Pixel-budget resolution fitting with rational ratio labels.
//!
//! Given a base resolution and a target aspect ratio, find the alternate
//! resolution that best matches the ratio without exceeding the base pixel
//! count, with both sides on a fixed step grid. Pure arithmetic, `no_std`
//! compatible core; every operation is total and signals "nothing valid"
//! with zero sentinels instead of errors.
//!
//! # Modules
//!
//! - [`ratio`] — GCD simplification and continued-fraction approximation
//! - [`range`] — Ratio control range derivation
//! - [`fit`] — Quantized two-candidate fitter and the legacy grid-free fitter
//! - [`preview`] — Preview box mapping
//! - [`preset`] — Named ratios and raw input parsing
//! - [`calculator`] — Event-driven state holder over the pure core
//! - `svg` (feature `svg`) — SVG rendering of a snapshot
//! - `config` (feature `config`) — TOML configuration
//!
//! # Example
//!
//! ```
//! use ratiofit::{fit, map_to_preview, simplify, Fraction, PreviewBox, Resolution};
//!
//! assert_eq!(simplify(1216, 896), Fraction::new(19, 14));
//!
//! let target = fit(1216 * 896, 16.0 / 9.0, 16);
//! assert_eq!(target, Resolution::new(1376, 784));
//! assert_eq!(map_to_preview(1216, 896, 220), PreviewBox::new(220, 162));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod calculator;
pub mod fit;
#[cfg(feature = "alloc")]
pub mod format;
pub mod preset;
pub mod preview;
pub mod range;
pub mod ratio;

#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "svg")]
pub mod svg;

pub use calculator::{Calculator, Settings, Snapshot, compute};
pub use fit::{FitMode, Resolution, fit, fit_unquantized, fit_with, quantize_dimension};
pub use preset::{ParseRatioError, Preset, parse_dimension, parse_ratio};
pub use preview::{PreviewBox, map_to_preview};
pub use range::{RangeParams, RatioRange, SliderRange, derive_range};
pub use ratio::{Fraction, RatioLabel, approximate, gcd, simplify};
