//! Slider range derivation for ratio selection.
//!
//! Bounds a ratio-selection control to within a fixed factor of the base
//! ratio, further clamped so both extremes stay realizable with a
//! one-pixel minimum side, and picks a step fine enough for a few hundred
//! positions.
//!
//! # Example
//!
//! ```
//! use ratiofit::range::{derive_range, SliderRange};
//!
//! let SliderRange::Active(range) = derive_range(1216.0 / 896.0, 1216 * 896) else {
//!     panic!("expected an active range");
//! };
//! assert!((range.min - 0.339).abs() < 1e-3);
//! assert!((range.max - 5.429).abs() < 1e-3);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Default factor the selectable ratio may deviate from the base ratio.
pub const DEFAULT_RANGE_MULTIPLIER: f64 = 4.0;
/// Default number of discrete positions across the range.
pub const DEFAULT_RANGE_POSITIONS: u32 = 250;
/// Default lower bound on the step.
pub const DEFAULT_MIN_STEP: f64 = 0.001;

/// Legal domain and granularity of a ratio-selection control.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatioRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RatioRange {
    /// Bounds reported for a disabled control: `[0, 1]` with a nominal step.
    pub const DISABLED: Self = Self {
        min: 0.0,
        max: 1.0,
        step: 0.01,
    };

    /// Clamp `value` into `[min, max]`. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamp `value`, then snap it onto the step grid anchored at `min`.
    ///
    /// Behaves like a stepped range input: the result is `min + n * step`
    /// for the nearest `n`, never above `max`.
    pub fn snap(&self, value: f64) -> f64 {
        let v = self.clamp(value);
        if self.step.is_nan() || self.step <= 0.0 {
            return v;
        }
        let n = ((v - self.min) / self.step).round();
        let mut snapped = self.min + n * self.step;
        if snapped > self.max {
            let last = ((self.max - self.min) / self.step).floor();
            snapped = self.min + last * self.step;
        }
        snapped.min(self.max).max(self.min)
    }

    /// Number of step positions between `min` and `max`.
    pub fn positions(&self) -> u64 {
        if self.step.is_nan() || self.step <= 0.0 || self.max.is_nan() || self.max <= self.min {
            return 0;
        }
        ((self.max - self.min) / self.step).floor() as u64
    }
}

/// Result of range derivation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SliderRange {
    /// No valid base to vary; the control must be disabled.
    Disabled,
    /// The control may move within this range.
    Active(RatioRange),
}

impl SliderRange {
    /// Whether the control must be disabled.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Bounds to put on the control ([`RatioRange::DISABLED`] when disabled).
    pub fn bounds(&self) -> RatioRange {
        match self {
            Self::Disabled => RatioRange::DISABLED,
            Self::Active(range) => *range,
        }
    }

    /// The active range, if any.
    pub fn active(&self) -> Option<&RatioRange> {
        match self {
            Self::Disabled => None,
            Self::Active(range) => Some(range),
        }
    }
}

/// Tunables for [`derive_range_with`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeParams {
    /// Max factor between the base ratio and either end of the range. `>= 1`.
    pub multiplier: f64,
    /// Target number of positions across the range.
    pub positions: u32,
    /// Smallest allowed step.
    pub min_step: f64,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_RANGE_MULTIPLIER,
            positions: DEFAULT_RANGE_POSITIONS,
            min_step: DEFAULT_MIN_STEP,
        }
    }
}

impl RangeParams {
    /// Set the range multiplier.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the target number of positions.
    pub fn positions(mut self, positions: u32) -> Self {
        self.positions = positions;
        self
    }

    /// Set the minimum step.
    pub fn min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }

    /// Whether these params can produce a usable range.
    pub fn is_valid(&self) -> bool {
        self.multiplier.is_finite()
            && self.multiplier >= 1.0
            && self.positions > 0
            && self.min_step.is_finite()
            && self.min_step > 0.0
    }
}

/// Derive the ratio control range with default params.
pub fn derive_range(base_ratio: f64, pixel_budget: u64) -> SliderRange {
    derive_range_with(base_ratio, pixel_budget, &RangeParams::default())
}

/// Derive the ratio control range.
///
/// `min = max(1 / budget, base / K)`, `max = min(budget, base * K)`,
/// `step = max(min_step, (max - min) / positions)`.
///
/// Disabled when the base ratio is not a positive finite number, the budget
/// is zero, the params are invalid, or the inputs are inconsistent enough to
/// invert the bounds (a base ratio no `budget`-pixel resolution can have).
pub fn derive_range_with(base_ratio: f64, pixel_budget: u64, params: &RangeParams) -> SliderRange {
    if !base_ratio.is_finite() || base_ratio <= 0.0 || pixel_budget == 0 || !params.is_valid() {
        return SliderRange::Disabled;
    }

    let budget = pixel_budget as f64;
    let min = (1.0 / budget).max(base_ratio / params.multiplier);
    let max = budget.min(base_ratio * params.multiplier);
    if min > max {
        return SliderRange::Disabled;
    }
    let step = params.min_step.max((max - min) / f64::from(params.positions));

    SliderRange::Active(RatioRange { min, max, step })
}
