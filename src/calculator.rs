//! Event-driven calculator state.
//!
//! [`Calculator`] owns the only mutable state: the current base dimensions
//! and the selected ratio. Every input event replaces that state and
//! re-runs the pure [`compute`] pass, producing a fresh [`Snapshot`] for the
//! caller to render. Nothing else is cached between calls.
//!
//! # Example
//!
//! ```
//! use ratiofit::calculator::{Calculator, Settings};
//! use ratiofit::fit::Resolution;
//!
//! let mut calc = Calculator::new(Settings::default());
//! assert_eq!(calc.snapshot().target, Resolution::new(1216, 896));
//!
//! let snap = calc.set_ratio(16.0 / 9.0);
//! assert_eq!(snap.target, Resolution::new(1376, 784));
//! assert_eq!(snap.selected_label.to_string(), "1.778 (16:9)");
//! ```

use crate::fit::{FitMode, Resolution, fit_with, quantize_dimension};
use crate::preset::{Preset, parse_dimension};
use crate::preview::{
    DEFAULT_BOX_SIZE, MIN_PREVIEW_SIDE, PreviewBox, map_to_preview_with,
};
use crate::range::{RangeParams, SliderRange, derive_range_with};
use crate::ratio::{DEFAULT_MAX_DENOMINATOR, RatioLabel};

/// Base width a fresh calculator starts from.
pub const DEFAULT_WIDTH: u32 = 1216;
/// Base height a fresh calculator starts from.
pub const DEFAULT_HEIGHT: u32 = 896;

/// Calculator tunables.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Fitting algorithm.
    pub mode: FitMode,
    /// Floor base dimensions to the fit step before using them
    /// (quantized mode only).
    pub quantize_base: bool,
    /// Ratio control range derivation.
    pub range: RangeParams,
    /// Denominator bound for labelling the selected ratio.
    pub max_denominator: u64,
    /// Preview bounding box side.
    pub preview_box: u32,
    /// Smallest short side of the preview.
    pub preview_min_side: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: FitMode::default(),
            quantize_base: true,
            range: RangeParams::default(),
            max_denominator: DEFAULT_MAX_DENOMINATOR,
            preview_box: DEFAULT_BOX_SIZE,
            preview_min_side: MIN_PREVIEW_SIDE,
        }
    }
}

impl Settings {
    /// Set the fitting mode.
    pub fn mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use the quantized fitter with `step`.
    pub fn step(self, step: u32) -> Self {
        self.mode(FitMode::Quantized { step })
    }

    /// Use the grid-free legacy fitter.
    pub fn legacy(self) -> Self {
        self.mode(FitMode::Legacy)
    }

    /// Enable or disable flooring base dimensions to the step grid.
    pub fn quantize_base(mut self, enabled: bool) -> Self {
        self.quantize_base = enabled;
        self
    }

    /// Set range derivation params.
    pub fn range(mut self, range: RangeParams) -> Self {
        self.range = range;
        self
    }

    /// Set the label denominator bound.
    pub fn max_denominator(mut self, max_denominator: u64) -> Self {
        self.max_denominator = max_denominator;
        self
    }

    /// Set the preview box side.
    pub fn preview_box(mut self, size: u32) -> Self {
        self.preview_box = size;
        self
    }

    /// Set the preview short-side floor.
    pub fn preview_min_side(mut self, min_side: u32) -> Self {
        self.preview_min_side = min_side;
        self
    }

    /// The base resolution the core actually works with.
    ///
    /// In quantized mode with `quantize_base`, both sides are floored to the
    /// step grid. Any side that ends up 0 invalidates the whole base.
    pub fn effective_base(&self, base: Resolution) -> Resolution {
        match self.mode {
            FitMode::Quantized { step } if self.quantize_base => Resolution::new(
                quantize_dimension(base.width, step),
                quantize_dimension(base.height, step),
            )
            .normalize(),
            _ => base.normalize(),
        }
    }
}

/// Everything a front end needs to render one state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Effective base resolution ([`Resolution::ZERO`] if invalid).
    pub base: Resolution,
    /// Base ratio reduced by GCD.
    pub base_label: RatioLabel,
    /// Legal range of the ratio control.
    pub range: SliderRange,
    /// The ratio the target was fitted to.
    pub selected_ratio: f64,
    /// Selected ratio with its closest simple fraction.
    pub selected_label: RatioLabel,
    /// Fitted resolution ([`Resolution::ZERO`] if no fit).
    pub target: Resolution,
    /// Preview box for the target.
    pub preview: PreviewBox,
}

impl Snapshot {
    /// Pixel budget taken from the base.
    pub fn budget(&self) -> u64 {
        self.base.pixels()
    }

    /// Exact reduced ratio of the fitted target.
    pub fn target_label(&self) -> RatioLabel {
        RatioLabel::exact(self.target.width, self.target.height)
    }

    /// Share of the budget the target uses, in `0.0..=1.0`.
    pub fn budget_usage(&self) -> f64 {
        match self.budget() {
            0 => 0.0,
            budget => self.target.pixels() as f64 / budget as f64,
        }
    }
}

/// Derive a full snapshot from a base resolution and a selected ratio.
///
/// Pure: the same inputs always give the same snapshot.
pub fn compute(settings: &Settings, base: Resolution, selected_ratio: f64) -> Snapshot {
    let base = settings.effective_base(base);
    let budget = base.pixels();
    let target = fit_with(settings.mode, budget, selected_ratio);
    Snapshot {
        base,
        base_label: RatioLabel::exact(base.width, base.height),
        range: derive_range_with(base.ratio(), budget, &settings.range),
        selected_ratio,
        selected_label: RatioLabel::approximate(selected_ratio, settings.max_denominator),
        target,
        preview: map_to_preview_with(
            target.width,
            target.height,
            settings.preview_box,
            settings.preview_min_side,
        ),
    }
}

/// Holds current inputs and the latest snapshot.
#[derive(Clone, Debug)]
pub struct Calculator {
    settings: Settings,
    base: Resolution,
    selected_ratio: f64,
    snapshot: Snapshot,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Calculator {
    /// Start at [`DEFAULT_WIDTH`] × [`DEFAULT_HEIGHT`] with the ratio seeded
    /// to the base ratio.
    pub fn new(settings: Settings) -> Self {
        let base = Resolution::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mut calc = Self {
            settings,
            base,
            selected_ratio: 0.0,
            snapshot: compute(&settings, base, 0.0),
        };
        calc.set_base(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        calc
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Currently selected ratio.
    pub fn selected_ratio(&self) -> f64 {
        self.selected_ratio
    }

    /// Replace the base dimensions.
    ///
    /// Re-derives the ratio range and reseeds the selected ratio to the base
    /// ratio, clamped into the range. While the range is disabled the
    /// selected ratio is left as it was.
    pub fn set_base(&mut self, width: u32, height: u32) -> &Snapshot {
        self.base = Resolution::new(width, height);
        let base = self.settings.effective_base(self.base);
        let range = derive_range_with(base.ratio(), base.pixels(), &self.settings.range);
        if let SliderRange::Active(r) = range {
            self.selected_ratio = r.clamp(base.ratio());
        }
        log::debug!(
            "base {width}x{height} -> effective {base:?}, range {range:?}, ratio {}",
            self.selected_ratio
        );
        self.refresh()
    }

    /// Replace the base dimensions from raw text fields.
    ///
    /// Unparsable or non-positive fields count as 0.
    pub fn set_base_str(&mut self, width: &str, height: &str) -> &Snapshot {
        self.set_base(parse_dimension(width), parse_dimension(height))
    }

    /// Select a ratio, clamped into the active range.
    ///
    /// Ignored while the range is disabled.
    pub fn set_ratio(&mut self, ratio: f64) -> &Snapshot {
        if let Some(r) = self.snapshot.range.active() {
            self.selected_ratio = r.clamp(ratio);
        }
        self.refresh()
    }

    /// Move the ratio control: clamp, then snap onto its step grid.
    ///
    /// Ignored while the range is disabled.
    pub fn slide(&mut self, ratio: f64) -> &Snapshot {
        if let Some(r) = self.snapshot.range.active() {
            self.selected_ratio = r.snap(ratio);
        }
        self.refresh()
    }

    /// Select a preset's ratio.
    pub fn apply_preset(&mut self, preset: &Preset<'_>) -> &Snapshot {
        log::debug!("preset {} ({})", preset.label, preset.ratio);
        self.set_ratio(preset.ratio)
    }

    fn refresh(&mut self) -> &Snapshot {
        self.snapshot = compute(&self.settings, self.base, self.selected_ratio);
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::find_preset;
    use crate::range::RatioRange;
    use crate::ratio::Fraction;

    #[test]
    fn fresh_calculator_reproduces_base() {
        let calc = Calculator::default();
        let snap = calc.snapshot();
        assert_eq!(snap.base, Resolution::new(1216, 896));
        assert_eq!(snap.budget(), 1_089_536);
        assert_eq!(snap.base_label.fraction, Fraction::new(19, 14));
        assert_eq!(snap.selected_ratio, 1216.0 / 896.0);
        assert_eq!(snap.target, Resolution::new(1216, 896));
        assert_eq!(snap.preview, PreviewBox::new(220, 162));
        assert!(!snap.range.is_disabled());
    }

    #[test]
    fn set_ratio_refits() {
        let mut calc = Calculator::default();
        let snap = *calc.set_ratio(16.0 / 9.0);
        assert_eq!(snap.target, Resolution::new(1376, 784));
        assert_eq!(snap.target_label().to_string(), "1.755 (86:49)");
        assert!(snap.budget_usage() <= 1.0);
        assert_eq!(snap.preview, PreviewBox::new(220, 125));
    }

    #[test]
    fn set_ratio_clamps_to_range() {
        let mut calc = Calculator::default();
        let max = calc.snapshot().range.bounds().max;
        let min = calc.snapshot().range.bounds().min;
        assert_eq!(calc.set_ratio(100.0).selected_ratio, max);
        assert_eq!(calc.set_ratio(0.0).selected_ratio, min);
    }

    #[test]
    fn slide_snaps_to_step() {
        let mut calc = Calculator::default();
        let range = calc.snapshot().range.bounds();
        let snap = calc.slide(1.777);
        assert!((snap.selected_ratio - 1.777).abs() <= range.step / 2.0 + 1e-12);
        let steps = (snap.selected_ratio - range.min) / range.step;
        assert!((steps - steps.round()).abs() < 1e-6);
    }

    #[test]
    fn preset_feeds_fit() {
        let mut calc = Calculator::default();
        let preset = find_preset("16:9").unwrap();
        assert_eq!(calc.apply_preset(preset).target, Resolution::new(1376, 784));
    }

    #[test]
    fn invalid_base_disables_everything() {
        let mut calc = Calculator::default();
        let snap = *calc.set_base_str("abc", "896");
        assert_eq!(snap.base, Resolution::ZERO);
        assert!(snap.range.is_disabled());
        assert_eq!(snap.range.bounds(), RatioRange::DISABLED);
        assert_eq!(snap.target, Resolution::ZERO);
        assert_eq!(snap.preview, PreviewBox::ZERO);
        assert_eq!(snap.base_label.to_string(), "0");
        assert_eq!(snap.budget_usage(), 0.0);

        // Ratio input is ignored while disabled.
        let before = calc.selected_ratio();
        assert_eq!(calc.set_ratio(3.0).selected_ratio, before);
    }

    #[test]
    fn recovers_after_invalid_base() {
        let mut calc = Calculator::default();
        calc.set_base(0, 0);
        let snap = calc.set_base(1920, 1080);
        assert_eq!(snap.base, Resolution::new(1920, 1072));
        assert!(!snap.range.is_disabled());
        assert_eq!(snap.selected_ratio, 1920.0 / 1072.0);
    }

    #[test]
    fn base_is_quantized_in_quantized_mode() {
        let mut calc = Calculator::default();
        assert_eq!(calc.set_base(1220, 900).base, Resolution::new(1216, 896));
        assert_eq!(calc.set_base(15, 900).base, Resolution::ZERO);
    }

    #[test]
    fn quantize_base_can_be_disabled() {
        let mut calc = Calculator::new(Settings::default().quantize_base(false));
        let snap = calc.set_base(1220, 900);
        assert_eq!(snap.base, Resolution::new(1220, 900));
        // Off-grid base: the fit still lands on the grid, within budget.
        assert_eq!(snap.target, Resolution::new(1200, 912));
    }

    #[test]
    fn legacy_mode_keeps_raw_base() {
        let mut calc = Calculator::new(Settings::default().legacy());
        calc.set_base(1220, 900);
        let snap = calc.set_ratio(16.0 / 9.0);
        assert_eq!(snap.base, Resolution::new(1220, 900));
        // h = floor(785.9) = 785, w = floor(785 * 16 / 9) = 1395, within budget.
        assert_eq!(snap.target, Resolution::new(1395, 785));
    }

    #[test]
    fn compute_is_pure() {
        let s = Settings::default().step(8).preview_box(100);
        let a = compute(&s, Resolution::new(1000, 500), 2.0);
        let b = compute(&s, Resolution::new(1000, 500), 2.0);
        assert_eq!(a, b);
        // Base floors to 1000×496; width-first 1000×496 beats 984×504.
        assert_eq!(a.base, Resolution::new(1000, 496));
        assert_eq!(a.target, Resolution::new(1000, 496));
        assert_eq!(a.preview, PreviewBox::new(100, 50));
    }
}
