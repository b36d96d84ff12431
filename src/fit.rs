//! Pixel-budget resolution fitting.
//!
//! Given a pixel budget and a target aspect ratio, find the resolution that
//! best matches the ratio without exceeding the budget. The canonical
//! [`fit`] keeps both sides on a step grid (multiples of 16 by default) and
//! picks between the two lattice points nearest the ideal continuous
//! solution. [`fit_unquantized`] is the older grid-free variant, kept as a
//! separate mode because it produces different output for the same input.
//!
//! All entry points are total: an unsatisfiable fit returns
//! [`Resolution::ZERO`].
//!
//! # Example
//!
//! ```
//! use ratiofit::fit::{fit, Resolution};
//!
//! let budget = 1216 * 896;
//! let r = fit(budget, 16.0 / 9.0, 16);
//! assert_eq!(r, Resolution::new(1376, 784));
//! assert!(r.pixels() <= budget);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Default dimension step.
pub const DEFAULT_STEP: u32 = 16;

/// Relative slack when deciding that an ideal side already sits on a grid line.
/// A few ULPs, the size of `sqrt` and division rounding error.
const GRID_SNAP_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Width × height in pixels.
///
/// A resolution with either side zero is the invalid sentinel; constructors
/// in this module normalize such results to [`Resolution::ZERO`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// The "no valid fit" sentinel.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count; 0 for an invalid resolution.
    pub const fn pixels(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        self.width as u64 * self.height as u64
    }

    /// Whether both sides are non-zero.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// `width / height`, or `0.0` when invalid.
    pub fn ratio(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }

    /// Absolute deviation of this resolution's ratio from `target`.
    pub fn ratio_error(&self, target: f64) -> f64 {
        (self.ratio() - target).abs()
    }

    /// Collapse to [`Resolution::ZERO`] if either side is zero.
    pub const fn normalize(self) -> Self {
        if self.is_valid() { self } else { Self::ZERO }
    }

    /// Build from wide intermediates, or ZERO when a side is zero or too large.
    fn from_wide(width: u64, height: u64) -> Self {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Self::new(w, h).normalize(),
            _ => Self::ZERO,
        }
    }
}

/// Which fitting algorithm to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Both sides are multiples of `step`; two-candidate lattice search.
    Quantized { step: u32 },
    /// No grid; floor-and-shrink-height fit.
    Legacy,
}

impl Default for FitMode {
    fn default() -> Self {
        Self::Quantized { step: DEFAULT_STEP }
    }
}

impl FitMode {
    /// The grid step, if quantized.
    pub fn step(&self) -> Option<u32> {
        match *self {
            Self::Quantized { step } => Some(step),
            Self::Legacy => None,
        }
    }
}

/// Run the fitter selected by `mode`.
pub fn fit_with(mode: FitMode, pixel_budget: u64, target_ratio: f64) -> Resolution {
    match mode {
        FitMode::Quantized { step } => fit(pixel_budget, target_ratio, step),
        FitMode::Legacy => fit_unquantized(pixel_budget, target_ratio),
    }
}

/// Fit `target_ratio` into `pixel_budget` with both sides multiples of `step`.
///
/// Two candidates are built around the ideal continuous solution
/// `(sqrt(budget * ratio), sqrt(budget / ratio))`:
///
/// - height rounded up to the grid, width the largest grid multiple that keeps
///   the product within budget;
/// - width rounded up to the grid, height likewise rounded down.
///
/// A candidate whose rounded-down side falls below one step is discarded.
/// The candidate with the smaller ratio error wins; on an exact tie the one
/// using more pixels wins.
///
/// Returns [`Resolution::ZERO`] when the budget or step is zero, the ratio is
/// not a positive finite number, or neither candidate is valid.
pub fn fit(pixel_budget: u64, target_ratio: f64, step: u32) -> Resolution {
    if pixel_budget == 0 || step == 0 || !target_ratio.is_finite() || target_ratio <= 0.0 {
        return Resolution::ZERO;
    }

    let step = u64::from(step);
    let budget = pixel_budget as f64;
    let ideal_height = (budget / target_ratio).sqrt();
    let ideal_width = (budget * target_ratio).sqrt();

    let height_first = ceil_to_step(ideal_height, step)
        .and_then(|h| floor_companion(pixel_budget, h, step).map(|w| Resolution::from_wide(w, h)))
        .filter(Resolution::is_valid);
    let width_first = ceil_to_step(ideal_width, step)
        .and_then(|w| floor_companion(pixel_budget, w, step).map(|h| Resolution::from_wide(w, h)))
        .filter(Resolution::is_valid);

    let chosen = match (height_first, width_first) {
        (Some(a), Some(b)) => closer_fit(a, b, target_ratio),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => Resolution::ZERO,
    };

    log::debug!(
        "fit budget={pixel_budget} ratio={target_ratio} step={step}: \
         height-first={height_first:?} width-first={width_first:?} -> {chosen:?}"
    );
    chosen
}

/// Grid-free fit: floor the ideal height, derive width, shrink height once if
/// the product overshoots.
///
/// Both sides are at least 1 before the shrink. A shrink that leaves height
/// at 0 (budget smaller than the width) yields [`Resolution::ZERO`].
pub fn fit_unquantized(pixel_budget: u64, target_ratio: f64) -> Resolution {
    if pixel_budget == 0 || !target_ratio.is_finite() || target_ratio <= 0.0 {
        return Resolution::ZERO;
    }

    let budget = pixel_budget as f64;
    // Float-to-int casts saturate, which is enough to reject out-of-range sides below.
    let mut height = (budget / target_ratio).sqrt().floor().max(1.0) as u64;
    let width = (height as f64 * target_ratio).floor().max(1.0) as u64;
    if u128::from(width) * u128::from(height) > u128::from(pixel_budget) {
        height = pixel_budget / width;
    }

    let chosen = Resolution::from_wide(width, height);
    log::debug!("legacy fit budget={pixel_budget} ratio={target_ratio} -> {chosen:?}");
    chosen
}

/// Floor `value` to a multiple of `step`; anything below one step becomes 0.
///
/// A zero step leaves the value unchanged.
pub fn quantize_dimension(value: u32, step: u32) -> u32 {
    if step == 0 {
        return value;
    }
    value / step * step
}

/// Pick the candidate closer to `target`, preferring more pixels on a tie.
fn closer_fit(a: Resolution, b: Resolution, target: f64) -> Resolution {
    let (ea, eb) = (a.ratio_error(target), b.ratio_error(target));
    if ea < eb {
        a
    } else if eb < ea || b.pixels() > a.pixels() {
        b
    } else {
        a
    }
}

/// Round `ideal` up to the next multiple of `step` (at least one step).
///
/// An `ideal` within floating-point noise of a grid line stays on it.
/// `None` when the result does not fit a `u32` side.
fn ceil_to_step(ideal: f64, step: u64) -> Option<u64> {
    let units = ideal / step as f64;
    if !units.is_finite() {
        return None;
    }
    let nearest = units.round();
    let units = if (units - nearest).abs() <= GRID_SNAP_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        units.ceil()
    }
    .max(1.0);
    if units > f64::from(u32::MAX) {
        return None;
    }
    let side = (units as u64).checked_mul(step)?;
    (side <= u64::from(u32::MAX)).then_some(side)
}

/// Largest multiple of `step` whose product with `fixed` stays within budget.
///
/// `None` when that falls below one step.
fn floor_companion(budget: u64, fixed: u64, step: u64) -> Option<u64> {
    let side = budget / fixed / step * step;
    (side >= step).then_some(side)
}
