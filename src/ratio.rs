//! Ratio simplification and rational approximation.
//!
//! Two ways to put a human-readable `n:d` label on a ratio:
//!
//! - [`simplify`] reduces an exact integer `width:height` pair by its GCD.
//! - [`approximate`] finds the closest simple fraction for an arbitrary
//!   decimal ratio (a slider value, a typed `1.777`) by continued-fraction
//!   expansion, bounded by a maximum denominator.
//!
//! Both are total: degenerate input yields [`Fraction::UNDEFINED`], never an
//! error.
//!
//! # Example
//!
//! ```
//! use ratiofit::ratio::{approximate, simplify, Fraction};
//!
//! assert_eq!(simplify(1216, 896), Fraction::new(19, 14));
//! assert_eq!(approximate(1.777, 100), Fraction::new(16, 9));
//! ```

use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Upper bound on continued-fraction expansion steps.
pub const MAX_EXPANSION_STEPS: usize = 25;

/// Default maximum denominator for labelling free-form ratios.
pub const DEFAULT_MAX_DENOMINATOR: u64 = 100;

/// A `numerator:denominator` pair.
///
/// Produced by [`simplify`] (coprime, exactly equal to the input ratio) and by
/// [`approximate`] (closest convergent within a denominator bound).
/// `(0, 0)` is the "no ratio" sentinel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl Fraction {
    /// The "no ratio to display" sentinel.
    pub const UNDEFINED: Self = Self::new(0, 0);

    /// Create a fraction. No reduction is performed.
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Whether this fraction carries no displayable ratio.
    ///
    /// True for the sentinel and for `0:n`, which [`approximate`] returns
    /// when `0/1` is the closest fraction to a tiny ratio.
    pub const fn is_undefined(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }

    /// The fraction as a real number, or `0.0` when undefined.
    pub fn to_f64(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Greatest common divisor, iterative Euclid.
///
/// `gcd(0, 0) == 0`.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut x, mut y) = (a, b);
    while y != 0 {
        let r = x % y;
        x = y;
        y = r;
    }
    x
}

/// Reduce `width:height` to lowest terms.
///
/// Returns [`Fraction::UNDEFINED`] when either side is zero.
pub fn simplify(width: u32, height: u32) -> Fraction {
    if width == 0 || height == 0 {
        return Fraction::UNDEFINED;
    }
    let (w, h) = (u64::from(width), u64::from(height));
    let d = gcd(w, h);
    Fraction::new(w / d, h / d)
}

/// Closest fraction to `value` with denominator at most `max_denominator`.
///
/// Walks the continued-fraction convergents of `value` for at most
/// [`MAX_EXPANSION_STEPS`] steps, keeping the one with the smallest absolute
/// error. The running best starts at `1:1`, which is itself a candidate with
/// denominator 1. Expansion stops at the first convergent whose denominator
/// exceeds the bound, once the fractional remainder drops below
/// `f64::EPSILON`, or when the next convergent would overflow `u64`.
///
/// Returns [`Fraction::UNDEFINED`] for non-finite or non-positive `value`,
/// for `max_denominator == 0`, and when not even the first convergent fits in
/// `u64` (`value >= 2^64`).
pub fn approximate(value: f64, max_denominator: u64) -> Fraction {
    if !value.is_finite() || value <= 0.0 || max_denominator == 0 {
        return Fraction::UNDEFINED;
    }

    let mut best = Fraction::new(1, 1);
    let mut best_error = (value - 1.0).abs();

    // Convergent recurrences: h[n] = a*h[n-1] + h[n-2], same for k.
    let (mut h0, mut h1) = (0u64, 1u64);
    let (mut k0, mut k1) = (1u64, 0u64);
    let mut x = value;
    let mut formed = false;

    for step in 0..MAX_EXPANSION_STEPS {
        let whole = x.floor();
        if whole >= u64::MAX as f64 {
            break;
        }
        let a = whole as u64;
        let (Some(h2), Some(k2)) = (
            a.checked_mul(h1).and_then(|v| v.checked_add(h0)),
            a.checked_mul(k1).and_then(|v| v.checked_add(k0)),
        ) else {
            break;
        };
        if k2 > max_denominator {
            break;
        }
        formed = true;

        let error = (value - h2 as f64 / k2 as f64).abs();
        log::trace!("convergent {step}: {h2}/{k2} (error {error:e})");
        if error < best_error {
            best_error = error;
            best = Fraction::new(h2, k2);
        }

        let remainder = x - whole;
        if remainder.abs() < f64::EPSILON {
            break;
        }
        x = 1.0 / remainder;
        h0 = h1;
        h1 = h2;
        k0 = k1;
        k1 = k2;
    }

    if !formed {
        log::debug!("approximate({value}): integer part overflows u64");
        return Fraction::UNDEFINED;
    }
    best
}

/// A ratio value with its `n:d` label, as shown next to a ratio control.
///
/// Renders as `1.357 (19:14)`, or `0` when there is nothing to show.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RatioLabel {
    /// The ratio as a real number.
    pub value: f64,
    /// Its simplified or approximated fraction.
    pub fraction: Fraction,
}

impl RatioLabel {
    /// Label an exact integer ratio, reduced by GCD.
    pub fn exact(width: u32, height: u32) -> Self {
        let value = if height == 0 {
            0.0
        } else {
            f64::from(width) / f64::from(height)
        };
        Self {
            value,
            fraction: simplify(width, height),
        }
    }

    /// Label a free-form ratio with its closest simple fraction.
    pub fn approximate(value: f64, max_denominator: u64) -> Self {
        Self {
            value,
            fraction: approximate(value, max_denominator),
        }
    }

    /// Whether the label renders as the `0` placeholder.
    pub fn is_empty(&self) -> bool {
        self.value.is_nan() || self.value <= 0.0 || self.fraction.is_undefined()
    }
}

impl fmt::Display for RatioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }
        write!(f, "{:.3} ({})", self.value, self.fraction)
    }
}
