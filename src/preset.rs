//! Named ratio shortcuts and raw input parsing.
//!
//! Presets are plain configuration (label → ratio); they feed the same clamp
//! and fit path as any other ratio. The parsers here turn raw user strings
//! into the primitive values the numeric core consumes, coercing invalid
//! dimensions to 0 rather than failing.

use thiserror::Error;

/// A named target ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preset<'a> {
    /// Display label, e.g. `"16:9"`.
    pub label: &'a str,
    /// `width / height`.
    pub ratio: f64,
}

impl<'a> Preset<'a> {
    /// Create a preset.
    pub const fn new(label: &'a str, ratio: f64) -> Self {
        Self { label, ratio }
    }
}

/// Built-in presets, landscape first then portrait.
pub const DEFAULT_PRESETS: &[Preset<'static>] = &[
    Preset::new("1:1", 1.0),
    Preset::new("5:4", 5.0 / 4.0),
    Preset::new("4:3", 4.0 / 3.0),
    Preset::new("3:2", 3.0 / 2.0),
    Preset::new("16:10", 16.0 / 10.0),
    Preset::new("16:9", 16.0 / 9.0),
    Preset::new("21:9", 21.0 / 9.0),
    Preset::new("4:5", 4.0 / 5.0),
    Preset::new("3:4", 3.0 / 4.0),
    Preset::new("2:3", 2.0 / 3.0),
    Preset::new("9:16", 9.0 / 16.0),
];

/// Look up a built-in preset by label (ASCII case-insensitive).
pub fn find_preset(label: &str) -> Option<&'static Preset<'static>> {
    find_in(DEFAULT_PRESETS, label)
}

/// Look up a preset by label in `presets` (ASCII case-insensitive).
///
/// The first match wins.
pub fn find_in<'p, 'a>(presets: &'p [Preset<'a>], label: &str) -> Option<&'p Preset<'a>> {
    let label = label.trim();
    presets.iter().find(|p| p.label.eq_ignore_ascii_case(label))
}

/// Why a ratio string could not be parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseRatioError {
    /// Nothing but whitespace.
    #[error("ratio is empty")]
    Empty,
    /// A component is not a finite number.
    #[error("ratio component is not a number")]
    InvalidNumber,
    /// A component is zero or negative.
    #[error("ratio components must be positive")]
    NonPositive,
}

/// Parse a ratio written as `16:9`, `16/9`, `16x9` or a plain decimal `1.777`.
///
/// ```
/// use ratiofit::preset::parse_ratio;
///
/// assert_eq!(parse_ratio("4:3"), Ok(4.0 / 3.0));
/// assert_eq!(parse_ratio(" 2.39 "), Ok(2.39));
/// assert!(parse_ratio("16:0").is_err());
/// ```
pub fn parse_ratio(input: &str) -> Result<f64, ParseRatioError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseRatioError::Empty);
    }
    match input.split_once([':', '/', 'x', 'X', '×']) {
        Some((w, h)) => {
            let w = parse_positive(w)?;
            let h = parse_positive(h)?;
            Ok(w / h)
        }
        None => parse_positive(input),
    }
}

fn parse_positive(s: &str) -> Result<f64, ParseRatioError> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| ParseRatioError::InvalidNumber)?;
    if !v.is_finite() {
        return Err(ParseRatioError::InvalidNumber);
    }
    if v <= 0.0 {
        return Err(ParseRatioError::NonPositive);
    }
    Ok(v)
}

/// Parse a raw dimension field.
///
/// Decimals are floored. Anything unparsable, non-finite, non-positive or
/// larger than `u32::MAX` becomes 0, the invalid-dimension sentinel.
pub fn parse_dimension(input: &str) -> u32 {
    let Ok(v) = input.trim().parse::<f64>() else {
        return 0;
    };
    if !v.is_finite() || v <= 0.0 || v >= f64::from(u32::MAX) + 1.0 {
        return 0;
    }
    v as u32
}
