//! Preview box mapping.
//!
//! Scales a resolution into a square bounding box, preserving its aspect
//! ratio. The long side fills the box; the short side never drops below a
//! small floor so extreme ratios still show something.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Default bounding box side.
pub const DEFAULT_BOX_SIZE: u32 = 220;
/// Smallest short side of a non-empty preview.
pub const MIN_PREVIEW_SIDE: u32 = 8;

/// On-screen preview dimensions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PreviewBox {
    pub width: u32,
    pub height: u32,
}

impl PreviewBox {
    /// Empty preview.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new preview box.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether there is anything to draw.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Map `width × height` into a `box_size` square with the default floor.
///
/// ```
/// use ratiofit::preview::{map_to_preview, PreviewBox};
///
/// assert_eq!(map_to_preview(1216, 896, 220), PreviewBox::new(220, 162));
/// ```
pub fn map_to_preview(width: u32, height: u32, box_size: u32) -> PreviewBox {
    map_to_preview_with(width, height, box_size, MIN_PREVIEW_SIDE)
}

/// Map `width × height` into a `box_size` square.
///
/// Landscape and square inputs get the full box width, portrait inputs the
/// full box height. The other side is rounded and floored at `min_side`.
/// Any zero input gives [`PreviewBox::ZERO`].
pub fn map_to_preview_with(width: u32, height: u32, box_size: u32, min_side: u32) -> PreviewBox {
    if width == 0 || height == 0 || box_size == 0 {
        return PreviewBox::ZERO;
    }
    let ratio = f64::from(width) / f64::from(height);
    let full = f64::from(box_size);
    if ratio >= 1.0 {
        let short = (full / ratio).round() as u32;
        PreviewBox::new(box_size, short.max(min_side))
    } else {
        let short = (full * ratio).round() as u32;
        PreviewBox::new(short.max(min_side), box_size)
    }
}
