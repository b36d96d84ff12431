//! SVG visualization of a calculator snapshot.
//!
//! Renders a vertical sequence of annotated panels: the base resolution,
//! the fitted target (drawn at the same scale so the size change is
//! visible), and the preview box inside its bounding square.
//!
//! # Example
//!
//! ```
//! use ratiofit::calculator::Calculator;
//! use ratiofit::svg::render_snapshot_svg;
//!
//! let mut calc = Calculator::default();
//! let svg = render_snapshot_svg(calc.set_ratio(16.0 / 9.0));
//! assert!(svg.contains("Target  1376×784"));
//! ```

use crate::calculator::Snapshot;
use crate::fit::Resolution;
use crate::format::group_thousands;

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// A single panel in the visualization.
struct Step {
    label: String,
    /// The box drawn for this panel.
    outer: Resolution,
    /// Size the panel scale is computed from (≥ `outer` on both axes).
    scale_basis: Resolution,
    /// Content drawn centered inside `outer`. None fills `outer` as content.
    inner: Option<Resolution>,
    annotation: String,
}

/// Render a complete SVG document for `snapshot`.
///
/// An invalid base yields a minimal empty document.
pub fn render_snapshot_svg(snapshot: &Snapshot) -> String {
    let steps = build_steps(snapshot);
    render_steps(&steps)
}

fn build_steps(snapshot: &Snapshot) -> Vec<Step> {
    let mut steps = Vec::new();
    let base = snapshot.base;
    let target = snapshot.target;
    if !base.is_valid() {
        return steps;
    }

    // Base and target share a scale.
    let shared = Resolution::new(base.width.max(target.width), base.height.max(target.height));

    steps.push(Step {
        label: format!("Base  {}×{}", base.width, base.height),
        outer: base,
        scale_basis: shared,
        inner: None,
        annotation: format!(
            "{} · {} px",
            snapshot.base_label,
            group_thousands(base.pixels())
        ),
    });

    if !target.is_valid() {
        return steps;
    }

    steps.push(Step {
        label: format!("Target  {}×{}", target.width, target.height),
        outer: target,
        scale_basis: shared,
        inner: None,
        annotation: format!(
            "asked {} · got {} · {} px ({:.1}%)",
            snapshot.selected_label,
            snapshot.target_label(),
            group_thousands(target.pixels()),
            snapshot.budget_usage() * 100.0
        ),
    });

    let preview = snapshot.preview;
    if !preview.is_empty() {
        let side = preview.width.max(preview.height);
        let frame = Resolution::new(side, side);
        steps.push(Step {
            label: format!("Preview  {}×{}", preview.width, preview.height),
            outer: frame,
            scale_basis: frame,
            inner: Some(Resolution::new(preview.width, preview.height)),
            annotation: String::new(),
        });
    }

    steps
}

/// Scale factor fitting `basis` within MAX_PANEL_W × MAX_PANEL_H.
fn scale_to_fit(basis: Resolution) -> f64 {
    let w = f64::from(basis.width);
    let h = f64::from(basis.height);
    if w == 0.0 || h == 0.0 {
        return 1.0;
    }
    (MAX_PANEL_W / w).min(MAX_PANEL_H / h)
}

fn render_steps(steps: &[Step]) -> String {
    if steps.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let n = steps.len() as f64;
    let total_h = 2.0 * MARGIN_TOP + n * (LABEL_H + MAX_PANEL_H) + (n - 1.0) * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .arrow { stroke: #666; stroke-width: 1.5; fill: none; marker-end: url(#arrowhead); }
  .arrowhead { fill: #666; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
    .arrow { stroke: #888; }
    .arrowhead { fill: #888; }
  }
</style>
<defs>
  <marker id="arrowhead" markerWidth="8" markerHeight="6" refX="8" refY="3" orient="auto">
    <polygon points="0 0, 8 3, 0 6" class="arrowhead"/>
  </marker>
</defs>
"##);

    let mut y = MARGIN_TOP;
    let center_x = total_w / 2.0;

    for (i, step) in steps.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&step.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let scale = scale_to_fit(step.scale_basis);
        let sw = f64::from(step.outer.width) * scale;
        let sh = f64::from(step.outer.height) * scale;
        let panel_x = center_x - sw / 2.0;
        let panel_y = y;

        match step.inner {
            Some(inner) => {
                svg.push_str(&format!(
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outer" rx="2"/>"#,
                    panel_x, panel_y, sw, sh
                ));
                svg.push('\n');
                let iw = f64::from(inner.width) * scale;
                let ih = f64::from(inner.height) * scale;
                svg.push_str(&format!(
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
                    panel_x + (sw - iw) / 2.0,
                    panel_y + (sh - ih) / 2.0,
                    iw,
                    ih
                ));
            }
            None => {
                svg.push_str(&format!(
                    r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="2"/>"#,
                    panel_x, panel_y, sw, sh
                ));
            }
        }
        svg.push('\n');

        if !step.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                panel_y + sh + 14.0,
                escape_xml(&step.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H;

        if i < steps.len() - 1 {
            svg.push_str(&format!(
                r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" class="arrow"/>"#,
                center_x,
                y + 8.0,
                center_x,
                y + PANEL_GAP - 8.0
            ));
            svg.push('\n');
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Calculator, Settings, compute};

    #[test]
    fn svg_default_snapshot() {
        let calc = Calculator::default();
        let svg = render_snapshot_svg(calc.snapshot());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Base  1216×896"));
        assert!(svg.contains("Target  1216×896"));
        assert!(svg.contains("Preview  220×162"));
        assert!(svg.contains("1,089,536 px"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_refit_annotations() {
        let mut calc = Calculator::default();
        let svg = render_snapshot_svg(calc.set_ratio(16.0 / 9.0));
        assert!(svg.contains("asked 1.778 (16:9)"));
        assert!(svg.contains("got 1.755 (86:49)"));
        assert!(svg.contains("1,078,784 px (99.0%)"));
    }

    #[test]
    fn svg_invalid_base_is_empty_document() {
        let snap = compute(&Settings::default(), Resolution::ZERO, 1.0);
        let svg = render_snapshot_svg(&snap);
        assert_eq!(svg, r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    #[test]
    fn svg_shared_scale_for_base_and_target() {
        let steps = build_steps(&compute(&Settings::default(), Resolution::new(1216, 896), 4.0));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].scale_basis, steps[1].scale_basis);
        assert!(steps[1].outer.width > steps[0].outer.width);
        assert_eq!(steps[2].outer.width, steps[2].outer.height);
    }

    #[test]
    fn svg_text_is_escaped() {
        assert_eq!(escape_xml("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    fn rect_sizes(svg: &str) -> Vec<(f64, f64)> {
        let attr = |tag: &str, name: &str| -> f64 {
            let start = tag.find(&format!("{name}=\"")).unwrap() + name.len() + 2;
            let len = tag[start..].find('"').unwrap();
            tag[start..start + len].parse().unwrap()
        };
        svg.split("<rect ")
            .skip(1)
            .map(|tag| (attr(tag, "width"), attr(tag, "height")))
            .collect()
    }

    #[test]
    fn svg_extreme_ratio_stays_inside_panels() {
        // Base ratio 625: the range floor 156.25 clamps the requested 100.
        let mut calc = Calculator::default();
        calc.set_base(10_000, 16);
        let snap = *calc.set_ratio(100.0);
        assert_eq!(snap.target, Resolution::new(4992, 32));
        assert_eq!(snap.preview.height, 8);

        let svg = render_snapshot_svg(&snap);
        assert!(svg.contains("Base  10000×16"));
        assert!(svg.contains("asked 156.250 (625:4)"));
        assert!(svg.contains("got 156.000 (156:1)"));
        assert!(svg.contains("Preview  220×8"));

        let rects = rect_sizes(&svg);
        // base, target, preview frame and preview content
        assert_eq!(rects.len(), 4);
        for (w, h) in rects {
            assert!(w > 0.0 && w <= MAX_PANEL_W, "width {w}");
            assert!(h > 0.0 && h <= MAX_PANEL_H, "height {h}");
        }
    }
}
