//! Finder pattern ("eye") overlay.
//!
//! Redraws the three corner markers in an alternate style without touching
//! data modules or the bottom-right corner, which has no finder pattern. The
//! 7:5:3 nesting ratio and the corner positions are what scanners rely on
//! for orientation, so only the rendering style varies; proportions never do.

use image::RgbaImage;

use crate::design::EyeStyle;
use crate::geometry::Geometry;
use crate::render::{in_circle, in_rounded_rect, Palette};

/// Side lengths of the nested finder shapes, in modules.
const EYE_OUTER: f32 = 7.0;
const EYE_MIDDLE: f32 = 5.0;
const EYE_INNER: f32 = 3.0;

/// Corner radius multipliers for the rounded style, outer to inner.
const ROUNDED_RADII: [f32; 3] = [1.5, 1.2, 0.9];

/// Pixel origins of the three finder patterns: top-left, top-right,
/// bottom-left.
fn eye_origins(geom: &Geometry) -> [(f32, f32); 3] {
    let span = EYE_OUTER * geom.module_size;
    let size = geom.size as f32;
    [
        (geom.offset, geom.offset),
        (size - geom.offset - span, geom.offset),
        (geom.offset, size - geom.offset - span),
    ]
}

/// Redraws the three eyes in the requested style.
///
/// `EyeStyle::Square` is a complete no-op: the default squares painted by the
/// base draw already are the finder patterns.
pub fn overlay_eyes(img: &mut RgbaImage, geom: &Geometry, style: EyeStyle, palette: &Palette) {
    match style {
        EyeStyle::Square => {}
        EyeStyle::Circle | EyeStyle::Rounded => {
            for (ox, oy) in eye_origins(geom) {
                draw_eye(img, geom, style, palette, ox, oy);
            }
        }
    }
}

/// Repaints one 7x7-module eye region.
///
/// Every pixel of the region is resolved in one pass: background by default,
/// then foreground/background/foreground for the outer, middle, and inner
/// nested shapes. This both erases the default square finder and draws the
/// replacement without blending artifacts.
fn draw_eye(
    img: &mut RgbaImage,
    geom: &Geometry,
    style: EyeStyle,
    palette: &Palette,
    ox: f32,
    oy: f32,
) {
    let m = geom.module_size;
    let span = EYE_OUTER * m;
    let (width, height) = img.dimensions();
    let px_min = ox.floor().max(0.0) as u32;
    let py_min = oy.floor().max(0.0) as u32;
    let px_max = ((ox + span).ceil() as u32).min(width);
    let py_max = ((oy + span).ceil() as u32).min(height);

    for py in py_min..py_max {
        for px in px_min..px_max {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;
            if cx < ox || cx >= ox + span || cy < oy || cy >= oy + span {
                continue;
            }
            let mut color = palette.background;
            if in_eye_shape(style, cx, cy, ox, oy, m, EYE_OUTER, ROUNDED_RADII[0]) {
                color = palette.foreground;
            }
            if in_eye_shape(style, cx, cy, ox + m, oy + m, m, EYE_MIDDLE, ROUNDED_RADII[1]) {
                color = palette.background;
            }
            if in_eye_shape(style, cx, cy, ox + 2.0 * m, oy + 2.0 * m, m, EYE_INNER, ROUNDED_RADII[2])
            {
                color = palette.foreground;
            }
            img.put_pixel(px, py, color);
        }
    }
}

/// Point-in-shape test for one nesting level, sized `modules` modules with
/// its top-left corner at `(x0, y0)`.
fn in_eye_shape(
    style: EyeStyle,
    px: f32,
    py: f32,
    x0: f32,
    y0: f32,
    module_size: f32,
    modules: f32,
    radius_factor: f32,
) -> bool {
    let side = modules * module_size;
    match style {
        // Square never reaches the per-pixel pass; treat it as the plain
        // rectangle it is for completeness.
        EyeStyle::Square => px >= x0 && px < x0 + side && py >= y0 && py < y0 + side,
        EyeStyle::Circle => in_circle(
            px,
            py,
            x0 + side / 2.0,
            y0 + side / 2.0,
            side / 2.0,
        ),
        EyeStyle::Rounded => {
            in_rounded_rect(px, py, x0, y0, side, side, radius_factor * module_size)
        }
    }
}
