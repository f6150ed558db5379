//! The drawing surface and the render pipeline.
//!
//! Steps execute strictly in order: base draw, eye overlay, logo, frame.
//! Each step mutates the same surface and later steps depend on earlier
//! pixels, so there is no parallelism; every render call owns its surface
//! exclusively and a render either completes or fails with an [`Error`].

use image::{Rgba, RgbaImage};
use log::debug;

use crate::design::{parse_hex_color, to_grayscale, ColorMode, Design, ModulePattern};
use crate::error::Error;
use crate::eyes::overlay_eyes;
use crate::frame::{compose_frame, FrameFont};
use crate::geometry::{Geometry, QUIET_ZONE_MODULES};
use crate::logo::compose_logo;
use crate::matrix::{ecc_for_design, encode, ModuleMatrix};

/// Resolved module colors for one render call.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Dark module color.
    pub foreground: Rgba<u8>,
    /// Light module and quiet zone color.
    pub background: Rgba<u8>,
    /// When set, the background is not painted at all (apparel targets).
    pub transparent_background: bool,
}

impl Palette {
    /// Resolves the design's hex colors under the given color mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for malformed hex strings.
    pub fn from_design(
        design: &Design,
        mode: ColorMode,
        transparent_background: bool,
    ) -> Result<Self, Error> {
        let mut foreground = parse_hex_color(&design.colors.foreground)?;
        let mut background = parse_hex_color(&design.colors.background)?;
        if mode == ColorMode::Grayscale {
            foreground = to_grayscale(foreground);
            background = to_grayscale(background);
        }
        Ok(Palette {
            foreground,
            background,
            transparent_background,
        })
    }
}

/*---- Surface primitives ----*/

/// Paints an axis-aligned rectangle. Pixel centers inside `[x0, x0+w) x
/// [y0, y0+h)` are covered; adjacent rectangles tile without gaps.
pub(crate) fn fill_rect(img: &mut RgbaImage, x0: f32, y0: f32, w: f32, h: f32, color: Rgba<u8>) {
    let (width, height) = img.dimensions();
    let px_min = x0.floor().max(0.0) as u32;
    let py_min = y0.floor().max(0.0) as u32;
    let px_max = ((x0 + w).ceil() as u32).min(width);
    let py_max = ((y0 + h).ceil() as u32).min(height);
    for py in py_min..py_max {
        for px in px_min..px_max {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;
            if cx >= x0 && cx < x0 + w && cy >= y0 && cy < y0 + h {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Whether a point lies inside a rounded rectangle with corner radius `r`.
pub(crate) fn in_rounded_rect(px: f32, py: f32, x0: f32, y0: f32, w: f32, h: f32, r: f32) -> bool {
    if px < x0 || px >= x0 + w || py < y0 || py >= y0 + h {
        return false;
    }
    let r = r.min(w / 2.0).min(h / 2.0);
    // Clamp the point to the inner rectangle; outside the corner arcs the
    // distance to the clamped point exceeds the radius.
    let cx = px.clamp(x0 + r, x0 + w - r);
    let cy = py.clamp(y0 + r, y0 + h - r);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/// Whether a point lies inside a circle.
pub(crate) fn in_circle(px: f32, py: f32, cx: f32, cy: f32, r: f32) -> bool {
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/*---- Base draw ----*/

/// Paints the module grid onto a fresh canvas.
///
/// Works the same way for every module pattern: each pixel is mapped back to
/// its module cell and tested against the pattern shape, so module cells tile
/// exactly regardless of fractional module sizes.
pub fn draw_base(
    matrix: &ModuleMatrix,
    geom: &Geometry,
    pattern: ModulePattern,
    palette: &Palette,
) -> RgbaImage {
    let background = if palette.transparent_background {
        Rgba([0, 0, 0, 0])
    } else {
        palette.background
    };
    let mut img = RgbaImage::from_pixel(geom.size, geom.size, background);
    let count = geom.module_count as f32;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let cx = x as f32 + 0.5;
        let cy = y as f32 + 0.5;
        let mx = (cx - geom.offset) / geom.module_size;
        let my = (cy - geom.offset) / geom.module_size;
        if mx < 0.0 || mx >= count || my < 0.0 || my >= count {
            continue;
        }
        let (mx, my) = (mx.floor(), my.floor());
        if !matrix.is_dark(mx as usize, my as usize) {
            continue;
        }
        let ox = geom.offset + mx * geom.module_size;
        let oy = geom.offset + my * geom.module_size;
        let m = geom.module_size;
        let inside = match pattern {
            ModulePattern::Square => true,
            ModulePattern::Dots => in_circle(cx, cy, ox + m / 2.0, oy + m / 2.0, m / 2.0),
            ModulePattern::Rounded => in_rounded_rect(cx, cy, ox, oy, m, m, 0.3 * m),
        };
        if inside {
            *pixel = palette.foreground;
        }
    }
    img
}

/*---- Pipeline ----*/

/// Everything one render call needs.
///
/// `logo` carries the resolved bytes of `design.logo.url`; fetching the
/// resource is the caller's concern. If the design sets a logo and no bytes
/// arrive, the render fails rather than silently producing a logo-less code,
/// because the error correction level was already raised in anticipation.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    /// The payload string to encode.
    pub content: &'a str,
    /// The visual configuration.
    pub design: &'a Design,
    /// Output side length in pixels, before any frame band.
    pub size: u32,
    /// Resolved logo image bytes, when the design sets a logo.
    pub logo: Option<&'a [u8]>,
    /// Font for the frame caption; discovered from the system when absent.
    pub font: Option<&'a FrameFont>,
    /// Quiet zone width in modules.
    pub quiet_zone: u32,
    /// Color intent.
    pub color_mode: ColorMode,
    /// Skip painting the background (apparel targets).
    pub transparent_background: bool,
}

impl<'a> RenderRequest<'a> {
    /// A request with the engine defaults: two-module quiet zone, RGB,
    /// opaque background, no logo bytes, system font discovery.
    pub fn new(content: &'a str, design: &'a Design, size: u32) -> Self {
        RenderRequest {
            content,
            design,
            size,
            logo: None,
            font: None,
            quiet_zone: QUIET_ZONE_MODULES,
            color_mode: ColorMode::Rgb,
            transparent_background: false,
        }
    }
}

/// Runs the full pipeline: encode, base draw, eye overlay, logo, frame.
///
/// # Errors
///
/// Any input, resource, or serialization failure from the taxonomy in
/// [`crate::error::Error`]; no partial output is ever returned.
pub fn render(req: &RenderRequest<'_>) -> Result<RgbaImage, Error> {
    req.design.validate()?;
    let palette = Palette::from_design(req.design, req.color_mode, req.transparent_background)?;
    let ecc = ecc_for_design(req.design);
    let matrix = encode(req.content, ecc)?;
    let geom = Geometry::compute(matrix.size() as u32, req.size, req.quiet_zone)?;
    debug!(
        "rendering {} modules at {:.2}px per module",
        matrix.size(),
        geom.module_size
    );

    let mut img = draw_base(&matrix, &geom, req.design.pattern, &palette);
    overlay_eyes(&mut img, &geom, req.design.eye_style, &palette);

    if let Some(logo) = &req.design.logo {
        let bytes = req.logo.ok_or(Error::LogoUnavailable)?;
        compose_logo(&mut img, bytes, logo.size, &palette)?;
    }

    if let Some(frame) = &req.design.frame {
        if frame.enabled {
            let discovered;
            let font = match req.font {
                Some(font) => font,
                None => {
                    discovered = FrameFont::discover()?;
                    &discovered
                }
            };
            img = compose_frame(img, frame, &palette, font, req.color_mode)?;
        }
    }

    Ok(img)
}

/// Preview entry point: content, design, and a target size.
///
/// # Example
///
/// ```
/// use qr_styler::{render_preview, Design};
///
/// let img = render_preview("https://example.com", &Design::default(), 200).unwrap();
/// assert_eq!(img.dimensions(), (200, 200));
/// ```
pub fn render_preview(content: &str, design: &Design, size: u32) -> Result<RgbaImage, Error> {
    render(&RenderRequest::new(content, design, size))
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::EyeStyle;
    use crate::matrix::EccLevel;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn black_on_white() -> Palette {
        Palette {
            foreground: BLACK,
            background: WHITE,
            transparent_background: false,
        }
    }

    #[test]
    fn test_preview_dimensions() {
        // Surfaces the pipeline debug logs when RUST_LOG is set.
        let _ = env_logger::builder().is_test(true).try_init();
        let img = render_preview("https://example.com", &Design::default(), 200).unwrap();
        assert_eq!(img.dimensions(), (200, 200));
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(
            render_preview("", &Design::default(), 200),
            Err(Error::EmptyPayload)
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            render_preview("https://example.com", &Design::default(), 0),
            Err(Error::ZeroTargetSize)
        ));
    }

    #[test]
    fn test_square_eyes_match_plain_base_draw() {
        // EyeStyle::Square must be a pixel-identical no-op over the base draw.
        let content = "https://example.com/menu";
        let design = Design::default();
        let rendered = render_preview(content, &design, 200).unwrap();

        let matrix = encode(content, EccLevel::M).unwrap();
        let geom = Geometry::compute(matrix.size() as u32, 200, QUIET_ZONE_MODULES).unwrap();
        let base = draw_base(&matrix, &geom, ModulePattern::Square, &black_on_white());
        assert_eq!(rendered.as_raw(), base.as_raw());
    }

    #[test]
    fn test_circle_eyes_redraw_corners_only() {
        let content = "https://menu.example.com/t?table=5";
        let mut design = Design::default();
        design.eye_style = EyeStyle::Circle;

        let circled = render_preview(content, &design, 200).unwrap();
        design.eye_style = EyeStyle::Square;
        let squared = render_preview(content, &design, 200).unwrap();

        assert_eq!(circled.dimensions(), (200, 200));

        let matrix = encode(content, EccLevel::M).unwrap();
        let geom = Geometry::compute(matrix.size() as u32, 200, QUIET_ZONE_MODULES).unwrap();
        let m = geom.module_size;

        // The sharp corner of the top-left finder square is erased by the
        // circular eye: dark when square, background when circled.
        let corner = (
            (geom.offset + 0.2 * m) as u32,
            (geom.offset + 0.2 * m) as u32,
        );
        assert_eq!(*squared.get_pixel(corner.0, corner.1), BLACK);
        assert_eq!(*circled.get_pixel(corner.0, corner.1), WHITE);

        // The eye center stays dark in both styles.
        let center = ((geom.offset + 3.5 * m) as u32, (geom.offset + 3.5 * m) as u32);
        assert_eq!(*squared.get_pixel(center.0, center.1), BLACK);
        assert_eq!(*circled.get_pixel(center.0, center.1), BLACK);

        // Outside the three eye regions every pixel is untouched, including
        // the whole bottom-right corner region which has no finder pattern.
        let eye_span = geom.offset + 7.0 * m;
        let far_edge = 200.0 - eye_span;
        for y in 0..200u32 {
            for x in 0..200u32 {
                let fx = x as f32 + 0.5;
                let fy = y as f32 + 0.5;
                let in_tl = fx < eye_span && fy < eye_span;
                let in_tr = fx >= far_edge && fy < eye_span;
                let in_bl = fx < eye_span && fy >= far_edge;
                if !(in_tl || in_tr || in_bl) {
                    assert_eq!(
                        circled.get_pixel(x, y),
                        squared.get_pixel(x, y),
                        "pixel ({x},{y}) outside the eyes was modified"
                    );
                }
            }
        }
    }

    #[test]
    fn test_dots_pattern_clears_module_corners() {
        let content = "https://example.com";
        let matrix = encode(content, EccLevel::M).unwrap();
        let geom = Geometry::compute(matrix.size() as u32, 400, QUIET_ZONE_MODULES).unwrap();
        let img = draw_base(&matrix, &geom, ModulePattern::Dots, &black_on_white());

        // Module (0, 0) is a dark finder corner; with dots its cell corner is
        // outside the inscribed circle, while the cell center stays dark.
        let m = geom.module_size;
        let (ox, oy) = geom.module_origin(0, 0);
        assert_eq!(*img.get_pixel((ox + m / 2.0) as u32, (oy + m / 2.0) as u32), BLACK);
        assert_eq!(*img.get_pixel((ox + 0.1 * m) as u32, (oy + 0.1 * m) as u32), WHITE);
    }

    #[test]
    fn test_transparent_background() {
        let content = "https://example.com";
        let matrix = encode(content, EccLevel::M).unwrap();
        let geom = Geometry::compute(matrix.size() as u32, 200, QUIET_ZONE_MODULES).unwrap();
        let palette = Palette {
            foreground: BLACK,
            background: WHITE,
            transparent_background: true,
        };
        let img = draw_base(&matrix, &geom, ModulePattern::Square, &palette);
        // Quiet zone pixel carries zero alpha.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_logo_design_without_bytes_fails() {
        let mut design = Design::default();
        design.logo = Some(crate::design::LogoOptions {
            url: "logo.png".to_string(),
            size: 20,
        });
        assert!(matches!(
            render_preview("https://example.com", &design, 200),
            Err(Error::LogoUnavailable)
        ));
    }

    #[test]
    fn test_fill_rect_tiles_without_gaps() {
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        fill_rect(&mut img, 0.0, 0.0, 3.3, 10.0, BLACK);
        fill_rect(&mut img, 3.3, 0.0, 6.7, 10.0, BLACK);
        assert!(img.pixels().all(|p| *p == BLACK));
    }
}
