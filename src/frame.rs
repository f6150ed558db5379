//! Caption band appended below the code.
//!
//! The band height is one size-proportional constant for every path, preview
//! and export alike. The caption is uppercased at render time regardless of
//! stored casing; its length is capped at the design layer, not here.

use image::{imageops, Rgba, RgbaImage};
use log::debug;
use rusttype::{point, Font, Scale};

use crate::design::{parse_hex_color, to_grayscale, ColorMode, FrameOptions};
use crate::error::Error;
use crate::render::{fill_rect, Palette};

/// Band height as a fraction of the output side length.
pub const FRAME_HEIGHT_RATIO: f32 = 0.15;

/// Caption font size as a fraction of the band height.
const TEXT_HEIGHT_RATIO: f32 = 0.5;

/// Bold faces tried by [`FrameFont::discover`], in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Band height in pixels for a given output size.
pub fn frame_height(size: u32) -> u32 {
    ((size as f32 * FRAME_HEIGHT_RATIO).round() as u32).max(1)
}

/// The caption string as it is actually drawn.
pub fn caption_text(text: &str) -> String {
    text.to_uppercase()
}

/// A font usable for rasterizing frame captions.
///
/// SVG output renders captions as `<text>` elements and never needs one;
/// raster output does, so loading is fallible and explicit.
pub struct FrameFont {
    font: Font<'static>,
}

impl std::fmt::Debug for FrameFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FrameFont")
    }
}

impl FrameFont {
    /// Loads a font from raw TTF/OTF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontUnavailable`] if the bytes are not a parseable
    /// font.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        Font::try_from_vec(bytes)
            .map(|font| FrameFont { font })
            .ok_or(Error::FontUnavailable)
    }

    /// Looks for a bold sans-serif face in the usual system locations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontUnavailable`] when none of the candidates exist.
    pub fn discover() -> Result<Self, Error> {
        for path in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(font) = FrameFont::from_bytes(bytes) {
                    debug!("frame font discovered at {path}");
                    return Ok(font);
                }
            }
        }
        Err(Error::FontUnavailable)
    }
}

/// Resolves the band fill color under the given color mode.
///
/// The palette colors already carry the mode, but `frame.color` is raw hex
/// from the design record and converts here.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for a malformed band color.
pub(crate) fn band_fill_color(
    frame: &FrameOptions,
    palette: &Palette,
    mode: ColorMode,
) -> Result<Rgba<u8>, Error> {
    match &frame.color {
        Some(hex) => {
            let color = parse_hex_color(hex)?;
            Ok(if mode == ColorMode::Grayscale {
                to_grayscale(color)
            } else {
                color
            })
        }
        None => Ok(palette.foreground),
    }
}

/// Extends the canvas downward and draws the caption band.
///
/// The band is filled with `frame.color` (design foreground by default) and
/// the uppercased caption is centered both ways in the design background
/// color, sized to half the band height.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for a malformed band color.
pub fn compose_frame(
    qr: RgbaImage,
    frame: &FrameOptions,
    palette: &Palette,
    font: &FrameFont,
    mode: ColorMode,
) -> Result<RgbaImage, Error> {
    let band_color = band_fill_color(frame, palette, mode)?;
    let width = qr.width();
    let band_height = frame_height(width);
    let mut out = RgbaImage::from_pixel(width, qr.height() + band_height, palette.background);
    imageops::replace(&mut out, &qr, 0, 0);

    let band_y = qr.height() as f32;
    fill_rect(&mut out, 0.0, band_y, width as f32, band_height as f32, band_color);

    let caption = caption_text(frame.text.trim());
    if !caption.is_empty() {
        draw_caption(
            &mut out,
            &font.font,
            &caption,
            band_y,
            band_height as f32,
            palette.background,
        );
    }
    Ok(out)
}

/// Rasterizes the caption centered in the band, alpha-blending glyph
/// coverage over the band fill.
fn draw_caption(
    img: &mut RgbaImage,
    font: &Font<'static>,
    caption: &str,
    band_y: f32,
    band_height: f32,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(band_height * TEXT_HEIGHT_RATIO);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(caption, scale, point(0.0, v_metrics.ascent))
        .collect();

    let text_width = glyphs
        .iter()
        .rev()
        .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x as f32))
        .next()
        .unwrap_or(0.0);
    let text_height = v_metrics.ascent - v_metrics.descent;
    let origin_x = (img.width() as f32 - text_width) / 2.0;
    let origin_y = band_y + (band_height - text_height) / 2.0;

    let (width, height) = img.dimensions();
    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = (origin_x + (bb.min.x + gx as i32) as f32).round();
            let py = (origin_y + (bb.min.y + gy as i32) as f32).round();
            if px < 0.0 || py < 0.0 {
                return;
            }
            let (px, py) = (px as u32, py as u32);
            if px >= width || py >= height {
                return;
            }
            let base = *img.get_pixel(px, py);
            img.put_pixel(px, py, blend(base, color, coverage));
        });
    }
}

/// Blends `top` over `base` with the given coverage.
fn blend(base: Rgba<u8>, top: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |b: u8, t: u8| (f32::from(b) * (1.0 - a) + f32::from(t) * a).round() as u8;
    Rgba([
        mix(base[0], top[0]),
        mix(base[1], top[1]),
        mix(base[2], top[2]),
        base[3].max((a * 255.0).round() as u8),
    ])
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn palette() -> Palette {
        Palette {
            foreground: BLACK,
            background: WHITE,
            transparent_background: false,
        }
    }

    #[test]
    fn test_frame_height_is_proportional() {
        // One constant on every path: 15% of the output size.
        assert_eq!(frame_height(200), 30);
        assert_eq!(frame_height(512), 77);
        assert_eq!(frame_height(2048), 307);
        assert_eq!(frame_height(1), 1);
    }

    #[test]
    fn test_caption_is_uppercased() {
        assert_eq!(caption_text("Scan me"), "SCAN ME");
        assert_eq!(caption_text("menü"), "MENÜ");
        assert_eq!(caption_text("ALREADY"), "ALREADY");
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(WHITE, BLACK, 0.0), WHITE);
        assert_eq!(blend(WHITE, BLACK, 1.0), BLACK);
    }

    #[test]
    fn test_compose_frame_extends_canvas_and_fills_band() {
        // Needs a system font; environments without one skip the assertion
        // body but still exercise discovery.
        let Ok(font) = FrameFont::discover() else {
            return;
        };
        let qr = RgbaImage::from_pixel(200, 200, WHITE);
        let frame = FrameOptions {
            enabled: true,
            text: "Scan me".to_string(),
            color: Some("#FF0000".to_string()),
        };
        let out = compose_frame(qr, &frame, &palette(), &font, ColorMode::Rgb).unwrap();
        assert_eq!(out.dimensions(), (200, 230));
        // Band corner, away from any glyph, carries the band color.
        assert_eq!(*out.get_pixel(2, 215), Rgba([255, 0, 0, 255]));
        // The original image region is untouched.
        assert_eq!(*out.get_pixel(100, 100), WHITE);
    }

    #[test]
    fn test_band_color_follows_color_mode() {
        let frame = FrameOptions {
            enabled: true,
            text: "Scan me".to_string(),
            color: Some("#FF0000".to_string()),
        };
        // BT.601 luma of pure red is 76.
        assert_eq!(
            band_fill_color(&frame, &palette(), ColorMode::Grayscale).unwrap(),
            Rgba([76, 76, 76, 255])
        );
        assert_eq!(
            band_fill_color(&frame, &palette(), ColorMode::Rgb).unwrap(),
            Rgba([255, 0, 0, 255])
        );

        let no_color = FrameOptions {
            enabled: true,
            text: "Scan me".to_string(),
            color: None,
        };
        // Without an explicit color the band takes the palette foreground,
        // which already carries the mode.
        assert_eq!(
            band_fill_color(&no_color, &palette(), ColorMode::Grayscale).unwrap(),
            BLACK
        );
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            FrameFont::from_bytes(vec![0u8; 16]),
            Err(Error::FontUnavailable)
        ));
    }
}
