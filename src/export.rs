//! Serializes a composed QR code into the supported output formats.
//!
//! Raster targets render through the pixel pipeline and come back as base64
//! data URIs; vector targets are built directly as SVG markup in module
//! units, the way the classic QR SVG path is written. Material presets are an
//! immutable lookup that overrides format and render parameters before the
//! same pipeline runs.

use std::collections::HashMap;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::design::{ColorMode, Design, EyeStyle, ModulePattern};
use crate::error::Error;
use crate::frame::{band_fill_color, FrameFont, FRAME_HEIGHT_RATIO};
use crate::geometry::QUIET_ZONE_MODULES;
use crate::matrix::{ecc_for_design, encode, ModuleMatrix};
use crate::render::{render, Palette, RenderRequest};

/*---- Formats ----*/

/// Output formats of the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// 512px raster, for screens.
    Png,
    /// 2048px raster, for print-quality downloads.
    PngHd,
    /// Vector markup, any scale.
    Svg,
    /// Accepted but currently served as vector markup; see
    /// [`ExportFormat::mime_type`].
    Pdf,
}

impl ExportFormat {
    /// The format key as it appears in export requests.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::PngHd => "png-hd",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the serialized data.
    ///
    /// `Pdf` reports `image/svg+xml`: a true PDF encoder is still an external
    /// collaborator to be, and mislabeling vector markup as
    /// `application/pdf` would be worse than the honest fallback.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png | ExportFormat::PngHd => "image/png",
            ExportFormat::Svg | ExportFormat::Pdf => "image/svg+xml",
        }
    }

    /// File extension matching the actual payload.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png | ExportFormat::PngHd => "png",
            ExportFormat::Svg | ExportFormat::Pdf => "svg",
        }
    }

    /// Recommended output size in pixels.
    pub fn recommended_size(self) -> u32 {
        match self {
            ExportFormat::Png => 512,
            ExportFormat::PngHd => 2048,
            ExportFormat::Svg => 1024,
            ExportFormat::Pdf => 2048,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(ExportFormat::Png),
            "png-hd" => Ok(ExportFormat::PngHd),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/*---- Material presets ----*/

/// Physical print media with tuned export parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialPreset {
    Paper,
    Sticker,
    TentCard,
    Menu,
    Tshirt,
    Banner,
    BusinessCard,
    Newspaper,
}

/// All presets, for enumeration in UIs.
pub const ALL_PRESETS: [MaterialPreset; 8] = [
    MaterialPreset::Paper,
    MaterialPreset::Sticker,
    MaterialPreset::TentCard,
    MaterialPreset::Menu,
    MaterialPreset::Tshirt,
    MaterialPreset::Banner,
    MaterialPreset::BusinessCard,
    MaterialPreset::Newspaper,
];

/// The parameter bundle a preset resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetConfig {
    /// Output format, overriding the request's format.
    pub format: ExportFormat,
    /// Color intent.
    pub color_mode: ColorMode,
    /// Quiet zone width in modules.
    pub quiet_zone: u32,
    /// Print bleed intent; applied by the PDF collaborator once one exists.
    pub include_bleed: bool,
    /// Skip the background fill (apparel transfers).
    pub transparent_background: bool,
}

/// Looks up the immutable parameter bundle for a material.
pub const fn preset_config(preset: MaterialPreset) -> PresetConfig {
    match preset {
        MaterialPreset::Paper => PresetConfig {
            format: ExportFormat::Pdf,
            color_mode: ColorMode::Cmyk,
            quiet_zone: 4,
            include_bleed: true,
            transparent_background: false,
        },
        MaterialPreset::Sticker => PresetConfig {
            format: ExportFormat::Svg,
            color_mode: ColorMode::Rgb,
            quiet_zone: 2,
            include_bleed: false,
            transparent_background: false,
        },
        MaterialPreset::TentCard => PresetConfig {
            format: ExportFormat::Pdf,
            color_mode: ColorMode::Cmyk,
            quiet_zone: 4,
            include_bleed: true,
            transparent_background: false,
        },
        MaterialPreset::Menu => PresetConfig {
            format: ExportFormat::Pdf,
            color_mode: ColorMode::Cmyk,
            quiet_zone: 4,
            include_bleed: false,
            transparent_background: false,
        },
        MaterialPreset::Tshirt => PresetConfig {
            format: ExportFormat::Svg,
            color_mode: ColorMode::Rgb,
            quiet_zone: 2,
            include_bleed: false,
            transparent_background: true,
        },
        MaterialPreset::Banner => PresetConfig {
            format: ExportFormat::Svg,
            color_mode: ColorMode::Rgb,
            quiet_zone: 4,
            include_bleed: false,
            transparent_background: false,
        },
        MaterialPreset::BusinessCard => PresetConfig {
            format: ExportFormat::PngHd,
            color_mode: ColorMode::Rgb,
            quiet_zone: 2,
            include_bleed: false,
            transparent_background: false,
        },
        MaterialPreset::Newspaper => PresetConfig {
            format: ExportFormat::Pdf,
            color_mode: ColorMode::Grayscale,
            quiet_zone: 4,
            include_bleed: false,
            transparent_background: false,
        },
    }
}

/*---- Physical sizing ----*/

/// Screen DPI.
pub const DPI_SCREEN: u32 = 72;
/// Standard print DPI.
pub const DPI_PRINT: u32 = 300;
/// High-quality print DPI.
pub const DPI_HIGH_QUALITY: u32 = 600;

/// Unit of a physical size specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    Px,
    Cm,
    In,
}

/// Converts a physical size into pixels at the given DPI.
pub fn pixel_size(size: f32, unit: SizeUnit, dpi: u32) -> u32 {
    match unit {
        SizeUnit::Px => size.round() as u32,
        SizeUnit::In => (size * dpi as f32).round() as u32,
        // cm to inches (1 in = 2.54 cm), then to pixels.
        SizeUnit::Cm => (size / 2.54 * dpi as f32).round() as u32,
    }
}

/*---- Export ----*/

/// Parameters of one export request.
#[derive(Debug)]
pub struct ExportOptions<'a> {
    /// Requested format; overridden by `preset` when set.
    pub format: ExportFormat,
    /// The visual configuration.
    pub design: &'a Design,
    /// Material preset; resolves format, color mode, quiet zone, and
    /// background handling before the pipeline runs.
    pub preset: Option<MaterialPreset>,
    /// Explicit output size in pixels; defaults to the format's
    /// recommendation.
    pub target_size: Option<u32>,
    /// Explicit quiet zone override in modules.
    pub quiet_zone: Option<u32>,
    /// Explicit color mode override.
    pub color_mode: Option<ColorMode>,
    /// Explicit transparency override.
    pub transparent_background: Option<bool>,
    /// Resolved logo bytes, when the design sets a logo.
    pub logo: Option<&'a [u8]>,
    /// Font for raster frame captions; discovered when absent.
    pub font: Option<&'a FrameFont>,
}

impl<'a> ExportOptions<'a> {
    /// Options with no overrides: the format's recommended size, the default
    /// quiet zone, RGB, opaque background.
    pub fn new(format: ExportFormat, design: &'a Design) -> Self {
        ExportOptions {
            format,
            design,
            preset: None,
            target_size: None,
            quiet_zone: None,
            color_mode: None,
            transparent_background: None,
            logo: None,
            font: None,
        }
    }

    /// Options resolved from a material preset.
    pub fn for_preset(preset: MaterialPreset, design: &'a Design) -> Self {
        let mut opts = ExportOptions::new(preset_config(preset).format, design);
        opts.preset = Some(preset);
        opts
    }
}

/// A serialized export: raster data URI or literal vector markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    /// Base64 data URI (raster) or SVG markup (vector).
    pub data: String,
    /// MIME type matching `data`.
    pub mime_type: String,
    /// Suggested download filename.
    pub filename: String,
}

/// Exports a QR code in the requested format.
///
/// # Errors
///
/// Input, resource, and serialization failures from the taxonomy in
/// [`crate::error::Error`]. Export failures are never transient, so there is
/// no retry here; the caller corrects the input and calls again.
///
/// # Example
///
/// ```
/// use qr_styler::{export_qr_code, Design, ExportFormat, ExportOptions};
///
/// let design = Design::default();
/// let opts = ExportOptions::new(ExportFormat::Svg, &design);
/// let result = export_qr_code("https://example.com", &opts).unwrap();
/// assert_eq!(result.mime_type, "image/svg+xml");
/// ```
pub fn export_qr_code(content: &str, opts: &ExportOptions<'_>) -> Result<ExportResult, Error> {
    let (format, color_mode, quiet_zone, transparent) = match opts.preset {
        Some(preset) => {
            let cfg = preset_config(preset);
            (
                cfg.format,
                opts.color_mode.unwrap_or(cfg.color_mode),
                opts.quiet_zone.unwrap_or(cfg.quiet_zone),
                opts.transparent_background
                    .unwrap_or(cfg.transparent_background),
            )
        }
        None => (
            opts.format,
            opts.color_mode.unwrap_or_default(),
            opts.quiet_zone.unwrap_or(QUIET_ZONE_MODULES),
            opts.transparent_background.unwrap_or(false),
        ),
    };
    let size = opts.target_size.unwrap_or_else(|| format.recommended_size());

    let data = match format {
        ExportFormat::Png | ExportFormat::PngHd => {
            let request = RenderRequest {
                content,
                design: opts.design,
                size,
                logo: opts.logo,
                font: opts.font,
                quiet_zone,
                color_mode,
                transparent_background: transparent,
            };
            let img = render(&request)?;
            png_data_uri(&img)?
        }
        ExportFormat::Svg => {
            styled_svg(content, opts.design, size, quiet_zone, color_mode, transparent, opts.logo)?
        }
        ExportFormat::Pdf => {
            warn!("PDF export is not wired to a PDF encoder yet; serving vector markup");
            styled_svg(content, opts.design, size, quiet_zone, color_mode, transparent, opts.logo)?
        }
    };

    Ok(ExportResult {
        data,
        mime_type: format.mime_type().to_string(),
        filename: format!("qr-code.{}", format.extension()),
    })
}

/// Generates data URIs for many codes in one pass.
///
/// Per-item failures do not abort the batch: they are logged and recorded as
/// empty strings so the caller can surface them next to the successes.
pub fn batch_generate(
    items: &[(String, String)],
    opts: &ExportOptions<'_>,
) -> HashMap<String, String> {
    let mut results = HashMap::with_capacity(items.len());
    for (id, content) in items {
        match export_qr_code(content, opts) {
            Ok(result) => {
                results.insert(id.clone(), result.data);
            }
            Err(err) => {
                warn!("batch item {id} failed: {err}");
                results.insert(id.clone(), String::new());
            }
        }
    }
    results
}

/*---- Serialization helpers ----*/

/// Encodes a composed image as a base64 PNG data URI.
fn png_data_uri(img: &RgbaImage) -> Result<String, Error> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(Error::PngEncode)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(&bytes)))
}

fn rgba_to_hex(color: Rgba<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Whether a module sits inside one of the three finder pattern regions.
fn in_eye_region(x: usize, y: usize, n: usize) -> bool {
    (x < 7 && y < 7) || (x >= n - 7 && y < 7) || (x < 7 && y >= n - 7)
}

/// Builds styled SVG markup for the code, working in module units with the
/// quiet zone folded into the view box.
fn styled_svg(
    content: &str,
    design: &Design,
    target_px: u32,
    quiet_zone: u32,
    color_mode: ColorMode,
    transparent_background: bool,
    logo_bytes: Option<&[u8]>,
) -> Result<String, Error> {
    design.validate()?;
    if target_px == 0 {
        return Err(Error::ZeroTargetSize);
    }
    let palette = Palette::from_design(design, color_mode, transparent_background)?;
    let matrix = encode(content, ecc_for_design(design))?;
    let n = matrix.size();
    let q = quiet_zone as f32;
    let dim = n as f32 + 2.0 * q;
    let fg = rgba_to_hex(palette.foreground);
    let bg = rgba_to_hex(palette.background);

    let frame = design.frame.as_ref().filter(|f| f.enabled);
    let frame_units = if frame.is_some() { dim * FRAME_HEIGHT_RATIO } else { 0.0 };
    let total_units = dim + frame_units;
    let height_px = (target_px as f32 * total_units / dim).round() as u32;

    let mut svg = String::new();
    svg += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    svg += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{target_px}\" height=\"{height_px}\" viewBox=\"0 0 {dim} {total_units}\" stroke=\"none\">\n"
    );
    if !transparent_background {
        svg += &format!("\t<rect width=\"{dim}\" height=\"{dim}\" fill=\"{bg}\"/>\n");
    }

    let skip_eyes = design.eye_style != EyeStyle::Square;
    svg += &modules_markup(&matrix, design.pattern, q, &fg, skip_eyes);
    if skip_eyes {
        svg += &eyes_markup(design.eye_style, n, q, &fg, &bg);
    }

    if let Some(logo) = &design.logo {
        let bytes = logo_bytes.ok_or(Error::LogoUnavailable)?;
        svg += &logo_markup(bytes, logo.size, dim, &bg)?;
    }

    if let Some(frame) = frame {
        let band_color = rgba_to_hex(band_fill_color(frame, &palette, color_mode)?);
        let caption = xml_escape(&frame.text.trim().to_uppercase());
        svg += &format!(
            "\t<rect x=\"0\" y=\"{dim}\" width=\"{dim}\" height=\"{frame_units}\" fill=\"{band_color}\"/>\n"
        );
        if !caption.is_empty() {
            svg += &format!(
                "\t<text x=\"{x}\" y=\"{y}\" font-family=\"sans-serif\" font-weight=\"bold\" font-size=\"{fs}\" fill=\"{bg}\" text-anchor=\"middle\" dominant-baseline=\"central\">{caption}</text>\n",
                x = dim / 2.0,
                y = dim + frame_units / 2.0,
                fs = frame_units * 0.5,
            );
        }
    }

    svg += "</svg>\n";
    Ok(svg)
}

/// Markup for the dark data modules, one shape per module (or a single path
/// for plain squares).
fn modules_markup(
    matrix: &ModuleMatrix,
    pattern: ModulePattern,
    q: f32,
    fg: &str,
    skip_eyes: bool,
) -> String {
    let n = matrix.size();
    let mut out = String::new();
    match pattern {
        ModulePattern::Square => {
            let mut path = String::new();
            for y in 0..n {
                for x in 0..n {
                    if !matrix.is_dark(x, y) || (skip_eyes && in_eye_region(x, y, n)) {
                        continue;
                    }
                    if !path.is_empty() {
                        path += " ";
                    }
                    path += &format!("M{},{}h1v1h-1z", x as f32 + q, y as f32 + q);
                }
            }
            out += &format!("\t<path d=\"{path}\" fill=\"{fg}\"/>\n");
        }
        ModulePattern::Dots | ModulePattern::Rounded => {
            out += &format!("\t<g fill=\"{fg}\">\n");
            for y in 0..n {
                for x in 0..n {
                    if !matrix.is_dark(x, y) || (skip_eyes && in_eye_region(x, y, n)) {
                        continue;
                    }
                    let (mx, my) = (x as f32 + q, y as f32 + q);
                    match pattern {
                        ModulePattern::Dots => {
                            out += &format!(
                                "\t\t<circle cx=\"{}\" cy=\"{}\" r=\"0.5\"/>\n",
                                mx + 0.5,
                                my + 0.5
                            );
                        }
                        _ => {
                            out += &format!(
                                "\t\t<rect x=\"{mx}\" y=\"{my}\" width=\"1\" height=\"1\" rx=\"0.3\"/>\n"
                            );
                        }
                    }
                }
            }
            out += "\t</g>\n";
        }
    }
    out
}

/// Markup for the three styled finder patterns.
fn eyes_markup(style: EyeStyle, n: usize, q: f32, fg: &str, bg: &str) -> String {
    let n = n as f32;
    let origins = [(q, q), (q + n - 7.0, q), (q, q + n - 7.0)];
    let mut out = String::new();
    for (ox, oy) in origins {
        match style {
            EyeStyle::Square => {}
            EyeStyle::Circle => {
                let (cx, cy) = (ox + 3.5, oy + 3.5);
                out += &format!("\t<circle cx=\"{cx}\" cy=\"{cy}\" r=\"3.5\" fill=\"{fg}\"/>\n");
                out += &format!("\t<circle cx=\"{cx}\" cy=\"{cy}\" r=\"2.5\" fill=\"{bg}\"/>\n");
                out += &format!("\t<circle cx=\"{cx}\" cy=\"{cy}\" r=\"1.5\" fill=\"{fg}\"/>\n");
            }
            EyeStyle::Rounded => {
                out += &format!(
                    "\t<rect x=\"{ox}\" y=\"{oy}\" width=\"7\" height=\"7\" rx=\"1.5\" fill=\"{fg}\"/>\n"
                );
                out += &format!(
                    "\t<rect x=\"{}\" y=\"{}\" width=\"5\" height=\"5\" rx=\"1.2\" fill=\"{bg}\"/>\n",
                    ox + 1.0,
                    oy + 1.0
                );
                out += &format!(
                    "\t<rect x=\"{}\" y=\"{}\" width=\"3\" height=\"3\" rx=\"0.9\" fill=\"{fg}\"/>\n",
                    ox + 2.0,
                    oy + 2.0
                );
            }
        }
    }
    out
}

/// Markup for the centered logo: the padding island rect, then the logo
/// itself embedded as a PNG data URI.
fn logo_markup(bytes: &[u8], size_percent: u8, dim: f32, bg: &str) -> Result<String, Error> {
    // Decoding validates the bytes and normalizes the embed to PNG.
    let logo = image::load_from_memory(bytes)
        .map_err(Error::LogoLoadFailed)?
        .to_rgba8();
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(logo.as_raw(), logo.width(), logo.height(), ExtendedColorType::Rgba8)
        .map_err(Error::PngEncode)?;

    let logo_units = dim * f32::from(size_percent) / 100.0;
    let padding = logo_units * 0.1;
    let island = logo_units + 2.0 * padding;
    let island_origin = (dim - island) / 2.0;
    let logo_origin = (dim - logo_units) / 2.0;

    let mut out = String::new();
    out += &format!(
        "\t<rect x=\"{island_origin}\" y=\"{island_origin}\" width=\"{island}\" height=\"{island}\" fill=\"{bg}\"/>\n"
    );
    out += &format!(
        "\t<image x=\"{logo_origin}\" y=\"{logo_origin}\" width=\"{logo_units}\" height=\"{logo_units}\" preserveAspectRatio=\"none\" href=\"data:image/png;base64,{}\"/>\n",
        BASE64.encode(&png)
    );
    Ok(out)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::FrameOptions;

    #[test]
    fn test_format_mime_table() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::PngHd.mime_type(), "image/png");
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
        // Documented gap: pdf serves the vector fallback MIME.
        assert_eq!(ExportFormat::Pdf.mime_type(), "image/svg+xml");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("png-hd".parse::<ExportFormat>().unwrap(), ExportFormat::PngHd);
        assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            "gif".parse::<ExportFormat>(),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_recommended_sizes() {
        assert_eq!(ExportFormat::Png.recommended_size(), 512);
        assert_eq!(ExportFormat::PngHd.recommended_size(), 2048);
        assert_eq!(ExportFormat::Pdf.recommended_size(), 2048);
    }

    #[test]
    fn test_preset_table() {
        let paper = preset_config(MaterialPreset::Paper);
        assert_eq!(paper.format, ExportFormat::Pdf);
        assert_eq!(paper.color_mode, ColorMode::Cmyk);
        assert!(paper.include_bleed);
        assert_eq!(paper.quiet_zone, 4);

        let tshirt = preset_config(MaterialPreset::Tshirt);
        assert_eq!(tshirt.format, ExportFormat::Svg);
        assert!(tshirt.transparent_background);
        assert_eq!(tshirt.quiet_zone, 2);

        let sticker = preset_config(MaterialPreset::Sticker);
        assert_eq!(sticker.format, ExportFormat::Svg);
        assert_eq!(sticker.quiet_zone, 2);

        let banner = preset_config(MaterialPreset::Banner);
        assert_eq!(banner.format, ExportFormat::Svg);
        assert_eq!(banner.quiet_zone, 4);

        assert_eq!(preset_config(MaterialPreset::Newspaper).color_mode, ColorMode::Grayscale);
        assert_eq!(preset_config(MaterialPreset::Newspaper).format, ExportFormat::Pdf);
        assert_eq!(preset_config(MaterialPreset::BusinessCard).format, ExportFormat::PngHd);
        assert_eq!(preset_config(MaterialPreset::Menu).color_mode, ColorMode::Cmyk);
        assert_eq!(preset_config(MaterialPreset::Menu).format, ExportFormat::Pdf);

        let tent = preset_config(MaterialPreset::TentCard);
        assert_eq!(tent.format, ExportFormat::Pdf);
        assert_eq!(tent.color_mode, ColorMode::Cmyk);
        assert!(tent.include_bleed);

        assert_eq!(ALL_PRESETS.len(), 8);
    }

    #[test]
    fn test_png_export_round_trip() {
        let design = Design::default();
        let opts = ExportOptions::new(ExportFormat::Png, &design);
        let result = export_qr_code("https://example.com", &opts).unwrap();

        assert_eq!(result.mime_type, "image/png");
        assert_eq!(result.filename, "qr-code.png");
        let encoded = result
            .data
            .strip_prefix("data:image/png;base64,")
            .expect("raster data must be a PNG data URI");
        let bytes = BASE64.decode(encoded).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 512);
        assert_eq!(img.height(), 512);
    }

    #[test]
    fn test_svg_export_markup() {
        let mut design = Design::default();
        design.eye_style = crate::design::EyeStyle::Circle;
        design.frame = Some(FrameOptions {
            enabled: true,
            text: "Scan me".to_string(),
            color: None,
        });
        let opts = ExportOptions::new(ExportFormat::Svg, &design);
        let result = export_qr_code("https://example.com", &opts).unwrap();

        assert_eq!(result.mime_type, "image/svg+xml");
        assert!(result.data.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(result.data.contains("viewBox"));
        // Three circular eyes, three shapes each.
        assert_eq!(result.data.matches("<circle").count(), 9);
        // Caption drawn uppercased.
        assert!(result.data.contains(">SCAN ME</text>"));
    }

    #[test]
    fn test_pdf_falls_back_to_vector() {
        let design = Design::default();
        let opts = ExportOptions::new(ExportFormat::Pdf, &design);
        let result = export_qr_code("https://example.com", &opts).unwrap();
        assert_eq!(result.mime_type, "image/svg+xml");
        assert!(result.data.contains("<svg"));
        assert_eq!(result.filename, "qr-code.svg");
    }

    #[test]
    fn test_tshirt_preset_omits_background() {
        let design = Design::default();
        let opts = ExportOptions::for_preset(MaterialPreset::Tshirt, &design);
        let result = export_qr_code("https://example.com", &opts).unwrap();
        assert_eq!(result.mime_type, "image/svg+xml");
        assert!(!result.data.contains("fill=\"#FFFFFF\""));
    }

    #[test]
    fn test_newspaper_preset_grayscales_colors() {
        let mut design = Design::default();
        design.colors.foreground = "#FF0000".to_string();
        let opts = ExportOptions::for_preset(MaterialPreset::Newspaper, &design);
        let result = export_qr_code("https://example.com", &opts).unwrap();
        // BT.601 luma of pure red is 76.
        assert!(result.data.contains("fill=\"#4C4C4C\""));
        assert!(!result.data.contains("#FF0000"));
    }

    #[test]
    fn test_unsupported_size_rejected() {
        let design = Design::default();
        let mut opts = ExportOptions::new(ExportFormat::Svg, &design);
        opts.target_size = Some(0);
        assert!(matches!(
            export_qr_code("https://example.com", &opts),
            Err(Error::ZeroTargetSize)
        ));
    }

    #[test]
    fn test_pixel_size_conversions() {
        assert_eq!(pixel_size(512.0, SizeUnit::Px, DPI_PRINT), 512);
        assert_eq!(pixel_size(2.0, SizeUnit::In, DPI_PRINT), 600);
        assert_eq!(pixel_size(2.54, SizeUnit::Cm, DPI_PRINT), 300);
        assert_eq!(pixel_size(1.0, SizeUnit::In, DPI_SCREEN), 72);
        assert_eq!(pixel_size(1.0, SizeUnit::In, DPI_HIGH_QUALITY), 600);
    }

    #[test]
    fn test_batch_records_failures_as_empty() {
        let design = Design::default();
        let opts = ExportOptions::new(ExportFormat::Png, &design);
        let items = vec![
            ("table-1".to_string(), "https://example.com/t?table=1".to_string()),
            ("broken".to_string(), "   ".to_string()),
        ];
        let results = batch_generate(&items, &opts);
        assert_eq!(results.len(), 2);
        assert!(results["table-1"].starts_with("data:image/png;base64,"));
        assert_eq!(results["broken"], "");
    }
}
