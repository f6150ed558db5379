//! The persisted visual configuration of a QR code.
//!
//! A [`Design`] is created and edited by the back-office CRUD layer and handed
//! to the engine per render call. The engine never mutates it; rendering is a
//! pure transform from (payload, design) to pixels or vector markup.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Maximum number of characters allowed in a frame caption.
pub const MAX_FRAME_TEXT: usize = 20;

/// Foreground and background colors as `#RRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignColors {
    /// Color of the dark modules.
    pub foreground: String,
    /// Color of the light modules and the quiet zone.
    pub background: String,
}

/// Shape used when painting individual data modules.
///
/// Unrecognized values in stored records deserialize to `Square` so a stale
/// design can never break rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ModulePattern {
    /// Plain filled squares, the classic look.
    #[default]
    Square,
    /// One filled circle per dark module.
    Dots,
    /// Squares with slightly rounded corners.
    Rounded,
}

impl From<String> for ModulePattern {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dots" => ModulePattern::Dots,
            "rounded" => ModulePattern::Rounded,
            _ => ModulePattern::Square,
        }
    }
}

/// Visual style of the three finder patterns ("eyes").
///
/// `Square` leaves the default squares from the matrix untouched; an
/// unrecognized value deserializes to `Square` so a stale design record can
/// never break rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EyeStyle {
    /// Default nested squares; the overlay step is skipped entirely.
    #[default]
    Square,
    /// Concentric circles.
    Circle,
    /// Rounded rectangles.
    Rounded,
}

impl From<String> for EyeStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "circle" => EyeStyle::Circle,
            "rounded" => EyeStyle::Rounded,
            _ => EyeStyle::Square,
        }
    }
}

/// Color intent of an export target.
///
/// `Grayscale` is applied at render time by collapsing the design colors to
/// luma. `Cmyk` is carried as a print intent on vector targets; raster
/// formats cannot represent it and render as RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Screen colors, unchanged.
    #[default]
    Rgb,
    /// Print intent for press targets; colors pass through unchanged here.
    Cmyk,
    /// Design colors collapsed to gray at render time.
    Grayscale,
}

/// A user logo overlaid at the center of the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoOptions {
    /// Where the logo image lives; resolving this to bytes is the caller's
    /// concern (the engine only ever sees decoded-ready bytes).
    pub url: String,
    /// Logo side length as a percentage of the output dimension. The UI
    /// offers 15-30; anything in 10..=100 is accepted.
    pub size: u8,
}

/// A caption band appended below the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOptions {
    /// Whether the band is drawn at all.
    pub enabled: bool,
    /// Caption text, at most [`MAX_FRAME_TEXT`] characters. Always uppercased
    /// at render time regardless of stored casing.
    pub text: String,
    /// Band fill color; defaults to the design foreground when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The complete visual configuration of a QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Module colors.
    pub colors: DesignColors,
    /// Data module shape.
    #[serde(default)]
    pub pattern: ModulePattern,
    /// Finder pattern style.
    #[serde(default)]
    pub eye_style: EyeStyle,
    /// Optional centered logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoOptions>,
    /// Optional caption band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameOptions>,
}

impl Default for Design {
    fn default() -> Self {
        Design {
            colors: DesignColors {
                foreground: "#000000".to_string(),
                background: "#FFFFFF".to_string(),
            },
            pattern: ModulePattern::Square,
            eye_style: EyeStyle::Square,
            logo: None,
            frame: None,
        }
    }
}

impl Design {
    /// Checks the design invariants before any rendering starts.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidColor`] if a color is not a `#RRGGBB` string.
    /// * [`Error::InvalidLogoSize`] if `logo.size` is outside 10..=100.
    /// * [`Error::FrameTextTooLong`] if the caption exceeds 20 characters.
    pub fn validate(&self) -> Result<(), Error> {
        parse_hex_color(&self.colors.foreground)?;
        parse_hex_color(&self.colors.background)?;
        if let Some(logo) = &self.logo {
            if !(10..=100).contains(&logo.size) {
                return Err(Error::InvalidLogoSize(logo.size));
            }
        }
        if let Some(frame) = &self.frame {
            let len = frame.text.chars().count();
            if len > MAX_FRAME_TEXT {
                return Err(Error::FrameTextTooLong(len));
            }
            if let Some(color) = &frame.color {
                parse_hex_color(color)?;
            }
        }
        Ok(())
    }
}

/// Parses a `#RRGGBB` hex string into an opaque RGBA pixel.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for anything that is not six hex digits
/// with an optional leading `#`.
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, Error> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    let r = channel(0).map_err(|_| Error::InvalidColor(hex.to_string()))?;
    let g = channel(2).map_err(|_| Error::InvalidColor(hex.to_string()))?;
    let b = channel(4).map_err(|_| Error::InvalidColor(hex.to_string()))?;
    Ok(Rgba([r, g, b, 255]))
}

/// Collapses a pixel to its gray equivalent using the BT.601 weights.
pub fn to_grayscale(color: Rgba<u8>) -> Rgba<u8> {
    let luma = (0.299 * f32::from(color[0])
        + 0.587 * f32::from(color[1])
        + 0.114 * f32::from(color[2]))
    .round() as u8;
    Rgba([luma, luma, luma, color[3]])
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF8000").unwrap(), Rgba([255, 128, 0, 255]));
        assert_eq!(parse_hex_color("000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_default_design() {
        let design = Design::default();
        assert_eq!(design.colors.foreground, "#000000");
        assert_eq!(design.colors.background, "#FFFFFF");
        assert_eq!(design.pattern, ModulePattern::Square);
        assert_eq!(design.eye_style, EyeStyle::Square);
        assert!(design.logo.is_none());
        assert!(design.frame.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_logo_size() {
        let mut design = Design::default();
        design.logo = Some(LogoOptions {
            url: "logo.png".to_string(),
            size: 5,
        });
        assert!(matches!(design.validate(), Err(Error::InvalidLogoSize(5))));

        design.logo = Some(LogoOptions {
            url: "logo.png".to_string(),
            size: 30,
        });
        assert!(design.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_frame_text() {
        let mut design = Design::default();
        design.frame = Some(FrameOptions {
            enabled: true,
            text: "a".repeat(MAX_FRAME_TEXT + 1),
            color: None,
        });
        assert!(matches!(
            design.validate(),
            Err(Error::FrameTextTooLong(21))
        ));
    }

    #[test]
    fn test_unknown_eye_style_falls_back_to_square() {
        // Stale design records must keep rendering with default eyes.
        let json = r##"{
            "colors": {"foreground": "#000000", "background": "#FFFFFF"},
            "eye_style": "hexagon"
        }"##;
        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.eye_style, EyeStyle::Square);
    }

    #[test]
    fn test_design_serde_round_trip() {
        let mut design = Design::default();
        design.eye_style = EyeStyle::Circle;
        design.pattern = ModulePattern::Dots;
        design.frame = Some(FrameOptions {
            enabled: true,
            text: "Scan me".to_string(),
            color: Some("#FF0000".to_string()),
        });
        let json = serde_json::to_string(&design).unwrap();
        let back: Design = serde_json::from_str(&json).unwrap();
        assert_eq!(design, back);
    }

    #[test]
    fn test_grayscale_collapse() {
        assert_eq!(to_grayscale(Rgba([255, 255, 255, 255]))[0], 255);
        assert_eq!(to_grayscale(Rgba([0, 0, 0, 255]))[0], 0);
        let gray = to_grayscale(Rgba([255, 0, 0, 255]));
        assert_eq!(gray[0], gray[1]);
        assert_eq!(gray[1], gray[2]);
    }
}
