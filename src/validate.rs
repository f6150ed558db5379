//! Stateless validation helpers.
//!
//! Free functions with no rendering dependency: callers run them before a
//! render or export to surface every problem at once instead of failing
//! one-at-a-time.

use crate::design::parse_hex_color;
use crate::payload::{WifiConfig, WifiSecurity};

/// Minimum contrast ratio for a reliable scan.
///
/// Stricter than typical accessibility floors because scanners tolerate less
/// low-contrast noise than human eyes.
pub const MIN_CONTRAST_RATIO: f32 = 4.0;

/// Approximate capacity of a byte-mode QR code at medium error correction.
pub const MAX_CONTENT_LENGTH: usize = 2953;

/// Outcome of a contrast check.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastReport {
    /// Whether the pair clears [`MIN_CONTRAST_RATIO`].
    pub valid: bool,
    /// The WCAG-style contrast ratio, rounded to two decimals.
    pub ratio: f32,
    /// Human-readable explanation when invalid.
    pub message: Option<String>,
}

/// WCAG relative luminance of a hex color. Malformed colors count as black,
/// which makes them fail loudly against dark foregrounds.
fn relative_luminance(hex: &str) -> f32 {
    let Ok(color) = parse_hex_color(hex) else {
        return 0.0;
    };
    let adjust = |c: u8| {
        let c = f32::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * adjust(color[0]) + 0.7152 * adjust(color[1]) + 0.0722 * adjust(color[2])
}

/// Checks whether a foreground/background pair scans reliably.
///
/// # Example
///
/// ```
/// use qr_styler::validate::validate_color_contrast;
///
/// assert!(validate_color_contrast("#000000", "#FFFFFF").valid);
/// assert!(!validate_color_contrast("#FFFFFF", "#FAFAFA").valid);
/// ```
pub fn validate_color_contrast(foreground: &str, background: &str) -> ContrastReport {
    let l1 = relative_luminance(foreground);
    let l2 = relative_luminance(background);
    let ratio = (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05);
    let ratio = (ratio * 100.0).round() / 100.0;
    let valid = ratio >= MIN_CONTRAST_RATIO;
    ContrastReport {
        valid,
        ratio,
        message: if valid {
            None
        } else {
            Some(format!(
                "Contrast ratio {ratio:.1}:1 is too low. Minimum {MIN_CONTRAST_RATIO:.0}:1 required for reliable scanning."
            ))
        },
    }
}

/// Suggests a black or white foreground for the given background, whichever
/// contrasts more.
pub fn contrasting_foreground(background: &str) -> &'static str {
    let Ok(color) = parse_hex_color(background) else {
        return "#000000";
    };
    let luminance = (0.299 * f32::from(color[0])
        + 0.587 * f32::from(color[1])
        + 0.114 * f32::from(color[2]))
        / 255.0;
    if luminance > 0.5 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

/// Validates a WiFi configuration, reporting every violation together.
///
/// The SSID is required for all security types; the password only for
/// secured networks. An empty vector means the configuration is valid.
pub fn validate_wifi_config(config: &WifiConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.ssid.trim().is_empty() {
        errors.push("SSID is required".to_string());
    } else if config.ssid.chars().count() > 32 {
        errors.push("SSID must be 32 characters or less".to_string());
    }

    if config.security != WifiSecurity::Nopass {
        if config.password.trim().is_empty() {
            errors.push("Password is required for secured networks".to_string());
        } else if config.password.chars().count() > 63 {
            errors.push("Password must be 63 characters or less".to_string());
        }
    }

    errors
}

/// Outcome of a content-length check.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentReport {
    /// Whether the content fits a QR code.
    pub valid: bool,
    /// The capacity ceiling used for the check.
    pub max_length: usize,
    /// Length of the checked content.
    pub current_length: usize,
    /// Human-readable explanation when invalid.
    pub message: Option<String>,
}

/// Checks that the payload fits QR capacity.
pub fn validate_content_length(content: &str) -> ContentReport {
    let current_length = content.len();
    let valid = current_length <= MAX_CONTENT_LENGTH;
    ContentReport {
        valid,
        max_length: MAX_CONTENT_LENGTH,
        current_length,
        message: if valid {
            None
        } else {
            Some(format!(
                "Content too long. Maximum {MAX_CONTENT_LENGTH} characters, current: {current_length}"
            ))
        },
    }
}

/// Cheap structural check for destination URLs: an http(s) scheme followed by
/// a non-empty host.
pub fn validate_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| "Invalid URL format".to_string())?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err("Invalid URL format".to_string());
    }
    Ok(())
}
