//! Builds the logical string a QR code encodes.
//!
//! Everything in this module is a pure function over structured input: menu
//! URLs with tracking parameters, short-link URLs, and `WIFI:` configuration
//! strings. No rendering types appear here.

use serde::{Deserialize, Serialize};

/// Default base URL for customer-facing menu links.
pub const DEFAULT_MENU_BASE_URL: &str = "https://menu.gudbro.com";

/// Default base URL for shortened links.
pub const DEFAULT_SHORT_BASE_URL: &str = "https://go.gudbro.com";

/// Security mode of a WiFi network, as encoded in the `WIFI:` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiSecurity {
    /// WPA/WPA2/WPA3.
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    /// Legacy WEP.
    #[serde(rename = "WEP")]
    Wep,
    /// Open network, no password.
    #[serde(rename = "nopass")]
    Nopass,
}

impl WifiSecurity {
    /// The token used in the `WIFI:T:` field.
    pub fn as_str(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Nopass => "nopass",
        }
    }
}

/// Structured input for a WiFi QR code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WifiConfig {
    /// Network name. Required for every security type.
    pub ssid: String,
    /// Network password. Ignored by scanners when `security` is `Nopass`.
    pub password: String,
    /// Security mode.
    pub security: WifiSecurity,
    /// Whether the network hides its SSID broadcast.
    pub hidden: bool,
}

/// Traffic source baked into a marketing QR URL.
///
/// A closed set so the tracking parameter never needs URL escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficSource {
    GoogleMaps,
    Instagram,
    Facebook,
    Tripadvisor,
    Flyer,
    Event,
    Website,
    Email,
    Other,
}

impl TrafficSource {
    /// The token used in the `source` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficSource::GoogleMaps => "google_maps",
            TrafficSource::Instagram => "instagram",
            TrafficSource::Facebook => "facebook",
            TrafficSource::Tripadvisor => "tripadvisor",
            TrafficSource::Flyer => "flyer",
            TrafficSource::Event => "event",
            TrafficSource::Website => "website",
            TrafficSource::Email => "email",
            TrafficSource::Other => "other",
        }
    }
}

/// The logical content of a QR code, before any rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    /// A plain destination URL.
    Url(String),
    /// A WiFi credential string built from structured input.
    Wifi(WifiConfig),
}

impl QrPayload {
    /// Produces the string handed to the matrix provider.
    pub fn to_payload_string(&self) -> String {
        match self {
            QrPayload::Url(url) => url.clone(),
            QrPayload::Wifi(config) => wifi_string(config),
        }
    }
}

/// Escapes the characters the `WIFI:` scheme reserves: `\`, `;`, `,`, `:`.
///
/// The backslash is escaped first so already-escaped characters are not
/// double-processed.
fn escape_wifi_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | ';' | ',' | ':' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Formats a [`WifiConfig`] as a `WIFI:` scheme string.
///
/// # Example
///
/// ```
/// use qr_styler::payload::{wifi_string, WifiConfig, WifiSecurity};
///
/// let config = WifiConfig {
///     ssid: "CafeWifi".to_string(),
///     password: String::new(),
///     security: WifiSecurity::Nopass,
///     hidden: false,
/// };
/// assert_eq!(wifi_string(&config), "WIFI:T:nopass;S:CafeWifi;P:;H:false;;");
/// ```
pub fn wifi_string(config: &WifiConfig) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        config.security.as_str(),
        escape_wifi_field(&config.ssid),
        escape_wifi_field(&config.password),
        config.hidden
    )
}

/// Builds the menu URL for a specific table.
pub fn table_url(merchant_slug: &str, table_number: u32, base_url: &str) -> String {
    format!("{base_url}/{merchant_slug}/menu?table={table_number}")
}

/// Builds a marketing URL carrying a traffic-source tracking parameter.
pub fn external_url(merchant_slug: &str, source: TrafficSource, base_url: &str) -> String {
    format!("{base_url}/{merchant_slug}?source={}", source.as_str())
}

/// Builds a shortened link URL from a stored short code.
pub fn short_url(short_code: &str, base_url: &str) -> String {
    format!("{base_url}/{short_code}")
}
