//! # qr-styler
//!
//! A Rust library for styling QR codes and exporting them for print.
//!
//! `qr-styler` takes a logical payload (a URL or a WiFi credential string)
//! and a persisted visual design, and produces a customized, still-scannable
//! QR code: alternate finder pattern ("eye") styles, module patterns, a
//! centered logo on a contrast island, and a caption band. The composed code
//! serializes into raster or vector formats tuned for physical materials
//! (stickers, paper, apparel, and more).
//!
//! The QR matrix encoding itself is delegated to the `qrcode` crate; this
//! library is the everything-after: geometry, composition, and export.
//!
//! ## Features
//!
//! - Build payloads: menu URLs with tracking parameters, short links, and
//!   escaped `WIFI:` configuration strings.
//! - Style codes with circle/rounded eyes, dot/rounded module patterns,
//!   custom colors, centered logos, and caption frames.
//! - Export as PNG data URIs (512px or 2048px) or SVG markup, with material
//!   presets for eight print media.
//! - Validate color contrast, WiFi configurations, and content length before
//!   rendering.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qr-styler = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a styled preview and export it for a sticker:
//!
//! ```rust
//! use qr_styler::{
//!     export_qr_code, render_preview, Design, EyeStyle, ExportOptions, MaterialPreset,
//! };
//!
//! let mut design = Design::default();
//! design.eye_style = EyeStyle::Circle;
//!
//! let preview = render_preview("https://menu.example.com/t?table=5", &design, 200).unwrap();
//! assert_eq!(preview.dimensions(), (200, 200));
//!
//! let opts = ExportOptions::for_preset(MaterialPreset::Sticker, &design);
//! let export = export_qr_code("https://menu.example.com/t?table=5", &opts).unwrap();
//! assert_eq!(export.mime_type, "image/svg+xml");
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: builds the string a code encodes.
//! - [`matrix`]: adapter over the external QR matrix encoder.
//! - [`geometry`]: pixel-space layout derived from module count and size.
//! - [`render`]: the drawing surface and the composition pipeline.
//! - [`eyes`], [`logo`], [`frame`]: the styling compositors.
//! - [`export`]: serialization into output formats and material presets.
//! - [`validate`]: stateless pre-render checks.

#![forbid(unsafe_code)]

pub mod design;
pub mod error;
pub mod export;
pub mod eyes;
pub mod frame;
pub mod geometry;
pub mod logo;
pub mod matrix;
pub mod payload;
pub mod render;
pub mod validate;

pub use design::{ColorMode, Design, EyeStyle, FrameOptions, LogoOptions, ModulePattern};
pub use error::Error;
pub use export::{export_qr_code, ExportFormat, ExportOptions, ExportResult, MaterialPreset};
pub use frame::FrameFont;
pub use payload::{QrPayload, WifiConfig, WifiSecurity};
pub use render::{render, render_preview, RenderRequest};
