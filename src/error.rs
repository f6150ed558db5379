//! Error taxonomy for the styling and export pipeline.
//!
//! Every failure surfaces to the immediate caller; nothing here is transient,
//! so no retry machinery exists anywhere in the crate. Input errors are
//! rejected at the entry points before any drawing happens, and resource
//! errors (a logo that fails to decode) fail the whole render rather than
//! producing a degraded code.

use thiserror::Error;

/// Errors that can occur while building, rendering, or exporting a QR code.
#[derive(Debug, Error)]
pub enum Error {
    /// The payload string resolved to nothing encodable.
    #[error("payload is empty")]
    EmptyPayload,

    /// The matrix provider rejected the payload.
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// A design color was not a `#RRGGBB` hex string.
    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),

    /// The frame caption exceeds the 20 character cap.
    #[error("frame text is {0} characters, maximum is 20")]
    FrameTextTooLong(usize),

    /// The logo size percentage is outside the accepted 10..=100 range.
    #[error("logo size {0}% is outside the accepted range 10-100")]
    InvalidLogoSize(u8),

    /// A zero target size was requested; the geometry has no meaning.
    #[error("target size must be greater than zero")]
    ZeroTargetSize,

    /// An export format key that is not part of the format table.
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),

    /// The design sets a logo but no logo image data was supplied.
    #[error("design sets a logo but no logo data was supplied")]
    LogoUnavailable,

    /// The supplied logo bytes could not be decoded as an image.
    #[error("logo load failed: {0}")]
    LogoLoadFailed(#[source] image::ImageError),

    /// No usable font for rasterizing the frame caption.
    #[error("no usable font found for frame text")]
    FontUnavailable,

    /// PNG serialization of the composed image failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[source] image::ImageError),
}
