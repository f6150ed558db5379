//! Centered logo composition.
//!
//! The logo sits on a padding rectangle of the background color so it rests
//! on a clean contrast island instead of directly atop code modules. Whether
//! that coverage is actually safe for the chosen error correction level is
//! the caller's concern (see [`crate::matrix::ecc_for_design`]); the
//! compositor only places pixels.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;

use crate::error::Error;
use crate::render::{fill_rect, Palette};

/// Fraction of the logo side length used as padding on each side.
const PADDING_RATIO: f32 = 0.1;

/// Decodes, resizes, and overlays the logo at the canvas center.
///
/// The padding rectangle is drawn first, the logo second, so the logo always
/// occludes the island and the island always occludes code modules.
///
/// # Errors
///
/// Returns [`Error::LogoLoadFailed`] when the bytes do not decode as an
/// image. The render as a whole fails in that case; a silently logo-less
/// code would betray the raised error correction level.
pub fn compose_logo(
    img: &mut RgbaImage,
    logo_bytes: &[u8],
    size_percent: u8,
    palette: &Palette,
) -> Result<(), Error> {
    let logo = image::load_from_memory(logo_bytes)
        .map_err(Error::LogoLoadFailed)?
        .to_rgba8();

    let dimension = img.width().min(img.height()) as f32;
    let logo_size = dimension * f32::from(size_percent) / 100.0;
    let padding = logo_size * PADDING_RATIO;
    let island = logo_size + 2.0 * padding;

    let island_x = (img.width() as f32 - island) / 2.0;
    let island_y = (img.height() as f32 - island) / 2.0;
    fill_rect(img, island_x, island_y, island, island, palette.background);

    let side = logo_size.round().max(1.0) as u32;
    let resized = imageops::resize(&logo, side, side, FilterType::Lanczos3);
    let logo_x = (img.width() - side) / 2;
    let logo_y = (img.height() - side) / 2;
    imageops::overlay(img, &resized, i64::from(logo_x), i64::from(logo_y));
    debug!("composited {side}px logo with {padding:.1}px padding");
    Ok(())
}
