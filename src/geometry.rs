//! Pixel-space quantities derived from the module grid and the target size.

use crate::error::Error;

/// Width of the quiet zone in modules, on each side of the code.
///
/// Scanners require a blank border to detect the code; two modules is the
/// engine-wide default. Material presets for generous print media may widen
/// it.
pub const QUIET_ZONE_MODULES: u32 = 2;

/// Derived pixel-space layout of a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Side length of one module in pixels.
    pub module_size: f32,
    /// Top-left pixel coordinate of the first data module (both axes).
    pub offset: f32,
    /// Output canvas side length in pixels, before any frame band.
    pub size: u32,
    /// Modules per side of the grid, quiet zone excluded.
    pub module_count: u32,
    /// Quiet zone width in modules per side.
    pub quiet_zone: u32,
}

impl Geometry {
    /// Derives the layout for a grid of `module_count` modules rendered into
    /// a `target_px` square with a `quiet_zone`-module border.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroTargetSize`] when `target_px` is zero; a
    /// degenerate size is a caller error and is rejected before any drawing.
    pub fn compute(module_count: u32, target_px: u32, quiet_zone: u32) -> Result<Self, Error> {
        if target_px == 0 {
            return Err(Error::ZeroTargetSize);
        }
        let module_size = target_px as f32 / (module_count + 2 * quiet_zone) as f32;
        Ok(Geometry {
            module_size,
            offset: quiet_zone as f32 * module_size,
            size: target_px,
            module_count,
            quiet_zone,
        })
    }

    /// Pixel origin of the module at grid position `(x, y)`.
    pub fn module_origin(&self, x: u32, y: u32) -> (f32, f32) {
        (
            self.offset + x as f32 * self.module_size,
            self.offset + y as f32 * self.module_size,
        )
    }
}
