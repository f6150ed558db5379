//! Adapter over the external QR matrix encoder.
//!
//! The encoder itself is a black box: it takes a payload string and an error
//! correction level and hands back a square boolean module grid with the
//! quiet zone excluded. Everything downstream works against [`ModuleMatrix`]
//! and never touches the `qrcode` crate directly.

use log::debug;
use qrcode::{EcLevel, QrCode};

use crate::design::Design;
use crate::error::Error;

/// Error correction tiers the engine requests.
///
/// Higher tiers tolerate more visual occlusion (a centered logo) at the cost
/// of a denser matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccLevel {
    /// Medium, the default for plain codes.
    M,
    /// High, requested whenever a logo will cover part of the code.
    H,
}

impl From<EccLevel> for EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::M => EcLevel::M,
            EccLevel::H => EcLevel::H,
        }
    }
}

/// Picks the error correction level for a design.
///
/// `H` whenever a logo is present, `M` otherwise. This is a deliberate
/// approximation: the engine does not compute whether the logo's actual
/// coverage fits the ~30% redundancy budget of level H; it only makes sure
/// the budget is as large as it can be.
pub fn ecc_for_design(design: &Design) -> EccLevel {
    if design.logo.is_some() {
        EccLevel::H
    } else {
        EccLevel::M
    }
}

/// A square boolean module grid, quiet zone excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Side length of the grid in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at `(x, y)` is dark. Out-of-range coordinates are
    /// light, matching how the quiet zone behaves.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let size = rows.len();
        let modules = rows.into_iter().flatten().collect();
        ModuleMatrix { size, modules }
    }
}

/// Encodes a payload string into a module grid.
///
/// # Errors
///
/// * [`Error::EmptyPayload`] if the payload is blank.
/// * [`Error::Encode`] if the encoder rejects the payload (e.g. too long).
pub fn encode(payload: &str, ecc: EccLevel) -> Result<ModuleMatrix, Error> {
    if payload.trim().is_empty() {
        return Err(Error::EmptyPayload);
    }
    let code = QrCode::with_error_correction_level(payload, ecc.into())?;
    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();
    debug!("encoded {} bytes into a {size}x{size} matrix", payload.len());
    Ok(ModuleMatrix { size, modules })
}
