//! Spectral band model for the optical train
//!
//! The simulator works with a coarse three-region spectrum: ultraviolet below
//! 400nm, infrared above 700nm, and visible light in between (both bounds
//! inclusive). Every material reports one throughput value per region.

use serde::Serialize;

use crate::catalog::{FilterMaterial, MirrorMaterial};

/// Lower edge of the visible region in nanometers (inclusive)
pub const VISIBLE_LOWER_NM: f64 = 400.0;

/// Upper edge of the visible region in nanometers (inclusive)
pub const VISIBLE_UPPER_NM: f64 = 700.0;

/// One of the three spectral regions materials are characterized over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectralRegion {
    Ultraviolet,
    Visible,
    Infrared,
}

impl SpectralRegion {
    /// Classify a wavelength.
    ///
    /// Boundaries are `< 400` for UV and `> 700` for IR, so 400nm and 700nm
    /// both fall in the visible region. There is no blending at the edges.
    pub fn classify(wavelength_nm: f64) -> Self {
        if wavelength_nm < VISIBLE_LOWER_NM {
            SpectralRegion::Ultraviolet
        } else if wavelength_nm > VISIBLE_UPPER_NM {
            SpectralRegion::Infrared
        } else {
            SpectralRegion::Visible
        }
    }
}

/// Per-region throughput of an optical element
pub trait BandResponse {
    fn ultraviolet(&self) -> f64;
    fn visible(&self) -> f64;
    fn infrared(&self) -> f64;

    /// Throughput of the region containing `wavelength_nm`
    fn band_factor(&self, wavelength_nm: f64) -> f64 {
        match SpectralRegion::classify(wavelength_nm) {
            SpectralRegion::Ultraviolet => self.ultraviolet(),
            SpectralRegion::Visible => self.visible(),
            SpectralRegion::Infrared => self.infrared(),
        }
    }
}

impl BandResponse for MirrorMaterial {
    fn ultraviolet(&self) -> f64 {
        self.uv_transmission
    }

    // Mirrors are characterized by reflectivity in the visible band
    fn visible(&self) -> f64 {
        self.reflectivity
    }

    fn infrared(&self) -> f64 {
        self.ir_transmission
    }
}

impl BandResponse for FilterMaterial {
    fn ultraviolet(&self) -> f64 {
        self.uv_transmission
    }

    fn visible(&self) -> f64 {
        self.visible_transmission
    }

    fn infrared(&self) -> f64 {
        self.ir_transmission
    }
}
