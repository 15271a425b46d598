//! Photometry models and utilities

pub mod color;
pub mod spectrum;
pub mod transmittance;

pub use color::{quantize_channel, Tint};
pub use spectrum::{BandResponse, SpectralRegion};
pub use transmittance::{TransmittanceCurve, TransmittanceSample};
