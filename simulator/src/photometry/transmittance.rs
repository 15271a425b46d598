//! Throughput of the full optical train as a function of wavelength

use serde::Serialize;

use super::spectrum::BandResponse;
use crate::catalog::{FilterMaterial, LensMaterial, MirrorMaterial};

/// First sampled wavelength in nanometers
pub const SAMPLE_START_NM: u32 = 300;

/// Last sampled wavelength in nanometers (inclusive)
pub const SAMPLE_END_NM: u32 = 800;

/// Spacing between samples in nanometers
pub const SAMPLE_STEP_NM: u32 = 10;

/// A single point on the transmittance curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransmittanceSample {
    pub wavelength_nm: u32,
    /// Fraction of incident light passed (0.0 to 1.0)
    pub transmittance: f64,
}

impl TransmittanceSample {
    pub fn percent(&self) -> f64 {
        self.transmittance * 100.0
    }
}

/// Sampled transmittance of a mirror/lens/filter combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmittanceCurve {
    samples: Vec<TransmittanceSample>,
}

/// Transmittance at a single wavelength.
///
/// The mirror and filter contribute the value for the wavelength's region,
/// the lens contributes its flat visible transmission at every wavelength.
pub fn transmittance_at(
    mirror: &MirrorMaterial,
    lens: &LensMaterial,
    filter: &FilterMaterial,
    wavelength_nm: f64,
) -> f64 {
    mirror.band_factor(wavelength_nm) * lens.transmission * filter.band_factor(wavelength_nm)
}

impl TransmittanceCurve {
    /// Sample the combination from 300nm to 800nm inclusive in 10nm steps.
    pub fn sample(mirror: &MirrorMaterial, lens: &LensMaterial, filter: &FilterMaterial) -> Self {
        let samples = (SAMPLE_START_NM..=SAMPLE_END_NM)
            .step_by(SAMPLE_STEP_NM as usize)
            .map(|wavelength_nm| TransmittanceSample {
                wavelength_nm,
                transmittance: transmittance_at(mirror, lens, filter, wavelength_nm as f64),
            })
            .collect();

        Self { samples }
    }

    pub fn samples(&self) -> &[TransmittanceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample with the highest transmittance; the shortest wavelength wins ties
    pub fn peak(&self) -> Option<TransmittanceSample> {
        self.samples.iter().copied().fold(None, |best, sample| match best {
            Some(b) if b.transmittance >= sample.transmittance => Some(b),
            _ => Some(sample),
        })
    }

    /// Unweighted mean transmittance across all samples
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.transmittance).sum::<f64>() / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{filter, lens, mirror, FilterId, LensId, MirrorId};
    use approx::assert_relative_eq;

    fn silver_fluorite_clear() -> TransmittanceCurve {
        TransmittanceCurve::sample(
            mirror(MirrorId::Silver),
            lens(LensId::Fluorite),
            filter(FilterId::Clear),
        )
    }

    #[test]
    fn test_sample_grid() {
        let curve = silver_fluorite_clear();
        assert_eq!(curve.len(), 51);
        assert_eq!(curve.samples()[0].wavelength_nm, 300);
        assert_eq!(curve.samples()[50].wavelength_nm, 800);
        for pair in curve.samples().windows(2) {
            assert_eq!(pair[1].wavelength_nm - pair[0].wavelength_nm, 10);
        }
    }

    #[test]
    fn test_piecewise_values() {
        let curve = silver_fluorite_clear();
        let at = |nm: u32| {
            curve
                .samples()
                .iter()
                .find(|s| s.wavelength_nm == nm)
                .unwrap()
                .transmittance
        };

        assert_relative_eq!(at(390), 0.6 * 0.98, epsilon = 1e-12);
        assert_relative_eq!(at(400), 0.95 * 0.98, epsilon = 1e-12);
        assert_relative_eq!(at(700), 0.95 * 0.98, epsilon = 1e-12);
        assert_relative_eq!(at(710), 0.95 * 0.98, epsilon = 1e-12);
    }

    #[test]
    fn test_single_wavelength_boundaries() {
        let m = mirror(MirrorId::Gold);
        let l = lens(LensId::Glass);
        let f = filter(FilterId::Red);

        assert_relative_eq!(transmittance_at(m, l, f, 399.0), 0.1 * 0.92 * 0.1);
        assert_relative_eq!(transmittance_at(m, l, f, 400.0), 0.85 * 0.92 * 0.4);
        assert_relative_eq!(transmittance_at(m, l, f, 700.0), 0.85 * 0.92 * 0.4);
        assert_relative_eq!(transmittance_at(m, l, f, 701.0), 0.98 * 0.92 * 0.9);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        for m in MirrorId::ALL {
            for f in FilterId::ALL {
                let a = TransmittanceCurve::sample(mirror(m), lens(LensId::Quartz), filter(f));
                let b = TransmittanceCurve::sample(mirror(m), lens(LensId::Quartz), filter(f));
                assert_eq!(a, b);
                let bits = |c: &TransmittanceCurve| -> Vec<u64> {
                    c.samples().iter().map(|s| s.transmittance.to_bits()).collect()
                };
                assert_eq!(bits(&a), bits(&b));
            }
        }
    }

    #[test]
    fn test_peak_and_mean() {
        let curve = silver_fluorite_clear();
        let peak = curve.peak().unwrap();
        // Visible and IR tie at 0.95 reflectivity; first visible sample wins
        assert_eq!(peak.wavelength_nm, 400);
        assert_relative_eq!(peak.percent(), 95.0 * 0.98, epsilon = 1e-9);

        // 10 UV samples at 0.6, 41 visible/IR samples at 0.95
        let expected = (10.0 * 0.6 + 41.0 * 0.95) * 0.98 / 51.0;
        assert_relative_eq!(curve.mean(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        for m in MirrorId::ALL {
            for l in LensId::ALL {
                for f in FilterId::ALL {
                    let curve = TransmittanceCurve::sample(mirror(m), lens(l), filter(f));
                    assert!(curve
                        .samples()
                        .iter()
                        .all(|s| (0.0..=1.0).contains(&s.transmittance)));
                }
            }
        }
    }
}
