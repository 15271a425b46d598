//! Combine the three selected materials into the values the renderers draw with
//!
//! Everything here is a pure function of the mirror, lens and filter records.
//! The resulting [`CompositeOpticalState`] is recomputed on every update and
//! never stored beyond the render cycle that asked for it.

use serde::Serialize;
use std::fmt;

use crate::catalog::{FilterMaterial, LensMaterial, MirrorMaterial};
use crate::photometry::color::{quantize_channel, Tint};

/// Weight of the mirror in the overall quality score
pub const MIRROR_QUALITY_WEIGHT: f64 = 0.4;

/// Weight of the lens in the overall quality score
pub const LENS_QUALITY_WEIGHT: f64 = 0.4;

/// Weight of the filter in the overall quality score
pub const FILTER_QUALITY_WEIGHT: f64 = 0.2;

/// Star radius in pixels for a perfect (quality 1.0) configuration
pub const BASE_STAR_RADIUS: f64 = 25.0;

/// Extra radius added as quality drops to zero
pub const STAR_RADIUS_SPREAD: f64 = 15.0;

/// Derived optical state for one selection triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeOpticalState {
    /// Weighted quality score in [0, 1]
    pub quality: f64,
    /// Relative brightness; enhanced coatings push this above 1.0
    pub brightness: f64,
    pub tint: Tint,
    /// Radius of the star disc in pixels
    pub star_radius: f64,
}

impl CompositeOpticalState {
    pub fn bucket(&self) -> QualityBucket {
        QualityBucket::classify(self.quality)
    }

    pub fn verdict(&self) -> ConfigurationVerdict {
        ConfigurationVerdict::classify(self.quality)
    }
}

/// Weighted average of the three quality scores
pub fn overall_quality(
    mirror: &MirrorMaterial,
    lens: &LensMaterial,
    filter: &FilterMaterial,
) -> f64 {
    MIRROR_QUALITY_WEIGHT * mirror.quality
        + LENS_QUALITY_WEIGHT * lens.quality
        + FILTER_QUALITY_WEIGHT * filter.quality
}

/// Mirror brightness scaled by lens and filter visible throughput
pub fn overall_brightness(
    mirror: &MirrorMaterial,
    lens: &LensMaterial,
    filter: &FilterMaterial,
) -> f64 {
    mirror.brightness * lens.transmission * filter.visible_transmission
}

/// Disc radius for a quality score; worse optics give a larger, blurrier disc
pub fn star_radius(quality: f64) -> f64 {
    BASE_STAR_RADIUS + (1.0 - quality) * STAR_RADIUS_SPREAD
}

/// Derive quality, brightness, tint and star radius from a selection
pub fn compose(
    mirror: &MirrorMaterial,
    lens: &LensMaterial,
    filter: &FilterMaterial,
) -> CompositeOpticalState {
    let quality = overall_quality(mirror, lens, filter);
    let brightness = overall_brightness(mirror, lens, filter);

    // The lens does not tint the star, only mirror and filter do
    let shift = mirror.color_shift.combine(&filter.color_shift);
    let tint = Tint::new(
        quantize_channel(255.0 * brightness * shift.r),
        quantize_channel(255.0 * brightness * shift.g),
        quantize_channel(255.0 * brightness * shift.b),
    );

    CompositeOpticalState {
        quality,
        brightness,
        tint,
        star_radius: star_radius(quality),
    }
}

/// Display bucket for a quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBucket {
    Excellent,
    Good,
    Average,
    Poor,
}

impl QualityBucket {
    /// Buckets are closed at the bottom: `[0.85, ∞)`, `[0.70, 0.85)`,
    /// `[0.50, 0.70)` and everything below 0.50.
    pub fn classify(quality: f64) -> Self {
        if quality >= 0.85 {
            QualityBucket::Excellent
        } else if quality >= 0.70 {
            QualityBucket::Good
        } else if quality >= 0.50 {
            QualityBucket::Average
        } else {
            QualityBucket::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityBucket::Excellent => "Excellent",
            QualityBucket::Good => "Good",
            QualityBucket::Average => "Average",
            QualityBucket::Poor => "Poor",
        }
    }
}

impl fmt::Display for QualityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall assessment shown at the end of the summary block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationVerdict {
    HighQualityObservation,
    GeneralObservation,
    Limited,
}

impl ConfigurationVerdict {
    pub fn classify(quality: f64) -> Self {
        if quality >= 0.8 {
            ConfigurationVerdict::HighQualityObservation
        } else if quality >= 0.6 {
            ConfigurationVerdict::GeneralObservation
        } else {
            ConfigurationVerdict::Limited
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfigurationVerdict::HighQualityObservation => {
                "Excellent configuration for high-quality observation"
            }
            ConfigurationVerdict::GeneralObservation => {
                "Good configuration for general observation"
            }
            ConfigurationVerdict::Limited => "Configuration limits image quality",
        }
    }
}

impl fmt::Display for ConfigurationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{filter, lens, mirror, FilterId, LensId, MirrorId};
    use approx::assert_relative_eq;

    #[test]
    fn test_silver_fluorite_clear() {
        let state = compose(
            mirror(MirrorId::Silver),
            lens(LensId::Fluorite),
            filter(FilterId::Clear),
        );

        assert_relative_eq!(state.quality, 0.94, epsilon = 1e-12);
        assert_relative_eq!(state.brightness, 1.176, epsilon = 1e-12);
        assert_eq!(state.bucket(), QualityBucket::Excellent);
        assert_eq!(state.verdict(), ConfigurationVerdict::HighQualityObservation);
        assert_relative_eq!(state.star_radius, 25.9, epsilon = 1e-9);
        // 255 * 1.176 overflows an 8-bit channel
        assert_eq!(state.tint, Tint::WHITE);
    }

    #[test]
    fn test_rough_plastic_clear() {
        let state = compose(
            mirror(MirrorId::Rough),
            lens(LensId::Plastic),
            filter(FilterId::Clear),
        );

        assert_relative_eq!(state.quality, 0.44, epsilon = 1e-12);
        assert_eq!(state.bucket(), QualityBucket::Poor);
        assert_eq!(state.verdict(), ConfigurationVerdict::Limited);
        assert_relative_eq!(state.star_radius, 33.4, epsilon = 1e-9);

        // 0.6 * 0.85 = 0.51 brightness, 0.9 shift on every channel
        let channel = (255.0_f64 * 0.51 * 0.9).round() as u8;
        assert_eq!(state.tint, Tint::new(channel, channel, channel));
    }

    #[test]
    fn test_tint_combines_mirror_and_filter() {
        let state = compose(
            mirror(MirrorId::Glass),
            lens(LensId::Glass),
            filter(FilterId::Blue),
        );

        let brightness = 0.7 * 0.92 * 0.3;
        assert_relative_eq!(state.brightness, brightness, epsilon = 1e-12);
        assert_eq!(state.tint.r, (255.0 * brightness * 0.2_f64).round() as u8);
        assert_eq!(state.tint.g, (255.0 * brightness * 0.4_f64).round() as u8);
        assert_eq!(state.tint.b, (255.0 * brightness * 1.5_f64).round() as u8);
    }

    #[test]
    fn test_tint_saturates_for_bright_coatings() {
        let state = compose(
            mirror(MirrorId::Dielectric),
            lens(LensId::Astro),
            filter(FilterId::Clear),
        );
        // 255 * 1.4 * 0.99 is well past 255 on every channel
        assert!(state.brightness > 1.0);
        assert_eq!(state.tint, Tint::WHITE);

        // Gold and red both boost red, but the dim filter keeps it below saturation
        let gold = compose(
            mirror(MirrorId::Gold),
            lens(LensId::Astro),
            filter(FilterId::Red),
        );
        let expected_r = (255.0 * 0.8 * 0.99 * 0.4 * (1.3 * 1.8_f64)).round() as u8;
        assert_eq!(gold.tint.r, expected_r);
        assert!(gold.tint.r < 255);
    }

    #[test]
    fn test_quality_in_unit_range_for_all_triples() {
        for m in MirrorId::ALL {
            for l in LensId::ALL {
                for f in FilterId::ALL {
                    let state = compose(mirror(m), lens(l), filter(f));
                    assert!(
                        (0.0..=1.0).contains(&state.quality),
                        "{m}/{l}/{f} gave {}",
                        state.quality
                    );
                    assert!(state.brightness > 0.0);
                    assert!(state.star_radius >= BASE_STAR_RADIUS);
                    assert!(state.star_radius <= BASE_STAR_RADIUS + STAR_RADIUS_SPREAD);
                }
            }
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(QualityBucket::classify(1.0), QualityBucket::Excellent);
        assert_eq!(QualityBucket::classify(0.85), QualityBucket::Excellent);
        assert_eq!(QualityBucket::classify(0.8499), QualityBucket::Good);
        assert_eq!(QualityBucket::classify(0.70), QualityBucket::Good);
        assert_eq!(QualityBucket::classify(0.6999), QualityBucket::Average);
        assert_eq!(QualityBucket::classify(0.50), QualityBucket::Average);
        assert_eq!(QualityBucket::classify(0.4999), QualityBucket::Poor);
        assert_eq!(QualityBucket::classify(0.0), QualityBucket::Poor);
    }

    #[test]
    fn test_buckets_are_monotonic() {
        // Walking up through [0, 1] must never move to a lower bucket
        let rank = |b: QualityBucket| match b {
            QualityBucket::Poor => 0,
            QualityBucket::Average => 1,
            QualityBucket::Good => 2,
            QualityBucket::Excellent => 3,
        };
        let mut previous = rank(QualityBucket::classify(0.0));
        for step in 0..=10_000 {
            let current = rank(QualityBucket::classify(step as f64 / 10_000.0));
            assert!(current >= previous);
            assert!(current - previous <= 1);
            previous = current;
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(
            ConfigurationVerdict::classify(0.8),
            ConfigurationVerdict::HighQualityObservation
        );
        assert_eq!(
            ConfigurationVerdict::classify(0.79),
            ConfigurationVerdict::GeneralObservation
        );
        assert_eq!(
            ConfigurationVerdict::classify(0.6),
            ConfigurationVerdict::GeneralObservation
        );
        assert_eq!(ConfigurationVerdict::classify(0.59), ConfigurationVerdict::Limited);
    }
}
