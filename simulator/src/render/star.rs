//! Procedural star sprite
//!
//! The star is drawn at the center of a dark sky with a fixed constellation of
//! faint background points. Its appearance is driven by the composite optical
//! state plus two material-specific overrides: a rough mirror scatters the
//! light into blobs, and a fisheye lens wraps the star in distortion rings.
//! All other combinations take the standard path, which layers chromatic
//! fringes, diffraction spikes and the enhanced dielectric cross on top of the
//! base disc as the materials call for them.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shared::image_size::PixelShape;

use super::canvas::{Canvas, DrawOp, GradientStop, Paint, Point, Rgba, Stroke};
use super::RenderError;
use crate::catalog::{LensId, LensMaterial, MirrorId, MirrorMaterial};
use crate::compositor::CompositeOpticalState;
use crate::photometry::color::Tint;

/// Size of the star view
pub const STAR_SURFACE: PixelShape = PixelShape::from_width_height(300, 300);

/// Dark sky fill, `#000011`
pub const SKY_BACKGROUND: Rgba = Rgba::rgb(0x00, 0x00, 0x11);

/// Background stars as (x, y, radius)
pub const CONSTELLATION: [(f64, f64, f64); 9] = [
    (50.0, 50.0, 1.0),
    (100.0, 30.0, 0.5),
    (250.0, 80.0, 1.2),
    (280.0, 150.0, 0.8),
    (200.0, 200.0, 1.0),
    (80.0, 180.0, 0.7),
    (220.0, 50.0, 0.9),
    (30.0, 250.0, 1.1),
    (270.0, 270.0, 0.6),
];

const CONSTELLATION_ALPHA: f64 = 0.6;

/// Aberration above which chromatic fringes appear
pub const FRINGE_ABERRATION_THRESHOLD: f64 = 0.3;

/// Quality above which diffraction spikes appear
pub const SPIKE_QUALITY_THRESHOLD: f64 = 0.7;

const SCATTER_COUNT: usize = 8;
const SCATTER_RADIUS_FACTOR: f64 = 1.5;

const FISHEYE_RINGS: usize = 4;
const FISHEYE_TICKS: usize = 12;

/// Visual treatment chosen for a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarVariant {
    /// Rough mirror: light broken into scattered blobs
    ScatteredBlobs,
    /// Fisheye lens: shrunken disc with distortion rings and edge ticks
    Fisheye,
    /// Base disc with optional overlays
    Standard {
        fringes: bool,
        spikes: bool,
        dielectric: bool,
    },
}

impl StarVariant {
    /// Pick the variant for a configuration.
    ///
    /// The rough mirror wins over the fisheye lens when both are selected.
    pub fn select(
        mirror: &MirrorMaterial,
        lens: &LensMaterial,
        composite: &CompositeOpticalState,
    ) -> Self {
        if mirror.id == MirrorId::Rough {
            StarVariant::ScatteredBlobs
        } else if lens.id == LensId::Fisheye {
            StarVariant::Fisheye
        } else {
            StarVariant::Standard {
                fringes: lens.aberration > FRINGE_ABERRATION_THRESHOLD,
                spikes: composite.quality > SPIKE_QUALITY_THRESHOLD,
                dielectric: mirror.id == MirrorId::Dielectric,
            }
        }
    }

    /// Short description used in logs and the summary block
    pub fn describe(&self) -> String {
        match self {
            StarVariant::ScatteredBlobs => "scattered".to_string(),
            StarVariant::Fisheye => "fisheye".to_string(),
            StarVariant::Standard {
                fringes,
                spikes,
                dielectric,
            } => {
                let mut parts = vec!["standard"];
                if *fringes {
                    parts.push("fringes");
                }
                if *spikes {
                    parts.push("spikes");
                }
                if *dielectric {
                    parts.push("dielectric");
                }
                parts.join("+")
            }
        }
    }
}

fn fill(center: Point, radius: f64, paint: Paint) -> DrawOp {
    DrawOp::FillCircle {
        center,
        radius,
        paint,
    }
}

fn line(from: Point, to: Point, stroke: Stroke) -> DrawOp {
    DrawOp::Line { from, to, stroke }
}

/// Paint the dark sky and constellation, discarding the previous frame
pub fn draw_sky<C: Canvas>(surface: &mut C) -> Result<(), RenderError> {
    surface.clear(SKY_BACKGROUND)?;
    let color = Rgba::new(255, 255, 255, CONSTELLATION_ALPHA);
    for (x, y, radius) in CONSTELLATION {
        surface.draw(fill(Point::new(x, y), radius, Paint::Solid(color)))?;
    }
    Ok(())
}

/// Gradient disc plus bright core
fn draw_disc<C: Canvas>(
    surface: &mut C,
    center: Point,
    radius: f64,
    tint: Tint,
    brightness: f64,
) -> Result<(), RenderError> {
    surface.draw(fill(
        center,
        radius,
        Paint::Radial(vec![
            GradientStop::new(0.0, Rgba::from_tint(tint, 1.0)),
            GradientStop::new(0.3, Rgba::from_tint(tint, brightness * 0.8)),
            GradientStop::new(0.7, Rgba::from_tint(tint, brightness * 0.4)),
            GradientStop::new(1.0, Rgba::TRANSPARENT_WHITE),
        ]),
    ))?;

    surface.draw(fill(
        center,
        radius * 0.3,
        Paint::Radial(vec![
            GradientStop::new(0.0, Rgba::WHITE.with_alpha(brightness)),
            GradientStop::new(1.0, Rgba::from_tint(tint, brightness * 0.5)),
        ]),
    ))
}

/// Red and blue offset discs for lenses with strong chromatic aberration
fn draw_fringes<C: Canvas>(
    surface: &mut C,
    center: Point,
    radius: f64,
    aberration: f64,
) -> Result<(), RenderError> {
    let offset = aberration * 6.0;
    let alpha = aberration * 0.4;

    surface.draw(fill(
        Point::new(center.x + offset, center.y),
        radius * 0.7,
        Paint::Solid(Rgba::new(255, 0, 0, alpha)),
    ))?;
    surface.draw(fill(
        Point::new(center.x - offset, center.y),
        radius * 0.7,
        Paint::Solid(Rgba::new(0, 100, 255, alpha)),
    ))
}

/// Cross of axis-aligned spikes with fainter diagonals
fn draw_spikes<C: Canvas>(
    surface: &mut C,
    center: Point,
    tint: Tint,
    brightness: f64,
) -> Result<(), RenderError> {
    const PRIMARY: f64 = 60.0;
    const DIAGONAL: f64 = 40.0 * 0.7;

    let primary = Stroke::round(Rgba::from_tint(tint, brightness * 0.8), 2.0);
    surface.draw(line(
        Point::new(center.x, center.y - PRIMARY),
        Point::new(center.x, center.y + PRIMARY),
        primary,
    ))?;
    surface.draw(line(
        Point::new(center.x - PRIMARY, center.y),
        Point::new(center.x + PRIMARY, center.y),
        primary,
    ))?;

    let diagonal = Stroke::round(Rgba::from_tint(tint, brightness * 0.4), 1.0);
    surface.draw(line(
        Point::new(center.x - DIAGONAL, center.y - DIAGONAL),
        Point::new(center.x + DIAGONAL, center.y + DIAGONAL),
        diagonal,
    ))?;
    surface.draw(line(
        Point::new(center.x - DIAGONAL, center.y + DIAGONAL),
        Point::new(center.x + DIAGONAL, center.y - DIAGONAL),
        diagonal,
    ))
}

/// Longer, brighter cross and wide glow of a multi-layer dielectric coating
fn draw_dielectric<C: Canvas>(
    surface: &mut C,
    center: Point,
    radius: f64,
    tint: Tint,
    brightness: f64,
) -> Result<(), RenderError> {
    const PRIMARY: f64 = 80.0;
    const SECONDARY_INNER: f64 = 10.0;
    const SECONDARY_OUTER: f64 = 50.0;

    let enhanced = brightness * 1.3;

    let primary = Stroke::round(Rgba::from_tint(tint, enhanced), 3.0);
    surface.draw(line(
        Point::new(center.x, center.y - PRIMARY),
        Point::new(center.x, center.y + PRIMARY),
        primary,
    ))?;
    surface.draw(line(
        Point::new(center.x - PRIMARY, center.y),
        Point::new(center.x + PRIMARY, center.y),
        primary,
    ))?;

    let secondary = Stroke::round(Rgba::from_tint(tint, enhanced * 0.6), 2.0);
    for quadrant in [1.0, 3.0, 5.0, 7.0] {
        let angle = quadrant * TAU / 8.0;
        surface.draw(line(
            center.polar_offset(angle, SECONDARY_INNER),
            center.polar_offset(angle, SECONDARY_OUTER),
            secondary,
        ))?;
    }

    surface.draw(fill(
        center,
        radius * 1.2,
        Paint::Radial(vec![
            GradientStop::new(0.0, Rgba::WHITE.with_alpha(enhanced)),
            GradientStop::new(0.3, Rgba::from_tint(tint, enhanced * 0.8)),
            GradientStop::new(1.0, Rgba::TRANSPARENT_WHITE),
        ]),
    ))
}

fn draw_fisheye<C: Canvas>(
    surface: &mut C,
    center: Point,
    radius: f64,
    tint: Tint,
    brightness: f64,
) -> Result<(), RenderError> {
    draw_disc(surface, center, radius * 0.6, tint, brightness)?;

    for ring in 1..=FISHEYE_RINGS {
        let k = ring as f64;
        surface.draw(DrawOp::StrokeCircle {
            center,
            radius: radius * 0.8 + k * 25.0,
            stroke: Stroke::new(Rgba::from_tint(tint, brightness * 0.1 / k), 2.0),
        })?;
    }

    let tick = Stroke::new(Rgba::from_tint(tint, brightness * 0.2), 1.0);
    let inner = radius + 60.0;
    for i in 0..FISHEYE_TICKS {
        let angle = i as f64 * TAU / FISHEYE_TICKS as f64;
        surface.draw(line(
            center.polar_offset(angle, inner),
            center.polar_offset(angle, inner + 20.0),
            tick,
        ))?;
    }
    Ok(())
}

/// Draws the star view with an injected random source for light scatter
pub struct StarRenderer<R: Rng = StdRng> {
    rng: R,
}

impl StarRenderer<StdRng> {
    /// Renderer with a reproducible scatter pattern
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Renderer seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> StarRenderer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Repaint `surface` for the given configuration.
    ///
    /// # Returns
    /// The variant that was drawn
    pub fn render<C: Canvas>(
        &mut self,
        surface: &mut C,
        composite: &CompositeOpticalState,
        mirror: &MirrorMaterial,
        lens: &LensMaterial,
    ) -> Result<StarVariant, RenderError> {
        let variant = StarVariant::select(mirror, lens, composite);
        let (cx, cy) = surface.shape().center();
        let center = Point::new(cx, cy);
        let radius = composite.star_radius;
        let tint = composite.tint;
        let brightness = composite.brightness;

        draw_sky(surface)?;

        match variant {
            StarVariant::ScatteredBlobs => {
                let scatter_radius = radius * SCATTER_RADIUS_FACTOR;
                self.draw_scattered(surface, center, scatter_radius, tint, brightness)?
            }
            StarVariant::Fisheye => draw_fisheye(surface, center, radius, tint, brightness)?,
            StarVariant::Standard {
                fringes,
                spikes,
                dielectric,
            } => {
                draw_disc(surface, center, radius, tint, brightness)?;
                if fringes {
                    draw_fringes(surface, center, radius, lens.aberration)?;
                }
                if spikes {
                    draw_spikes(surface, center, tint, brightness)?;
                }
                if dielectric {
                    draw_dielectric(surface, center, radius, tint, brightness)?;
                }
            }
        }

        debug!(
            "Star rendered as {} (radius {:.1}px, quality {:.1}%, brightness {:.1}%)",
            variant.describe(),
            radius,
            composite.quality * 100.0,
            brightness * 100.0
        );
        Ok(variant)
    }

    fn draw_scattered<C: Canvas>(
        &mut self,
        surface: &mut C,
        center: Point,
        radius: f64,
        tint: Tint,
        brightness: f64,
    ) -> Result<(), RenderError> {
        for i in 0..SCATTER_COUNT {
            let angle = i as f64 * TAU / SCATTER_COUNT as f64;
            let distance = 15.0 + self.rng.random::<f64>() * 20.0;
            let blob_radius = radius * 0.3 + self.rng.random::<f64>() * 10.0;

            surface.draw(fill(
                center.polar_offset(angle, distance),
                blob_radius,
                Paint::Radial(vec![
                    GradientStop::new(0.0, Rgba::from_tint(tint, brightness * 0.3)),
                    GradientStop::new(1.0, Rgba::TRANSPARENT_WHITE),
                ]),
            ))?;
        }

        draw_disc(surface, center, radius * 0.8, tint.scaled(0.8), brightness * 0.7)
    }
}
