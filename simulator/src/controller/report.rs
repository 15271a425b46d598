//! Text output produced by each update

use serde::Serialize;
use std::fmt;

use super::zoom::Overflow;
use super::Configuration;
use crate::compositor::{CompositeOpticalState, ConfigurationVerdict, QualityBucket};
use crate::photometry::transmittance::TransmittanceCurve;
use crate::render::star::StarVariant;

/// Which of the two views a failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Star,
    Chart,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Star => f.write_str("star"),
            SurfaceKind::Chart => f.write_str("chart"),
        }
    }
}

/// A view that could not be repainted during an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFailure {
    pub surface: SurfaceKind,
    pub message: String,
}

/// Per-material explanation texts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanations {
    pub mirror: &'static str,
    pub lens: &'static str,
    pub filter: &'static str,
}

/// Everything the view layer shows after an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateReport {
    pub configuration: Configuration,
    pub mirror_name: &'static str,
    pub lens_name: &'static str,
    pub filter_name: &'static str,
    pub composite: CompositeOpticalState,
    pub quality_bucket: QualityBucket,
    /// e.g. `Image quality: Excellent`
    pub quality_label: String,
    /// e.g. `Field of view: 1.8°`
    pub fov_label: String,
    /// e.g. `Focus: Ideal`
    pub focus_label: String,
    pub fov_degrees: f64,
    pub explanations: Explanations,
    pub zoom_percent: u32,
    /// Whether the zoomed star view scrolls or is clipped
    pub viewport: Overflow,
    /// Variant drawn on the star view, `None` if it failed
    pub star_variant: Option<StarVariant>,
    /// Curve plotted on the chart, `None` if it failed
    pub transmittance: Option<TransmittanceCurve>,
    pub verdict: ConfigurationVerdict,
    pub failures: Vec<RenderFailure>,
}

impl UpdateReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn render_mode(&self) -> String {
        match &self.star_variant {
            Some(variant) => format!("2D vector ({})", variant.describe()),
            None => "unavailable".to_string(),
        }
    }
}

/// The summary block
impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current configuration:")?;
        writeln!(f, "  Mirror: {}", self.mirror_name)?;
        writeln!(f, "  Lens: {}", self.lens_name)?;
        writeln!(f, "  Filter: {}", self.filter_name)?;
        writeln!(f)?;
        writeln!(f, "Results:")?;
        writeln!(f, "  Overall quality: {:.1}%", self.composite.quality * 100.0)?;
        writeln!(
            f,
            "  Image brightness: {:.1}%",
            self.composite.brightness * 100.0
        )?;
        writeln!(f, "  Field of view: {}°", self.fov_degrees)?;
        writeln!(f, "  Zoom: {}%", self.zoom_percent)?;
        writeln!(f, "  Render mode: {}", self.render_mode())?;
        write!(f, "  {}", self.verdict)
    }
}
